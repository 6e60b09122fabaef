//! MeSH tree number parsing and decomposition.
//!
//! Tree numbers place a descriptor in the MeSH hierarchy: a branch letter
//! followed by dot-separated numeric groups, one group per hierarchy level
//! (`C10.228.140.300`). The remote service sometimes serves them as full
//! URIs (`http://id.nlm.nih.gov/mesh/C10.228.140.300`), so construction
//! comes in a lenient and a strict flavor.

use nom::{
    character::complete::{char, digit1, satisfy},
    combinator::{all_consuming, recognize},
    multi::many0_count,
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{TreeNumberError, TreeNumberResult};

/// A MeSH tree number token.
///
/// Two ways to build one:
/// - [`TreeNumber::from_token`] normalizes leniently: URI-style locators are
///   reduced to their final path segment, anything else passes through
///   unchanged. This never fails; downstream processing is position-based
///   and tolerates unusual tokens.
/// - [`TreeNumber::parse`] validates the token against the
///   `letter digits ('.' digits)*` shape and rejects everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNumber(String);

impl TreeNumber {
    /// Normalizes a raw tree-number token.
    ///
    /// Accepts either a bare token (`D04.345.566`) or a URI-style locator,
    /// in which case the final path segment is taken.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        let tail = if token.starts_with("http://") || token.starts_with("https://") {
            match token.rfind('/') {
                Some(idx) => &token[idx + 1..],
                None => token,
            }
        } else {
            token
        };
        TreeNumber(tail.to_string())
    }

    /// Parses a tree number strictly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mesh_trees::TreeNumber;
    ///
    /// let tree = TreeNumber::parse("C10.228.140.300").unwrap();
    /// assert_eq!(tree.top_code(), "C10");
    ///
    /// assert!(TreeNumber::parse("not a tree").is_err());
    /// ```
    pub fn parse(input: &str) -> TreeNumberResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TreeNumberError::EmptyTreeNumber);
        }

        match all_consuming(tree_number_token)(input) {
            Ok((_, token)) => Ok(TreeNumber(token.to_string())),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let position = input.len() - e.input.len();
                Err(TreeNumberError::ParseError {
                    position,
                    message: format!("unexpected input at: '{}'", truncate(e.input, 20)),
                })
            }
            Err(nom::Err::Incomplete(_)) => Err(TreeNumberError::ParseError {
                position: input.len(),
                message: "incomplete tree number".to_string(),
            }),
        }
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token matches the strict tree number shape.
    pub fn is_well_formed(&self) -> bool {
        TreeNumber::parse(&self.0).is_ok()
    }

    /// The top-level code: everything before the first `.`.
    ///
    /// A dot-free token is its own top-level code (`D04` stays `D04`).
    pub fn top_code(&self) -> &str {
        match self.0.find('.') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// The branch letter, when the token starts with an uppercase letter.
    pub fn branch(&self) -> Option<char> {
        self.0.chars().next().filter(|c| c.is_ascii_uppercase())
    }
}

impl std::fmt::Display for TreeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TreeNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Grammar
// ============================================================================

/// Parse a tree number token: `letter digits ('.' digits)*`
fn tree_number_token(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        satisfy(|c| c.is_ascii_uppercase()),
        digit1,
        many0_count(preceded(char('.'), digit1)),
    )))(input)
}

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Tests
// ============================================================================
