//! MeSH identifier normalization and classification.

// =============================================================================
// Record Class
// =============================================================================

/// Record class of a MeSH identifier, derived from its leading letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeshClass {
    /// Descriptor record: `D...`
    Descriptor,
    /// Supplementary concept record: `C...`
    SupplementaryConcept,
    /// Any other code shape (qualifiers, malformed input).
    Other,
}

impl MeshClass {
    /// Classifies a bare code by its first character.
    pub fn of_code(code: &str) -> Self {
        match code.chars().next() {
            Some('D') => MeshClass::Descriptor,
            Some('C') => MeshClass::SupplementaryConcept,
            _ => MeshClass::Other,
        }
    }
}

impl std::fmt::Display for MeshClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshClass::Descriptor => write!(f, "descriptor"),
            MeshClass::SupplementaryConcept => write!(f, "supplementary concept"),
            MeshClass::Other => write!(f, "other"),
        }
    }
}

// =============================================================================
// MeshId
// =============================================================================

/// A normalized MeSH identifier.
///
/// Built with [`MeshId::parse`], which strips the `MESH:` prefix when
/// present, trims surrounding whitespace and classifies the remaining bare
/// code. Normalization never fails: whatever is left after stripping becomes
/// the bare code, and codes that fit no known class are
/// [`MeshClass::Other`].
///
/// Example: `MESH:D015059` and `D015059` both normalize to the bare code
/// `D015059` with class [`MeshClass::Descriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshId {
    code: String,
    class: MeshClass,
}

impl MeshId {
    /// Normalizes a raw identifier cell into a `MeshId`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let code = trimmed.strip_prefix("MESH:").unwrap_or(trimmed).trim();
        MeshId {
            class: MeshClass::of_code(code),
            code: code.to_string(),
        }
    }

    /// The bare code without the `MESH:` prefix.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The record class derived from the leading letter.
    pub fn class(&self) -> MeshClass {
        self.class
    }

    /// Whether this is a descriptor record identifier (`D...`).
    pub fn is_descriptor(&self) -> bool {
        self.class == MeshClass::Descriptor
    }

    /// Whether this is a supplementary concept record identifier (`C...`).
    pub fn is_supplementary(&self) -> bool {
        self.class == MeshClass::SupplementaryConcept
    }

    /// Whether the bare code is empty (blank input cell).
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl std::fmt::Display for MeshId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

// ============================================================================
// Tests
// ============================================================================
