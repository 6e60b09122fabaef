//! # mesh-trees
//!
//! A Rust library for MeSH (Medical Subject Headings) identifiers and
//! tree numbers.
//!
//! This crate provides:
//! - **Identifier normalization**: Turn prefixed (`MESH:D015059`) or bare
//!   (`D015059`) identifiers into a normalized form with a record class
//! - **Tree numbers**: Parse, validate and decompose tree-number tokens
//!   such as `C10.228.140.300`
//! - **Branch table**: The sixteen fixed top-level MeSH categories
//!   (`A` Anatomy through `Z` Geographicals)
//!
//! ## Identifier Usage
//!
//! ```rust
//! use mesh_trees::{MeshClass, MeshId};
//!
//! let id = MeshId::parse("MESH:D015059");
//! assert_eq!(id.code(), "D015059");
//! assert_eq!(id.class(), MeshClass::Descriptor);
//!
//! // Bare identifiers pass through unchanged
//! let id = MeshId::parse("C537043");
//! assert_eq!(id.class(), MeshClass::SupplementaryConcept);
//! ```
//!
//! ## Tree Number Usage
//!
//! ```rust
//! use mesh_trees::TreeNumber;
//!
//! // Strict parsing validates the token shape
//! let tree = TreeNumber::parse("D04.345.566").unwrap();
//! assert_eq!(tree.top_code(), "D04");
//! assert_eq!(tree.branch(), Some('D'));
//!
//! // Lenient normalization accepts URI-style locators
//! let tree = TreeNumber::from_token("http://id.nlm.nih.gov/mesh/D04.345.566");
//! assert_eq!(tree.as_str(), "D04.345.566");
//! ```
//!
//! ## Tree Number Shape
//!
//! | Part | Meaning | Example |
//! |------|---------|---------|
//! | Branch letter | Top-level category | `D` (Chemicals and Drugs) |
//! | First group | Top-level code, letter included | `D04` |
//! | Dotted groups | One hierarchy level each | `D04.345.566` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod branches;
mod error;
mod ident;
mod tree;

pub use error::{TreeNumberError, TreeNumberResult};
pub use ident::{MeshClass, MeshId};
pub use tree::TreeNumber;
