//! Traits for remote MeSH lookups.
//!
//! This module defines the [`MeshQueryable`] trait, the single seam
//! between the enrichment engine and the remote MeSH RDF service.
//!
//! # Architecture Note
//!
//! The engine never talks HTTP directly. The trait is implemented by
//! [`MeshRdfClient`](crate::MeshRdfClient) for the live service, and by
//! in-memory doubles in tests, which keeps every engine test offline.
//!
//! # Example: An In-Memory Implementation
//!
//! ```ignore
//! use mesh_trees::TreeNumber;
//! use mesh_trees_enricher::{ConceptRecord, EnrichError, EnrichResult, MeshQueryable};
//!
//! struct FixtureService {
//!     records: std::collections::HashMap<String, ConceptRecord>,
//! }
//!
//! impl MeshQueryable for FixtureService {
//!     fn fetch_record(&self, code: &str) -> EnrichResult<ConceptRecord> {
//!         self.records
//!             .get(code)
//!             .cloned()
//!             .ok_or_else(|| EnrichError::NotFound(code.to_string()))
//!     }
//!
//!     fn descriptor_label_at(&self, _tree: &TreeNumber) -> EnrichResult<Option<String>> {
//!         Ok(None)
//!     }
//! }
//! ```

use mesh_trees::TreeNumber;

use crate::error::EnrichResult;
use crate::record::ConceptRecord;

/// Trait for services that answer MeSH record and label lookups.
pub trait MeshQueryable: Send + Sync {
    /// Fetches the concept record for a bare identifier code.
    ///
    /// Failures here are row-level: missing records, transport errors and
    /// undecodable payloads are all reported as errors, and the caller
    /// decides what they blank.
    fn fetch_record(&self, code: &str) -> EnrichResult<ConceptRecord>;

    /// Finds the label of the descriptor at an exact tree position.
    ///
    /// Returns `Ok(None)` when no descriptor sits at the position. That
    /// outcome is a definitive answer and is safe to memoize, unlike an
    /// `Err`, which describes a failed call.
    fn descriptor_label_at(&self, tree: &TreeNumber) -> EnrichResult<Option<String>>;
}
