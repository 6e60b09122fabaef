//! # mesh-trees-enricher
//!
//! MeSH identifier enrichment engine over the NLM linked-data service.
//!
//! This crate bridges the [`mesh_trees`] identifier and tree-number types
//! and a queryable MeSH service to enrich tabular identifier lists with
//! hierarchical classification data.
//!
//! ## Key Features
//!
//! - **Service seam** - the [`MeshQueryable`] trait swaps the live NLM
//!   client for a fixture in tests
//! - **One-hop mapping** - supplementary concepts without tree numbers
//!   follow their preferred mapping once
//! - **Memoized labels** - LRU top-code label cache with negative entries
//! - **Row-level failure** - a bad row blanks its added columns and the
//!   run continues
//!
//! ## Quick Start
//!
//! ```ignore
//! use mesh_trees_enricher::{EnricherConfig, EnrichmentPipeline, MeshRdfClient};
//! use std::path::Path;
//!
//! let config = EnricherConfig::default();
//! let client = MeshRdfClient::new(&config)?;
//!
//! let pipeline = EnrichmentPipeline::new(&client, &config);
//! let stats = pipeline.run(
//!     Path::new("ctd-mesh-ids.tsv"),
//!     Path::new("ctd-mesh-ids-enriched.tsv"),
//!     None,
//! )?;
//! println!("{stats}");
//! ```
//!
//! ## With Configuration
//!
//! ```ignore
//! use mesh_trees_enricher::{CacheConfig, EnricherConfig};
//! use std::time::Duration;
//!
//! let config = EnricherConfig::builder()
//!     .with_timeout(Duration::from_secs(30))
//!     .with_delay(Duration::from_millis(500))
//!     .with_cache(CacheConfig { max_entries: 10_000 })
//!     .with_branch_fallback(true)
//!     .build();
//! ```
//!
//! ## Output Columns
//!
//! | Column | Content |
//! |--------|---------|
//! | `MESH_LABEL` | the concept's label |
//! | `MESH_TREE_NUMBERS` | tree numbers, `;`-joined |
//! | `MESH_TREE_LABELS` | owning descriptor's label, once per tree number |
//! | `MESH_TREE_TOP_CODES` | deduplicated top-level codes |
//! | `MESH_TREE_TOP_LABELS` | labels resolved for the top-level codes |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     mesh-trees-enricher                      │
//! │                                                              │
//! │  EnrichmentPipeline                                          │
//! │  ├── read TSV rows, parse MeshId (mesh-trees)               │
//! │  ├── Enricher: fetch record, follow one mapping hop         │
//! │  ├── DescriptorResolver: top-code labels via LabelCache     │
//! │  └── write input columns + five added columns               │
//! │                                                              │
//! │  Dependencies:                                               │
//! │  ├── mesh-trees - MeshId, TreeNumber, branch table          │
//! │  ├── reqwest    - blocking MeshRdfClient (MeshQueryable)    │
//! │  └── csv        - tab-separated reader/writer               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod client;
mod config;
mod enricher;
mod error;
mod pipeline;
mod record;
mod resolver;
mod result;
mod statistics;
mod traits;

// Public re-exports
pub use cache::{CacheStats, LabelCache};
pub use client::MeshRdfClient;
pub use config::{
    CacheConfig, EnricherConfig, EnricherConfigBuilder, DEFAULT_BASE_URL, DEFAULT_SPARQL_URL,
};
pub use enricher::Enricher;
pub use error::{EnrichError, EnrichResult};
pub use pipeline::{count_rows, EnrichmentPipeline, ADDED_COLUMNS, ID_COLUMN};
pub use record::ConceptRecord;
pub use resolver::DescriptorResolver;
pub use result::Enrichment;
pub use statistics::{ResolverStats, RunStats};
pub use traits::MeshQueryable;

// Re-export commonly used types from dependencies for convenience
pub use mesh_trees::{MeshClass, MeshId, TreeNumber};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // Verify all public types are accessible
        let _: Option<CacheConfig> = None;
        let _: Option<EnricherConfig> = None;
        let _: Option<Enrichment> = None;
        let _: Option<RunStats> = None;
        let _: Option<EnrichResult<()>> = None;
    }

    #[test]
    fn test_re_exports() {
        // Verify re-exports work
        let id = MeshId::parse("MESH:D003924");
        assert_eq!(id.code(), "D003924");
        let tree = TreeNumber::from_token("C18.452.394.750.149");
        assert_eq!(tree.top_code(), "C18");
    }
}
