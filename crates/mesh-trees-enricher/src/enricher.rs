//! Identifier enrichment over a [`MeshQueryable`] service.

use mesh_trees::{MeshId, TreeNumber};
use tracing::debug;

use crate::cache::LabelCache;
use crate::config::EnricherConfig;
use crate::error::EnrichResult;
use crate::record::ConceptRecord;
use crate::resolver::DescriptorResolver;
use crate::result::Enrichment;
use crate::statistics::ResolverStats;
use crate::traits::MeshQueryable;

/// Turns a single identifier into its derived output values.
///
/// The enricher fetches the concept record, follows one preferred-mapping
/// hop when the record carries no tree numbers, and resolves a label for
/// each distinct top-level code through a shared [`DescriptorResolver`].
///
/// ```ignore
/// let enricher = Enricher::with_config(&service, &config);
/// let enrichment = enricher.enrich(&MeshId::parse("MESH:D003924"))?;
/// ```
pub struct Enricher<'a> {
    service: &'a dyn MeshQueryable,
    resolver: DescriptorResolver<'a>,
}

impl<'a> Enricher<'a> {
    /// Creates an enricher with default configuration.
    pub fn new(service: &'a dyn MeshQueryable) -> Self {
        Self::with_config(service, &EnricherConfig::default())
    }

    /// Creates an enricher sized and tuned per `config`.
    pub fn with_config(service: &'a dyn MeshQueryable, config: &EnricherConfig) -> Self {
        Self {
            service,
            resolver: DescriptorResolver::new(service, config),
        }
    }

    /// Fetches and derives the added values for `id`.
    ///
    /// A record without tree numbers but with a preferred mapping is
    /// replaced wholesale by the mapped record when that fetch succeeds.
    /// A record with neither is still a success: the label comes back
    /// and the tree-derived values stay empty.
    pub fn enrich(&self, id: &MeshId) -> EnrichResult<Enrichment> {
        let record = self.service.fetch_record(id.code())?;
        let (record, via_mapping) = if record.has_tree_numbers() {
            (record, false)
        } else {
            self.follow_mapping(record)
        };
        Ok(self.derive(record, via_mapping))
    }

    /// A snapshot of the shared resolver counters.
    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }

    /// The shared label cache.
    pub fn label_cache(&self) -> &LabelCache {
        self.resolver.cache()
    }

    fn follow_mapping(&self, record: ConceptRecord) -> (ConceptRecord, bool) {
        let target = match record.mapped_to.as_deref() {
            Some(code) => code.to_string(),
            None => return (record, false),
        };
        match self.service.fetch_record(&target) {
            Ok(mapped) => (mapped, true),
            Err(error) => {
                debug!("Mapped record fetch failed for {target}: {error}");
                (record, false)
            }
        }
    }

    fn derive(&self, record: ConceptRecord, via_mapping: bool) -> Enrichment {
        let tree_labels = vec![record.label.clone(); record.tree_numbers.len()];

        let mut top_codes: Vec<String> = Vec::new();
        for tree in &record.tree_numbers {
            let top = tree.top_code();
            if !top.is_empty() && !top_codes.iter().any(|code| code == top) {
                top_codes.push(top.to_string());
            }
        }
        let top_labels = top_codes
            .iter()
            .map(|code| self.resolver.resolve(&TreeNumber::from_token(code)))
            .collect();

        Enrichment {
            label: record.label,
            tree_numbers: record.tree_numbers,
            tree_labels,
            top_codes,
            top_labels,
            via_mapping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichError;
    use std::collections::HashMap;

    struct MockService {
        records: HashMap<String, ConceptRecord>,
        labels: HashMap<String, String>,
    }

    impl MockService {
        fn new() -> Self {
            let mut records = HashMap::new();
            records.insert(
                "D003924".to_string(),
                ConceptRecord {
                    label: "Diabetes Mellitus, Type 2".to_string(),
                    tree_numbers: vec![
                        TreeNumber::from_token("C18.452.394.750.149"),
                        TreeNumber::from_token("C19.246.300"),
                    ],
                    mapped_to: None,
                },
            );
            records.insert(
                "C537159".to_string(),
                ConceptRecord {
                    label: "Alstrom syndrome".to_string(),
                    tree_numbers: Vec::new(),
                    mapped_to: Some("D003924".to_string()),
                },
            );
            records.insert(
                "C000001".to_string(),
                ConceptRecord {
                    label: "Orphan Concept".to_string(),
                    tree_numbers: Vec::new(),
                    mapped_to: None,
                },
            );
            records.insert(
                "C000002".to_string(),
                ConceptRecord {
                    label: "Dangling Mapping".to_string(),
                    tree_numbers: Vec::new(),
                    mapped_to: Some("D999999".to_string()),
                },
            );

            let mut labels = HashMap::new();
            labels.insert(
                "C18".to_string(),
                "Nutritional and Metabolic Diseases".to_string(),
            );
            labels.insert("C19".to_string(), "Endocrine System Diseases".to_string());

            Self { records, labels }
        }
    }

    impl MeshQueryable for MockService {
        fn fetch_record(&self, code: &str) -> EnrichResult<ConceptRecord> {
            match self.records.get(code) {
                Some(record) => Ok(record.clone()),
                None => Err(EnrichError::NotFound(code.to_string())),
            }
        }

        fn descriptor_label_at(&self, tree: &TreeNumber) -> EnrichResult<Option<String>> {
            Ok(self.labels.get(tree.as_str()).cloned())
        }
    }

    #[test]
    fn test_enrich_descriptor_with_trees() {
        let service = MockService::new();
        let enricher = Enricher::new(&service);

        let enrichment = enricher.enrich(&MeshId::parse("MESH:D003924")).unwrap();
        assert_eq!(enrichment.label, "Diabetes Mellitus, Type 2");
        assert_eq!(enrichment.tree_numbers.len(), 2);
        assert_eq!(
            enrichment.tree_labels,
            vec![
                "Diabetes Mellitus, Type 2".to_string(),
                "Diabetes Mellitus, Type 2".to_string(),
            ]
        );
        assert_eq!(enrichment.top_codes, vec!["C18", "C19"]);
        assert_eq!(
            enrichment.top_labels,
            vec![
                "Nutritional and Metabolic Diseases".to_string(),
                "Endocrine System Diseases".to_string(),
            ]
        );
        assert!(!enrichment.via_mapping);
    }

    #[test]
    fn test_top_codes_deduplicated_first_seen() {
        let mut service = MockService::new();
        service.records.insert(
            "D000001".to_string(),
            ConceptRecord {
                label: "Shared Branch".to_string(),
                tree_numbers: vec![
                    TreeNumber::from_token("C18.452"),
                    TreeNumber::from_token("C18.888"),
                    TreeNumber::from_token("C19.246"),
                ],
                mapped_to: None,
            },
        );
        let enricher = Enricher::new(&service);

        let enrichment = enricher.enrich(&MeshId::parse("D000001")).unwrap();
        assert_eq!(enrichment.top_codes, vec!["C18", "C19"]);
        assert_eq!(enrichment.top_labels.len(), 2);
    }

    #[test]
    fn test_mapping_hop_replaces_record() {
        let service = MockService::new();
        let enricher = Enricher::new(&service);

        let enrichment = enricher.enrich(&MeshId::parse("MESH:C537159")).unwrap();
        assert!(enrichment.via_mapping);
        assert_eq!(enrichment.label, "Diabetes Mellitus, Type 2");
        assert_eq!(enrichment.top_codes, vec!["C18", "C19"]);
    }

    #[test]
    fn test_failed_mapping_keeps_original_record() {
        let service = MockService::new();
        let enricher = Enricher::new(&service);

        let enrichment = enricher.enrich(&MeshId::parse("C000002")).unwrap();
        assert!(!enrichment.via_mapping);
        assert_eq!(enrichment.label, "Dangling Mapping");
        assert!(enrichment.tree_numbers.is_empty());
    }

    #[test]
    fn test_record_without_trees_or_mapping_is_success() {
        let service = MockService::new();
        let enricher = Enricher::new(&service);

        let enrichment = enricher.enrich(&MeshId::parse("C000001")).unwrap();
        assert_eq!(enrichment.label, "Orphan Concept");
        assert!(enrichment.tree_numbers.is_empty());
        assert!(enrichment.top_codes.is_empty());
        assert!(!enrichment.via_mapping);
    }

    #[test]
    fn test_unknown_id_propagates_not_found() {
        let service = MockService::new();
        let enricher = Enricher::new(&service);

        let result = enricher.enrich(&MeshId::parse("D999999"));
        assert!(matches!(result, Err(EnrichError::NotFound(code)) if code == "D999999"));
    }

    #[test]
    fn test_top_label_queries_cached_across_calls() {
        let service = MockService::new();
        let enricher = Enricher::new(&service);

        enricher.enrich(&MeshId::parse("D003924")).unwrap();
        enricher.enrich(&MeshId::parse("D003924")).unwrap();

        let stats = enricher.resolver_stats();
        assert_eq!(stats.cache_misses, 2);
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(enricher.label_cache().len(), 2);
    }
}
