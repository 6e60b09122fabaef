//! Configuration types for the enricher.

use std::time::Duration;

/// Default record endpoint of the NLM MeSH RDF service.
pub const DEFAULT_BASE_URL: &str = "https://id.nlm.nih.gov/mesh";

/// Default SPARQL endpoint of the NLM MeSH RDF service.
pub const DEFAULT_SPARQL_URL: &str = "https://id.nlm.nih.gov/mesh/sparql";

/// Configuration for the enrichment engine.
///
/// # Example
///
/// ```rust
/// use mesh_trees_enricher::{CacheConfig, EnricherConfig};
/// use std::time::Duration;
///
/// let config = EnricherConfig::builder()
///     .with_timeout(Duration::from_secs(5))
///     .with_delay(Duration::from_millis(500))
///     .with_cache(CacheConfig { max_entries: 1024 })
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Record endpoint; codes are appended as `/{code}.json`.
    pub base_url: String,
    /// SPARQL endpoint for descriptor-at-position queries.
    pub sparql_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause inserted after each processed row.
    pub delay: Duration,
    /// Label cache configuration.
    pub cache: CacheConfig,
    /// Label unresolved top-level codes from the static branch table.
    pub branch_fallback: bool,
}

impl EnricherConfig {
    /// Creates a new builder for EnricherConfig.
    pub fn builder() -> EnricherConfigBuilder {
        EnricherConfigBuilder::default()
    }
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sparql_url: DEFAULT_SPARQL_URL.to_string(),
            timeout: Duration::from_secs(10),
            delay: Duration::from_millis(200),
            cache: CacheConfig::default(),
            branch_fallback: false,
        }
    }
}

/// Builder for EnricherConfig.
#[derive(Debug, Clone, Default)]
pub struct EnricherConfigBuilder {
    base_url: Option<String>,
    sparql_url: Option<String>,
    timeout: Option<Duration>,
    delay: Option<Duration>,
    cache: Option<CacheConfig>,
    branch_fallback: bool,
}

impl EnricherConfigBuilder {
    /// Sets the record endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the SPARQL endpoint.
    pub fn with_sparql_url(mut self, sparql_url: impl Into<String>) -> Self {
        self.sparql_url = Some(sparql_url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the pause inserted after each processed row.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the label cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Enables or disables the static branch table fallback.
    pub fn with_branch_fallback(mut self, branch_fallback: bool) -> Self {
        self.branch_fallback = branch_fallback;
        self
    }

    /// Builds the EnricherConfig, filling unset fields with defaults.
    pub fn build(self) -> EnricherConfig {
        let defaults = EnricherConfig::default();
        EnricherConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            sparql_url: self.sparql_url.unwrap_or(defaults.sparql_url),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            delay: self.delay.unwrap_or(defaults.delay),
            cache: self.cache.unwrap_or(defaults.cache),
            branch_fallback: self.branch_fallback,
        }
    }
}

/// Configuration for the descriptor label cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of memoized tree positions.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 4096 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enricher_config_default() {
        let config = EnricherConfig::default();
        assert_eq!(config.base_url, "https://id.nlm.nih.gov/mesh");
        assert_eq!(config.sparql_url, "https://id.nlm.nih.gov/mesh/sparql");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.delay, Duration::from_millis(200));
        assert!(!config.branch_fallback);
    }

    #[test]
    fn test_enricher_config_builder() {
        let config = EnricherConfig::builder()
            .with_base_url("http://localhost:8080/mesh")
            .with_sparql_url("http://localhost:8080/sparql")
            .with_timeout(Duration::from_secs(30))
            .with_delay(Duration::ZERO)
            .with_cache(CacheConfig { max_entries: 64 })
            .with_branch_fallback(true)
            .build();

        assert_eq!(config.base_url, "http://localhost:8080/mesh");
        assert_eq!(config.sparql_url, "http://localhost:8080/sparql");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.cache.max_entries, 64);
        assert!(config.branch_fallback);
    }

    #[test]
    fn test_builder_defaults_unset_fields() {
        let config = EnricherConfig::builder()
            .with_delay(Duration::from_millis(50))
            .build();

        assert_eq!(config.delay, Duration::from_millis(50));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_cache_config_default() {
        assert_eq!(CacheConfig::default().max_entries, 4096);
    }
}
