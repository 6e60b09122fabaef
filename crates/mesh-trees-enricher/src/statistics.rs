//! Run and resolver statistics.

use std::collections::HashMap;
use std::fmt;

/// Longest error message kept as a grouping key.
const ERROR_KEY_LENGTH: usize = 50;

/// Counters for one enrichment run.
///
/// `record_error` groups repeated failures under a truncated message so
/// the end-of-run summary stays readable even when thousands of rows
/// fail the same way.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Rows processed, including failed ones.
    pub total: usize,
    /// Rows enriched without error.
    pub success: usize,
    /// Rows that failed and were written with empty added cells.
    pub errors: usize,
    /// Successful rows whose record carried no tree numbers.
    pub without_tree_numbers: usize,
    /// Successful rows resolved through a preferred-mapping hop.
    pub via_mapping: usize,
    /// Tree numbers that did not match the canonical shape.
    pub malformed_tree_numbers: usize,
    error_messages: HashMap<String, usize>,
}

impl RunStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one failure under its (truncated) message.
    pub fn record_error(&mut self, message: &str) {
        let key = truncate_message(message, ERROR_KEY_LENGTH);
        *self.error_messages.entry(key).or_insert(0) += 1;
    }

    /// Whether any row failed.
    pub fn has_errors(&self) -> bool {
        self.errors > 0 || !self.error_messages.is_empty()
    }

    /// The most frequent error messages, highest count first.
    pub fn top_errors(&self, limit: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .error_messages
            .iter()
            .map(|(message, count)| (message.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total rows:              {}", self.total)?;
        writeln!(f, "Successful:              {}", self.success)?;
        writeln!(f, "Errors:                  {}", self.errors)?;
        writeln!(f, "Without tree numbers:    {}", self.without_tree_numbers)?;
        writeln!(f, "Via mapping:             {}", self.via_mapping)?;
        write!(f, "Malformed tree numbers:  {}", self.malformed_tree_numbers)
    }
}

/// Counters kept by the descriptor-label resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Lookups answered from the label cache.
    pub cache_hits: usize,
    /// Lookups that had to query the service.
    pub cache_misses: usize,
    /// Service queries that failed outright.
    pub query_failures: usize,
    /// Labels taken from the static branch table.
    pub branch_fallbacks: usize,
}

impl ResolverStats {
    /// Fraction of lookups served from cache, in `[0.0, 1.0]`.
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

impl fmt::Display for ResolverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits: {}, misses: {}, failures: {}, fallbacks: {} ({:.1}% hit rate)",
            self.cache_hits,
            self.cache_misses,
            self.query_failures,
            self.branch_fallbacks,
            self.cache_hit_rate() * 100.0
        )
    }
}

fn truncate_message(message: &str, length: usize) -> String {
    match message.char_indices().nth(length) {
        Some((index, _)) => message[..index].to_string(),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_groups_by_message() {
        let mut stats = RunStats::new();
        stats.record_error("Timeout querying API for: D003924");
        stats.record_error("Timeout querying API for: D003924");
        stats.record_error("MeSH ID not found: D999999");

        let top = stats.top_errors(10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ("Timeout querying API for: D003924".into(), 2));
        assert_eq!(top[1], ("MeSH ID not found: D999999".into(), 1));
    }

    #[test]
    fn test_record_error_truncates_long_messages() {
        let mut stats = RunStats::new();
        let long = "x".repeat(80);
        stats.record_error(&long);
        stats.record_error(&long);

        let top = stats.top_errors(1);
        assert_eq!(top[0].0.len(), 50);
        assert_eq!(top[0].1, 2);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let message = "é".repeat(60);
        let truncated = truncate_message(&message, 50);
        assert_eq!(truncated.chars().count(), 50);
    }

    #[test]
    fn test_top_errors_limit() {
        let mut stats = RunStats::new();
        for i in 0..20 {
            stats.record_error(&format!("error {i}"));
        }
        assert_eq!(stats.top_errors(10).len(), 10);
    }

    #[test]
    fn test_has_errors() {
        let mut stats = RunStats::new();
        assert!(!stats.has_errors());
        stats.errors += 1;
        assert!(stats.has_errors());
    }

    #[test]
    fn test_display_lists_counters() {
        let stats = RunStats {
            total: 10,
            success: 8,
            errors: 2,
            without_tree_numbers: 1,
            via_mapping: 1,
            ..RunStats::default()
        };
        let rendered = stats.to_string();
        assert!(rendered.contains("Total rows:              10"));
        assert!(rendered.contains("Via mapping:             1"));
        assert!(rendered.contains("Malformed tree numbers:  0"));
    }

    #[test]
    fn test_cache_hit_rate() {
        let stats = ResolverStats {
            cache_hits: 3,
            cache_misses: 1,
            ..ResolverStats::default()
        };
        assert!((stats.cache_hit_rate() - 0.75).abs() < f64::EPSILON);

        let empty = ResolverStats::default();
        assert_eq!(empty.cache_hit_rate(), 0.0);
    }

    #[test]
    fn test_resolver_stats_display() {
        let stats = ResolverStats {
            cache_hits: 9,
            cache_misses: 1,
            query_failures: 0,
            branch_fallbacks: 0,
        };
        assert_eq!(
            stats.to_string(),
            "hits: 9, misses: 1, failures: 0, fallbacks: 0 (90.0% hit rate)"
        );
    }
}
