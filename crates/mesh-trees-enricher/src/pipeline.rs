//! Row-by-row enrichment of a tab-separated identifier file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::Duration;

use csv::{ReaderBuilder, WriterBuilder};
use mesh_trees::MeshId;
use tracing::{debug, info, warn};

use crate::config::EnricherConfig;
use crate::enricher::Enricher;
use crate::error::{EnrichError, EnrichResult};
use crate::statistics::{ResolverStats, RunStats};
use crate::traits::MeshQueryable;

/// Header of the column holding the identifiers to enrich.
pub const ID_COLUMN: &str = "CTD-ASSIGNED CONCEPT ID";

/// The five columns appended to every output row, in order.
pub const ADDED_COLUMNS: [&str; 5] = [
    "MESH_LABEL",
    "MESH_TREE_NUMBERS",
    "MESH_TREE_LABELS",
    "MESH_TREE_TOP_CODES",
    "MESH_TREE_TOP_LABELS",
];

/// Drives enrichment over a whole input file.
///
/// Row-level failures (unknown identifier, transport error, unusable
/// response body) blank the added columns for that row and move on; only
/// problems with the input or output file abort the run. Output rows keep
/// the input order and count, and every input column is carried through
/// unchanged.
pub struct EnrichmentPipeline<'a> {
    enricher: Enricher<'a>,
    delay: Duration,
}

impl<'a> EnrichmentPipeline<'a> {
    /// Creates a pipeline over `service`, tuned per `config`.
    pub fn new(service: &'a dyn MeshQueryable, config: &EnricherConfig) -> Self {
        Self {
            enricher: Enricher::with_config(service, config),
            delay: config.delay,
        }
    }

    /// Enriches `input` into `output`, returning the run statistics.
    ///
    /// The progress callback, when given, sees the running statistics
    /// after every written row.
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        mut progress: Option<&mut dyn FnMut(&RunStats)>,
    ) -> EnrichResult<RunStats> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_path(input)?;
        let headers = reader.headers()?.clone();
        let id_index = match headers.iter().position(|header| header == ID_COLUMN) {
            Some(index) => index,
            None => return Err(EnrichError::MissingColumn(ID_COLUMN.to_string())),
        };

        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_path(output)?;
        let mut output_headers: Vec<&str> = headers.iter().collect();
        output_headers.extend(ADDED_COLUMNS);
        writer.write_record(&output_headers)?;

        let mut stats = RunStats::new();
        for row in reader.records() {
            let row = row?;
            stats.total += 1;
            let row_number = stats.total;

            let mut fields: Vec<String> = row.iter().map(str::to_string).collect();
            if fields.len() < headers.len() {
                fields.resize(headers.len(), String::new());
            }

            let id = MeshId::parse(&fields[id_index]);
            if id.is_empty() {
                warn!("Missing MeSH ID in row {row_number}");
                stats.errors += 1;
                stats.record_error("Missing MeSH ID");
                fields.extend(std::iter::repeat(String::new()).take(ADDED_COLUMNS.len()));
                writer.write_record(&fields)?;
                if let Some(callback) = progress.as_mut() {
                    callback(&stats);
                }
                continue;
            }

            match self.enricher.enrich(&id) {
                Ok(enrichment) => {
                    for tree in &enrichment.tree_numbers {
                        if !tree.is_well_formed() {
                            warn!("Malformed tree number in row {row_number}: {tree}");
                            stats.malformed_tree_numbers += 1;
                        }
                    }
                    stats.success += 1;
                    if !enrichment.has_tree_numbers() {
                        stats.without_tree_numbers += 1;
                    }
                    if enrichment.via_mapping {
                        stats.via_mapping += 1;
                    }
                    fields.extend(enrichment.cells());
                }
                Err(error) => {
                    warn!("Row {row_number}: {error}");
                    stats.errors += 1;
                    stats.record_error(&error.to_string());
                    fields.extend(std::iter::repeat(String::new()).take(ADDED_COLUMNS.len()));
                }
            }
            writer.write_record(&fields)?;

            if let Some(callback) = progress.as_mut() {
                callback(&stats);
            }
            if stats.total % 100 == 0 {
                debug!(
                    "Processed {} rows ({} success, {} errors)",
                    stats.total, stats.success, stats.errors
                );
            }
            if stats.total % 500 == 0 {
                info!("Processed {} rows", stats.total);
            }

            // Rate limiting between rows; a row may cost several calls.
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
        writer.flush()?;

        Ok(stats)
    }

    /// A snapshot of the shared resolver counters.
    pub fn resolver_stats(&self) -> ResolverStats {
        self.enricher.resolver_stats()
    }
}

/// Counts data rows in `path` (line count minus the header).
///
/// Lets a caller size a progress bar before the run starts.
pub fn count_rows(path: &Path) -> EnrichResult<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = 0usize;
    for line in reader.lines() {
        line?;
        lines += 1;
    }
    Ok(lines.saturating_sub(1))
}
