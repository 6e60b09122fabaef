//! `mesh-enrich`: enrich a TSV of MeSH identifiers with tree numbers
//! and top-level category labels from the NLM MeSH RDF service.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mesh_trees_enricher::{
    count_rows, EnricherConfig, EnrichmentPipeline, MeshRdfClient, ResolverStats, RunStats,
    DEFAULT_BASE_URL, DEFAULT_SPARQL_URL,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mesh-enrich")]
#[command(version)]
#[command(about = "Enrich MeSH identifiers with tree numbers and top-level category labels")]
#[command(
    long_about = "Reads a tab-separated file with a 'CTD-ASSIGNED CONCEPT ID' column, looks\n\
every identifier up against the NLM MeSH RDF service and writes the input\n\
rows back with five added columns: MESH_LABEL, MESH_TREE_NUMBERS,\n\
MESH_TREE_LABELS, MESH_TREE_TOP_CODES and MESH_TREE_TOP_LABELS.\n\
\n\
Rows that cannot be resolved keep their added columns empty; only an\n\
unreadable input file or an unwritable output file aborts the run."
)]
struct Cli {
    /// Input TSV file with MeSH identifiers
    input: PathBuf,

    /// Output file path (default: <input stem>-enriched.tsv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Delay between rows in seconds; a row may make several API calls
    #[arg(short, long, default_value_t = 0.2)]
    delay: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Record endpoint of the MeSH RDF service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// SPARQL endpoint of the MeSH RDF service
    #[arg(long, default_value = DEFAULT_SPARQL_URL)]
    sparql_url: String,

    /// Set logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Label unresolved top-level codes from the static branch table
    #[arg(long)]
    branch_fallback: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    if let Err(error) = run(&cli) {
        error!("{error:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let config = EnricherConfig::builder()
        .with_base_url(cli.base_url.as_str())
        .with_sparql_url(cli.sparql_url.as_str())
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_delay(delay_from_secs(cli.delay)?)
        .with_branch_fallback(cli.branch_fallback)
        .build();
    let client = MeshRdfClient::new(&config).context("failed to set up the HTTP client")?;

    let total = count_rows(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!("Processing {} rows from {}", total, cli.input.display());

    let bar = make_progress_bar(total, cli.no_progress);
    let mut on_row = |stats: &RunStats| {
        bar.set_position(stats.total as u64);
        bar.set_message(format!("ok={} failed={}", stats.success, stats.errors));
    };

    let pipeline = EnrichmentPipeline::new(&client, &config);
    let stats = pipeline
        .run(&cli.input, &output, Some(&mut on_row))
        .with_context(|| format!("failed to enrich {}", cli.input.display()))?;
    bar.finish_and_clear();

    log_summary(&stats, pipeline.resolver_stats(), &output);
    Ok(())
}

fn init_tracing(level: LogLevel) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let directive = format!(
        "mesh_enrich={0},mesh_trees_enricher={0},mesh_trees={0}",
        level.as_str()
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Negative values mean no delay; non-finite or oversized values are an
/// error.
fn delay_from_secs(secs: f64) -> anyhow::Result<Duration> {
    if secs <= 0.0 {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(secs).with_context(|| format!("invalid --delay value: {secs}"))
}

/// `ctd-mesh-ids.tsv` becomes `ctd-mesh-ids-enriched.tsv` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}-enriched.tsv"))
}

fn make_progress_bar(total: usize, disabled: bool) -> ProgressBar {
    if disabled || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_prefix("MESH");
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} {prefix:.bold} [{elapsed_precise}] [{bar:32.cyan/blue}] \
{pos}/{len} ({percent}%) eta {eta_precise} {msg}",
    ) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.enable_steady_tick(Duration::from_millis(250));
    bar
}

fn log_summary(stats: &RunStats, resolver: ResolverStats, output: &Path) {
    info!("{}", "=".repeat(60));
    info!("Processing complete!");
    for line in stats.to_string().lines() {
        info!("{line}");
    }
    info!("Top-code label cache: {resolver}");
    info!("Output written to: {}", output.display());

    if stats.has_errors() {
        info!("Error summary:");
        for (message, count) in stats.top_errors(10) {
            info!("  {count}x: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["mesh-enrich", "input.tsv"]);
        assert_eq!(cli.input, Path::new("input.tsv"));
        assert!(cli.output.is_none());
        assert!((cli.delay - 0.2).abs() < f64::EPSILON);
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.sparql_url, DEFAULT_SPARQL_URL);
        assert!(!cli.no_progress);
        assert!(!cli.branch_fallback);
    }

    #[test]
    fn test_delay_from_secs_accepts_usable_values() {
        assert_eq!(delay_from_secs(0.25).unwrap(), Duration::from_millis(250));
        assert_eq!(delay_from_secs(0.0).unwrap(), Duration::ZERO);
        assert_eq!(delay_from_secs(-1.0).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_delay_from_secs_rejects_unusable_values() {
        assert!(delay_from_secs(f64::INFINITY).is_err());
        assert!(delay_from_secs(f64::NAN).is_err());
        assert!(delay_from_secs(1e30).is_err());
    }

    #[test]
    fn test_default_output_path_keeps_directory() {
        let output = default_output_path(Path::new("/data/ctd-mesh-ids.tsv"));
        assert_eq!(output, Path::new("/data/ctd-mesh-ids-enriched.tsv"));
    }

    #[test]
    fn test_default_output_path_without_extension() {
        let output = default_output_path(Path::new("ids"));
        assert_eq!(output, Path::new("ids-enriched.tsv"));
    }
}
