//! Profile Enricher main entry point
//!
//! This is the command-line interface for the profile enricher.

use anyhow::{bail, Context};
use clap::Parser;
use profile_enricher::config::{load_config_with_hash, Config};
use profile_enricher::enrich::{AnalyzeRequest, ColumnMapping, Enricher};
use profile_enricher::output::{load_summary, print_summary, read_sheet, write_outputs, Sheet};
use profile_enricher::platform::Platform;
use profile_enricher::url::ProfileReference;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Profile Enricher: per-platform rate-limited profile scraping
///
/// Reads a CSV of student profile links, scrapes LeetCode, Codeforces,
/// GitHub and LinkedIn within per-platform rate limits, and writes the
/// enriched sheet, an activity log and a summary.
#[derive(Parser, Debug)]
#[command(name = "profile-enricher")]
#[command(version = "1.0.0")]
#[command(about = "Per-platform rate-limited profile scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Input CSV to enrich
    #[arg(short, long, value_name = "CSV", conflicts_with_all = ["leetcode", "codeforces", "github"])]
    input: Option<PathBuf>,

    /// LeetCode profile URL to analyze
    #[arg(long, value_name = "URL")]
    leetcode: Option<String>,

    /// Codeforces profile URL to analyze
    #[arg(long, value_name = "URL")]
    codeforces: Option<String>,

    /// GitHub profile URL to analyze
    #[arg(long, value_name = "URL")]
    github: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and input, and show what would be scraped
    #[arg(long, requires = "input", conflicts_with = "stats")]
    dry_run: bool,

    /// Show the summary of the last batch and exit
    #[arg(long, conflicts_with_all = ["dry_run", "input"])]
    stats: bool,
}

impl Cli {
    fn analyze_request(&self) -> AnalyzeRequest {
        AnalyzeRequest {
            leetcode: self.leetcode.clone(),
            codeforces: self.codeforces.clone(),
            github: self.github.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.stats {
        handle_stats(&config)
    } else if let Some(input) = &cli.input {
        if cli.dry_run {
            handle_dry_run(&config, input)
        } else {
            handle_enrich(config, input).await
        }
    } else {
        let request = cli.analyze_request();
        if request.urls().is_empty() {
            bail!("nothing to do: pass --input <CSV>, a profile URL, or --stats");
        }
        handle_analyze(config, &request).await
    }
}

/// Installs the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `-q` and `-v` pick the level.
fn setup_logging(verbose: u8, quiet: bool) {
    let directives = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "profile_enricher=info,warn",
        (false, 1) => "profile_enricher=debug,info",
        (false, 2) => "profile_enricher=trace,debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .init();
}

/// Handles the --dry-run mode: validates input and shows what would be scraped
fn handle_dry_run(config: &Config, input: &Path) -> anyhow::Result<()> {
    let sheet = read_sheet(input, config.batch.max_file_size_bytes())?;
    let mapping = ColumnMapping::validated(&sheet.headers)?;

    println!("=== Profile Enricher Dry Run ===\n");

    println!("Rate Limits:");
    for platform in Platform::ALL {
        let settings = config.platforms.get(platform);
        println!(
            "  {}: {}/s (domains: {})",
            platform,
            settings.rate_limit,
            settings.domains.join(", ")
        );
    }

    println!("\nInput: {} ({} rows)", input.display(), sheet.len());
    println!(
        "  Identity column: {}",
        if mapping.roll_no().is_some() { "yes" } else { "no" }
    );

    println!("\nProfiles to scrape:");
    for platform in Platform::ALL {
        if mapping.url_column(platform).is_none() {
            println!("  {}: no column", platform);
            continue;
        }
        let (valid, skipped) = count_references(&sheet, &mapping, config, platform);
        println!("  {}: {} valid, {} skipped", platform, valid, skipped);
    }

    println!("\nOutput: {}", config.output.directory);
    println!("Photos: {} ({:?} engine)", config.photos.directory, config.photos.engine);
    println!("\n✓ Configuration and input are valid");

    Ok(())
}

/// Counts dispatchable and skipped non-empty cells of one platform
fn count_references(
    sheet: &Sheet,
    mapping: &ColumnMapping,
    config: &Config,
    platform: Platform,
) -> (usize, usize) {
    sheet
        .rows
        .iter()
        .filter_map(|row| mapping.url_cell(row, platform))
        .fold((0, 0), |(valid, skipped), raw| {
            if ProfileReference::from_cell(platform, raw, &config.platforms).is_dispatchable() {
                (valid + 1, skipped)
            } else {
                (valid, skipped + 1)
            }
        })
}

/// Handles the --stats mode: shows the last persisted summary
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let directory = Path::new(&config.output.directory);
    match load_summary(directory)? {
        Some(summary) => print_summary(&summary),
        None => println!("No previous run found in {}", directory.display()),
    }
    Ok(())
}

/// Handles the main batch operation
async fn handle_enrich(config: Config, input: &Path) -> anyhow::Result<()> {
    let sheet = read_sheet(input, config.batch.max_file_size_bytes())
        .with_context(|| format!("failed to read {}", input.display()))?;

    let output_dir = PathBuf::from(&config.output.directory);
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input")
        .to_string();

    let enricher = Enricher::new(config).await?;
    let enrichment = enricher.enrich(&sheet).await?;

    let files = write_outputs(
        &output_dir,
        &stem,
        &enrichment.sheet,
        &enrichment.log,
        &enrichment.summary,
    )?;

    print_summary(&enrichment.summary);
    println!("\nEnriched sheet: {}", files.enriched.display());
    if let Some(log) = &files.log {
        println!("Activity log: {}", log.display());
    }
    println!("Summary: {}", files.summary.display());

    Ok(())
}

/// Handles single-shot analysis of the given URLs
async fn handle_analyze(config: Config, request: &AnalyzeRequest) -> anyhow::Result<()> {
    let enricher = Enricher::new(config).await?;
    let report = enricher.analyze(request).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
