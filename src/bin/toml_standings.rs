use anyhow::Context;
use clap::Parser;
use league_standings::core::ConfigProvider;
use league_standings::utils::error::ErrorSeverity;
use league_standings::utils::{logger, validation::Validate};
use league_standings::{
    LocalStorage, RecordSource, SourceSpec, StandingsPipeline, StandingsRunner, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-standings")]
#[command(about = "Compute league standings from a TOML job file")]
struct Args {
    /// Path to TOML job file
    #[arg(short, long, default_value = "standings.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be fetched and written without doing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load job file '{}'", args.config))?;

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("🚀 Starting job {} from {}", config.job.name, args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let source_spec = config.source_spec()?;
    display_config_summary(&config, &source_spec, args.dry_run);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing fetched or written");
        return Ok(());
    }

    let source = RecordSource::from_spec(&source_spec)?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = StandingsPipeline::new(source, storage, config);
    let runner = StandingsRunner::new(pipeline);

    match runner.run().await {
        Ok(paths) => {
            tracing::info!("✅ Standings computed successfully!");
            for path in paths {
                println!("📁 {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Standings run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, source: &SourceSpec, dry_run: bool) {
    println!("📋 Job Summary:");
    println!("  Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        println!("  Description: {}", description);
    }
    println!("  Championship: {}", config.championship_id());

    match source {
        SourceSpec::File { path } => println!("  Source: file {}", path),
        SourceSpec::Http {
            endpoint,
            headers,
            timeout_seconds,
        } => {
            println!("  Source: {} (timeout {}s)", endpoint, timeout_seconds);
            if !headers.is_empty() {
                println!("  Headers: {} custom headers", headers.len());
            }
        }
    }

    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    if let Some(bundle) = config.bundle_filename() {
        println!("  Bundle: {}", bundle);
    }
    if let Some(top) = config.top_scorers() {
        println!("  Top scorers: {}", top);
    }
    if config.include_overview() {
        println!("  Match overview: enabled");
    }
    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}
