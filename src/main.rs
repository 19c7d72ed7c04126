use clap::Parser;
use league_standings::utils::error::ErrorSeverity;
use league_standings::utils::{logger, validation::Validate};
use league_standings::{CliConfig, LocalStorage, RecordSource, StandingsPipeline, StandingsRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting league-standings CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let source = RecordSource::from_spec(&config.source_spec()?)?;
    let storage = LocalStorage::new(config.output_path.clone());
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
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

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
