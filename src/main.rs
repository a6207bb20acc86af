use clap::Parser;
use inat_bingo::config::policy;
use inat_bingo::utils::error::ErrorSeverity;
use inat_bingo::utils::{logger, validation::Validate};
use inat_bingo::{
    BingoEngine, BingoPipeline, CachedSpeciesSource, CliConfig, HttpPhotoFetcher,
    INaturalistClient, LocalStorage, SystemClock,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting inat-bingo");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // Wire up the adapters and the pipeline
    let client = INaturalistClient::new(&config.api_base_url)?;
    let source = CachedSpeciesSource::new(client, SystemClock, policy::CACHE_TTL);
    let fetcher = HttpPhotoFetcher::new()?;
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = BingoPipeline::new(source, fetcher, storage, config);

    let engine = BingoEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Bingo cards generated successfully");
            println!("✅ Bingo cards generated!");
            println!("📄 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Generation failed: {} (severity: {:?})", e, e.severity());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Input => 1,
                ErrorSeverity::Upstream => 2,
                ErrorSeverity::Processing => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
