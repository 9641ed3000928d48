use clap::Parser;
use metal_prices::cli::{Cli, Commands};
use metal_prices::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = metal_prices::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!(mock = args.test, "Starting price run");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Gold: {}", config.sources.gold_url);
            println!("  Silver: {}", config.sources.silver_url);
            println!(
                "  Rate: {} ({})",
                config.sources.exchange_url, config.sources.rate_field
            );
            println!(
                "  Fetch: timeout={}s, retry_delay={}ms",
                config.fetch.timeout_secs, config.fetch.retry_delay_ms
            );
            println!(
                "  Storage: {} / {}",
                config.storage.record_path.display(),
                config.storage.log_path.display()
            );
            println!(
                "  Mock: gold={}, silver={}, rate={}",
                config.mock.gold_usd_per_ounce,
                config.mock.silver_usd_per_ounce,
                config.mock.usd_to_egp
            );
        }
    }

    Ok(())
}
