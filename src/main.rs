use clap::Parser;
use hedge_scan::cli::{Cli, Commands};
use hedge_scan::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        let mut config: Config =
            toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config");
        config.apply_env();
        config
    });

    // Initialize telemetry
    let _guard = hedge_scan::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            tracing::info!(sports = ?config.provider.sports, "Starting scan");
            args.execute(&config).await?;
        }
        Commands::Check(args) => {
            tracing::info!(file = %args.file.display(), "Checking local payload");
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Provider: {}", config.provider.base_url);
            println!("  Sports: {}", config.provider.sports.join(", "));
            println!(
                "  Regions: {}  Markets: {}",
                config.provider.regions, config.provider.markets
            );
            println!("  Min profit: {}%", config.detection.min_profit_pct);
            match &config.detection.allowed_bookmakers {
                Some(allowed) if !allowed.is_empty() => {
                    let mut names: Vec<_> = allowed.iter().cloned().collect();
                    names.sort();
                    println!("  Bookmakers: {}", names.join(", "));
                }
                _ => println!("  Bookmakers: all"),
            }
            println!(
                "  Stake: {:?} (target return {})",
                config.stake.policy, config.stake.target_return
            );
        }
    }

    Ok(())
}
