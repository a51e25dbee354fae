use clap::Parser;
use premium_engine::cli::{Cli, Commands};
use premium_engine::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::example()?
        }
    };

    // Initialize telemetry
    premium_engine::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Quote(args) => {
            args.execute(&config).await?;
        }
        Commands::Volatility(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
