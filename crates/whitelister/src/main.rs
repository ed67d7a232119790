//! Whitelister binary.

use clap::Parser;
use whitelister::{ObservabilityConfig, WhitelisterConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, export, migrate, run_bot};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = WhitelisterConfig::load(cli.config.as_deref())?;

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level().clone()
    };
    init_observability(&ObservabilityConfig::new(log_level).with_json_logs(*config.json_logs()))?;

    match cli.command {
        Commands::Run => run_bot(&config).await?,
        Commands::Migrate => migrate(&config)?,
        Commands::Export { guild, output } => {
            let path = export(&config, guild, output).await?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
