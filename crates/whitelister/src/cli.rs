//! CLI command definitions and handlers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use whitelister::{BotToken, WhitelisterConfig};
use whitelister_bot::{AuditLog, WhitelistBot, export_file_name, write_export};
use whitelister_core::GuildId;
use whitelister_database::{WhitelistRepository, establish_connection};
use whitelister_error::WhitelistResult;

/// Whitelister - collect and validate whitelist wallet addresses on Discord
#[derive(Parser, Debug)]
#[command(name = "whitelister")]
#[command(about = "Collect and validate whitelist wallet addresses on Discord", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over whitelister.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve events until shut down
    Run,

    /// Apply pending database migrations and exit
    Migrate,

    /// Write a guild's registrations as CSV
    Export {
        /// Guild id
        #[arg(long)]
        guild: u64,

        /// Output file (defaults to <guild>.csv in the export directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Start the bot.
pub async fn run_bot(config: &WhitelisterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let token = BotToken::from_env()?;
    let repository = Arc::new(WhitelistRepository::new(establish_connection(
        config.database_url(),
    )?));
    let audit = Arc::new(AuditLog::new(config.audit_log_path()));

    info!(
        database = %config.database_url(),
        audit_log = %config.audit_log_path().display(),
        "Starting whitelister"
    );

    let mut bot = WhitelistBot::new(
        token.expose().to_string(),
        repository,
        audit,
        config.export_dir().clone(),
    )
    .await?;
    bot.start().await?;
    Ok(())
}

/// Apply migrations.
pub fn migrate(config: &WhitelisterConfig) -> WhitelistResult<()> {
    establish_connection(config.database_url())?;
    info!(database = %config.database_url(), "Database is up to date");
    Ok(())
}

/// Export a guild's registrations to a file, returning its path.
pub async fn export(
    config: &WhitelisterConfig,
    guild: u64,
    output: Option<PathBuf>,
) -> WhitelistResult<PathBuf> {
    let guild_id = GuildId(guild);
    let repository = WhitelistRepository::new(establish_connection(config.database_url())?);
    let registrations = repository.guild_registrations(guild_id).await?;

    let path = output.unwrap_or_else(|| config.export_dir().join(export_file_name(guild_id)));
    write_export(&path, &registrations).await?;

    info!(
        guild_id = %guild_id,
        count = registrations.len(),
        path = %path.display(),
        "Exported registrations"
    );
    Ok(path)
}
