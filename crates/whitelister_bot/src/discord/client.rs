//! Discord client setup and lifecycle management.

use super::{SerenityTransport, WhitelistHandler};
use crate::audit::AuditLog;
use crate::lifecycle::GuildLifecycle;
use crate::transport::WhitelistTransport;
use crate::workflow::WhitelistWorkflow;
use serenity::Client;
use serenity::all::Http;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};
use whitelister_database::WhitelistRepository;
use whitelister_error::{TransportError, TransportErrorKind};

/// The whitelist bot's Discord client.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use whitelister_bot::{AuditLog, WhitelistBot};
/// use whitelister_database::{WhitelistRepository, establish_connection};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let repository = Arc::new(WhitelistRepository::new(establish_connection("data.db")?));
///     let audit = Arc::new(AuditLog::new("log.txt"));
///
///     let mut bot = WhitelistBot::new(token, repository, audit, ".".into()).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct WhitelistBot {
    client: Client,
}

impl WhitelistBot {
    /// Build the client and wire the workflow to it.
    ///
    /// # Errors
    /// Returns an error if the token is empty or the client fails to build.
    #[instrument(skip(token, repository, audit), fields(token_len = token.len()))]
    pub async fn new(
        token: String,
        repository: Arc<WhitelistRepository>,
        audit: Arc<AuditLog>,
        export_dir: PathBuf,
    ) -> Result<Self, TransportError> {
        if token.trim().is_empty() {
            return Err(TransportError::new(TransportErrorKind::InvalidToken));
        }

        let http = Arc::new(Http::new(&token));
        let transport: Arc<dyn WhitelistTransport> = Arc::new(SerenityTransport::new(http));

        let workflow = Arc::new(WhitelistWorkflow::new(
            repository.clone(),
            transport.clone(),
            audit.clone(),
            export_dir,
        ));
        let lifecycle = GuildLifecycle::new(repository, transport, audit);
        let handler = WhitelistHandler::new(workflow, lifecycle);

        let intents = WhitelistHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                TransportError::new(TransportErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// Connect to the gateway and process events until shutdown.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), TransportError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            TransportError::new(TransportErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }
}
