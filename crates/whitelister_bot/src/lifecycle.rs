//! Guild lifecycle hooks.
//!
//! Every guild the bot belongs to must have a configuration row. Rows are
//! created at startup for guilds joined while offline, and on join events.

use crate::audit::AuditLog;
use crate::transport::{GuildJoinEvent, WhitelistTransport};
use std::sync::Arc;
use tracing::{info, instrument};
use whitelister_database::WhitelistRepository;
use whitelister_error::WhitelistResult;

/// Startup reconciliation and guild-join handling.
#[derive(Clone)]
pub struct GuildLifecycle {
    repository: Arc<WhitelistRepository>,
    transport: Arc<dyn WhitelistTransport>,
    audit: Arc<AuditLog>,
}

impl GuildLifecycle {
    /// Create the hooks.
    pub fn new(
        repository: Arc<WhitelistRepository>,
        transport: Arc<dyn WhitelistTransport>,
        audit: Arc<AuditLog>,
    ) -> Self {
        Self {
            repository,
            transport,
            audit,
        }
    }

    /// Ensure a configuration row for every guild the bot is in.
    ///
    /// Returns how many rows were created.
    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> WhitelistResult<usize> {
        let guilds = self.transport.list_guilds().await?;
        let mut added = 0;

        for guild_id in &guilds {
            if self.repository.ensure_guild(*guild_id).await? {
                info!(guild_id = %guild_id, "Added guild to database");
                added += 1;
            }
        }

        info!(guilds = guilds.len(), added, "Startup reconciliation complete");
        Ok(added)
    }

    /// The bot joined a guild.
    #[instrument(skip(self, event), fields(guild_id = %event.guild_id()))]
    pub async fn handle_guild_join(&self, event: &GuildJoinEvent) -> WhitelistResult<()> {
        self.repository.ensure_guild(*event.guild_id()).await?;
        self.audit.record_guild_join(event).await?;
        info!(guild_name = %event.guild_name(), "Joined guild");
        Ok(())
    }

    /// A guild became available.
    ///
    /// Platforms announce both newly joined guilds and guilds the bot was
    /// already in this way. `is_new` is the platform's verdict when it has
    /// one; otherwise a guild without a configuration row counts as new.
    #[instrument(skip(self, event), fields(guild_id = %event.guild_id()))]
    pub async fn handle_guild_create(
        &self,
        event: &GuildJoinEvent,
        is_new: Option<bool>,
    ) -> WhitelistResult<bool> {
        let inserted = self.repository.ensure_guild(*event.guild_id()).await?;
        let joined = is_new.unwrap_or(inserted);
        if joined {
            self.audit.record_guild_join(event).await?;
            info!(guild_name = %event.guild_name(), "Joined guild");
        }
        Ok(joined)
    }
}
