//! Serenity event handler for the whitelist bot.

use super::events::message_event;
use crate::lifecycle::GuildLifecycle;
use crate::transport::GuildJoinEvent;
use crate::workflow::WhitelistWorkflow;
use serenity::all::{Context, EventHandler, GatewayIntents, Guild, Message, Ready};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};
use whitelister_core::GuildId;

/// Routes gateway events into the workflow and lifecycle hooks.
pub struct WhitelistHandler {
    workflow: Arc<WhitelistWorkflow>,
    lifecycle: GuildLifecycle,
}

impl WhitelistHandler {
    /// Create a handler.
    pub fn new(workflow: Arc<WhitelistWorkflow>, lifecycle: GuildLifecycle) -> Self {
        Self {
            workflow,
            lifecycle,
        }
    }

    /// Gateway intents the bot subscribes to.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl EventHandler for WhitelistHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            user_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Logged in"
        );

        match self.lifecycle.reconcile().await {
            Ok(added) => info!(added, "Guilds reconciled"),
            Err(e) => error!(error = %e, "Startup reconciliation failed"),
        }
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        let event = GuildJoinEvent::new(GuildId(guild.id.get()), guild.name.clone());
        if let Err(e) = self.lifecycle.handle_guild_create(&event, is_new).await {
            error!(guild_id = %guild.id, error = %e, "Failed to handle guild create");
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let event = match message_event(&ctx.http, &msg).await {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(e) => {
                error!(message_id = %msg.id, error = %e, "Failed to read message event");
                self.workflow
                    .record_failure(
                        &e.to_string(),
                        &format!("{:?}\nContent:   {}", msg.id, msg.content),
                    )
                    .await;
                return;
            }
        };

        let disposition = self.workflow.handle_message(&event).await;
        debug!(message_id = %msg.id, disposition = %disposition, "Message handled");
    }
}
