//! Per-message registration workflow.
//!
//! [`WhitelistWorkflow::handle_message`] is the failure boundary for one
//! inbound message. Inside it, [`WhitelistWorkflow::process_message`] walks
//! the states in order:
//!
//! 1. Admin command: dispatch through the admin and public namespaces.
//! 2. Channel gate: wrong channel or missing role means silence.
//! 3. In-channel command: public namespace only, or list accepted commands.
//! 4. Unconfigured blockchain: silence.
//! 5. Candidate address: validate, replace the registration, confirm, delete.

use crate::audit::AuditLog;
use crate::command::{Command, Scope, accepted_public_commands, is_command_shaped};
use crate::replies;
use crate::router::CommandRouter;
use crate::transport::{MessageEvent, Reply, WhitelistTransport};
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, info, instrument, warn};
use whitelister_core::{GuildConfig, GuildId, UserId, UserRegistration, trailing_chars};
use whitelister_database::WhitelistRepository;
use whitelister_error::WhitelistResult;

/// How a message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MessageDisposition {
    /// Sent by a bot or a non-member.
    Skipped,
    /// Routed to a command handler.
    Command,
    /// Outside the whitelist channel, or the author lacks the whitelist role.
    OutsideGate,
    /// Prefixed but not a public command; accepted commands were listed.
    UnknownCommand,
    /// The guild has no blockchain configured yet.
    Unconfigured,
    /// Address accepted and stored.
    Registered,
    /// Address failed validation.
    Rejected,
    /// Processing failed; the failure was written to the audit log.
    Failed,
}

/// Mutual exclusion per (guild, member) for the validate-and-store steps.
#[derive(Debug, Default)]
pub struct RegistrationLocks {
    table: Mutex<HashMap<(GuildId, UserId), Arc<Mutex<()>>>>,
}

impl RegistrationLocks {
    /// Empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one member's registration in a guild.
    ///
    /// Entries nobody holds or waits on are pruned on each call.
    pub async fn acquire(&self, guild_id: GuildId, user_id: UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self.table.lock().await;
            table.retain(|_, lock| Arc::strong_count(lock) > 1);
            table.entry((guild_id, user_id)).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.table.lock().await.len()
    }

    /// Whether no entries are live.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Handles every inbound guild message.
pub struct WhitelistWorkflow {
    repository: Arc<WhitelistRepository>,
    transport: Arc<dyn WhitelistTransport>,
    router: CommandRouter,
    audit: Arc<AuditLog>,
    locks: RegistrationLocks,
}

impl WhitelistWorkflow {
    /// Create a workflow. `>data` exports are staged in `export_dir`.
    pub fn new(
        repository: Arc<WhitelistRepository>,
        transport: Arc<dyn WhitelistTransport>,
        audit: Arc<AuditLog>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        let router = CommandRouter::new(repository.clone(), transport.clone(), export_dir);
        Self {
            repository,
            transport,
            router,
            audit,
            locks: RegistrationLocks::new(),
        }
    }

    /// Process one message without letting any failure escape.
    ///
    /// Errors and panics are logged, appended to the audit log with the
    /// message's metadata, and reported as [`MessageDisposition::Failed`].
    pub async fn handle_message(&self, event: &MessageEvent) -> MessageDisposition {
        let outcome = AssertUnwindSafe(self.process_message(event))
            .catch_unwind()
            .await;

        let diagnostic = match outcome {
            Ok(Ok(disposition)) => return disposition,
            Ok(Err(err)) => {
                error!(error = %err, guild_id = %event.guild_id(), "Message handling failed");
                err.to_string()
            }
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                error!(panic = %reason, guild_id = %event.guild_id(), "Message handler panicked");
                format!("panic: {reason}")
            }
        };

        self.record_failure(&diagnostic, &event_context(event)).await;
        MessageDisposition::Failed
    }

    /// Append a failure that happened outside [`Self::handle_message`], such as
    /// an event the platform adapter could not convert.
    pub async fn record_failure(&self, diagnostic: &str, context: &str) {
        if let Err(e) = self.audit.record_failure(diagnostic, context).await {
            error!(error = %e, "Failed to write audit log entry");
        }
    }

    /// Run the workflow states for `event`, propagating failures.
    #[instrument(
        skip(self, event),
        fields(
            guild_id = %event.guild_id(),
            channel_id = %event.channel_id(),
            user_id = %event.author_id()
        )
    )]
    pub async fn process_message(&self, event: &MessageEvent) -> WhitelistResult<MessageDisposition> {
        if *event.is_bot() || !*event.is_member() {
            return Ok(MessageDisposition::Skipped);
        }

        let prefixed = is_command_shaped(event.content());

        if prefixed
            && *event.author_is_admin()
            && let Some(command) = Command::parse(event.content(), Scope::Admin)
        {
            self.router.dispatch(command, event).await?;
            return Ok(MessageDisposition::Command);
        }

        let config = self.load_config(*event.guild_id()).await?;
        if !config.admits(*event.channel_id(), event.author_role_ids()) {
            debug!("Message outside the whitelist gate");
            return Ok(MessageDisposition::OutsideGate);
        }

        if prefixed {
            return match Command::parse(event.content(), Scope::Public) {
                Some(command) => {
                    self.router.dispatch(command, event).await?;
                    Ok(MessageDisposition::Command)
                }
                None => {
                    let text = replies::accepted_commands(&accepted_public_commands());
                    self.transport.reply(event, Reply::text(text)).await?;
                    Ok(MessageDisposition::UnknownCommand)
                }
            };
        }

        let _guard = self
            .locks
            .acquire(*event.guild_id(), *event.author_id())
            .await;

        let Some(blockchain) = *config.blockchain() else {
            debug!("Blockchain not configured, ignoring submission");
            return Ok(MessageDisposition::Unconfigured);
        };

        let suffix = trailing_chars(event.content(), 3);
        if !blockchain.validate(event.content()) {
            debug!(blockchain = %blockchain, "Rejected wallet address");
            self.transport
                .reply(event, Reply::text(replies::wallet_invalid(suffix)))
                .await?;
            return Ok(MessageDisposition::Rejected);
        }

        let registration =
            UserRegistration::new(*event.author_id(), *event.guild_id(), event.content());
        self.repository.replace_registration(&registration).await?;
        info!(blockchain = %blockchain, "Registered wallet");

        self.transport
            .reply(
                event,
                Reply::text(replies::wallet_registered(*event.author_id(), suffix))
                    .mentioning_author(),
            )
            .await?;

        if let Err(e) = self.transport.delete_message(event).await {
            warn!(error = %e, "Failed to delete registration message");
        }

        Ok(MessageDisposition::Registered)
    }

    async fn load_config(&self, guild_id: GuildId) -> WhitelistResult<GuildConfig> {
        if let Some(config) = self.repository.guild_config(guild_id).await? {
            return Ok(config);
        }
        self.repository.ensure_guild(guild_id).await?;
        Ok(GuildConfig::unconfigured(guild_id))
    }
}

fn event_context(event: &MessageEvent) -> String {
    format!("{:?}\nContent:   {}", event, event.content())
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        (*reason).to_string()
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        reason.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
