//! Command dispatch.
//!
//! Each handler returns a [`CommandResult`]. A malformed argument is reported
//! as [`CommandError::InvalidArgument`] and answered with a generic reply by
//! [`CommandRouter::dispatch`]; anything else propagates to the caller.

use crate::command::{AdminCommand, Command, PublicCommand};
use crate::export::{export_file_name, remove_export, staging_path, write_export};
use crate::replies;
use crate::transport::{Attachment, MessageEvent, Reply, WhitelistTransport};
use regex::Regex;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument, warn};
use whitelister_core::Blockchain;
use whitelister_database::WhitelistRepository;
use whitelister_error::{
    DatabaseError, ExportError, TransportError, WhitelistError, WhitelistResult,
};

static CHANNEL_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>channel <#(\d+)>$").expect("Invalid channel regex"));
static ROLE_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>role <@&(\d+)>$").expect("Invalid role regex"));
static BLOCKCHAIN_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>blockchain (\w+)$").expect("Invalid blockchain regex"));

/// Why a command handler stopped.
#[derive(Debug, derive_more::Display)]
pub enum CommandError {
    /// The argument payload did not have the expected shape.
    #[display("Invalid argument: {_0}")]
    InvalidArgument(String),
    /// Store, transport or export failure.
    #[display("{_0}")]
    Failure(WhitelistError),
}

impl From<WhitelistError> for CommandError {
    fn from(err: WhitelistError) -> Self {
        CommandError::Failure(err)
    }
}

impl From<DatabaseError> for CommandError {
    fn from(err: DatabaseError) -> Self {
        CommandError::Failure(err.into())
    }
}

impl From<TransportError> for CommandError {
    fn from(err: TransportError) -> Self {
        CommandError::Failure(err.into())
    }
}

impl From<ExportError> for CommandError {
    fn from(err: ExportError) -> Self {
        CommandError::Failure(err.into())
    }
}

/// Result type for command handlers.
pub type CommandResult = Result<(), CommandError>;

/// Runs admin and public commands against the store and the transport.
#[derive(Clone)]
pub struct CommandRouter {
    repository: Arc<WhitelistRepository>,
    transport: Arc<dyn WhitelistTransport>,
    export_dir: PathBuf,
}

impl CommandRouter {
    /// Create a router. `>data` exports are staged in `export_dir`.
    pub fn new(
        repository: Arc<WhitelistRepository>,
        transport: Arc<dyn WhitelistTransport>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            transport,
            export_dir: export_dir.into(),
        }
    }

    /// Run `command` for `event`.
    ///
    /// Malformed arguments are answered with [`replies::INVALID_ARGUMENT`] and
    /// count as handled.
    #[instrument(skip(self, event), fields(guild_id = %event.guild_id(), user_id = %event.author_id(), command = %command))]
    pub async fn dispatch(&self, command: Command, event: &MessageEvent) -> WhitelistResult<()> {
        let outcome = match command {
            Command::Admin(admin) => self.run_admin(admin, event).await,
            Command::Public(public) => self.run_public(public, event).await,
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(CommandError::InvalidArgument(reason)) => {
                debug!(reason = %reason, "Rejected command argument");
                self.transport
                    .reply(
                        event,
                        Reply::text(replies::INVALID_ARGUMENT).mentioning_author(),
                    )
                    .await?;
                Ok(())
            }
            Err(CommandError::Failure(err)) => Err(err),
        }
    }

    async fn run_admin(&self, command: AdminCommand, event: &MessageEvent) -> CommandResult {
        match command {
            AdminCommand::Channel => self.set_channel(event).await,
            AdminCommand::Role => self.set_role(event).await,
            AdminCommand::Blockchain => self.set_blockchain(event).await,
            AdminCommand::Data => self.export_data(event).await,
            AdminCommand::Config => self.show_config(event).await,
            AdminCommand::Clear => self.clear(event).await,
            AdminCommand::HelpAdmin => self.help_admin(event).await,
        }
    }

    async fn run_public(&self, command: PublicCommand, event: &MessageEvent) -> CommandResult {
        match command {
            PublicCommand::Help => self.help(event).await,
            PublicCommand::Check => self.check(event).await,
        }
    }

    #[instrument(skip_all, fields(guild_id = %event.guild_id()))]
    async fn set_channel(&self, event: &MessageEvent) -> CommandResult {
        let captured = capture_id(&CHANNEL_ARGS, event.content())?;
        let channel = match event.mentioned_channel_ids().as_slice() {
            [channel] if channel.get() == captured => *channel,
            _ => return Err(invalid("expected exactly one channel mention")),
        };

        self.repository
            .set_whitelist_channel(*event.guild_id(), channel)
            .await?;
        info!(channel_id = %channel, "Whitelist channel set");

        self.reply(event, Reply::text(replies::channel_set(channel)).mentioning_author())
            .await
    }

    #[instrument(skip_all, fields(guild_id = %event.guild_id()))]
    async fn set_role(&self, event: &MessageEvent) -> CommandResult {
        let captured = capture_id(&ROLE_ARGS, event.content())?;
        let role = match event.mentioned_role_ids().as_slice() {
            [role] if role.get() == captured => *role,
            _ => return Err(invalid("expected exactly one role mention")),
        };

        self.repository
            .set_whitelist_role(*event.guild_id(), role)
            .await?;
        info!(role_id = %role, "Whitelist role set");

        self.reply(event, Reply::text(replies::role_set(role)).mentioning_author())
            .await
    }

    #[instrument(skip_all, fields(guild_id = %event.guild_id()))]
    async fn set_blockchain(&self, event: &MessageEvent) -> CommandResult {
        let code = BLOCKCHAIN_ARGS
            .captures(event.content())
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| invalid("expected a single blockchain code"))?;
        let blockchain = Blockchain::from_str(&code)
            .map_err(|_| invalid(format!("unsupported blockchain '{code}'")))?;

        self.repository
            .set_blockchain(*event.guild_id(), blockchain)
            .await?;
        info!(blockchain = %blockchain, "Blockchain set");

        self.reply(
            event,
            Reply::text(replies::blockchain_set(blockchain.code())).mentioning_author(),
        )
        .await
    }

    #[instrument(skip_all, fields(guild_id = %event.guild_id()))]
    async fn export_data(&self, event: &MessageEvent) -> CommandResult {
        let registrations = self
            .repository
            .guild_registrations(*event.guild_id())
            .await?;
        let path = staging_path(&self.export_dir, *event.guild_id(), *event.message_id());
        write_export(&path, &registrations).await?;

        let attachment = Attachment::new(path.clone(), export_file_name(*event.guild_id()));
        let sent = self
            .transport
            .reply(
                event,
                Reply::text(replies::DATA_ATTACHED).with_attachment(attachment),
            )
            .await;

        if let Err(e) = remove_export(&path).await {
            warn!(error = %e, "Failed to remove export file");
        }
        sent?;

        info!(count = registrations.len(), "Exported registrations");
        Ok(())
    }

    #[instrument(skip_all, fields(guild_id = %event.guild_id()))]
    async fn show_config(&self, event: &MessageEvent) -> CommandResult {
        let Some(config) = self.repository.guild_config(*event.guild_id()).await? else {
            debug!("No configuration row, nothing to show");
            return Ok(());
        };

        self.reply(
            event,
            Reply::embed(replies::config_embed(&event.guild_label(), &config))
                .mentioning_author(),
        )
        .await
    }

    #[instrument(skip_all, fields(guild_id = %event.guild_id()))]
    async fn clear(&self, event: &MessageEvent) -> CommandResult {
        let removed = self.repository.clear_guild(*event.guild_id()).await?;
        info!(removed_registrations = removed, "Guild cleared");

        self.reply(event, Reply::text(replies::CLEARED)).await
    }

    async fn help_admin(&self, event: &MessageEvent) -> CommandResult {
        self.reply(event, Reply::embed(replies::help_admin_embed()))
            .await
    }

    async fn help(&self, event: &MessageEvent) -> CommandResult {
        self.reply(event, Reply::embed(replies::help_embed())).await
    }

    #[instrument(skip_all, fields(guild_id = %event.guild_id(), user_id = %event.author_id()))]
    async fn check(&self, event: &MessageEvent) -> CommandResult {
        let text = match self
            .repository
            .registration(*event.guild_id(), *event.author_id())
            .await?
        {
            Some(registration) => replies::check_registered(registration.wallet_suffix()),
            None => replies::CHECK_UNREGISTERED.to_string(),
        };

        self.reply(event, Reply::text(text)).await
    }

    async fn reply(&self, event: &MessageEvent, reply: Reply) -> CommandResult {
        self.transport.reply(event, reply).await?;
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> CommandError {
    CommandError::InvalidArgument(reason.into())
}

/// The numeric id captured by `pattern`, which must match all of `content`.
fn capture_id(pattern: &Regex, content: &str) -> Result<u64, CommandError> {
    pattern
        .captures(content)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .ok_or_else(|| invalid("argument does not match the expected mention"))
}
