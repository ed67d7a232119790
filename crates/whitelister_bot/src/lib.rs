//! Discord bot logic for collecting whitelist wallet addresses.
//!
//! # Architecture
//!
//! - **transport**: the capability set the bot needs from the chat platform
//!   ([`WhitelistTransport`]) and the platform-neutral event types
//! - **command**: prefix command parsing into [`AdminCommand`] / [`PublicCommand`]
//! - **router**: the [`CommandRouter`] that runs command handlers
//! - **workflow**: the per-message [`WhitelistWorkflow`] state machine and its
//!   failure boundary
//! - **lifecycle**: startup reconciliation and guild-join handling
//! - **audit**: the append-only [`AuditLog`]
//! - **export**: CSV rendering for `>data`
//!
//! # Platform Support
//!
//! The serenity adapter lives in the `discord` module behind the `discord`
//! feature. Everything else is platform-agnostic and tested against a fake
//! transport.

#![warn(missing_docs)]

mod audit;
mod command;
mod export;
mod lifecycle;
mod replies;
mod router;
mod transport;
mod workflow;

#[cfg(feature = "discord")]
mod discord;

pub use audit::AuditLog;
pub use command::{
    AdminCommand, COMMAND_PREFIX, Command, PublicCommand, Scope, accepted_public_commands,
    command_name, is_command_shaped, parse_channel_mentions,
};
pub use export::{
    CSV_HEADER, export_file_name, remove_export, render_csv, staging_path, write_export,
};
pub use lifecycle::GuildLifecycle;
pub use replies::INVALID_ARGUMENT;
pub use router::{CommandError, CommandResult, CommandRouter};
pub use transport::{
    Attachment, Embed, GuildJoinEvent, MessageEvent, MessageEventBuilder, MessageEventBuilderError, Reply,
    ReplyBody, TransportResult, WhitelistTransport,
};
pub use workflow::{MessageDisposition, RegistrationLocks, WhitelistWorkflow};

#[cfg(feature = "discord")]
pub use discord::{SerenityTransport, WhitelistBot, WhitelistHandler, message_event};
