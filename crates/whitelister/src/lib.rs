//! Whitelister: a Discord bot that collects wallet addresses for whitelists.
//!
//! Admins pick a channel, a role and a blockchain with `>` commands. Members
//! holding the role then post their wallet address in the channel; the bot
//! validates it for the chosen chain, stores it (replacing any earlier
//! submission), confirms, and deletes the message.
//!
//! This crate holds the pieces the binary needs around the bot itself:
//! - [`WhitelisterConfig`]: layered configuration loading
//! - [`BotToken`]: the platform credential, kept out of logs
//! - [`init_observability`]: tracing subscriber setup

#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{BotToken, CONFIG_FILE_NAME, ENV_PREFIX, WhitelisterConfig};
pub use observability::{ObservabilityConfig, init_observability};
