//! Core domain types for Whitelister.
//!
//! This crate holds the vocabulary shared by the store and the bot:
//! - Platform identifiers ([`GuildId`], [`ChannelId`], [`RoleId`], [`UserId`], [`MessageId`])
//! - The supported [`Blockchain`] codes and their address validators
//! - Per-guild settings ([`GuildConfig`]) and wallet registrations ([`UserRegistration`])
//!
//! Nothing in here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod address;
mod blockchain;
mod ids;
mod models;

pub use address::{is_valid_ada_address, is_valid_evm_address, is_valid_sol_address, validate};
pub use blockchain::Blockchain;
pub use ids::{ChannelId, GuildId, MessageId, RoleId, UserId};
pub use models::{GuildConfig, UserRegistration, is_administrator, trailing_chars};
