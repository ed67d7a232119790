//! Serenity adapter.
//!
//! Converts gateway events into [`MessageEvent`](crate::MessageEvent) /
//! [`GuildJoinEvent`](crate::GuildJoinEvent) and implements
//! [`WhitelistTransport`](crate::WhitelistTransport) over the Discord HTTP API.

mod client;
mod events;
mod handler;
mod transport;

pub use client::WhitelistBot;
pub use events::message_event;
pub use handler::WhitelistHandler;
pub use transport::SerenityTransport;
