//! Error types for the Whitelister bot.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Every specific error converts into [`WhitelistError`], so `?` works across
//! crate boundaries.
//!
//! # Examples
//!
//! ```
//! use whitelister_error::{ConfigError, WhitelistResult};
//!
//! fn load() -> WhitelistResult<()> {
//!     Err(ConfigError::new("DISCORD_TOKEN is not set"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod config;
mod database;
mod error;
mod export;
mod transport;

pub use audit::AuditLogError;
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{WhitelistError, WhitelistErrorKind, WhitelistResult};
pub use export::ExportError;
pub use transport::{TransportError, TransportErrorKind};
