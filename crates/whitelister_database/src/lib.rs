//! SQLite integration for Whitelister.
//!
//! This crate provides the schema, migrations, row models and the
//! [`WhitelistRepository`] that backs both the guild configuration store
//! and the wallet registration table.
//!
//! # Example
//!
//! ```rust,ignore
//! use whitelister_database::{WhitelistRepository, establish_connection};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = establish_connection("data.db")?;
//! let repo = WhitelistRepository::new(conn);
//! repo.ensure_guild(whitelister_core::GuildId(1)).await?;
//! # Ok(())
//! # }
//! ```

mod connection;
mod models;
mod repository;

pub mod schema;

pub use connection::{MIGRATIONS, establish_connection, run_migrations};
pub use models::{GuildConfigRow, RegistrationRow};
pub use repository::WhitelistRepository;

use whitelister_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
