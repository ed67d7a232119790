//! Database connection utilities.

use crate::DatabaseResult;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};
use whitelister_error::{DatabaseError, DatabaseErrorKind};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Open the SQLite database at `database_url` and apply pending migrations.
///
/// `:memory:` gives a private in-memory database, which is what the tests use.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
#[instrument]
pub fn establish_connection(database_url: &str) -> DatabaseResult<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)?;
    run_migrations(&mut conn)?;
    Ok(conn)
}

/// Apply every migration that has not run yet, returning how many ran.
pub fn run_migrations(conn: &mut SqliteConnection) -> DatabaseResult<usize> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;

    for version in &applied {
        debug!(%version, "Applied migration");
    }
    if !applied.is_empty() {
        info!(count = applied.len(), "Database migrations applied");
    }
    Ok(applied.len())
}
