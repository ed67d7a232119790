//! CSV export of a guild's registrations.

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use whitelister_core::{GuildId, MessageId, UserRegistration};
use whitelister_error::ExportError;

/// First line of every export.
pub const CSV_HEADER: &str = "userId, walletAddress";

/// File name a guild's export is delivered under.
pub fn export_file_name(guild_id: GuildId) -> String {
    format!("{guild_id}.csv")
}

/// Render registrations as CSV, one `userId,wallet` line each.
///
/// ```
/// use whitelister_bot::render_csv;
/// use whitelister_core::{GuildId, UserId, UserRegistration};
///
/// let rows = vec![UserRegistration::new(UserId(42), GuildId(1), "0xabc")];
/// assert_eq!(render_csv(&rows), "userId, walletAddress\n42,0xabc\n");
/// ```
pub fn render_csv(registrations: &[UserRegistration]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for registration in registrations {
        csv.push_str(&format!(
            "{},{}\n",
            registration.user_id(),
            registration.wallet()
        ));
    }
    csv
}

/// Where a `>data` export for one request is staged inside `dir`.
///
/// The message id keeps concurrent exports for the same guild apart.
pub fn staging_path(dir: &Path, guild_id: GuildId, message_id: MessageId) -> PathBuf {
    dir.join(format!("{guild_id}-{message_id}.csv"))
}

/// Write registrations as CSV to `path`.
#[instrument(skip(registrations), fields(path = %path.display(), count = registrations.len()))]
pub async fn write_export(path: &Path, registrations: &[UserRegistration]) -> Result<(), ExportError> {
    tokio::fs::write(path, render_csv(registrations))
        .await
        .map_err(|e| ExportError::new(format!("Failed to write {}: {}", path.display(), e)))?;
    debug!("Wrote export");
    Ok(())
}

/// Delete an export file once it has been delivered.
#[instrument]
pub async fn remove_export(path: &Path) -> Result<(), ExportError> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| ExportError::new(format!("Failed to remove {}: {}", path.display(), e)))
}
