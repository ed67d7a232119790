//! Append-only audit log.
//!
//! Entries are plain text:
//!
//! ```text
//! [2024-06-01T12:00:00+00:00] Head: New Guild
//!    Text: 123, My Guild
//!
//! ```

use crate::transport::GuildJoinEvent;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::instrument;
use whitelister_error::AuditLogError;

/// Process-wide audit log file.
///
/// Appends are serialised so concurrent handlers never interleave entries.
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    writer: Mutex<()>,
}

impl AuditLog {
    /// Log to `path`, creating the file on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(()),
        }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry.
    #[instrument(skip(self, text), fields(path = %self.path.display()))]
    pub async fn append(&self, head: &str, text: &str) -> Result<(), AuditLogError> {
        let entry = format!(
            "[{}] Head: {}\n   Text: {}\n\n",
            chrono::Utc::now().to_rfc3339(),
            head,
            text
        );

        let _guard = self.writer.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.error(format!("Failed to open: {}", e)))?;
        file.write_all(entry.as_bytes())
            .await
            .map_err(|e| self.error(format!("Failed to write: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| self.error(format!("Failed to flush: {}", e)))
    }

    /// Record a failure caught at the per-message boundary.
    ///
    /// The diagnostic is flattened onto one line with `---` separators.
    pub async fn record_failure(&self, diagnostic: &str, context: &str) -> Result<(), AuditLogError> {
        self.append(&diagnostic.replace('\n', "---"), context).await
    }

    /// Record that the bot joined a guild.
    pub async fn record_guild_join(&self, event: &GuildJoinEvent) -> Result<(), AuditLogError> {
        self.append(
            "New Guild",
            &format!("{}, {}", event.guild_id(), event.guild_name()),
        )
        .await
    }

    #[track_caller]
    fn error(&self, message: String) -> AuditLogError {
        AuditLogError::new(self.path.display().to_string(), message)
    }
}
