//! Top-level error wrapper types.

use crate::{AuditLogError, ConfigError, DatabaseError, ExportError, TransportError};

/// Every failure the bot can surface, grouped by origin.
///
/// # Examples
///
/// ```
/// use whitelister_error::{ConfigError, WhitelistError};
///
/// let err: WhitelistError = ConfigError::new("bad value").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WhitelistErrorKind {
    /// Persistent store failure
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Configuration loading failure
    #[from(ConfigError)]
    Config(ConfigError),
    /// Chat-platform transport failure
    #[from(TransportError)]
    Transport(TransportError),
    /// Audit log write failure
    #[from(AuditLogError)]
    AuditLog(AuditLogError),
    /// CSV export failure
    #[from(ExportError)]
    Export(ExportError),
}

/// Whitelister error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Whitelister Error: {}", _0)]
pub struct WhitelistError(Box<WhitelistErrorKind>);

impl WhitelistError {
    /// Create a new error from a kind.
    pub fn new(kind: WhitelistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WhitelistErrorKind {
        &self.0
    }
}

impl<T> From<T> for WhitelistError
where
    T: Into<WhitelistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Whitelister operations.
pub type WhitelistResult<T> = std::result::Result<T, WhitelistError>;
