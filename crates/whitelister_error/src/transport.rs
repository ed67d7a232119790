//! Chat-platform transport errors.
//!
//! Covers failures talking to the platform: sending replies, deleting
//! messages, listing guilds, and establishing the gateway session.

use derive_getters::Getters;

/// Transport error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Platform API error not covered by a more specific variant.
    #[display("Platform API error: {_0}")]
    Api(String),

    /// Reply could not be delivered.
    #[display("Message send failed: {_0}")]
    SendFailed(String),

    /// Message could not be deleted.
    #[display("Message delete failed: {_0}")]
    DeleteFailed(String),

    /// Guild, role or member data could not be fetched.
    #[display("Fetch failed: {_0}")]
    FetchFailed(String),

    /// Connection to the gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Bot token is missing, invalid or expired.
    #[display("Invalid or expired bot token")]
    InvalidToken,
}

/// Transport error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    kind: TransportErrorKind,
    line: u32,
    file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use whitelister_error::{TransportError, TransportErrorKind};
    ///
    /// let err = TransportError::new(TransportErrorKind::InvalidToken);
    /// assert_eq!(err.kind(), &TransportErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(feature = "discord")]
impl From<serenity::Error> for TransportError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        TransportError::new(TransportErrorKind::Api(err.to_string()))
    }
}
