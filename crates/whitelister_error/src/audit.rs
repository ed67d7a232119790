//! Audit log errors.

/// Failure appending to the audit log file.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Audit Log Error: {} ({}) at line {} in {}", message, path, line, file)]
pub struct AuditLogError {
    /// What went wrong
    pub message: String,
    /// Path of the log file
    pub path: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AuditLogError {
    /// Create a new AuditLogError for the given log path.
    #[track_caller]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: path.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
