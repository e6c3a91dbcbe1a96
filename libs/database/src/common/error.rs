/// Unified database error type
///
/// Variants carry rendered messages rather than driver errors so the type is
/// `Clone`; a failed connection attempt is handed to every task that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    /// The database could not be reached or the handshake failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Configuration error (bad URI, invalid options)
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DatabaseError {
    /// Whether the error means the database is unreachable right now.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DatabaseError::ConnectionFailed(_))
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
