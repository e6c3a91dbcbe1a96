//! Application state management.

use database::mongodb::MongoConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is an `Arc` around the lazily
/// established client, so every clone sees the same cached connection.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Process-wide MongoDB connection, dialed on first use
    pub connection: MongoConnection,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let connection = MongoConnection::new(config.mongodb.clone());
        Self { config, connection }
    }
}
