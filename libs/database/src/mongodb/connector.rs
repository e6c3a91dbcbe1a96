use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::DatabaseError;

/// Error type for MongoDB connection setup
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("Invalid MongoDB options: {0}")]
    InvalidOptions(#[source] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] mongodb::error::Error),
}

impl From<MongoError> for DatabaseError {
    fn from(err: MongoError) -> Self {
        match err {
            MongoError::InvalidOptions(e) => DatabaseError::ConfigError(e.to_string()),
            MongoError::ConnectionFailed(e) => DatabaseError::ConnectionFailed(e.to_string()),
        }
    }
}

/// Build driver options from a [`MongoConfig`].
pub async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(MongoError::InvalidOptions)?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Connect using a MongoConfig and verify the deployment answers a ping.
///
/// The driver connects lazily, so without the ping a bad host would only
/// surface on the first query.
#[instrument(skip(config), fields(url = %config.redacted_url()))]
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB");

    let options = client_options(config).await?;
    let client = Client::with_options(options).map_err(MongoError::InvalidOptions)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(MongoError::ConnectionFailed)?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}
