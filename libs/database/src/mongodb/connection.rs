//! Lazy, process-wide MongoDB connection.

use mongodb::{Client, Database};
use std::sync::Arc;
use tracing::info;

use super::config::{DEFAULT_DATABASE, MongoConfig};
use super::connector::connect_from_config;
use crate::common::{DatabaseError, DatabaseResult, LazyConnection};

/// Shared MongoDB connection handle.
///
/// Cloning is cheap; every clone shares one [`LazyConnection`], so the whole
/// process performs at most one successful connection. Nothing touches the
/// network until the first call to [`client`](Self::client) or
/// [`database`](Self::database).
#[derive(Clone)]
pub struct MongoConnection {
    inner: Arc<LazyConnection<Client>>,
    database: Option<String>,
}

impl MongoConnection {
    pub fn new(config: MongoConfig) -> Self {
        let database = config.database.clone();
        let config = Arc::new(config);

        let inner = LazyConnection::new(move || {
            let config = config.clone();
            async move { connect_from_config(&config).await.map_err(DatabaseError::from) }
        });

        Self {
            inner: Arc::new(inner),
            database,
        }
    }

    /// The connected client, establishing the connection on first use.
    pub async fn client(&self) -> DatabaseResult<Client> {
        self.inner.get().await
    }

    /// The application database: the configured name, else the URI's
    /// default database, else `devevent`.
    pub async fn database(&self) -> DatabaseResult<Database> {
        let client = self.client().await?;
        let db = match &self.database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        Ok(db)
    }

    pub async fn is_connected(&self) -> bool {
        self.inner.is_connected().await
    }

    /// Drop the cached client; the next call reconnects.
    pub async fn reset(&self) {
        info!("Resetting MongoDB connection");
        self.inner.reset().await;
    }
}

impl std::fmt::Debug for MongoConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConnection")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}
