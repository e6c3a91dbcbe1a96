//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs MongoDB in a container.

use database::mongodb::{MongoConfig, MongoConnection};
use mongodb::Client;
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped. Give
/// each test its own database via [`connection`](Self::connection) so tests
/// sharing a container do not see each other's documents.
///
/// # Example
///
/// ```no_run
/// use test_utils::{TestDataBuilder, TestMongo};
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let builder = TestDataBuilder::from_test_name("my_test");
/// let connection = mongo.connection(&builder.database_name());
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a standalone MongoDB container
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}/?directConnection=true", host_port);

        tracing::info!(port = host_port, "Test MongoDB ready");

        Self {
            container,
            connection_string,
        }
    }

    /// A lazy connection scoped to `database`
    pub fn connection(&self, database: &str) -> MongoConnection {
        MongoConnection::new(self.config(database))
    }

    pub fn config(&self, database: &str) -> MongoConfig {
        MongoConfig::with_database(self.connection_string.clone(), database)
            .with_app_name("test-utils")
    }

    /// A plain driver client, for assertions that bypass the repositories
    pub async fn client(&self) -> Client {
        Client::with_uri_str(&self.connection_string)
            .await
            .expect("Failed to create MongoDB client")
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
