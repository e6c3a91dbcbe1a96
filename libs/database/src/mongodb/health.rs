use mongodb::bson::doc;
use std::time::Instant;

use super::MongoConnection;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Ping the database, connecting first if needed.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, MongoConnection, check_health};
///
/// let connection = MongoConnection::new(MongoConfig::from_env()?);
/// let healthy = check_health(&connection).await;
/// ```
pub async fn check_health(connection: &MongoConnection) -> bool {
    check_health_detailed(connection).await.healthy
}

/// Check MongoDB health with timing information and any error message.
pub async fn check_health_detailed(connection: &MongoConnection) -> HealthStatus {
    let start = Instant::now();

    let result = match connection.database().await {
        Ok(db) => db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    let response_time_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(()) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(message) => HealthStatus {
            healthy: false,
            message: Some(message),
            response_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mongodb::MongoConfig;

    #[tokio::test]
    async fn test_invalid_uri_is_unhealthy() {
        let connection = MongoConnection::new(MongoConfig::new("not-a-uri"));
        let status = check_health_detailed(&connection).await;
        assert!(!status.healthy);
        assert!(status.message.is_some());
    }

    #[tokio::test]
    async fn test_check_health() {
        let url = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let connection = MongoConnection::new(MongoConfig::new(url));
        assert!(check_health(&connection).await);
    }
}
