//! MongoDB connection management
//!
//! [`MongoConnection`] is the handle the rest of the workspace passes around;
//! it connects on first use and shares one client across the process.

mod config;
mod connection;
mod connector;
mod health;
mod ids;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connection::MongoConnection;
pub use connector::{MongoError, client_options, connect_from_config};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use ids::uuid_to_bson;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
