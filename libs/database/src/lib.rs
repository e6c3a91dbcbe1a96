//! Database library providing the MongoDB connector and shared connection utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB config, connector, health checks and the
//!   lazily-initialized [`mongodb::MongoConnection`]
//! - `config` - Load [`mongodb::MongoConfig`] through `core_config::FromEnv`
//! - `all` - Everything above
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, MongoConnection};
//!
//! let connection = MongoConnection::new(MongoConfig::new("mongodb://localhost:27017"));
//!
//! // Nothing is dialed until the first caller asks for the database.
//! let db = connection.database().await?;
//! let collection = db.collection::<Document>("events");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, LazyConnection};
