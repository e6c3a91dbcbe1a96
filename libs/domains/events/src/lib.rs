//! Events Domain
//!
//! The event record manager: every write is normalized and validated before
//! it reaches MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← prepare_event() before every insert/replace
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB implementation (unique slug index)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Event, CreateEvent, UpdateEvent, EventFilter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::{MongoConfig, MongoConnection};
//! use domain_events::{handlers, MongoEventRepository, EventService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = MongoConnection::new(MongoConfig::new("mongodb://localhost:27017"));
//!
//! let repository = MongoEventRepository::new(connection);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(EventService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use crate::mongodb::MongoEventRepository;
pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use models::{CreateEvent, Event, EventFilter, EventMode, UpdateEvent};
pub use repository::EventRepository;
pub use service::EventService;
pub use validation::{derive_slug, normalize_date, normalize_time, prepare_event};
