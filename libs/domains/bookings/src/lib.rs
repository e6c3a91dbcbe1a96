//! Bookings Domain
//!
//! The booking record manager. A booking is written only after its email
//! passes validation and the event it references is found in `events`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::{MongoConfig, MongoConnection};
//! use domain_bookings::{handlers, BookingService, MongoBookingRepository};
//! use domain_events::MongoEventRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = MongoConnection::new(MongoConfig::new("mongodb://localhost:27017"));
//!
//! let bookings = MongoBookingRepository::new(connection.clone());
//! bookings.init_indexes().await?;
//!
//! let service = BookingService::new(bookings, MongoEventRepository::new(connection));
//! let router = handlers::router(service);
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

pub use crate::mongodb::MongoBookingRepository;
pub use error::{BookingError, BookingResult};
pub use handlers::ApiDoc;
pub use models::{Booking, BookingFilter, CreateBooking};
pub use repository::{BookingRepository, EventLookup};
pub use service::BookingService;
pub use validation::validate_booking;
