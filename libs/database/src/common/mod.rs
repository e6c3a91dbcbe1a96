//! Common utilities shared across database implementations

pub mod error;
pub mod lazy;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use lazy::LazyConnection;
pub use retry::{RetryConfig, retry, retry_with_backoff};
