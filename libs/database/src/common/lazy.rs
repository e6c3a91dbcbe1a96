//! Process-wide, lazily established connection handle.
//!
//! The first caller starts a connection attempt; every caller that arrives
//! while it is in flight awaits the same attempt. A successful result is
//! cached for the life of the process. A failed attempt is handed to all of
//! its waiters and then forgotten, so the next caller starts over.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::error::DatabaseResult;

type ConnectFn<T> = Arc<dyn Fn() -> BoxFuture<'static, DatabaseResult<T>> + Send + Sync>;
type Attempt<T> = Shared<BoxFuture<'static, DatabaseResult<T>>>;

struct Slot<T> {
    ready: Option<T>,
    pending: Option<Attempt<T>>,
}

/// A connection handle created on first use and shared afterwards.
///
/// `T` is the cheap-to-clone handle the driver hands out (for MongoDB a
/// `Client`, which wraps its own pool).
///
/// # Example
///
/// ```ignore
/// let lazy = LazyConnection::new(|| async { connect("mongodb://localhost").await });
/// let client = lazy.get().await?;
/// ```
pub struct LazyConnection<T> {
    connect: ConnectFn<T>,
    slot: Mutex<Slot<T>>,
}

impl<T> LazyConnection<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap a connect function. Nothing runs until [`get`](Self::get).
    pub fn new<F, Fut>(connect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DatabaseResult<T>> + Send + 'static,
    {
        Self {
            connect: Arc::new(move || connect().boxed()),
            slot: Mutex::new(Slot {
                ready: None,
                pending: None,
            }),
        }
    }

    /// Return the cached handle, joining or starting a connection attempt.
    pub async fn get(&self) -> DatabaseResult<T> {
        let attempt = {
            let mut slot = self.slot.lock().await;

            if let Some(handle) = &slot.ready {
                return Ok(handle.clone());
            }

            match &slot.pending {
                Some(attempt) => {
                    debug!("Joining in-flight connection attempt");
                    attempt.clone()
                }
                None => {
                    debug!("No cached connection, starting a new attempt");
                    let attempt = (self.connect)().shared();
                    slot.pending = Some(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        let mut slot = self.slot.lock().await;
        let is_current = slot
            .pending
            .as_ref()
            .is_some_and(|pending| pending.ptr_eq(&attempt));

        // An attempt superseded by reset() still answers its own callers but
        // never repopulates the cache.
        if is_current {
            match &result {
                Ok(handle) => slot.ready = Some(handle.clone()),
                Err(err) => {
                    warn!(error = %err, "Connection attempt failed, clearing cached attempt");
                }
            }
            slot.pending = None;
        }

        result
    }

    /// Whether a handle has been established and cached.
    pub async fn is_connected(&self) -> bool {
        self.slot.lock().await.ready.is_some()
    }

    /// Drop the cached handle so the next [`get`](Self::get) reconnects.
    ///
    /// An attempt already in flight is abandoned: its callers still receive
    /// its result, but that result is not cached.
    pub async fn reset(&self) {
        let mut slot = self.slot.lock().await;
        slot.ready = None;
        slot.pending = None;
    }
}
