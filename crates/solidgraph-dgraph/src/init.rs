//! Lazy, concurrency-safe initialization of the database handle.
//!
//! State machine: Uninitialized → Initializing → Ready. Exactly one
//! caller runs the initialization; a failure reverts to Uninitialized
//! so a later call can retry from scratch. Concurrent callers arriving
//! mid-initialization poll for Ready at a fixed interval, bounded by a
//! maximum total wait, and fail with the fixed initialization-failure
//! message when the bound is exceeded. They never see the underlying
//! cause; only the initiating caller does.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use tokio::time::{sleep, Duration};

use solidgraph_core::error::{AccessorError, Result, INIT_FAILURE_MESSAGE};

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

/// How often a waiting caller re-checks the state.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Maximum number of polls before a waiting caller gives up (1500 ms
/// total).
const MAX_POLLS: u32 = 150;

/// One-shot initialization guard holding the shared handle once ready.
pub struct InitGuard<T> {
    state: AtomicU8,
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for InitGuard<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InitGuard<T> {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINITIALIZED),
            slot: Mutex::new(None),
        }
    }

    /// A guard already holding an initialized handle. Used when the
    /// caller manages the connection lifecycle itself.
    pub fn ready(value: T) -> Self {
        Self {
            state: AtomicU8::new(READY),
            slot: Mutex::new(Some(Arc::new(value))),
        }
    }

    /// Return the handle, initializing it through `init` if this is the
    /// first caller. The CAS below admits exactly one initializer; the
    /// handle is never re-created once Ready.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self
            .state
            .compare_exchange(UNINITIALIZED, INITIALIZING, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => match init().await {
                Ok(value) => {
                    let handle = Arc::new(value);
                    self.store(handle.clone());
                    self.state.store(READY, Ordering::Release);
                    Ok(handle)
                }
                Err(error) => {
                    // Revert so a later call can retry; waiters time out
                    // with the fixed message instead of seeing `error`.
                    self.state.store(UNINITIALIZED, Ordering::Release);
                    Err(error)
                }
            },
            Err(READY) => self.handle(),
            Err(_) => self.wait_for_ready().await,
        }
    }

    async fn wait_for_ready(&self) -> Result<Arc<T>> {
        for _ in 0..MAX_POLLS {
            sleep(POLL_INTERVAL).await;
            if self.state.load(Ordering::Acquire) == READY {
                return self.handle();
            }
        }
        Err(AccessorError::Initialization(INIT_FAILURE_MESSAGE.to_string()))
    }

    fn store(&self, handle: Arc<T>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(handle);
        }
    }

    fn handle(&self) -> Result<Arc<T>> {
        self.slot
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .ok_or_else(|| AccessorError::Initialization(INIT_FAILURE_MESSAGE.to_string()))
    }
}
