//! Single-slot overwrite-on-publish handoff between the pipeline and the
//! transmitter worker
//!
//! The pipeline publishes at ingestion rate and must never wait for the
//! consumer, so the slot holds at most one pending value: publishing while
//! one is still pending displaces it (last-write-wins). The receiving side
//! blocks with a bounded timeout so it can notice a shutdown request even
//! when no traffic arrives.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Why a receive returned without a value
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotRecvError {
    #[error("No value published within the timeout")]
    TimedOut,

    #[error("Publisher has shut down")]
    Shutdown,
}

struct State<T> {
    pending: Option<T>,
    shutdown: bool,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    available: Condvar,
}

/// Publishing half of the slot, held by the pipeline
pub struct SlotSender<T> {
    shared: Arc<Shared<T>>,
}

/// Consuming half of the slot, owned by the worker thread
pub struct SlotReceiver<T> {
    shared: Arc<Shared<T>>,
}

/// Create a connected sender/receiver pair around one empty slot
pub fn slot<T>() -> (SlotSender<T>, SlotReceiver<T>) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State {
            pending: None,
            shutdown: false,
        }),
        available: Condvar::new(),
    });
    (
        SlotSender {
            shared: shared.clone(),
        },
        SlotReceiver { shared },
    )
}

impl<T> SlotSender<T> {
    /// Publish a value, overwriting any not-yet-consumed one
    ///
    /// Never blocks beyond the brief slot lock. Returns the displaced value
    /// when the consumer had not drained the previous publish.
    pub fn publish(&self, value: T) -> Option<T> {
        let displaced = {
            let mut state = self.shared.state.lock().unwrap();
            state.pending.replace(value)
        };
        self.shared.available.notify_one();
        displaced
    }

    /// Signal shutdown and wake the receiver
    ///
    /// After this call every receive returns [`SlotRecvError::Shutdown`],
    /// even if a value is still pending; a pending value at shutdown is
    /// dropped, matching the transmitter contract.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.shutdown = true;
        }
        self.shared.available.notify_all();
    }
}

impl<T> Drop for SlotSender<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<T> SlotReceiver<T> {
    /// Take the pending value, waiting up to `timeout` for one to arrive
    ///
    /// Shutdown wins over pending data: once the sender has shut down the
    /// result is [`SlotRecvError::Shutdown`] regardless of slot contents.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, SlotRecvError> {
        let state = self.shared.state.lock().unwrap();
        let (mut state, _) = self
            .shared
            .available
            .wait_timeout_while(state, timeout, |s| !s.shutdown && s.pending.is_none())
            .unwrap();

        if state.shutdown {
            Err(SlotRecvError::Shutdown)
        } else if let Some(value) = state.pending.take() {
            Ok(value)
        } else {
            Err(SlotRecvError::TimedOut)
        }
    }
}
