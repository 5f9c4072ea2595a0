use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// What a data-driven widget currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> DisplayState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    /// Payload of a ready state
    pub fn payload(&self) -> Option<&T> {
        match self {
            DisplayState::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    /// Message of a failed state
    pub fn failure(&self) -> Option<&str> {
        match self {
            DisplayState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Holds one widget's display state.
///
/// Every write replaces the whole state, so readers see either the old or
/// the new state and never a mix. After [`StateCell::dispose`] all writes
/// are rejected; the last state stays readable.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<DisplayState<T>>,
    disposed: AtomicBool,
}

impl<T> StateCell<T> {
    /// New cell in the loading state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DisplayState::Loading);
        Self {
            tx,
            disposed: AtomicBool::new(false),
        }
    }

    /// Replace the state. Returns false if the cell was disposed.
    pub fn publish(&self, next: DisplayState<T>) -> bool {
        // Checked under the channel's write lock, so dispose() cannot interleave
        self.tx.send_if_modified(|current| {
            if self.disposed.load(Ordering::Acquire) {
                return false;
            }
            *current = next;
            true
        })
    }

    /// Reject all further writes
    pub fn dispose(&self) {
        self.tx.send_if_modified(|_| {
            self.disposed.store(true, Ordering::Release);
            false
        });
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Receiver notified on every accepted write
    pub fn subscribe(&self) -> watch::Receiver<DisplayState<T>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> StateCell<T> {
    /// Copy of the current state
    pub fn snapshot(&self) -> DisplayState<T> {
        self.tx.borrow().clone()
    }
}

impl<T> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
