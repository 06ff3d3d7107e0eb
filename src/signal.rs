//! Shared reactive cell.
//!
//! A `Signal` is a single value that any number of handles can read and
//! replace. Readers always see the latest complete value; writers replace it
//! wholesale. Derived state (panel views, disabled flags) is recomputed from
//! signals on every read, so nothing downstream can go stale.

use crate::PanelDate;
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable handle to one shared value
#[derive(Debug)]
pub struct Signal<T> {
    tx: Arc<watch::Sender<T>>,
}

/// Optional navigation limit. `None` means unbounded on that side.
pub type Bound = Signal<Option<PanelDate>>;

impl<T> Signal<T> {
    /// Cell holding `value`
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the value, notifying subscribers
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Modifies the value in place, notifying subscribers
    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.tx.send_modify(modify);
    }

    /// Reads the value without cloning it
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&*self.tx.borrow())
    }

    /// Receiver that wakes on every change
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Signal<T> {
    /// Returns a copy of the current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl Signal<Option<PanelDate>> {
    /// A bound that limits nothing until set
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// A bound fixed at `date`
    pub fn at(date: impl Into<PanelDate>) -> Self {
        Self::new(Some(date.into()))
    }

    /// Current limit, ignoring an invalid date the same way as an absent one
    pub fn limit(&self) -> Option<PanelDate> {
        self.get().filter(PanelDate::is_valid)
    }
}
