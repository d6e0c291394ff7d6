//! Thread-safe controller handle
//!
//! The controller assumes a single writer. When presses and reconfiguration
//! arrive from different threads (a button interrupt and a radio handler,
//! say), wrap it in a [`SharedController`]: every call holds the lock for its
//! whole duration, so presses and reconfigurations are serialized.

use crate::controller::{PressOutcome, SequenceController};
use crate::press::{PressEvent, Tick};
use crate::trigger::TriggerAction;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Cloneable, mutex-serialized handle to one [`SequenceController`]
#[derive(Debug)]
pub struct SharedController<A: TriggerAction> {
    inner: Arc<Mutex<SequenceController<A>>>,
}

impl<A: TriggerAction> Clone for SharedController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: TriggerAction> SharedController<A> {
    pub fn new(controller: SequenceController<A>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    // Every completed controller call leaves it consistent, so a panic in
    // another holder does not invalidate the state.
    fn lock(&self) -> MutexGuard<'_, SequenceController<A>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn notify_press(&self, is_long: bool, timestamp: Tick) -> PressOutcome {
        self.lock().notify_press(is_long, timestamp)
    }

    pub fn ingest(&self, event: PressEvent) -> PressOutcome {
        self.lock().ingest(event)
    }

    pub fn set_sequence(&self, text: &str) {
        self.lock().set_sequence(text)
    }

    pub fn set_timeout(&self, timeout: Duration) {
        self.lock().set_timeout(timeout)
    }

    pub fn open(&self) {
        self.lock().open()
    }

    pub fn current_sequence(&self) -> String {
        self.lock().current_sequence().to_string()
    }

    pub fn trigger_count(&self) -> u64 {
        self.lock().trigger_count()
    }

    /// Run `f` with exclusive access to the controller
    pub fn with<R>(&self, f: impl FnOnce(&mut SequenceController<A>) -> R) -> R {
        f(&mut self.lock())
    }
}
