//! Cancellable reveal timers for staged scene animations.
//!
//! A scene leaf owns every [`RevealTimer`] it schedules. Dropping the timer (or the leaf
//! holding it) aborts the sleeping task, so a scene that has been left can never receive
//! a late tick. Each tick also carries the activation number of the scene that scheduled
//! it, letting the event loop discard anything that slipped through before the abort.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Monotonic number identifying one activation of a scene
pub type Activation = u64;

/// Delivered when a reveal timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTick {
    pub activation: Activation,
    /// Leaf-defined tag telling apart several timers of one scene
    pub tag: u8,
}

/// Creates reveal timers bound to one scene activation
#[derive(Debug, Clone)]
pub struct RevealScheduler {
    tx: mpsc::UnboundedSender<RevealTick>,
    activation: Activation,
}

impl RevealScheduler {
    pub fn new(tx: mpsc::UnboundedSender<RevealTick>, activation: Activation) -> Self {
        Self { tx, activation }
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Schedule a tick after `delay`. Must be called from within a tokio runtime.
    pub fn schedule(&self, delay: Duration, tag: u8) -> RevealTimer {
        let tx = self.tx.clone();
        let tick = RevealTick {
            activation: self.activation,
            tag,
        };
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(tick);
        });
        RevealTimer {
            handle: Some(handle),
        }
    }
}

/// Handle to a pending tick; cancels it when dropped
#[derive(Debug)]
pub struct RevealTimer {
    handle: Option<JoinHandle<()>>,
}

impl RevealTimer {
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether the tick has not been delivered or cancelled yet
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
