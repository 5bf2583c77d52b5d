//! CopyTriggerEngine - the gesture machine plus its reset timer
//!
//! Concurrency Model:
//! - One `GestureMachine` behind a `parking_lot::Mutex`; clipboard changes and
//!   timer firings take the lock, so transitions never interleave
//! - The host's clipboard read runs between the debounce check and the state
//!   transition with the lock released, so a reader may call back into the
//!   engine
//! - The reset timer is a Tokio task racing `sleep(window)` against a
//!   `CancellationToken`. Cancelling is best-effort; the generation check in
//!   `GestureMachine::expire` is what keeps a late firing from touching a
//!   newer gesture
//! - Timer tasks hold a `Weak` reference, and `shutdown`/`Drop` cancel any
//!   pending timer
//! - Uses the global FALLBACK_RUNTIME when constructed outside any runtime
//!   (host threads calling in through FFI)

use crate::config::TriggerSettings;
use crate::gesture::{GestureMachine, Timestamp, Transition, Trigger};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Global fallback Tokio runtime for when the engine is created outside any runtime context.
/// Shared across all engines and never dropped.
static FALLBACK_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("versekit-timer")
        .enable_all()
        .build()
        .expect("Failed to create fallback tokio runtime")
});

/// Current runtime if there is one, otherwise the global fallback
fn runtime_handle() -> tokio::runtime::Handle {
    tokio::runtime::Handle::try_current().unwrap_or_else(|_| FALLBACK_RUNTIME.handle().clone())
}

struct EngineState {
    machine: GestureMachine,
    pending_reset: Option<CancellationToken>,
    shut_down: bool,
}

impl EngineState {
    fn cancel_pending_reset(&mut self) {
        if let Some(token) = self.pending_reset.take() {
            token.cancel();
        }
    }
}

pub struct CopyTriggerEngine {
    state: Arc<Mutex<EngineState>>,
    gesture_window: Duration,
    runtime: tokio::runtime::Handle,
}

impl CopyTriggerEngine {
    pub fn new(settings: TriggerSettings) -> Self {
        Self::with_runtime(settings, runtime_handle())
    }

    pub fn with_runtime(settings: TriggerSettings, runtime: tokio::runtime::Handle) -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState {
                machine: GestureMachine::new(settings),
                pending_reset: None,
                shut_down: false,
            })),
            gesture_window: settings.gesture_window(),
            runtime,
        }
    }

    /// Handle one OS clipboard change. Returns the trigger when this change
    /// completes a double-copy gesture.
    ///
    /// `read` runs at most once, only for changes that survive debouncing,
    /// and never under the engine lock.
    pub fn on_raw_copy_event<F>(&self, at: Timestamp, read: F) -> Option<Trigger>
    where
        F: FnOnce() -> Option<String>,
    {
        {
            let mut state = self.state.lock();
            if state.shut_down {
                return None;
            }
            if !state.machine.admit(at) {
                tracing::debug!("clipboard change at {} debounced", at);
                return None;
            }
        }

        let content = read();

        let mut state = self.state.lock();
        if state.shut_down {
            return None;
        }

        match state.machine.observe(at, content) {
            Transition::Debounced => None,
            Transition::Armed { generation } => {
                tracing::debug!("gesture {} armed at {}", generation, at);
                self.schedule_reset(&mut state, generation);
                None
            }
            Transition::Triggered(trigger) => {
                state.cancel_pending_reset();
                tracing::info!("double copy confirmed ({} chars)", trigger.content.chars().count());
                Some(trigger)
            }
            Transition::Dropped(reason) => {
                state.cancel_pending_reset();
                tracing::debug!("gesture dropped: {:?}", reason);
                None
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state.lock().machine.is_armed()
    }

    /// Cancel any pending reset timer and ignore all further events
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.shut_down = true;
        state.cancel_pending_reset();
    }

    fn schedule_reset(&self, state: &mut EngineState, generation: u64) {
        state.cancel_pending_reset();

        let token = CancellationToken::new();
        state.pending_reset = Some(token.clone());

        let weak: Weak<Mutex<EngineState>> = Arc::downgrade(&self.state);
        let window = self.gesture_window;
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(window) => {
                    let Some(shared) = weak.upgrade() else { return };
                    let mut state = shared.lock();
                    if state.machine.expire(generation) {
                        state.pending_reset = None;
                        tracing::debug!("gesture {} expired", generation);
                    }
                }
            }
        });
    }
}

impl Drop for CopyTriggerEngine {
    fn drop(&mut self) {
        self.state.lock().cancel_pending_reset();
    }
}
