//! Double-copy gesture state machine
//!
//! Synchronous and clock-free: every event carries its own timestamp, and
//! window expiry arrives as an explicit `expire(generation)` call from the
//! reset timer. States are Idle and Armed.
//!
//! ```text
//! Idle  --copy (debounced)-------------------------------> Armed
//! Armed --copy within window, same non-empty content-----> Idle + Trigger
//! Armed --copy within window, other or empty content-----> Idle
//! Armed --copy after window------------------------------> Armed (new gesture)
//! Armed --expire(current generation)---------------------> Idle
//! ```

use crate::config::TriggerSettings;

/// Unix time in milliseconds
pub type Timestamp = i64;

/// Confirmed double-copy: the text copied twice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    ContentChanged,
    EmptyContent,
}

/// What one clipboard change did to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Too close to the previous change; nothing was read
    Debounced,
    /// First copy recorded. The caller arms a reset timer for `generation`.
    Armed { generation: u64 },
    Triggered(Trigger),
    Dropped(DropReason),
}

/// The single gesture in flight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureState {
    pub armed: bool,
    pub armed_at: Timestamp,
    pub first_content: String,
    /// Identifies the arming a reset timer belongs to
    pub generation: u64,
}

#[derive(Debug)]
pub struct GestureMachine {
    debounce_ms: i64,
    window_ms: i64,
    last_raw_event: Option<Timestamp>,
    state: GestureState,
}

impl GestureMachine {
    pub fn new(settings: TriggerSettings) -> Self {
        Self {
            debounce_ms: i64::try_from(settings.debounce_ms).unwrap_or(i64::MAX),
            window_ms: i64::try_from(settings.gesture_window_ms).unwrap_or(i64::MAX),
            last_raw_event: None,
            state: GestureState::default(),
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state.armed
    }

    /// Feed one clipboard change. `read` is only called when the change
    /// survives debouncing; `None` means the clipboard had no readable text.
    pub fn on_copy<F>(&mut self, at: Timestamp, read: F) -> Transition
    where
        F: FnOnce() -> Option<String>,
    {
        if !self.admit(at) {
            return Transition::Debounced;
        }
        self.observe(at, read())
    }

    /// Debounce step of `on_copy`. `false` means the change at `at` repeats
    /// the previous one and must not be read.
    pub fn admit(&mut self, at: Timestamp) -> bool {
        if let Some(last) = self.last_raw_event {
            // A clock that went backwards is not a duplicate notification
            if (0..self.debounce_ms).contains(&at.saturating_sub(last)) {
                return false;
            }
        }
        self.last_raw_event = Some(at);
        true
    }

    /// Content step of `on_copy`, for a change `admit` accepted
    pub fn observe(&mut self, at: Timestamp, content: Option<String>) -> Transition {
        let content = content.unwrap_or_default();
        let within_window = (0..=self.window_ms).contains(&at.saturating_sub(self.state.armed_at));
        if !self.state.armed || !within_window {
            return self.arm(at, content);
        }

        let first = std::mem::take(&mut self.state.first_content);
        self.state.armed = false;

        if content.trim().is_empty() {
            Transition::Dropped(DropReason::EmptyContent)
        } else if content != first {
            Transition::Dropped(DropReason::ContentChanged)
        } else {
            Transition::Triggered(Trigger { content })
        }
    }

    /// Reset-timer expiry. Only disarms the arming the timer was started
    /// for; a stale or already-consumed generation is a no-op.
    pub fn expire(&mut self, generation: u64) -> bool {
        if !self.state.armed || self.state.generation != generation {
            return false;
        }
        self.state.armed = false;
        self.state.first_content.clear();
        true
    }

    fn arm(&mut self, at: Timestamp, content: String) -> Transition {
        let generation = self.state.generation.wrapping_add(1);
        self.state = GestureState {
            armed: true,
            armed_at: at,
            first_content: content,
            generation,
        };
        Transition::Armed { generation }
    }
}
