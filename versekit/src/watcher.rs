//! VerseWatcher - Main API for the tray host
//!
//! Wires clipboard changes through the trigger engine and, on a confirmed
//! double copy, through the lookup pipeline to the host's `ActionSink`.

use crate::clock::{Clock, SystemClock};
use crate::config::Configuration;
use crate::gesture::Trigger;
use crate::interface::{
    ActionSink, ClipboardReader, LookupOutcome, Notification, VerseKitError,
};
use crate::pipeline::VersePipeline;
use crate::trigger::CopyTriggerEngine;
use std::sync::Arc;

#[derive(uniffi::Object)]
pub struct VerseWatcher {
    pipeline: VersePipeline,
    engine: CopyTriggerEngine,
    sink: Arc<dyn ActionSink>,
    clock: Arc<dyn Clock>,
}

// Internal implementation (not exported via FFI)
impl VerseWatcher {
    /// Watcher with an injected clock for `on_clipboard_change`
    pub fn with_clock(
        config: Configuration,
        sink: Arc<dyn ActionSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, VerseKitError> {
        let pipeline = match VersePipeline::new(&config) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                tracing::warn!("invalid configuration: {}", e);
                sink.notify(Notification::config_error(&e.to_string()));
                return Err(e.into());
            }
        };

        Ok(Self {
            pipeline,
            engine: CopyTriggerEngine::new(config.trigger),
            sink,
            clock,
        })
    }

    fn read_clipboard(reader: &dyn ClipboardReader) -> Option<String> {
        match reader.read_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("clipboard read failed: {}", e);
                None
            }
        }
    }

    fn dispatch(&self, trigger: Trigger) -> LookupOutcome {
        let outcome = self.pipeline.lookup(&trigger.content);
        match &outcome {
            LookupOutcome::Found { reference, url } => {
                tracing::info!("opening {} ({})", reference, url);
                self.sink.open_url(url.clone());
            }
            LookupOutcome::NoReference => {
                tracing::debug!("no reference in copied text");
            }
        }
        self.sink.notify(Notification::for_outcome(&outcome));
        outcome
    }
}

// FFI-exported constructor (must be in standalone impl block)
#[uniffi::export]
impl VerseWatcher {
    /// Create a watcher. A configuration error is also sent to the sink
    /// once as a notification.
    #[uniffi::constructor]
    pub fn new(config: Configuration, sink: Arc<dyn ActionSink>) -> Result<Self, VerseKitError> {
        Self::with_clock(config, sink, Arc::new(SystemClock))
    }
}

#[uniffi::export]
impl VerseWatcher {
    /// Handle an OS clipboard change stamped with the watcher's clock.
    /// Returns the lookup outcome when the change completed a double copy.
    pub fn on_clipboard_change(&self, reader: Arc<dyn ClipboardReader>) -> Option<LookupOutcome> {
        self.on_clipboard_change_at(self.clock.now_millis(), reader)
    }

    /// Handle an OS clipboard change observed at `timestamp_unix_ms`
    pub fn on_clipboard_change_at(
        &self,
        timestamp_unix_ms: i64,
        reader: Arc<dyn ClipboardReader>,
    ) -> Option<LookupOutcome> {
        let trigger = self
            .engine
            .on_raw_copy_event(timestamp_unix_ms, || Self::read_clipboard(reader.as_ref()))?;
        Some(self.dispatch(trigger))
    }

    /// Parse → resolve → build for arbitrary text, without a gesture or side effects
    pub fn lookup(&self, text: String) -> LookupOutcome {
        self.pipeline.lookup(&text)
    }

    pub fn is_armed(&self) -> bool {
        self.engine.is_armed()
    }

    /// Cancel the pending reset timer. Later clipboard changes are ignored.
    pub fn shutdown(&self) {
        tracing::debug!("watcher shutting down");
        self.engine.shutdown();
    }
}
