//! VerseKit FFI Interface Definition
//!
//! This file defines the public interface exposed to the tray host via UniFFI.
//! It acts as the source of truth for shared types.

use std::fmt;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A recognized citation, resolved against the configured book tables.
///
/// Numbers are positive decimal digit strings without leading zeros, of any
/// length. `chapter` is always present; `end_verse` is never set without
/// `verse` and is never smaller than it.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ResolvedReference {
    /// Language code of the book table that recognized the token
    pub language: String,
    /// Canonical book name from that table
    pub book: String,
    pub chapter: String,
    pub verse: Option<String>,
    pub end_verse: Option<String>,
}

impl fmt::Display for ResolvedReference {
    /// Formats as `Johannes 3,16-18`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)?;
        if let Some(verse) = &self.verse {
            write!(f, ",{}", verse)?;
            if let Some(end_verse) = &self.end_verse {
                write!(f, "-{}", end_verse)?;
            }
        }
        Ok(())
    }
}

/// Status text for the tray host. The host decides whether to show it.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running one piece of text through parse → resolve → build.
/// "No reference" is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum LookupOutcome {
    Found { reference: ResolvedReference, url: String },
    NoReference,
}

impl LookupOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            LookupOutcome::Found { url, .. } => Some(url),
            LookupOutcome::NoReference => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum NotificationKind {
    ReferenceFound,
    NoReference,
    ConfigError,
}

/// Error type for VerseKit operations.
/// Only configuration problems cross the library boundary as failures.
#[derive(Debug, Error, uniffi::Error)]
pub enum VerseKitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Failure reported by the host's clipboard reader.
/// Never propagated: the trigger engine treats it as empty content.
#[derive(Debug, Error, uniffi::Error)]
pub enum ClipboardReadError {
    #[error("Clipboard does not hold text")]
    NotText,
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for ClipboardReadError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        ClipboardReadError::Unavailable(e.reason)
    }
}

impl From<crate::config::ConfigError> for VerseKitError {
    fn from(e: crate::config::ConfigError) -> Self {
        VerseKitError::ConfigError(e.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOST INTERFACES (implemented by the tray shell)
// ═══════════════════════════════════════════════════════════════════════════════

/// Deferred clipboard read. Called at most once per clipboard change,
/// and only when the change survives debouncing. No watcher lock is held
/// during the call.
#[uniffi::export(with_foreign)]
pub trait ClipboardReader: Send + Sync {
    fn read_text(&self) -> Result<String, ClipboardReadError>;
}

/// Outbound actions for a completed double-copy gesture
#[uniffi::export(with_foreign)]
pub trait ActionSink: Send + Sync {
    /// Open the reference in the user's browser
    fn open_url(&self, url: String);

    /// Best-effort status for the tray (balloon tip, toast, ...)
    fn notify(&self, notification: Notification);
}
