//! Result and error types for Sondear.

use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving or asserting on the UI.
///
/// `ElementNotFound` and `OutOfViewport` are deliberately distinct: a missing
/// element can be a valid assertion target ("assert the editor closed"), while
/// touching a virtualized row outside the rendered window is always a hard
/// usage error.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Element lookup produced no match where one was required
    #[error("element not found: {what}")]
    ElementNotFound {
        /// What was being looked for
        what: String,
    },

    /// A menu label matched more than one visible entry at its level
    #[error("menu label '{label}' matched {count} entries at depth {depth}")]
    AmbiguousMenuLabel {
        /// The offending label
        label: String,
        /// Nesting depth (0 = menu bar)
        depth: usize,
        /// How many entries matched
        count: usize,
    },

    /// A grid row was addressed outside the rendered scroll window
    #[error("row {row} is outside the rendered viewport")]
    OutOfViewport {
        /// Logical row index
        row: usize,
    },

    /// A bounded wait expired before its condition became true
    #[error("timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Human-readable wait condition
        waiting_for: String,
    },

    /// Expected vs. actual mismatch
    #[error("assertion failed: {message}")]
    AssertionFailed {
        /// Diagnostic message (component + expected vs actual)
        message: String,
    },

    /// Navigation to a URL failed
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A menu path was constructed without any labels
    #[error("menu path must contain at least one label")]
    EmptyMenuPath,

    /// Remote driver session error
    #[error("session error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Shorthand for an `ElementNotFound` error
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::ElementNotFound { what: what.into() }
    }

    /// Shorthand for a `Session` error
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Shorthand for an `AssertionFailed` error
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }
}
