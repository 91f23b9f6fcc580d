//! Error types for the console.
//!
//! # Error Hierarchy
//!
//! - [`ConsoleError`] - Top-level error returned by the controller and the binary
//!   - `std::io::Error` - Terminal driver failures (fatal)
//!   - [`ConfigError`] - Config file read/parse failures (fatal at startup)
//!   - [`LoggingError`] - Tracing subscriber setup failures (fatal at startup)
//!
//! Malformed keys and buffer overflow are not errors: the former are ignored,
//! the latter is handled by eviction.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level console error.
///
/// Driver failures propagate out of the worker loop unchanged. The loop makes
/// a best-effort attempt to leave raw mode before returning one.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Terminal I/O failed (write to a detached terminal, event read error, ...).
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// `run()` was called on a console whose worker is already started.
    #[error("Console is already running")]
    AlreadyRunning,

    /// `wait()` was called before `run()`.
    #[error("Console was never started")]
    NotRunning,

    /// The worker thread panicked.
    #[error("Console worker thread panicked")]
    WorkerPanicked,
}
