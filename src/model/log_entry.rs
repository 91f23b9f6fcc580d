//! A single logged message and its detail text.

use super::wrap::{wrap, wrapped_line_count};
use chrono::{DateTime, Local};

/// Detail text used when a message is logged without details.
pub const DEFAULT_DETAILS_PLACEHOLDER: &str = "No details";

/// One entry in the console buffer.
///
/// Entries are immutable once created. Only the raw text is stored; display
/// lines are derived on demand for whatever width the console currently has,
/// so entries re-flow after a terminal resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    message: String,
    details: String,
    logged_at: DateTime<Local>,
}

impl LogEntry {
    /// Create an entry stamped with the current local time.
    pub fn new(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::at(message, details, Local::now())
    }

    /// Create an entry with an explicit timestamp.
    pub fn at(
        message: impl Into<String>,
        details: impl Into<String>,
        logged_at: DateTime<Local>,
    ) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
            logged_at,
        }
    }

    /// Create an entry, substituting `placeholder` when `details` is `None`.
    pub fn with_optional_details(
        message: impl Into<String>,
        details: Option<String>,
        placeholder: &str,
    ) -> Self {
        Self::new(message, details.unwrap_or_else(|| placeholder.to_string()))
    }

    /// Raw message text as logged (may contain newlines).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw detail text.
    pub fn details(&self) -> &str {
        &self.details
    }

    /// When the entry was logged.
    pub fn logged_at(&self) -> DateTime<Local> {
        self.logged_at
    }

    /// Message wrapped to `width` columns.
    pub fn lines(&self, width: usize) -> Vec<String> {
        wrap(&self.message, width)
    }

    /// Number of display lines the message occupies at `width`.
    pub fn line_count(&self, width: usize) -> usize {
        wrapped_line_count(&self.message, width)
    }

    /// Details wrapped to `width` columns.
    pub fn detail_lines(&self, width: usize) -> Vec<String> {
        wrap(&self.details, width)
    }
}
