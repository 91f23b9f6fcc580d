//! Domain model types (pure).

pub mod error;
pub mod key;
pub mod key_action;
pub mod log_entry;
pub mod wrap;

// Re-export for convenience
pub use error::ConsoleError;
pub use key::Key;
pub use key_action::KeyAction;
pub use log_entry::{LogEntry, DEFAULT_DETAILS_PLACEHOLDER};
pub use wrap::{wrap, wrapped_line_count};
