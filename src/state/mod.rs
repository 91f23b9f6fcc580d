//! Console state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod console_state;
pub mod input;
pub mod log_buffer;
pub mod viewport;

// Re-export for convenience
pub use console_state::{ConsoleState, Mode};
pub use input::{handle_key, KeyOutcome};
pub use log_buffer::{LogBuffer, DEFAULT_BUFFER_CAPACITY};
pub use viewport::Viewport;
