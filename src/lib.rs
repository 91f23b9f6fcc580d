//! Interactive terminal log console (logcon)
//!
//! A scrollable, bounded log view with an inline details view and a `/`
//! command line, driven by a single background poll thread.
//!
//! Follows the Pure Core / Impure Shell split: `model` and `state` are pure
//! and fully testable; `view` owns the terminal and the poll loop.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

pub use model::{ConsoleError, LogEntry};
pub use view::{Console, ConsoleHandle, ConsoleOptions};
