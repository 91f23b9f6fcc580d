//! Log input sources.

pub mod stdin;

pub use stdin::StdinSource;
