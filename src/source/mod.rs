//! Data source abstraction for receiving enumerator facts.
//!
//! This module provides a trait-based abstraction for receiving monitor
//! facts from various sources (a facts file written by the enumerator, or
//! an in-process channel).

mod channel;
mod facts;
mod file;

pub use channel::ChannelSource;
pub use facts::{MonitorFact, MonitorFacts};
pub use file::FileSource;

use std::fmt::Debug;

/// Trait for receiving monitor facts from various sources.
///
/// Implementations provide one fact-set per enumeration cycle from
/// different backends - file polling or in-memory channels.
///
/// # Example
///
/// ```
/// use procwatch::{FileSource, MonitorSource};
///
/// let mut source = FileSource::new("monitors.json");
/// if let Some(facts) = source.poll() {
///     println!("Got {} monitors", facts.len());
/// }
/// ```
pub trait MonitorSource: Send + Debug {
    /// Poll for the latest fact-set.
    ///
    /// Returns `Some(facts)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<MonitorFacts>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    fn error(&self) -> Option<&str>;
}
