//! Channel-based fact source.
//!
//! Receives enumerator facts via a tokio watch channel. This is useful for
//! in-process integration where an enumerator pushes fact-sets rather than
//! writing them to a file.

use tokio::sync::watch;

use super::{MonitorFacts, MonitorSource};

/// A fact source that receives monitor facts via a channel.
///
/// The producer (e.g., an embedded enumerator task) sends fact-sets
/// through the channel, and this source provides them to the TUI. Watch
/// semantics mean the TUI only ever observes the latest complete fact-set.
///
/// # Example
///
/// ```
/// use procwatch::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("embedded enumerator");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<MonitorFacts>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where facts come from
    pub fn new(receiver: watch::Receiver<MonitorFacts>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending fact-sets to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender can be used to push
    /// fact-sets and the source can be handed to the TUI.
    pub fn create(source_description: &str) -> (watch::Sender<MonitorFacts>, Self) {
        let (tx, rx) = watch::channel(MonitorFacts::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl MonitorSource for ChannelSource {
    fn poll(&mut self) -> Option<MonitorFacts> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            let facts = self.receiver.borrow_and_update().clone();
            Some(facts)
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Channel sources don't have file-based errors
        None
    }
}
