//! Application state and the per-cycle refresh logic.

use anyhow::Result;

use crate::data::MonitorData;
use crate::source::MonitorSource;
use crate::ui::Theme;

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    /// Global gate for the monitors display. While set, refresh publishes
    /// an empty snapshot without contacting the source and the renderer
    /// emits nothing.
    pub monitors_disabled: bool,

    // Fact source
    source: Box<dyn MonitorSource>,
    pub data: Option<MonitorData>,
    pub load_error: Option<String>,

    // UI
    pub theme: Theme,
}

impl App {
    /// Create a new App with the given fact source.
    pub fn new(source: Box<dyn MonitorSource>) -> Self {
        Self {
            running: true,
            show_help: false,
            monitors_disabled: false,
            source,
            data: None,
            load_error: None,
            theme: Theme::auto_detect(),
        }
    }

    /// Returns a description of the current fact source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Poll the fact source and rebuild the snapshot.
    ///
    /// The new snapshot is constructed fully before being published with a
    /// single assignment, so readers see either the previous complete
    /// snapshot or the new one, never a mix. A failed or empty poll leaves
    /// the previous snapshot in place.
    ///
    /// Returns Ok(true) if a new snapshot was published, Ok(false) if not.
    pub fn refresh(&mut self) -> Result<bool> {
        if self.monitors_disabled {
            self.data = Some(MonitorData::empty());
            return Ok(true);
        }

        // Surface errors from the source without clobbering the snapshot
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return Ok(false);
        }

        if let Some(facts) = self.source.poll() {
            let data = MonitorData::from_facts(facts);
            self.data = Some(data);
            self.load_error = None;
            Ok(true)
        } else {
            // Re-check: the poll itself may have recorded an error
            if let Some(err) = self.source.error() {
                self.load_error = Some(err.to_string());
            }
            Ok(false)
        }
    }

    /// Toggle the monitors display gate.
    pub fn toggle_monitors(&mut self) {
        self.monitors_disabled = !self.monitors_disabled;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MonitorFact, MonitorFacts};

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// A source that counts how often it was polled.
    #[derive(Debug)]
    struct CountingSource {
        polls: Arc<AtomicUsize>,
        facts: Option<MonitorFacts>,
    }

    impl CountingSource {
        fn new(facts: Option<MonitorFacts>) -> (Arc<AtomicUsize>, Self) {
            let polls = Arc::new(AtomicUsize::new(0));
            (polls.clone(), Self { polls, facts })
        }
    }

    impl MonitorSource for CountingSource {
        fn poll(&mut self) -> Option<MonitorFacts> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.facts.take()
        }

        fn description(&self) -> &str {
            "counting"
        }

        fn error(&self) -> Option<&str> {
            None
        }
    }

    fn fact(name: &str) -> MonitorFact {
        MonitorFact {
            name: name.to_string(),
            result: Some("running".to_string()),
            refresh_interval: 3.0,
            time_until_refresh: 1.0,
            count: 1,
            count_min: None,
            count_max: None,
            pattern_match: false,
        }
    }

    #[test]
    fn test_refresh_publishes_snapshot() {
        let (_, source) = CountingSource::new(Some(vec![fact("cron")]));
        let mut app = App::new(Box::new(source));

        assert!(app.refresh().unwrap());
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.monitors.len(), 1);
        assert_eq!(data.monitors[0].name, "cron");
    }

    #[test]
    fn test_refresh_without_new_data_keeps_snapshot() {
        let (_, source) = CountingSource::new(Some(vec![fact("cron")]));
        let mut app = App::new(Box::new(source));

        assert!(app.refresh().unwrap());
        // Source is drained now; the old snapshot must survive
        assert!(!app.refresh().unwrap());
        assert_eq!(app.data.as_ref().unwrap().monitors.len(), 1);
    }

    #[test]
    fn test_disabled_refresh_skips_source() {
        let (polls, source) = CountingSource::new(Some(vec![fact("cron")]));
        let mut app = App::new(Box::new(source));
        app.monitors_disabled = true;

        assert!(app.refresh().unwrap());
        assert!(app.data.as_ref().unwrap().monitors.is_empty());
        assert_eq!(polls.load(Ordering::SeqCst), 0);

        app.monitors_disabled = false;
        assert!(app.refresh().unwrap());
        assert_eq!(app.data.as_ref().unwrap().monitors.len(), 1);
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_refresh_replaces_snapshot_wholesale() {
        let (tx, source) = crate::source::ChannelSource::create("test");
        let mut app = App::new(Box::new(source));

        tx.send(vec![fact("cron"), fact("sshd")]).unwrap();
        assert!(app.refresh().unwrap());
        assert_eq!(app.data.as_ref().unwrap().monitors.len(), 2);

        tx.send(vec![fact("nginx")]).unwrap();
        assert!(app.refresh().unwrap());
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.monitors.len(), 1);
        assert_eq!(data.monitors[0].name, "nginx");
    }
}
