//! Monitor records, snapshots, and alert classification.
//!
//! This module transforms raw enumerator facts into the per-cycle snapshot
//! consumed by the renderer, and computes an alert level for each monitor
//! from its live instance count and configured bounds.

use std::time::Instant;

use crate::source::{MonitorFact, MonitorFacts};

/// Alert severity for a monitor.
///
/// Ordered by severity: `Ok < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    Ok,
    Warning,
    Critical,
}

impl AlertLevel {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            AlertLevel::Ok => "OK",
            AlertLevel::Warning => "WARN",
            AlertLevel::Critical => "CRIT",
        }
    }
}

/// Classify a monitor's live instance count against its configured bounds.
///
/// A missing count means "no data this cycle" and is always `Ok`. Bounds
/// default to the live count itself, so a monitor with no configured bounds
/// is healthy whenever it has at least one instance.
///
/// When instances exist, falling outside `[min, max]` is a `Warning`. When
/// none exist but at least one was expected, that is `Critical`: total
/// absence of an expected service outranks a surplus.
pub fn classify(
    live_count: Option<u64>,
    count_min: Option<u64>,
    count_max: Option<u64>,
) -> AlertLevel {
    let Some(live) = live_count else {
        return AlertLevel::Ok;
    };
    let min = count_min.unwrap_or(live);
    let max = count_max.unwrap_or(live);

    if live > 0 {
        if min <= live && live <= max {
            AlertLevel::Ok
        } else {
            AlertLevel::Warning
        }
    } else if min == 0 {
        AlertLevel::Ok
    } else {
        AlertLevel::Critical
    }
}

/// One configured monitor's state for the current cycle.
#[derive(Debug, Clone)]
pub struct MonitorRecord {
    /// Display key, unique within a snapshot.
    pub name: String,
    /// Free-text result, possibly multi-line. `None` means no data this
    /// cycle; the record stays in the snapshot but is not displayed.
    pub result: Option<String>,
    /// Configured refresh interval in seconds (informational).
    pub refresh_interval: f64,
    /// Seconds until the enumerator refreshes this monitor (informational).
    pub time_until_refresh: f64,
    /// Number of matching live instances this cycle.
    pub count: u64,
    /// Lower bound on the acceptable instance count.
    pub count_min: Option<u64>,
    /// Upper bound on the acceptable instance count.
    pub count_max: Option<u64>,
    /// True when instances are counted via a matching rule; controls
    /// whether the count is shown in the second display column.
    pub pattern_match: bool,
}

impl MonitorRecord {
    /// Alert level for this record.
    pub fn alert(&self) -> AlertLevel {
        classify(Some(self.count), self.count_min, self.count_max)
    }
}

impl From<MonitorFact> for MonitorRecord {
    fn from(fact: MonitorFact) -> Self {
        Self {
            name: fact.name,
            result: fact.result,
            refresh_interval: fact.refresh_interval,
            time_until_refresh: fact.time_until_refresh,
            count: fact.count,
            count_min: fact.count_min,
            count_max: fact.count_max,
            pattern_match: fact.pattern_match,
        }
    }
}

/// The complete set of monitor records produced by one refresh cycle.
///
/// Rebuilt wholesale every cycle and immutable once published. Records keep
/// the order the enumerator reported them in; the renderer preserves that
/// order in its output.
#[derive(Debug, Clone)]
pub struct MonitorData {
    pub monitors: Vec<MonitorRecord>,
    pub last_updated: Instant,
}

impl MonitorData {
    /// An empty snapshot, used when the monitors display is disabled.
    pub fn empty() -> Self {
        Self {
            monitors: Vec::new(),
            last_updated: Instant::now(),
        }
    }

    /// Build a snapshot from enumerator facts by direct field mapping.
    pub fn from_facts(facts: MonitorFacts) -> Self {
        Self {
            monitors: facts.into_iter().map(MonitorRecord::from).collect(),
            last_updated: Instant::now(),
        }
    }

    /// Count monitors at each alert level: (ok, warning, critical).
    pub fn alert_counts(&self) -> (usize, usize, usize) {
        let mut ok = 0;
        let mut warning = 0;
        let mut critical = 0;
        for m in &self.monitors {
            match m.alert() {
                AlertLevel::Ok => ok += 1,
                AlertLevel::Warning => warning += 1,
                AlertLevel::Critical => critical += 1,
            }
        }
        (ok, warning, critical)
    }
}
