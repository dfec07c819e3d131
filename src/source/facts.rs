//! Wire format for enumerator facts.
//!
//! These types match the JSON produced by the external monitor enumerator
//! (the component that actually inspects processes). They are the common
//! data format between that producer and this viewer.

use serde::{Deserialize, Serialize};

/// An ordered collection of per-monitor facts, one refresh cycle's worth.
///
/// Order is significant: the display preserves it.
pub type MonitorFacts = Vec<MonitorFact>;

/// Raw facts for a single configured monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorFact {
    /// Monitor name, unique within one fact-set.
    pub name: String,

    /// Free-text result, possibly multi-line. Absent when the monitor has
    /// no data this cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Configured refresh interval in seconds.
    pub refresh_interval: f64,

    /// Seconds until the enumerator refreshes this monitor.
    pub time_until_refresh: f64,

    /// Number of matching live instances.
    pub count: u64,

    /// Configured lower bound on the instance count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_min: Option<u64>,

    /// Configured upper bound on the instance count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_max: Option<u64>,

    /// True when the monitor counts instances via a matching rule.
    #[serde(default)]
    pub pattern_match: bool,
}
