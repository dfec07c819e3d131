//! Data models and processing for monitor snapshots.
//!
//! This module handles the transformation of raw enumerator facts into the
//! alert-annotated snapshot that the UI renders.
//!
//! ## Data Flow
//!
//! ```text
//! MonitorFacts (raw JSON)
//!        │
//!        ▼
//! MonitorData::from_facts()
//!        │
//!        └──▶ MonitorRecord (alert level computed via classify())
//! ```

pub mod monitor;

pub use monitor::{classify, AlertLevel, MonitorData, MonitorRecord};
