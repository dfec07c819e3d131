// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # procwatch
//!
//! A terminal dashboard and library for watching application process
//! monitors.
//!
//! Each monitor tracks whether some application or service is alive and
//! within its expected instance-count bounds. Every refresh cycle, the
//! current fact-set is pulled from an enumerator source, classified
//! against the configured bounds, and rendered as column-aligned lines in
//! a live terminal UI. An optional export task persists per-monitor
//! records to a CouchDB-compatible document store.
//!
//! ## Architecture
//!
//! The crate is organized into five main modules:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(snapshot)│    │(tokens) │    │         │  │
//! │  └────┬────┘    └────┬─────┘    └─────────┘    └─────────┘  │
//! │       │              │                                       │
//! │       ▼              ▼                                       │
//! │  ┌─────────┐    ┌─────────┐                                  │
//! │  │ source  │    │ export  │──▶ CouchDB                       │
//! │  │ (input) │    │ (sink)  │                                  │
//! │  └─────────┘    └─────────┘                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state and the per-cycle refresh logic
//! - **[`source`]**: Fact source abstraction ([`MonitorSource`] trait) with
//!   implementations for file polling and channel-based input
//! - **[`data`]**: Data models - builds the per-cycle snapshot of
//!   [`MonitorRecord`]s and classifies each against its bounds
//! - **[`ui`]**: Display token production and terminal rendering using
//!   ratatui, with theme support
//! - **[`export`]**: CouchDB export sink for tagged, timestamped metric
//!   records
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a facts file written by an enumerator
//! procwatch --file monitors.json
//!
//! # Also export snapshots to CouchDB
//! procwatch --file monitors.json --export-config export.toml
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use procwatch::{App, FileSource};
//!
//! let source = Box::new(FileSource::new("monitors.json"));
//! let app = App::new(source);
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use procwatch::{App, ChannelSource};
//!
//! // Create a channel for receiving fact-sets
//! let (tx, source) = ChannelSource::create("embedded enumerator");
//!
//! let app = App::new(Box::new(source));
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod export;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{classify, AlertLevel, MonitorData, MonitorRecord};
pub use export::{CouchDbConfig, CouchDbExporter, ExportError};
pub use source::{ChannelSource, FileSource, MonitorFact, MonitorFacts, MonitorSource};
pub use ui::{render_lines, LineToken};
