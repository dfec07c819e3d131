//! Metric export to a document store.
//!
//! The exporter persists tagged, timestamped flat records over the
//! CouchDB HTTP API. Connection setup is fatal on failure; individual
//! write failures are logged by the caller and never abort an export
//! cycle.

pub mod couchdb;
mod error;

pub use couchdb::{CouchDbConfig, CouchDbExporter};
pub use error::ExportError;

use tracing::error;

use crate::data::MonitorData;

/// Export one record per monitor from the current snapshot.
///
/// A failed write is logged and swallowed; the remaining monitors are
/// still exported.
pub async fn export_monitors(exporter: &CouchDbExporter, data: &MonitorData) {
    for m in &data.monitors {
        let values = [
            serde_json::json!(m.name),
            serde_json::json!(m.count),
            serde_json::json!(m.count_min),
            serde_json::json!(m.count_max),
            serde_json::json!(m.alert().symbol()),
        ];
        if let Err(e) = exporter
            .export(
                "monitors",
                &["name", "count", "count_min", "count_max", "alert"],
                &values,
            )
            .await
        {
            error!("Cannot export {} stats to CouchDB ({})", m.name, e);
        }
    }
}
