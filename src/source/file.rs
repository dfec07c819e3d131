//! File-based fact source.
//!
//! Polls a JSON file for enumerator facts.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use super::{MonitorFact, MonitorFacts, MonitorSource};

/// A fact source that reads monitor facts from a JSON file.
///
/// This is the file-drop mode of operation: the external enumerator writes
/// its fact-set to a file after each enumeration cycle, and this source
/// polls that file.
///
/// The source tracks the file's modification time and only returns new
/// data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file's modification time.
    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and parse the file.
    ///
    /// The outer array must parse; individual entries that fail to decode
    /// are skipped for this cycle rather than failing the whole fact-set.
    fn read_file(&mut self) -> Option<MonitorFacts> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                return None;
            }
        };

        self.last_error = None;

        let facts: MonitorFacts = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<MonitorFact>(entry) {
                Ok(fact) => Some(fact),
                Err(e) => {
                    debug!("Skipping unresolvable monitor fact: {}", e);
                    None
                }
            })
            .collect();

        Some(facts)
    }
}

impl MonitorSource for FileSource {
    fn poll(&mut self) -> Option<MonitorFacts> {
        let current_modified = self.get_modified_time();

        // Check if file has been modified since last read
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, don't update
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(facts) = self.read_file() {
                self.last_modified = current_modified;
                return Some(facts);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
