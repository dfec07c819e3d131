//! CouchDB export sink.
//!
//! Persists flat metric records as CouchDB documents, tagged with the
//! record type and an ISO-8601 timestamp. The target database is created
//! at connection time if it does not exist.
//!
//! ## Example
//!
//! ```rust,no_run
//! use procwatch::export::{CouchDbConfig, CouchDbExporter};
//!
//! # tokio_test::block_on(async {
//! let config = CouchDbConfig::load("export.toml").unwrap();
//! let exporter = CouchDbExporter::connect(config).await.unwrap();
//!
//! exporter
//!     .export(
//!         "cpu",
//!         &["user", "system"],
//!         &[serde_json::json!(12.3), serde_json::json!(4.5)],
//!     )
//!     .await
//!     .unwrap();
//! # });
//! ```

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::ExportError;

/// Connection settings for the CouchDB sink.
///
/// `host`, `port`, and `db` are mandatory; `user` and `password` are
/// optional. Providing credentials switches the connection to https.
#[derive(Debug, Clone, Deserialize)]
pub struct CouchDbConfig {
    pub host: String,
    pub port: u16,
    pub db: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl CouchDbConfig {
    /// Load the `[couchdb]` section from a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()
            .map_err(|e| ExportError::Config(e.to_string()))?;

        settings
            .get::<CouchDbConfig>("couchdb")
            .map_err(|e| ExportError::Config(e.to_string()))
    }

    /// Base server URL. Credentials force the secure scheme.
    fn server_url(&self) -> String {
        if self.user.is_none() {
            format!("http://{}:{}", self.host, self.port)
        } else {
            format!("https://{}:{}", self.host, self.port)
        }
    }
}

/// A connected CouchDB export sink.
#[derive(Debug, Clone)]
pub struct CouchDbExporter {
    client: Client,
    server_url: String,
    db: String,
    user: Option<String>,
    password: Option<String>,
}

impl CouchDbExporter {
    /// Connect to the CouchDB server and ensure the target database
    /// exists.
    ///
    /// If the database is absent it is created; if it already exists, no
    /// action is taken. A connection failure here is fatal to the sink's
    /// owner: there is no reconnect path.
    pub async fn connect(config: CouchDbConfig) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ExportError::Connection(e.to_string()))?;

        let exporter = Self {
            client,
            server_url: config.server_url(),
            db: config.db,
            user: config.user,
            password: config.password,
        };

        // Verify the server is reachable before touching the database
        let response = exporter.request(Method::GET, &exporter.server_url).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ExportError::Auth("Invalid credentials".to_string()));
        }
        if !response.status().is_success() {
            return Err(ExportError::Connection(format!(
                "Server returned status {}",
                response.status()
            )));
        }
        info!("Connected to the CouchDB server at {}", exporter.server_url);

        exporter.ensure_database().await?;

        Ok(exporter)
    }

    /// The database documents are written to.
    pub fn database(&self) -> &str {
        &self.db
    }

    /// Write one tagged, timestamped record.
    ///
    /// Columns and values are zipped into a flat document; the document is
    /// tagged with `type = name` and the current time, then saved.
    pub async fn export(
        &self,
        name: &str,
        columns: &[&str],
        values: &[Value],
    ) -> Result<(), ExportError> {
        debug!("Export {} stats to CouchDB", name);

        let doc = build_document(name, columns, values, chrono::Utc::now().to_rfc3339());

        let url = format!("{}/{}", self.server_url, self.db);
        let response = self.request(Method::POST, &url).json(&doc).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ExportError::Auth("Invalid credentials".to_string()));
        }
        if !response.status().is_success() {
            return Err(ExportError::Http(format!(
                "Database returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Create the target database if it does not exist.
    async fn ensure_database(&self) -> Result<(), ExportError> {
        let url = format!("{}/{}", self.server_url, self.db);

        let response = self.request(Method::HEAD, &url).send().await?;
        if response.status().is_success() {
            info!("There is already a {} database", self.db);
            return Ok(());
        }
        if response.status() != StatusCode::NOT_FOUND {
            return Err(ExportError::Http(format!(
                "Database check returned status {}",
                response.status()
            )));
        }

        let response = self.request(Method::PUT, &url).send().await?;
        match response.status() {
            // Created, or lost a creation race
            StatusCode::CREATED | StatusCode::PRECONDITION_FAILED => {
                info!("Created the {} database", self.db);
                Ok(())
            }
            StatusCode::UNAUTHORIZED => {
                Err(ExportError::Auth("Invalid credentials".to_string()))
            }
            status => Err(ExportError::Http(format!(
                "Database creation returned status {}",
                status
            ))),
        }
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, url);
        if let Some(ref user) = self.user {
            req = req.basic_auth(user, self.password.as_deref());
        }
        req
    }
}

/// Zip columns and values into a flat document tagged with the record type
/// and timestamp. Surplus columns or values are dropped.
fn build_document(name: &str, columns: &[&str], values: &[Value], time: String) -> Value {
    let mut doc = Map::new();
    for (column, value) in columns.iter().zip(values.iter()) {
        doc.insert((*column).to_string(), value.clone());
    }
    doc.insert("type".to_string(), Value::String(name.to_string()));
    doc.insert("time".to_string(), Value::String(time));
    Value::Object(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn config(user: Option<&str>) -> CouchDbConfig {
        CouchDbConfig {
            host: "localhost".to_string(),
            port: 5984,
            db: "procwatch".to_string(),
            user: user.map(str::to_string),
            password: user.map(|_| "secret".to_string()),
        }
    }

    #[test]
    fn test_server_url_plain() {
        assert_eq!(config(None).server_url(), "http://localhost:5984");
    }

    #[test]
    fn test_server_url_forces_https_with_credentials() {
        assert_eq!(config(Some("admin")).server_url(), "https://localhost:5984");
    }

    #[test]
    fn test_build_document() {
        let doc = build_document(
            "cpu",
            &["user", "system"],
            &[serde_json::json!(12.3), serde_json::json!(4.5)],
            "2024-01-01T00:00:00+00:00".to_string(),
        );

        assert_eq!(doc["user"], 12.3);
        assert_eq!(doc["system"], 4.5);
        assert_eq!(doc["type"], "cpu");
        assert_eq!(doc["time"], "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_build_document_truncates_to_shorter_sequence() {
        let doc = build_document(
            "mem",
            &["total", "free", "cached"],
            &[serde_json::json!(1024)],
            "t".to_string(),
        );

        let obj = doc.as_object().unwrap();
        assert_eq!(obj.get("total"), Some(&serde_json::json!(1024)));
        assert!(!obj.contains_key("free"));
        assert!(!obj.contains_key("cached"));
    }

    #[test]
    fn test_load_config() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[couchdb]
host = "db.example.com"
port = 5984
db = "metrics"
user = "admin"
password = "secret"
"#
        )
        .unwrap();

        let config = CouchDbConfig::load(file.path()).unwrap();
        assert_eq!(config.host, "db.example.com");
        assert_eq!(config.port, 5984);
        assert_eq!(config.db, "metrics");
        assert_eq!(config.user.as_deref(), Some("admin"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_load_config_requires_mandatory_keys() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[couchdb]
host = "db.example.com"
"#
        )
        .unwrap();

        let err = CouchDbConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_load_config_optional_credentials() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[couchdb]
host = "localhost"
port = 5984
db = "metrics"
"#
        )
        .unwrap();

        let config = CouchDbConfig::load(file.path()).unwrap();
        assert!(config.user.is_none());
        assert!(config.password.is_none());
    }
}
