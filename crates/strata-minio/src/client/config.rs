//! Connector configuration.
//!
//! The configuration record is created once at connector construction and
//! never mutated afterwards. Wire keys are camelCase to match the host
//! framework's data-source definitions. Unrecognized keys are silently
//! dropped, so a data-source definition may carry fields this connector does
//! not know about yet without requiring a schema update here first.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Credentials;
use crate::{Error, Result};

/// Immutable connector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectorConfig {
    /// Storage endpoint hostname or IP address.
    pub end_point: String,

    /// Endpoint port. When absent the scheme default applies.
    pub port: Option<u16>,

    /// Whether to connect over TLS.
    #[serde(rename = "useSSL")]
    pub use_ssl: bool,

    /// Authentication credentials (`accessKey`, `secretKey`, `sessionToken`).
    #[serde(flatten)]
    pub credentials: Credentials,

    /// Region handed to the underlying client. An operation's own region
    /// argument still takes precedence where one exists.
    pub region: Option<String>,

    /// Multipart part-size override, in bytes. Recorded for host-framework
    /// compatibility; the underlying client sizes parts itself.
    pub part_size: Option<u64>,

    /// Force path-style addressing. Recorded for host-framework
    /// compatibility; the underlying client already uses path-style
    /// addressing for non-AWS endpoints.
    pub path_style: Option<bool>,

    /// Path to an additional CA certificate bundle for the transport.
    pub ssl_cert_file: Option<PathBuf>,

    /// Skip certificate verification. Transport escape hatch for endpoints
    /// with self-signed certificates.
    pub ignore_cert_check: Option<bool>,

    /// Default bucket, applied when an operation omits its bucket argument.
    pub bucket: Option<String>,

    /// Emit a diagnostic log entry for every forwarded operation.
    pub debug: bool,
}

impl ConnectorConfig {
    /// Creates a configuration for the given endpoint host and credentials.
    pub fn new(end_point: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            end_point: end_point.into(),
            credentials,
            ..Self::default()
        }
    }

    /// Decodes a configuration payload, dropping unrecognized keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a recognized key carries a value of the
    /// wrong type. Unknown keys never fail.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::Config(e.to_string()))
    }

    /// Decodes a configuration payload from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the payload is not valid JSON or a
    /// recognized key carries a value of the wrong type.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::Config(e.to_string()))
    }

    /// Sets the endpoint port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets whether to connect over TLS.
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Sets the region handed to the underlying client.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the default bucket.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Enables or disables per-operation diagnostic logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the endpoint URL string the underlying client expects.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        match self.port {
            Some(port) => format!("{scheme}://{}:{port}", self.end_point),
            None => format!("{scheme}://{}", self.end_point),
        }
    }

    /// Returns the credentials.
    #[inline]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            end_point: "localhost".to_string(),
            port: None,
            use_ssl: false,
            credentials: Credentials::default(),
            region: None,
            part_size: None,
            path_style: None,
            ssl_cert_file: None,
            ignore_cert_check: None,
            bucket: None,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_host_framework_payload() {
        let config = ConnectorConfig::from_value(json!({
            "endPoint": "localhost",
            "port": 9002,
            "useSSL": false,
            "accessKey": "K",
            "secretKey": "S",
        }))
        .unwrap();

        assert_eq!(config.end_point, "localhost");
        assert_eq!(config.port, Some(9002));
        assert!(!config.use_ssl);
        assert_eq!(config.credentials.access_key, "K");
        assert_eq!(config.credentials.secret_key, "S");
    }

    #[test]
    fn unrecognized_keys_are_dropped() {
        let config = ConnectorConfig::from_value(json!({
            "endPoint": "play.min.io",
            "useSSL": true,
            "accessKey": "K",
            "secretKey": "S",
            "connector": "strata-minio",
            "retryBudget": 5,
            "nested": {"anything": true},
        }))
        .unwrap();

        assert_eq!(config.end_point, "play.min.io");
        assert!(config.use_ssl);
        assert_eq!(config.credentials.access_key, "K");
    }

    #[test]
    fn wrong_type_on_recognized_key_fails() {
        let result = ConnectorConfig::from_value(json!({
            "endPoint": "localhost",
            "port": "not-a-number",
        }));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn endpoint_url_formatting() {
        let config = ConnectorConfig::new("localhost", Credentials::default()).with_port(9002);
        assert_eq!(config.endpoint_url(), "http://localhost:9002");

        let secure = ConnectorConfig::from_value(serde_json::json!({
            "endPoint": "play.min.io",
            "useSSL": true,
        }))
        .unwrap();
        assert_eq!(secure.endpoint_url(), "https://play.min.io");
    }

    #[test]
    fn defaults_target_local_endpoint() {
        let config = ConnectorConfig::default();
        assert_eq!(config.endpoint_url(), "http://localhost");
        assert!(!config.debug);
        assert!(config.bucket.is_none());
    }
}
