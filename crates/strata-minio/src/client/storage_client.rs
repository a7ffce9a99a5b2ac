//! Client handle construction over the underlying MinIO SDK.

use std::sync::Arc;

use minio::s3::Client;
use minio::s3::creds::StaticProvider;
use minio::s3::http::BaseUrl;
use tracing::{debug, error, instrument};

use super::ConnectorConfig;
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// Shared handle to the underlying storage client.
///
/// Cheap to clone. After the connector reaches the ready state every
/// forwarded operation shares this handle read-only; nothing mutates it.
#[derive(Clone)]
pub struct StorageClient {
    inner: Client,
    config: Arc<ConnectorConfig>,
}

impl StorageClient {
    /// Constructs the handle from the connector configuration.
    ///
    /// Construction is synchronous and does not touch the network; the first
    /// forwarded operation does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint cannot be interpreted as a
    /// base URL and [`Error::Connection`] if the underlying client cannot be
    /// built from it.
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(endpoint = %config.endpoint_url()))]
    pub fn new(config: Arc<ConnectorConfig>) -> Result<Self> {
        let mut base_url: BaseUrl = config.endpoint_url().parse().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "invalid endpoint URL");
            Error::Config(format!("invalid endpoint URL: {e}"))
        })?;

        if let Some(region) = &config.region {
            base_url.region = region.clone();
        }

        let provider = StaticProvider::from(config.credentials());
        let inner = Client::new(
            base_url,
            Some(Box::new(provider)),
            config.ssl_cert_file.as_deref(),
            config.ignore_cert_check,
        )
        .map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "failed to construct storage client");
            Error::connection(e)
        })?;

        debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %config.endpoint_url(),
            secure = config.use_ssl,
            access_key = %config.credentials().access_key_masked(),
            "storage client constructed"
        );

        Ok(Self { inner, config })
    }

    /// Returns a reference to the wrapped client.
    #[inline]
    pub(crate) fn as_inner(&self) -> &Client {
        &self.inner
    }

    /// Returns the configuration this handle was built from.
    #[inline]
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Returns the configured endpoint URL, for log context.
    pub fn endpoint(&self) -> String {
        self.config.endpoint_url()
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("endpoint", &self.config.endpoint_url())
            .field("secure", &self.config.use_ssl)
            .field("bucket", &self.config.bucket)
            .field("access_key", &self.config.credentials().access_key_masked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Credentials;

    fn test_config() -> Arc<ConnectorConfig> {
        Arc::new(
            ConnectorConfig::new("localhost", Credentials::new("minioadmin", "minioadmin"))
                .with_port(9000),
        )
    }

    #[test]
    fn construction_is_synchronous_and_offline() {
        let client = StorageClient::new(test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn invalid_endpoint_fails_with_config_error() {
        let config = Arc::new(ConnectorConfig::new(
            "not a hostname",
            Credentials::default(),
        ));
        let result = StorageClient::new(config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn debug_output_masks_credentials() {
        let client = StorageClient::new(test_config()).unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("localhost:9000"));
        assert!(!rendered.contains("minioadmin"));
    }
}
