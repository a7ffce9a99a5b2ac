//! Data-source connector owning the client lifecycle.
//!
//! The handle moves through three states: absent (no handle), connecting (a
//! build is in flight), and ready. At most one build is ever in flight;
//! concurrent callers await the same build and resolve with the same handle.
//! A failed build leaves the state absent so a later call may retry.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::{ConnectorConfig, StorageClient};
use crate::ops::OperationTable;
use crate::{Result, TRACING_TARGET_CONNECTOR};

/// An established connection: the shared client handle plus the operation
/// table published when the handle became ready.
#[derive(Debug, Clone)]
pub struct Connection {
    client: StorageClient,
    operations: Arc<OperationTable>,
}

impl Connection {
    /// Returns the shared client handle.
    #[inline]
    pub fn client(&self) -> &StorageClient {
        &self.client
    }

    /// Returns the published operation table.
    ///
    /// Consumers copy entries (or the whole `Arc`) out of this table; the
    /// table itself never mutates after publication.
    #[inline]
    pub fn operations(&self) -> &Arc<OperationTable> {
        &self.operations
    }
}

/// Data-source connector for an S3-compatible storage endpoint.
///
/// Owns the configuration and a single lazily-established client handle.
#[derive(Debug)]
pub struct Connector {
    config: Arc<ConnectorConfig>,
    state: OnceCell<Connection>,
}

impl Connector {
    /// Creates a connector in the absent state. No client is built until
    /// [`connect`](Self::connect) is called.
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            config: Arc::new(config),
            state: OnceCell::new(),
        }
    }

    /// Creates a connector from a raw configuration payload, dropping
    /// unrecognized keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if a recognized key
    /// carries a value of the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(Self::new(ConnectorConfig::from_value(value)?))
    }

    /// Returns the connector configuration.
    #[inline]
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Returns whether the handle has reached the ready state.
    pub fn is_connected(&self) -> bool {
        self.state.initialized()
    }

    /// Returns the established connection, building the client handle and
    /// publishing the operation table on first use.
    ///
    /// Idempotent once ready: later calls resolve immediately with the
    /// identical handle and table. Concurrent calls while connecting share
    /// the single in-flight build.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) or
    /// [`Error::Config`](crate::Error::Config) if the handle cannot be
    /// built; the state returns to absent so the call may be retried.
    #[instrument(skip(self), target = TRACING_TARGET_CONNECTOR, fields(endpoint = %self.config.endpoint_url()))]
    pub async fn connect(&self) -> Result<&Connection> {
        self.state
            .get_or_try_init(|| async {
                debug!(target: TRACING_TARGET_CONNECTOR, "establishing storage connection");

                let client = StorageClient::new(Arc::clone(&self.config))?;
                let operations = Arc::new(OperationTable::bind(client.clone()));

                info!(
                    target: TRACING_TARGET_CONNECTOR,
                    endpoint = %self.config.endpoint_url(),
                    operations = operations.len(),
                    "connection ready"
                );

                Ok(Connection { client, operations })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Error;

    fn scenario_connector() -> Connector {
        Connector::from_value(json!({
            "endPoint": "localhost",
            "port": 9002,
            "useSSL": false,
            "accessKey": "K",
            "secretKey": "S",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn connect_publishes_operation_table() {
        let connector = scenario_connector();
        assert!(!connector.is_connected());

        let connection = connector.connect().await.unwrap();
        assert!(connector.is_connected());
        assert!(connection.operations().contains("makeBucket"));
        assert!(connection.operations().contains("getObject"));
    }

    #[tokio::test]
    async fn connect_is_idempotent() {
        let connector = scenario_connector();

        let first = connector.connect().await.unwrap().clone();
        let second = connector.connect().await.unwrap().clone();

        // Same table object, not an equivalent rebuild.
        assert!(Arc::ptr_eq(first.operations(), second.operations()));
    }

    #[tokio::test]
    async fn concurrent_connects_share_one_build() {
        let connector = scenario_connector();

        let (first, second) = tokio::join!(connector.connect(), connector.connect());
        let (first, second) = (first.unwrap(), second.unwrap());

        assert!(Arc::ptr_eq(first.operations(), second.operations()));
    }

    #[tokio::test]
    async fn failed_connect_returns_to_absent() {
        let connector = Connector::from_value(json!({
            "endPoint": "not a hostname",
            "accessKey": "K",
            "secretKey": "S",
        }))
        .unwrap();

        let first = connector.connect().await;
        assert!(matches!(first, Err(Error::Config(_))));
        assert!(!connector.is_connected());

        // Retry is permitted; the same bad configuration fails the same way
        // rather than poisoning the connector.
        let second = connector.connect().await;
        assert!(second.is_err());
        assert!(!connector.is_connected());
    }
}
