//! Connector lifecycle and client handle management.
//!
//! The connector owns one lazily-built handle to the storage endpoint. The
//! handle moves through three states: absent, connecting, and ready. Once
//! ready it is shared read-only by every forwarded operation and is never
//! recreated for the life of the connector.

mod config;
mod connector;
mod credentials;
mod storage_client;

pub use config::ConnectorConfig;
pub use connector::{Connection, Connector};
pub use credentials::Credentials;
pub use storage_client::StorageClient;
