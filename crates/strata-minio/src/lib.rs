#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![allow(clippy::result_large_err, clippy::large_enum_variant)]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "strata_minio::client";
pub const TRACING_TARGET_CONNECTOR: &str = "strata_minio::connector";
pub const TRACING_TARGET_OPERATIONS: &str = "strata_minio::operations";

pub mod client;
pub mod ops;

// Re-export for convenience
pub use crate::client::{Connection, Connector, ConnectorConfig, Credentials, StorageClient};
pub use crate::ops::{
    BoundOperation, Forwarder, NotificationStream, ObjectStream, Operation, OperationArgs,
    OperationGroup, OperationShape, OperationTable, OperationValue,
};

/// Error type for the connector and its forwarded storage operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Client construction failed.
    ///
    /// Raised by `connect` when the underlying client cannot be built from
    /// the supplied configuration. The connector stays in the absent state,
    /// so a later call may retry.
    #[error("failed to construct storage client: {0}")]
    Connection(#[source] minio::s3::error::Error),

    /// Malformed connector configuration.
    ///
    /// The configuration payload could not be decoded or the endpoint could
    /// not be interpreted as a base URL. Unrecognized keys never raise this;
    /// they are silently dropped.
    #[error("invalid connector configuration: {0}")]
    Config(String),

    /// An individual operation's underlying call failed.
    ///
    /// Wraps the original cause verbatim, with no reclassification.
    #[error("operation '{operation}' failed: {source}")]
    Operation {
        /// Wire name of the forwarded operation.
        operation: &'static str,
        /// The underlying client's error, unchanged.
        #[source]
        source: minio::s3::error::Error,
    },

    /// The operation table was invoked with a name it does not contain.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A required positional argument was not supplied.
    #[error("operation '{operation}' requires the '{argument}' argument")]
    MissingArgument {
        /// Wire name of the forwarded operation.
        operation: &'static str,
        /// Name of the absent argument.
        argument: &'static str,
    },

    /// An argument was supplied but could not be interpreted.
    #[error("operation '{operation}' got an invalid argument: {message}")]
    InvalidArgument {
        /// Wire name of the forwarded operation.
        operation: &'static str,
        /// What could not be interpreted.
        message: String,
    },

    /// Local file I/O failed in one of the by-file helpers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn connection(source: minio::s3::error::Error) -> Self {
        Self::Connection(source)
    }

    pub(crate) fn operation(operation: ops::Operation, source: minio::s3::error::Error) -> Self {
        Self::Operation {
            operation: operation.name(),
            source,
        }
    }

    pub(crate) fn missing_argument(operation: ops::Operation, argument: &'static str) -> Self {
        Self::MissingArgument {
            operation: operation.name(),
            argument,
        }
    }

    pub(crate) fn invalid_argument(operation: ops::Operation, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation: operation.name(),
            message: message.into(),
        }
    }

    /// Returns whether this error was raised while establishing the
    /// connection rather than by a forwarded operation.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Config(_))
    }

    /// Returns whether this error wraps a failed underlying call.
    pub fn is_operation_error(&self) -> bool {
        matches!(self, Error::Operation { .. })
    }

    /// Returns the wire name of the operation this error belongs to, if any.
    pub fn operation_name(&self) -> Option<&'static str> {
        match self {
            Error::Operation { operation, .. }
            | Error::MissingArgument { operation, .. }
            | Error::InvalidArgument { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

/// Specialized [`Result`] type for connector operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
