//! Normalized success payloads for forwarded operations.

use std::collections::HashMap;

use bytes::Bytes;
use futures::stream::BoxStream;
use minio::s3::error::Error as ClientError;
use minio::s3::lifecycle_config::LifecycleConfig;
use minio::s3::response::{ListObjectsResponse, SelectObjectContentResponse};
use minio::s3::types::{
    NotificationConfig, NotificationRecords, ObjectLockConfig, ReplicationConfig, RetentionMode,
    SseConfig,
};
use minio::s3::utils::UtcTime;

/// Pages of a bucket listing, handed to the caller unconsumed.
pub type ObjectStream = BoxStream<'static, Result<ListObjectsResponse, ClientError>>;

/// Bucket notification events, handed to the caller unconsumed.
pub type NotificationStream = BoxStream<'static, Result<NotificationRecords, ClientError>>;

/// The single success payload of a forwarded operation.
///
/// One variant per payload family. The calling convention stays uniform
/// across all operations; the payload carries either the underlying client's
/// value directly or a plain JSON rendering of it. Streams are returned
/// unconsumed; draining them, and any backpressure, belongs to the caller.
pub enum OperationValue {
    /// No payload.
    Unit,
    /// A boolean answer (`bucketExists`, `getObjectLegalHold`).
    Bool(bool),
    /// A text payload (bucket policy document, presigned URL).
    Text(String),
    /// A structured payload rendered as JSON (stat results, tag sets,
    /// upload receipts).
    Json(serde_json::Value),
    /// Fully buffered object content.
    Bytes(Bytes),
    /// A stream of listing pages; resolves before the listing is drained.
    ObjectStream(ObjectStream),
    /// A stream of bucket notification events.
    NotificationStream(NotificationStream),
    /// Presigned POST form fields.
    FormData(HashMap<String, String>),
    /// The bucket's notification configuration, as the client returned it.
    Notification(NotificationConfig),
    /// The bucket's replication configuration, as the client returned it.
    Replication(ReplicationConfig),
    /// The bucket's lifecycle configuration, as the client returned it.
    Lifecycle(LifecycleConfig),
    /// The bucket's encryption configuration, as the client returned it.
    Sse(SseConfig),
    /// The bucket's object-lock configuration, as the client returned it.
    ObjectLock(ObjectLockConfig),
    /// An object's retention settings, as the client returned them.
    Retention {
        /// Retention mode, if one is set.
        mode: Option<RetentionMode>,
        /// Expiry of the retention period, if one is set.
        retain_until_date: Option<UtcTime>,
    },
    /// The raw handle of a SQL-style select, including its event stream.
    Select(SelectObjectContentResponse),
}

impl OperationValue {
    /// Returns the boolean payload, if this value carries one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text payload, if this value carries one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the JSON payload, if this value carries one.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the buffered object content, if this value carries it.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// Returns whether this value hands a stream to the caller.
    pub fn is_stream(&self) -> bool {
        matches!(
            self,
            Self::ObjectStream(_) | Self::NotificationStream(_) | Self::Select(_)
        )
    }

    /// Returns whether this value carries no payload.
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

impl std::fmt::Debug for OperationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit => f.write_str("Unit"),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Bytes(value) => write!(f, "Bytes({} bytes)", value.len()),
            Self::ObjectStream(_) => f.write_str("ObjectStream(..)"),
            Self::NotificationStream(_) => f.write_str("NotificationStream(..)"),
            Self::FormData(fields) => write!(f, "FormData({} fields)", fields.len()),
            Self::Notification(_) => f.write_str("Notification(..)"),
            Self::Replication(_) => f.write_str("Replication(..)"),
            Self::Lifecycle(_) => f.write_str("Lifecycle(..)"),
            Self::Sse(_) => f.write_str("Sse(..)"),
            Self::ObjectLock(_) => f.write_str("ObjectLock(..)"),
            Self::Retention { mode, .. } => {
                write!(f, "Retention(mode set: {})", mode.is_some())
            }
            Self::Select(_) => f.write_str("Select(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variants() {
        assert_eq!(OperationValue::Bool(true).as_bool(), Some(true));
        assert_eq!(OperationValue::Text("x".into()).as_text(), Some("x"));
        assert!(OperationValue::Unit.is_unit());
        assert!(OperationValue::Bool(false).as_text().is_none());
    }

    #[test]
    fn debug_summarizes_payloads() {
        let value = OperationValue::Bytes(Bytes::from_static(b"abc"));
        assert_eq!(format!("{value:?}"), "Bytes(3 bytes)");
    }
}
