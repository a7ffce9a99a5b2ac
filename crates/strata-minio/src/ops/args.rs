//! Positional arguments for forwarded operations.
//!
//! Arguments are a thin, unvalidated passthrough named after the storage
//! concept they represent. Typed configuration payloads (select requests,
//! notification/replication/lifecycle/encryption configurations, copy and
//! compose sources, post policies) are the underlying client's own types;
//! this layer hands them through without interpreting them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use minio::s3::builders::{ComposeSource, CopySource, PostPolicy};
use minio::s3::lifecycle_config::LifecycleConfig;
use minio::s3::types::{
    NotificationConfig, ObjectLockConfig, ReplicationConfig, RetentionMode, SelectRequest,
    SseConfig,
};
use minio::s3::utils::UtcTime;

use super::Operation;
use crate::{Error, Result};

/// Arguments for a single forwarded operation.
///
/// Every field is optional; each operation reads the fields it names and
/// ignores the rest. Presence of required fields is the only check
/// performed; nothing is validated semantically.
#[derive(Default)]
pub struct OperationArgs {
    /// Bucket name. Falls back to the connector's default bucket.
    pub bucket: Option<String>,
    /// Object name.
    pub object: Option<String>,
    /// Region for `makeBucket`. Absent selects the single-argument variant
    /// of the underlying call.
    pub region: Option<String>,
    /// Object content for `putObject`.
    pub data: Option<Bytes>,
    /// Local file path for the by-file helpers.
    pub file_path: Option<PathBuf>,
    /// Byte-range start for `getPartialObject`.
    pub offset: Option<u64>,
    /// Byte-range length for `getPartialObject`.
    pub length: Option<u64>,
    /// Object names for `removeObjects`.
    pub objects: Vec<String>,
    /// Key prefix filter for listings and notification subscriptions.
    pub prefix: Option<String>,
    /// Key suffix filter for notification subscriptions.
    pub suffix: Option<String>,
    /// Whether listings descend past the `/` delimiter.
    pub recursive: bool,
    /// Event names for `listenBucketNotification`.
    pub events: Vec<String>,
    /// Expiry for presigned operations, in seconds.
    pub expiry_seconds: Option<u32>,
    /// HTTP method name for `presignedUrl`.
    pub method: Option<String>,
    /// Bucket policy document for `setBucketPolicy`.
    pub policy: Option<String>,
    /// Policy for `presignedPostPolicy`.
    pub post_policy: Option<PostPolicy>,
    /// Tag set for the tagging operations.
    pub tags: Option<HashMap<String, String>>,
    /// Desired state for `setBucketVersioning`.
    pub versioning_enabled: Option<bool>,
    /// Retention mode for `putObjectRetention`.
    pub retention_mode: Option<RetentionMode>,
    /// Retention expiry for `putObjectRetention`.
    pub retain_until_date: Option<UtcTime>,
    /// Desired state for `setObjectLegalHold`.
    pub legal_hold: Option<bool>,
    /// Source for `copyObject`.
    pub copy_source: Option<CopySource>,
    /// Sources for `composeObject`.
    pub compose_sources: Vec<ComposeSource>,
    /// Request for `selectObjectContent`.
    pub select_request: Option<SelectRequest>,
    /// Configuration for `setBucketNotification`.
    pub notification_config: Option<NotificationConfig>,
    /// Configuration for `setBucketReplication`.
    pub replication_config: Option<ReplicationConfig>,
    /// Configuration for `setBucketLifecycle`.
    pub lifecycle_config: Option<LifecycleConfig>,
    /// Configuration for `setBucketEncryption`.
    pub sse_config: Option<SseConfig>,
    /// Configuration for `setObjectLockConfig`.
    pub object_lock_config: Option<ObjectLockConfig>,
}

impl OperationArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bucket name.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Sets the object name.
    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Sets the region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the object content.
    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the local file path.
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Sets the byte range.
    pub fn range(mut self, offset: u64, length: Option<u64>) -> Self {
        self.offset = Some(offset);
        self.length = length;
        self
    }

    /// Sets the object names for batch removal.
    pub fn objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objects = objects.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the key prefix filter.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the key suffix filter.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Sets whether listings descend past the delimiter.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the notification event names.
    pub fn events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the presign expiry in seconds.
    pub fn expiry_seconds(mut self, seconds: u32) -> Self {
        self.expiry_seconds = Some(seconds);
        self
    }

    /// Sets the HTTP method for `presignedUrl`.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the bucket policy document.
    pub fn policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Sets the presigned POST policy.
    pub fn post_policy(mut self, policy: PostPolicy) -> Self {
        self.post_policy = Some(policy);
        self
    }

    /// Sets the tag set.
    pub fn tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the desired versioning state.
    pub fn versioning(mut self, enabled: bool) -> Self {
        self.versioning_enabled = Some(enabled);
        self
    }

    /// Sets the retention settings.
    pub fn retention(mut self, mode: RetentionMode, retain_until_date: Option<UtcTime>) -> Self {
        self.retention_mode = Some(mode);
        self.retain_until_date = retain_until_date;
        self
    }

    /// Sets the desired legal-hold state.
    pub fn legal_hold(mut self, enabled: bool) -> Self {
        self.legal_hold = Some(enabled);
        self
    }

    /// Sets the copy source.
    pub fn copy_source(mut self, source: CopySource) -> Self {
        self.copy_source = Some(source);
        self
    }

    /// Sets the compose sources.
    pub fn compose_sources(mut self, sources: Vec<ComposeSource>) -> Self {
        self.compose_sources = sources;
        self
    }

    /// Sets the select request.
    pub fn select_request(mut self, request: SelectRequest) -> Self {
        self.select_request = Some(request);
        self
    }

    /// Sets the notification configuration.
    pub fn notification_config(mut self, config: NotificationConfig) -> Self {
        self.notification_config = Some(config);
        self
    }

    /// Sets the replication configuration.
    pub fn replication_config(mut self, config: ReplicationConfig) -> Self {
        self.replication_config = Some(config);
        self
    }

    /// Sets the lifecycle configuration.
    pub fn lifecycle_config(mut self, config: LifecycleConfig) -> Self {
        self.lifecycle_config = Some(config);
        self
    }

    /// Sets the encryption configuration.
    pub fn sse_config(mut self, config: SseConfig) -> Self {
        self.sse_config = Some(config);
        self
    }

    /// Sets the object-lock configuration.
    pub fn object_lock_config(mut self, config: ObjectLockConfig) -> Self {
        self.object_lock_config = Some(config);
        self
    }

    pub(crate) fn require_object(&self, operation: Operation) -> Result<&str> {
        self.object
            .as_deref()
            .ok_or_else(|| Error::missing_argument(operation, "object"))
    }

    pub(crate) fn require_data(&self, operation: Operation) -> Result<Bytes> {
        self.data
            .clone()
            .ok_or_else(|| Error::missing_argument(operation, "data"))
    }

    pub(crate) fn require_file_path(&self, operation: Operation) -> Result<&Path> {
        self.file_path
            .as_deref()
            .ok_or_else(|| Error::missing_argument(operation, "filePath"))
    }

    pub(crate) fn require_tags(&self, operation: Operation) -> Result<HashMap<String, String>> {
        self.tags
            .clone()
            .ok_or_else(|| Error::missing_argument(operation, "tags"))
    }

    pub(crate) fn require_policy(&self, operation: Operation) -> Result<&str> {
        self.policy
            .as_deref()
            .ok_or_else(|| Error::missing_argument(operation, "policy"))
    }

    pub(crate) fn require_method(&self, operation: Operation) -> Result<&str> {
        self.method
            .as_deref()
            .ok_or_else(|| Error::missing_argument(operation, "method"))
    }
}

impl std::fmt::Debug for OperationArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("OperationArgs");
        if let Some(bucket) = &self.bucket {
            s.field("bucket", bucket);
        }
        if let Some(object) = &self.object {
            s.field("object", object);
        }
        if let Some(region) = &self.region {
            s.field("region", region);
        }
        if let Some(data) = &self.data {
            s.field("data_len", &data.len());
        }
        if let Some(path) = &self.file_path {
            s.field("file_path", path);
        }
        if let Some(offset) = &self.offset {
            s.field("offset", offset);
        }
        if let Some(length) = &self.length {
            s.field("length", length);
        }
        if !self.objects.is_empty() {
            s.field("objects", &self.objects.len());
        }
        if let Some(prefix) = &self.prefix {
            s.field("prefix", prefix);
        }
        if let Some(suffix) = &self.suffix {
            s.field("suffix", suffix);
        }
        if self.recursive {
            s.field("recursive", &true);
        }
        if !self.events.is_empty() {
            s.field("events", &self.events);
        }
        if let Some(expiry) = &self.expiry_seconds {
            s.field("expiry_seconds", expiry);
        }
        if let Some(method) = &self.method {
            s.field("method", method);
        }
        if self.policy.is_some() {
            s.field("policy", &"<document>");
        }
        if self.post_policy.is_some() {
            s.field("post_policy", &"<policy>");
        }
        if let Some(tags) = &self.tags {
            s.field("tags", &tags.len());
        }
        if let Some(enabled) = &self.versioning_enabled {
            s.field("versioning_enabled", enabled);
        }
        if self.retention_mode.is_some() {
            s.field("retention_mode", &"<mode>");
        }
        if self.retain_until_date.is_some() {
            s.field("retain_until_date", &"<date>");
        }
        if let Some(enabled) = &self.legal_hold {
            s.field("legal_hold", enabled);
        }
        if self.copy_source.is_some() {
            s.field("copy_source", &"<source>");
        }
        if !self.compose_sources.is_empty() {
            s.field("compose_sources", &self.compose_sources.len());
        }
        if self.select_request.is_some() {
            s.field("select_request", &"<request>");
        }
        if self.notification_config.is_some() {
            s.field("notification_config", &"<config>");
        }
        if self.replication_config.is_some() {
            s.field("replication_config", &"<config>");
        }
        if self.lifecycle_config.is_some() {
            s.field("lifecycle_config", &"<config>");
        }
        if self.sse_config.is_some() {
            s.field("sse_config", &"<config>");
        }
        if self.object_lock_config.is_some() {
            s.field("object_lock_config", &"<config>");
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn builder_sets_positional_fields() {
        let args = OperationArgs::new()
            .bucket("photos")
            .object("2024/cat.png")
            .range(128, Some(512))
            .recursive(true);

        assert_eq!(args.bucket.as_deref(), Some("photos"));
        assert_eq!(args.object.as_deref(), Some("2024/cat.png"));
        assert_eq!(args.offset, Some(128));
        assert_eq!(args.length, Some(512));
        assert!(args.recursive);
    }

    #[test]
    fn require_reports_the_missing_argument() {
        let args = OperationArgs::new();
        let err = args.require_object(Operation::StatObject).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingArgument {
                operation: "statObject",
                argument: "object",
            }
        ));
    }

    #[test]
    fn debug_omits_payload_contents() {
        let args = OperationArgs::new()
            .bucket("b")
            .data(Bytes::from_static(b"secret-bytes"))
            .policy("{\"Version\":\"2012-10-17\"}");
        let rendered = format!("{args:?}");
        assert!(rendered.contains("data_len"));
        assert!(!rendered.contains("secret-bytes"));
        assert!(!rendered.contains("2012-10-17"));
    }
}
