//! Uniform invocation contract around the underlying client.
//!
//! One forwarded call means: an optional diagnostic entry, exactly one
//! underlying client call, and one normalized outcome. No retries, no
//! internal timeouts, no caching. Failures surface to the caller with the
//! underlying cause intact.

use tracing::{debug, error};

use super::{Operation, OperationArgs, OperationValue};
use crate::client::StorageClient;
use crate::{Error, Result, TRACING_TARGET_OPERATIONS};

/// Wraps a failed underlying call in [`Error::Operation`], preserving the
/// cause verbatim.
pub(crate) fn op_err(operation: Operation) -> impl Fn(minio::s3::error::Error) -> Error {
    move |source| Error::operation(operation, source)
}

/// Forwards named operations to the underlying client.
///
/// Cheap to clone; every clone shares the same client handle read-only.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: StorageClient,
}

impl Forwarder {
    /// Creates a forwarder over the given client handle.
    pub fn new(client: StorageClient) -> Self {
        Self { client }
    }

    #[inline]
    pub(crate) fn client(&self) -> &minio::s3::Client {
        self.client.as_inner()
    }

    #[inline]
    pub(crate) fn debug_enabled(&self) -> bool {
        self.client.config().debug
    }

    /// Resolves the bucket argument, falling back to the connector's default
    /// bucket.
    pub(crate) fn bucket_for(&self, operation: Operation, args: &OperationArgs) -> Result<String> {
        args.bucket
            .clone()
            .or_else(|| self.client.config().bucket.clone())
            .ok_or_else(|| Error::missing_argument(operation, "bucket"))
    }

    /// Forwards one operation and normalizes its outcome.
    pub async fn forward(
        &self,
        operation: Operation,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        if self.debug_enabled() {
            debug!(
                target: TRACING_TARGET_OPERATIONS,
                operation = %operation,
                args = ?args,
                "forwarding operation"
            );
        }

        let result = self.dispatch(operation, args).await;

        if let Err(e) = &result
            && self.debug_enabled()
        {
            error!(
                target: TRACING_TARGET_OPERATIONS,
                operation = %operation,
                endpoint = %self.client.endpoint(),
                error = %e,
                "operation failed"
            );
        }

        result
    }

    async fn dispatch(&self, operation: Operation, args: OperationArgs) -> Result<OperationValue> {
        use Operation::*;

        match operation {
            MakeBucket => self.make_bucket(args).await,
            ListBuckets => self.list_buckets(args).await,
            BucketExists => self.bucket_exists(args).await,
            RemoveBucket => self.remove_bucket(args).await,
            ListObjects => self.list_objects(args).await,

            SetBucketTagging => self.set_bucket_tagging(args).await,
            GetBucketTagging => self.get_bucket_tagging(args).await,
            RemoveBucketTagging => self.remove_bucket_tagging(args).await,

            SetBucketVersioning => self.set_bucket_versioning(args).await,
            GetBucketVersioning => self.get_bucket_versioning(args).await,

            SetBucketReplication => self.set_bucket_replication(args).await,
            GetBucketReplication => self.get_bucket_replication(args).await,
            RemoveBucketReplication => self.remove_bucket_replication(args).await,

            SetBucketLifecycle => self.set_bucket_lifecycle(args).await,
            GetBucketLifecycle => self.get_bucket_lifecycle(args).await,
            RemoveBucketLifecycle => self.remove_bucket_lifecycle(args).await,

            SetBucketEncryption => self.set_bucket_encryption(args).await,
            GetBucketEncryption => self.get_bucket_encryption(args).await,
            RemoveBucketEncryption => self.remove_bucket_encryption(args).await,

            SetObjectLockConfig => self.set_object_lock_config(args).await,
            GetObjectLockConfig => self.get_object_lock_config(args).await,
            RemoveObjectLockConfig => self.remove_object_lock_config(args).await,

            SetObjectLegalHold => self.set_object_legal_hold(args).await,
            GetObjectLegalHold => self.get_object_legal_hold(args).await,

            GetObject => self.get_object(args).await,
            GetPartialObject => self.get_partial_object(args).await,
            FGetObject => self.f_get_object(args).await,
            PutObject => self.put_object(args).await,
            FPutObject => self.f_put_object(args).await,
            CopyObject => self.copy_object(args).await,
            StatObject => self.stat_object(args).await,
            RemoveObject => self.remove_object(args).await,
            RemoveObjects => self.remove_objects(args).await,

            SetObjectTagging => self.set_object_tagging(args).await,
            GetObjectTagging => self.get_object_tagging(args).await,
            RemoveObjectTagging => self.remove_object_tagging(args).await,

            PutObjectRetention => self.put_object_retention(args).await,
            GetObjectRetention => self.get_object_retention(args).await,

            ComposeObject => self.compose_object(args).await,
            SelectObjectContent => self.select_object_content(args).await,

            PresignedUrl => self.presigned_url(args).await,
            PresignedGetObject => self.presigned_get_object(args).await,
            PresignedPutObject => self.presigned_put_object(args).await,
            PresignedPostPolicy => self.presigned_post_policy(args).await,

            SetBucketPolicy => self.set_bucket_policy(args).await,
            GetBucketPolicy => self.get_bucket_policy(args).await,
            RemoveBucketPolicy => self.remove_bucket_policy(args).await,

            SetBucketNotification => self.set_bucket_notification(args).await,
            GetBucketNotification => self.get_bucket_notification(args).await,
            RemoveAllBucketNotification => self.remove_all_bucket_notification(args).await,
            ListenBucketNotification => self.listen_bucket_notification(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::{ConnectorConfig, Credentials};

    fn forwarder_with_default_bucket(bucket: Option<&str>) -> Forwarder {
        let mut config = ConnectorConfig::new("localhost", Credentials::new("K", "S"));
        config.bucket = bucket.map(String::from);
        Forwarder::new(StorageClient::new(Arc::new(config)).unwrap())
    }

    #[test]
    fn bucket_argument_takes_precedence() {
        let forwarder = forwarder_with_default_bucket(Some("fallback"));
        let args = OperationArgs::new().bucket("explicit");
        let bucket = forwarder.bucket_for(Operation::StatObject, &args).unwrap();
        assert_eq!(bucket, "explicit");
    }

    #[test]
    fn default_bucket_fills_the_gap() {
        let forwarder = forwarder_with_default_bucket(Some("fallback"));
        let bucket = forwarder
            .bucket_for(Operation::StatObject, &OperationArgs::new())
            .unwrap();
        assert_eq!(bucket, "fallback");
    }

    #[test]
    fn no_bucket_anywhere_is_a_missing_argument() {
        let forwarder = forwarder_with_default_bucket(None);
        let err = forwarder
            .bucket_for(Operation::StatObject, &OperationArgs::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingArgument {
                operation: "statObject",
                argument: "bucket",
            }
        ));
    }
}
