//! Bucket-scoped forwarding: lifecycle, listings, tagging, versioning,
//! replication, lifecycle configuration, encryption, object lock, and
//! policy documents.

use futures::StreamExt;
use minio::s3::builders::VersioningStatus;
use minio::s3::types::{S3Api, ToStream};
use serde_json::json;

use super::forwarder::{Forwarder, op_err};
use super::{Operation, OperationArgs, OperationValue};
use crate::{Error, Result};

impl Forwarder {
    pub(crate) async fn make_bucket(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::MakeBucket, &args)?;

        let mut request = self.client().create_bucket(&bucket);
        // A present region selects the two-argument variant of the
        // underlying call; absent leaves the client's default in place.
        if let Some(region) = args.region.clone() {
            request = request.region(Some(region));
        }

        request
            .send()
            .await
            .map_err(op_err(Operation::MakeBucket))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn list_buckets(&self, _args: OperationArgs) -> Result<OperationValue> {
        let response = self
            .client()
            .list_buckets()
            .send()
            .await
            .map_err(op_err(Operation::ListBuckets))?;

        let buckets: Vec<serde_json::Value> = response
            .buckets
            .into_iter()
            .map(|bucket| json!({ "name": bucket.name }))
            .collect();
        Ok(OperationValue::Json(json!(buckets)))
    }

    pub(crate) async fn bucket_exists(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::BucketExists, &args)?;

        let response = self
            .client()
            .bucket_exists(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::BucketExists))?;
        Ok(OperationValue::Bool(response.exists))
    }

    pub(crate) async fn remove_bucket(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveBucket, &args)?;

        self.client()
            .delete_bucket(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveBucket))?;
        Ok(OperationValue::Unit)
    }

    /// Resolves immediately with the unconsumed page stream; the caller
    /// drains it at its own pace.
    pub(crate) async fn list_objects(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::ListObjects, &args)?;

        let mut request = self.client().list_objects(&bucket);
        if let Some(prefix) = args.prefix.clone() {
            request = request.prefix(Some(prefix));
        }
        if !args.recursive {
            request = request.delimiter(Some("/".to_string()));
        }

        let stream = request.to_stream().await;
        Ok(OperationValue::ObjectStream(stream.boxed()))
    }

    pub(crate) async fn set_bucket_tagging(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetBucketTagging, &args)?;
        let tags = args.require_tags(Operation::SetBucketTagging)?;

        self.client()
            .put_bucket_tagging(&bucket)
            .tags(tags)
            .send()
            .await
            .map_err(op_err(Operation::SetBucketTagging))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_bucket_tagging(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetBucketTagging, &args)?;

        let response = self
            .client()
            .get_bucket_tagging(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetBucketTagging))?;
        Ok(OperationValue::Json(json!(response.tags)))
    }

    pub(crate) async fn remove_bucket_tagging(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveBucketTagging, &args)?;

        self.client()
            .delete_bucket_tagging(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveBucketTagging))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn set_bucket_versioning(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetBucketVersioning, &args)?;
        let enabled = args
            .versioning_enabled
            .ok_or_else(|| Error::missing_argument(Operation::SetBucketVersioning, "enabled"))?;

        let status = if enabled {
            VersioningStatus::Enabled
        } else {
            VersioningStatus::Suspended
        };

        self.client()
            .put_bucket_versioning(&bucket)
            .versioning_status(status)
            .send()
            .await
            .map_err(op_err(Operation::SetBucketVersioning))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_bucket_versioning(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetBucketVersioning, &args)?;

        let response = self
            .client()
            .get_bucket_versioning(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetBucketVersioning))?;

        let enabled = matches!(response.status, Some(VersioningStatus::Enabled));
        Ok(OperationValue::Json(json!({ "enabled": enabled })))
    }

    pub(crate) async fn set_bucket_replication(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetBucketReplication, &args)?;
        let config = args.replication_config.ok_or_else(|| {
            Error::missing_argument(Operation::SetBucketReplication, "replicationConfig")
        })?;

        self.client()
            .put_bucket_replication(&bucket)
            .replication_config(config)
            .send()
            .await
            .map_err(op_err(Operation::SetBucketReplication))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_bucket_replication(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetBucketReplication, &args)?;

        let response = self
            .client()
            .get_bucket_replication(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetBucketReplication))?;
        Ok(OperationValue::Replication(response.config))
    }

    pub(crate) async fn remove_bucket_replication(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveBucketReplication, &args)?;

        self.client()
            .delete_bucket_replication(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveBucketReplication))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn set_bucket_lifecycle(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetBucketLifecycle, &args)?;
        let config = args.lifecycle_config.ok_or_else(|| {
            Error::missing_argument(Operation::SetBucketLifecycle, "lifecycleConfig")
        })?;

        self.client()
            .put_bucket_lifecycle(&bucket)
            .life_cycle_config(config)
            .send()
            .await
            .map_err(op_err(Operation::SetBucketLifecycle))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_bucket_lifecycle(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetBucketLifecycle, &args)?;

        let response = self
            .client()
            .get_bucket_lifecycle(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetBucketLifecycle))?;
        Ok(OperationValue::Lifecycle(response.config))
    }

    pub(crate) async fn remove_bucket_lifecycle(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveBucketLifecycle, &args)?;

        self.client()
            .delete_bucket_lifecycle(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveBucketLifecycle))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn set_bucket_encryption(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetBucketEncryption, &args)?;
        let config = args
            .sse_config
            .ok_or_else(|| Error::missing_argument(Operation::SetBucketEncryption, "sseConfig"))?;

        self.client()
            .put_bucket_encryption(&bucket)
            .sse_config(config)
            .send()
            .await
            .map_err(op_err(Operation::SetBucketEncryption))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_bucket_encryption(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetBucketEncryption, &args)?;

        let response = self
            .client()
            .get_bucket_encryption(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetBucketEncryption))?;
        Ok(OperationValue::Sse(response.config))
    }

    pub(crate) async fn remove_bucket_encryption(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveBucketEncryption, &args)?;

        self.client()
            .delete_bucket_encryption(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveBucketEncryption))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn set_object_lock_config(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetObjectLockConfig, &args)?;
        let config = args.object_lock_config.ok_or_else(|| {
            Error::missing_argument(Operation::SetObjectLockConfig, "objectLockConfig")
        })?;

        self.client()
            .put_object_lock_config(&bucket)
            .config(config)
            .send()
            .await
            .map_err(op_err(Operation::SetObjectLockConfig))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_object_lock_config(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetObjectLockConfig, &args)?;

        let response = self
            .client()
            .get_object_lock_config(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetObjectLockConfig))?;
        Ok(OperationValue::ObjectLock(response.config))
    }

    pub(crate) async fn remove_object_lock_config(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveObjectLockConfig, &args)?;

        self.client()
            .delete_object_lock_config(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveObjectLockConfig))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn set_bucket_policy(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetBucketPolicy, &args)?;
        let policy = args.require_policy(Operation::SetBucketPolicy)?.to_string();

        self.client()
            .put_bucket_policy(&bucket)
            .config(policy)
            .send()
            .await
            .map_err(op_err(Operation::SetBucketPolicy))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_bucket_policy(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetBucketPolicy, &args)?;

        let response = self
            .client()
            .get_bucket_policy(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetBucketPolicy))?;
        Ok(OperationValue::Text(response.config))
    }

    pub(crate) async fn remove_bucket_policy(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveBucketPolicy, &args)?;

        self.client()
            .delete_bucket_policy(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveBucketPolicy))?;
        Ok(OperationValue::Unit)
    }
}
