//! Object-scoped forwarding: content transfer, metadata, tagging,
//! retention, legal hold, composition, and content selection.

use std::collections::HashMap;

use bytes::Bytes;
use minio::s3::builders::ObjectToDelete;
use minio::s3::segmented_bytes::SegmentedBytes;
use minio::s3::types::S3Api;
use serde_json::json;

use super::forwarder::{Forwarder, op_err};
use super::{Operation, OperationArgs, OperationValue};
use crate::{Error, Result};

impl Forwarder {
    pub(crate) async fn get_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetObject, &args)?;
        let object = args.require_object(Operation::GetObject)?;

        let response = self
            .client()
            .get_object(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::GetObject))?;

        let segmented = response.content.to_segmented_bytes().await?;
        Ok(OperationValue::Bytes(segmented.to_bytes()))
    }

    pub(crate) async fn get_partial_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetPartialObject, &args)?;
        let object = args.require_object(Operation::GetPartialObject)?;
        let offset = args
            .offset
            .ok_or_else(|| Error::missing_argument(Operation::GetPartialObject, "offset"))?;

        let response = self
            .client()
            .get_object(&bucket, object)
            .offset(Some(offset))
            .length(args.length)
            .send()
            .await
            .map_err(op_err(Operation::GetPartialObject))?;

        let segmented = response.content.to_segmented_bytes().await?;
        Ok(OperationValue::Bytes(segmented.to_bytes()))
    }

    /// Downloads an object straight to a local file.
    pub(crate) async fn f_get_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::FGetObject, &args)?;
        let object = args.require_object(Operation::FGetObject)?;
        let path = args.require_file_path(Operation::FGetObject)?;

        let response = self
            .client()
            .get_object(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::FGetObject))?;

        let segmented = response.content.to_segmented_bytes().await?;
        tokio::fs::write(path, segmented.to_bytes()).await?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn put_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::PutObject, &args)?;
        let object = args.require_object(Operation::PutObject)?.to_string();
        let data = args.require_data(Operation::PutObject)?;

        self.put_bytes(Operation::PutObject, &bucket, &object, data)
            .await
    }

    /// Uploads a local file's contents as an object.
    pub(crate) async fn f_put_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::FPutObject, &args)?;
        let object = args.require_object(Operation::FPutObject)?.to_string();
        let path = args.require_file_path(Operation::FPutObject)?;

        let data = Bytes::from(tokio::fs::read(path).await?);
        self.put_bytes(Operation::FPutObject, &bucket, &object, data)
            .await
    }

    /// Shared upload path for `putObject` and `fPutObject`. Returns an
    /// upload receipt with the backend's etag.
    async fn put_bytes(
        &self,
        operation: Operation,
        bucket: &str,
        object: &str,
        data: Bytes,
    ) -> Result<OperationValue> {
        let size = data.len() as u64;
        let segmented = SegmentedBytes::from(data);

        let response = self
            .client()
            .put_object(bucket, object, segmented)
            .send()
            .await
            .map_err(op_err(operation))?;

        Ok(OperationValue::Json(json!({
            "etag": response.etag,
            "size": size,
        })))
    }

    pub(crate) async fn copy_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::CopyObject, &args)?;
        let object = args.require_object(Operation::CopyObject)?.to_string();
        let source = args
            .copy_source
            .ok_or_else(|| Error::missing_argument(Operation::CopyObject, "copySource"))?;

        self.client()
            .copy_object(&bucket, object)
            .source(source)
            .send()
            .await
            .map_err(op_err(Operation::CopyObject))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn stat_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::StatObject, &args)?;
        let object = args.require_object(Operation::StatObject)?;

        let response = self
            .client()
            .stat_object(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::StatObject))?;

        let content_type = response
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        // User metadata travels as x-amz-meta-* headers.
        let meta_data: HashMap<String, String> = response
            .headers
            .iter()
            .filter_map(|(k, v)| {
                let key = k.as_str().strip_prefix("x-amz-meta-")?.to_string();
                let value = v.to_str().ok()?.to_string();
                Some((key, value))
            })
            .collect();

        Ok(OperationValue::Json(json!({
            "name": object,
            "size": response.size,
            "etag": response.etag,
            "lastModified": response.last_modified.map(|dt| dt.to_rfc3339()),
            "contentType": content_type,
            "metaData": meta_data,
        })))
    }

    pub(crate) async fn remove_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveObject, &args)?;
        let object = args.require_object(Operation::RemoveObject)?;

        self.client()
            .delete_object(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::RemoveObject))?;
        Ok(OperationValue::Unit)
    }

    /// Removes a batch of objects in one request. An empty batch is
    /// forwarded as-is; the backend treats it as a no-op.
    pub(crate) async fn remove_objects(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveObjects, &args)?;

        let objects: Vec<ObjectToDelete> = args
            .objects
            .iter()
            .map(|key| ObjectToDelete::from(key.as_str()))
            .collect();

        self.client()
            .delete_objects::<&str, ObjectToDelete>(&bucket, objects)
            .send()
            .await
            .map_err(op_err(Operation::RemoveObjects))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn set_object_tagging(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetObjectTagging, &args)?;
        let object = args.require_object(Operation::SetObjectTagging)?.to_string();
        let tags = args.require_tags(Operation::SetObjectTagging)?;

        self.client()
            .put_object_tagging(&bucket, &object)
            .tags(tags)
            .send()
            .await
            .map_err(op_err(Operation::SetObjectTagging))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_object_tagging(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetObjectTagging, &args)?;
        let object = args.require_object(Operation::GetObjectTagging)?.to_string();

        let response = self
            .client()
            .get_object_tagging(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::GetObjectTagging))?;
        Ok(OperationValue::Json(json!(response.tags)))
    }

    pub(crate) async fn remove_object_tagging(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveObjectTagging, &args)?;
        let object = args
            .require_object(Operation::RemoveObjectTagging)?
            .to_string();

        self.client()
            .delete_object_tagging(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::RemoveObjectTagging))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn put_object_retention(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::PutObjectRetention, &args)?;
        let object = args
            .require_object(Operation::PutObjectRetention)?
            .to_string();

        self.client()
            .put_object_retention(&bucket, object)
            .retention_mode(args.retention_mode)
            .retain_until_date(args.retain_until_date)
            .send()
            .await
            .map_err(op_err(Operation::PutObjectRetention))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_object_retention(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetObjectRetention, &args)?;
        let object = args
            .require_object(Operation::GetObjectRetention)?
            .to_string();

        let response = self
            .client()
            .get_object_retention(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::GetObjectRetention))?;
        Ok(OperationValue::Retention {
            mode: response.retention_mode,
            retain_until_date: response.retain_until_date,
        })
    }

    pub(crate) async fn set_object_legal_hold(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetObjectLegalHold, &args)?;
        let object = args
            .require_object(Operation::SetObjectLegalHold)?
            .to_string();
        let enabled = args
            .legal_hold
            .ok_or_else(|| Error::missing_argument(Operation::SetObjectLegalHold, "legalHold"))?;

        self.client()
            .put_object_legal_hold(&bucket, object, enabled)
            .send()
            .await
            .map_err(op_err(Operation::SetObjectLegalHold))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_object_legal_hold(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetObjectLegalHold, &args)?;
        let object = args
            .require_object(Operation::GetObjectLegalHold)?
            .to_string();

        let response = self
            .client()
            .get_object_legal_hold(&bucket, object)
            .send()
            .await
            .map_err(op_err(Operation::GetObjectLegalHold))?;
        Ok(OperationValue::Bool(response.enabled))
    }

    /// Concatenates source objects into a new object, server side.
    pub(crate) async fn compose_object(&self, args: OperationArgs) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::ComposeObject, &args)?;
        let object = args.require_object(Operation::ComposeObject)?.to_string();
        if args.compose_sources.is_empty() {
            return Err(Error::missing_argument(
                Operation::ComposeObject,
                "composeSources",
            ));
        }

        self.client()
            .compose_object(&bucket, object, args.compose_sources)
            .send()
            .await
            .map_err(op_err(Operation::ComposeObject))?;
        Ok(OperationValue::Unit)
    }

    /// Runs a SQL-style select against the object's content. The response
    /// handle, including its event stream, is handed back unconsumed.
    pub(crate) async fn select_object_content(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SelectObjectContent, &args)?;
        let object = args
            .require_object(Operation::SelectObjectContent)?
            .to_string();
        let request = args.select_request.ok_or_else(|| {
            Error::missing_argument(Operation::SelectObjectContent, "selectRequest")
        })?;

        let response = self
            .client()
            .select_object_content(&bucket, object, request)
            .send()
            .await
            .map_err(op_err(Operation::SelectObjectContent))?;
        Ok(OperationValue::Select(response))
    }
}
