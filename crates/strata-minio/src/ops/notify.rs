//! Bucket-notification forwarding, including the long-lived listen stream.

use futures::StreamExt;
use minio::s3::types::S3Api;

use super::forwarder::{Forwarder, op_err};
use super::{Operation, OperationArgs, OperationValue};
use crate::{Error, Result};

impl Forwarder {
    pub(crate) async fn set_bucket_notification(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::SetBucketNotification, &args)?;
        let config = args.notification_config.ok_or_else(|| {
            Error::missing_argument(Operation::SetBucketNotification, "notificationConfig")
        })?;

        self.client()
            .put_bucket_notification(&bucket)
            .notification_config(config)
            .send()
            .await
            .map_err(op_err(Operation::SetBucketNotification))?;
        Ok(OperationValue::Unit)
    }

    pub(crate) async fn get_bucket_notification(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::GetBucketNotification, &args)?;

        let response = self
            .client()
            .get_bucket_notification(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::GetBucketNotification))?;
        Ok(OperationValue::Notification(response.config))
    }

    /// Clears every notification target on the bucket.
    pub(crate) async fn remove_all_bucket_notification(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::RemoveAllBucketNotification, &args)?;

        self.client()
            .delete_bucket_notification(&bucket)
            .send()
            .await
            .map_err(op_err(Operation::RemoveAllBucketNotification))?;
        Ok(OperationValue::Unit)
    }

    /// Subscribes to bucket events. Resolves as soon as the subscription is
    /// established; the event stream is handed back unconsumed and stays
    /// open until the caller drops it.
    pub(crate) async fn listen_bucket_notification(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(Operation::ListenBucketNotification, &args)?;

        let mut request = self.client().listen_bucket_notification(&bucket);
        if let Some(prefix) = args.prefix.clone() {
            request = request.prefix(Some(prefix));
        }
        if let Some(suffix) = args.suffix.clone() {
            request = request.suffix(Some(suffix));
        }
        if !args.events.is_empty() {
            request = request.events(Some(args.events.clone()));
        }

        let (_, stream) = request
            .send()
            .await
            .map_err(op_err(Operation::ListenBucketNotification))?;
        Ok(OperationValue::NotificationStream(stream.boxed()))
    }
}
