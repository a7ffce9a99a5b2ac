//! Presigned-URL forwarding.
//!
//! Presigning is pure signature work over the configured credentials; no
//! request reaches the backend, so an expired or wrong URL only fails when
//! someone later uses it.

use http::Method;

use super::forwarder::{Forwarder, op_err};
use super::{Operation, OperationArgs, OperationValue};
use crate::{Error, Result};

impl Forwarder {
    /// Presigns an arbitrary-method URL. The method name is the only
    /// argument this layer interprets itself.
    pub(crate) async fn presigned_url(&self, args: OperationArgs) -> Result<OperationValue> {
        let method = args.require_method(Operation::PresignedUrl)?;
        let method: Method = method.parse().map_err(|_| {
            Error::invalid_argument(
                Operation::PresignedUrl,
                format!("unrecognized HTTP method `{method}`"),
            )
        })?;

        self.presign(Operation::PresignedUrl, method, args).await
    }

    pub(crate) async fn presigned_get_object(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        self.presign(Operation::PresignedGetObject, Method::GET, args)
            .await
    }

    pub(crate) async fn presigned_put_object(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        self.presign(Operation::PresignedPutObject, Method::PUT, args)
            .await
    }

    /// Shared signing path for the URL-shaped presign operations.
    async fn presign(
        &self,
        operation: Operation,
        method: Method,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let bucket = self.bucket_for(operation, &args)?;
        let object = args.require_object(operation)?.to_string();

        let mut request = self
            .client()
            .get_presigned_object_url(&bucket, object, method);
        // An absent expiry keeps the SDK's default lifetime.
        if let Some(expiry) = args.expiry_seconds {
            request = request.expiry_seconds(expiry);
        }

        let response = request.send().await.map_err(op_err(operation))?;
        Ok(OperationValue::Text(response.url))
    }

    /// Produces the form fields for a browser POST upload.
    pub(crate) async fn presigned_post_policy(
        &self,
        args: OperationArgs,
    ) -> Result<OperationValue> {
        let policy = args.post_policy.ok_or_else(|| {
            Error::missing_argument(Operation::PresignedPostPolicy, "postPolicy")
        })?;

        let form_data = self
            .client()
            .get_presigned_post_form_data(policy)
            .send()
            .await
            .map_err(op_err(Operation::PresignedPostPolicy))?;
        Ok(OperationValue::FormData(form_data))
    }
}
