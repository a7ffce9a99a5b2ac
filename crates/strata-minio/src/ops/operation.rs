//! The operation registry, declared as data.
//!
//! The set of supported operations is an enum rather than a pile of
//! hand-bound methods, so the registry can be iterated, bound generically,
//! and asserted on in tests.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every operation the connector forwards to the underlying client.
///
/// Wire names serialize in camelCase, matching the method names the host
/// framework mixes onto its model objects (`makeBucket`, `getObject`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    // Bucket lifecycle
    MakeBucket,
    ListBuckets,
    BucketExists,
    RemoveBucket,
    ListObjects,

    // Bucket tagging
    SetBucketTagging,
    GetBucketTagging,
    RemoveBucketTagging,

    // Versioning
    SetBucketVersioning,
    GetBucketVersioning,

    // Replication
    SetBucketReplication,
    GetBucketReplication,
    RemoveBucketReplication,

    // Lifecycle configuration
    SetBucketLifecycle,
    GetBucketLifecycle,
    RemoveBucketLifecycle,

    // Encryption
    SetBucketEncryption,
    GetBucketEncryption,
    RemoveBucketEncryption,

    // Object lock
    SetObjectLockConfig,
    GetObjectLockConfig,
    RemoveObjectLockConfig,

    // Legal hold
    SetObjectLegalHold,
    GetObjectLegalHold,

    // Object CRUD
    GetObject,
    GetPartialObject,
    #[strum(serialize = "fGetObject")]
    FGetObject,
    PutObject,
    #[strum(serialize = "fPutObject")]
    FPutObject,
    CopyObject,
    StatObject,
    RemoveObject,
    RemoveObjects,

    // Object tagging
    SetObjectTagging,
    GetObjectTagging,
    RemoveObjectTagging,

    // Retention
    PutObjectRetention,
    GetObjectRetention,

    // Server-side composition and SQL-style select
    ComposeObject,
    SelectObjectContent,

    // Presigned access
    PresignedUrl,
    PresignedGetObject,
    PresignedPutObject,
    PresignedPostPolicy,

    // Bucket policy
    SetBucketPolicy,
    GetBucketPolicy,
    RemoveBucketPolicy,

    // Bucket notifications
    SetBucketNotification,
    GetBucketNotification,
    RemoveAllBucketNotification,
    ListenBucketNotification,
}

/// The shape of an operation's success payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationShape {
    /// Resolves with a materialized value.
    Value,
    /// Resolves immediately with a consumable stream handle; the caller is
    /// responsible for draining it.
    Stream,
    /// Resolves with no payload.
    Void,
}

/// Coarse grouping of operations, useful for host-side capability listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationGroup {
    /// Bucket lifecycle and bucket-scoped configuration.
    Bucket,
    /// Object content, metadata, and object-scoped configuration.
    Object,
    /// Presigned URLs and POST policies.
    Presign,
    /// Bucket policy documents.
    Policy,
    /// Bucket notification configuration and event streams.
    Notification,
}

impl Operation {
    /// Returns the stable wire name (camelCase).
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns the shape of this operation's success payload.
    pub const fn shape(self) -> OperationShape {
        use Operation::*;

        match self {
            ListObjects | SelectObjectContent | ListenBucketNotification => OperationShape::Stream,

            ListBuckets | BucketExists | GetBucketTagging | GetBucketVersioning
            | GetBucketReplication | GetBucketLifecycle | GetBucketEncryption
            | GetObjectLockConfig | GetObjectLegalHold | GetObject | GetPartialObject
            | PutObject | FPutObject | StatObject | GetObjectTagging | GetObjectRetention
            | PresignedUrl | PresignedGetObject | PresignedPutObject | PresignedPostPolicy
            | GetBucketPolicy | GetBucketNotification => OperationShape::Value,

            MakeBucket | RemoveBucket | SetBucketTagging | RemoveBucketTagging
            | SetBucketVersioning | SetBucketReplication | RemoveBucketReplication
            | SetBucketLifecycle | RemoveBucketLifecycle | SetBucketEncryption
            | RemoveBucketEncryption | SetObjectLockConfig | RemoveObjectLockConfig
            | SetObjectLegalHold | FGetObject | CopyObject | RemoveObject | RemoveObjects
            | SetObjectTagging | RemoveObjectTagging | PutObjectRetention | ComposeObject
            | SetBucketPolicy | RemoveBucketPolicy | SetBucketNotification
            | RemoveAllBucketNotification => OperationShape::Void,
        }
    }

    /// Returns the group this operation belongs to.
    pub const fn group(self) -> OperationGroup {
        use Operation::*;

        match self {
            MakeBucket | ListBuckets | BucketExists | RemoveBucket | ListObjects
            | SetBucketTagging | GetBucketTagging | RemoveBucketTagging | SetBucketVersioning
            | GetBucketVersioning | SetBucketReplication | GetBucketReplication
            | RemoveBucketReplication | SetBucketLifecycle | GetBucketLifecycle
            | RemoveBucketLifecycle | SetBucketEncryption | GetBucketEncryption
            | RemoveBucketEncryption | SetObjectLockConfig | GetObjectLockConfig
            | RemoveObjectLockConfig => OperationGroup::Bucket,

            SetObjectLegalHold | GetObjectLegalHold | GetObject | GetPartialObject
            | FGetObject | PutObject | FPutObject | CopyObject | StatObject | RemoveObject
            | RemoveObjects | SetObjectTagging | GetObjectTagging | RemoveObjectTagging
            | PutObjectRetention | GetObjectRetention | ComposeObject | SelectObjectContent => {
                OperationGroup::Object
            }

            PresignedUrl | PresignedGetObject | PresignedPutObject | PresignedPostPolicy => {
                OperationGroup::Presign
            }

            SetBucketPolicy | GetBucketPolicy | RemoveBucketPolicy => OperationGroup::Policy,

            SetBucketNotification | GetBucketNotification | RemoveAllBucketNotification
            | ListenBucketNotification => OperationGroup::Notification,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn wire_names_are_unique() {
        let names: HashSet<&'static str> = Operation::iter().map(Operation::name).collect();
        assert_eq!(names.len(), Operation::iter().count());
    }

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(Operation::MakeBucket.name(), "makeBucket");
        assert_eq!(Operation::GetObject.name(), "getObject");
        assert_eq!(Operation::FGetObject.name(), "fGetObject");
        assert_eq!(Operation::FPutObject.name(), "fPutObject");
        assert_eq!(
            Operation::RemoveAllBucketNotification.name(),
            "removeAllBucketNotification"
        );
    }

    #[test]
    fn wire_names_round_trip() {
        for operation in Operation::iter() {
            assert_eq!(Operation::from_str(operation.name()), Ok(operation));
        }
    }

    #[test]
    fn stream_operations_are_tagged() {
        assert_eq!(Operation::ListObjects.shape(), OperationShape::Stream);
        assert_eq!(
            Operation::ListenBucketNotification.shape(),
            OperationShape::Stream
        );
        assert_eq!(Operation::MakeBucket.shape(), OperationShape::Void);
        assert_eq!(Operation::StatObject.shape(), OperationShape::Value);
    }

    #[test]
    fn registry_covers_every_group() {
        for group in [
            OperationGroup::Bucket,
            OperationGroup::Object,
            OperationGroup::Presign,
            OperationGroup::Policy,
            OperationGroup::Notification,
        ] {
            assert!(Operation::iter().any(|operation| operation.group() == group));
        }
    }
}
