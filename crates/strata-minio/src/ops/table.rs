//! The published operation table.
//!
//! The table maps every wire name to a bound async callable. It is built
//! once when the client handle becomes ready and never mutates afterwards;
//! host frameworks copy entries out of it onto their own model objects.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use strum::IntoEnumIterator;

use super::{Forwarder, Operation, OperationArgs, OperationValue};
use crate::client::StorageClient;
use crate::{Error, Result};

/// A single operation bound to the shared client handle.
///
/// Entries are cheap to clone and safe to hold past the table's lifetime.
pub type BoundOperation =
    Arc<dyn Fn(OperationArgs) -> BoxFuture<'static, Result<OperationValue>> + Send + Sync>;

/// Immutable registry of bound operations, keyed by wire name.
pub struct OperationTable {
    entries: HashMap<&'static str, BoundOperation>,
}

impl OperationTable {
    /// Binds every supported operation to the given client handle.
    ///
    /// Idempotent: binding the same handle again yields an equivalent table.
    pub fn bind(client: StorageClient) -> Self {
        let forwarder = Forwarder::new(client);

        let entries = Operation::iter()
            .map(|operation| {
                let forwarder = forwarder.clone();
                let bound: BoundOperation = Arc::new(move |args| {
                    let forwarder = forwarder.clone();
                    Box::pin(async move { forwarder.forward(operation, args).await })
                });
                (operation.name(), bound)
            })
            .collect();

        Self { entries }
    }

    /// Returns a copy of the bound callable for `name`, if registered.
    pub fn get(&self, name: &str) -> Option<BoundOperation> {
        self.entries.get(name).cloned()
    }

    /// Returns whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates the registered wire names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the number of registered operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty. It never is after `bind`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes a registered operation by wire name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperation`] for an unregistered name;
    /// otherwise whatever the forwarded operation produces.
    pub async fn invoke(&self, name: &str, args: OperationArgs) -> Result<OperationValue> {
        match self.entries.get(name) {
            Some(bound) => bound(args).await,
            None => Err(Error::UnknownOperation(name.to_string())),
        }
    }
}

impl std::fmt::Debug for OperationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationTable")
            .field("operations", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::{ConnectorConfig, Credentials};

    fn test_table() -> OperationTable {
        let config = Arc::new(
            ConnectorConfig::new("localhost", Credentials::new("K", "S")).with_port(9002),
        );
        OperationTable::bind(StorageClient::new(config).unwrap())
    }

    #[test]
    fn every_operation_is_registered_once() {
        let table = test_table();
        assert_eq!(table.len(), Operation::iter().count());
        for operation in Operation::iter() {
            assert!(table.contains(operation.name()));
        }
    }

    #[test]
    fn entries_can_be_copied_out() {
        let table = test_table();
        let first = table.get("makeBucket").unwrap();
        let second = table.get("makeBucket").unwrap();
        // Copies refer to the same bound callable.
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn unknown_name_is_rejected() {
        let table = test_table();
        let err = table
            .invoke("makeCoffee", OperationArgs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownOperation(name) if name == "makeCoffee"));
    }

    #[tokio::test]
    async fn missing_argument_fails_before_any_request() {
        let table = test_table();
        // No bucket argument and no default bucket configured.
        let err = table
            .invoke("getObject", OperationArgs::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingArgument {
                operation: "getObject",
                argument: "bucket",
            }
        ));
    }
}
