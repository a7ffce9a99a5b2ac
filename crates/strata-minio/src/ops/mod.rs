//! The uniform asynchronous operation-forwarding layer.
//!
//! Every supported storage operation is exposed through one calling
//! convention: a named entry in [`OperationTable`] that takes
//! [`OperationArgs`] and resolves to a single [`OperationValue`] or a typed
//! failure. Operations whose underlying call returns a stream resolve
//! immediately with the unconsumed stream handle; operations whose
//! underlying call computes locally resolve with the computed value. Callers
//! never branch on which shape the underlying call uses.

mod args;
mod bucket;
mod forwarder;
mod notify;
mod object;
mod operation;
mod presign;
mod table;
mod value;

pub use args::OperationArgs;
pub use forwarder::Forwarder;
pub use operation::{Operation, OperationGroup, OperationShape};
pub use table::{BoundOperation, OperationTable};
pub use value::{NotificationStream, ObjectStream, OperationValue};
