//! Operation invoker module
//!
//! Turns caller arguments into a [`RequestParams`] for a declared operation
//! and dispatches it through the transport.

mod operation;
mod options;
mod params;

pub use operation::CallableOperation;
pub use options::{CallArgs, RequestOptions, ResponseCallback, ResponseInfo};
pub use params::{construct_request, scalar_to_string, RequestParams};
