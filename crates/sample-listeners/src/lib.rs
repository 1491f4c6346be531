//! Function and event listeners of the sample search app.
//!
//! The host framework delivers function executions and events; the
//! listeners here turn them into catalog requests and report back through
//! [FunctionExecution] or follow-up Web API calls.

mod context;
mod error;
pub mod events;
pub mod functions;
mod listeners;
pub mod logging;

#[cfg(any(test, feature = "tests"))]
pub mod test_helpers;

pub use context::{FunctionExecution, UserContext};
pub use error::{DispatchError, ListenerError};
pub use listeners::Listeners;
