use serde::Deserialize;
use serde_json::Value;

/// The lifecycle of a single function execution, as provided by the host.
///
/// Listeners call [FunctionExecution::complete] or [FunctionExecution::fail]
/// at most once and [FunctionExecution::ack] exactly once, last.
#[allow(async_fn_in_trait)]
pub trait FunctionExecution {
    /// Inputs the function was invoked with.
    fn inputs(&self) -> &Value;

    /// Report successful completion with `outputs`.
    async fn complete(&self, outputs: Value) -> anyhow::Result<()>;

    /// Report failure with a message shown to the user.
    async fn fail(&self, error: &str) -> anyhow::Result<()>;

    /// Acknowledge receipt of the execution.
    async fn ack(&self) -> anyhow::Result<()>;
}

/// The user a function executes on behalf of.
///
/// Only used for logging; anything but the id is dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserContext {
    pub id: String,
}
