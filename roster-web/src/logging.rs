//! Failure logging capability injected into the request handler

use roster_common::Error;
use tracing::error;

/// Receives every storage failure before it is propagated
pub trait FailureLog: Send + Sync {
    /// Record a failed storage `operation` with request `context`
    fn storage_failure(&self, operation: &str, context: &str, error: &Error);
}

/// Emits failures as `tracing` error events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn storage_failure(&self, operation: &str, context: &str, err: &Error) {
        error!(operation, context, error = %err, "Storage failure");
    }
}
