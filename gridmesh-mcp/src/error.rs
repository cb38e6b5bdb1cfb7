/// Tool-facing error taxonomy
///
/// Every tool handler returns `Result<Value, ToolError>`. The MCP endpoint
/// turns a `ToolError` into a tool result with `isError: true` whose text
/// is the error's display string, so each variant's message is exactly what
/// the calling agent sees. Internal details beyond the remote-supplied
/// message are never leaked.

use thiserror::Error;

/// Tool result type alias
pub type ToolResult<T> = Result<T, ToolError>;

/// Caller-facing failure of a single tool invocation
///
/// Failures are never retried; each is logged (with masked credentials)
/// and surfaced immediately.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No credential resolvable from the inbound request headers
    #[error("Authentication required. Please provide an API key via Authorization header.")]
    AuthRequired,

    /// Locally detectable bad input; no remote call was attempted
    #[error("{0}")]
    InvalidParams(String),

    /// The platform answered 404 for the named resource
    #[error("{0}")]
    NotFound(String),

    /// The platform refused a state-changing operation with 403
    #[error("{0}")]
    Forbidden(String),

    /// Any other platform failure, embedding the remote-supplied message
    #[error("{0}")]
    Failed(String),

    /// A failure not originating from a handled status code
    /// (connection failure, decode failure)
    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ToolError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ToolError::InvalidParams(format!("Invalid parameters: {errors}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_required_message() {
        let err = ToolError::AuthRequired;
        assert!(err.to_string().starts_with("Authentication required"));
    }

    #[test]
    fn test_messages_pass_through_verbatim() {
        let err = ToolError::NotFound("Task not found: abc".to_string());
        assert_eq!(err.to_string(), "Task not found: abc");

        let err = ToolError::Failed("Failed to list tasks: quota exceeded".to_string());
        assert_eq!(err.to_string(), "Failed to list tasks: quota exceeded");
    }
}
