//! Error types for toolrack
//!
//! Centralized error handling using thiserror. Callers branch on the three
//! `ToolError` kinds: only `CommunicationFailure` is worth retrying.

use std::time::Duration;

use thiserror::Error;

/// All errors a tool operation can surface to its caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The request/reply exchange with the controller did not complete
    #[error("Communication failure: {0}")]
    CommunicationFailure(String),

    /// The robot is in a state that does not permit the operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The named tool does not satisfy the operation's precondition
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ToolError {
    /// Whether retrying the same call might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ToolError::CommunicationFailure(_))
    }

    /// Whether the failure came from violated preconditions rather than transport
    pub fn is_logic_error(&self) -> bool {
        !self.is_retryable()
    }
}

/// Failures reported by the `Robot` collaborator's send/receive primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("no reply within {0:?}")]
    Timeout(Duration),

    #[error("channel closed")]
    Disconnected,

    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl From<TransportError> for ToolError {
    fn from(err: TransportError) -> Self {
        ToolError::CommunicationFailure(err.to_string())
    }
}

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_communication_failure_error() {
        let err = ToolError::CommunicationFailure("timeout".to_string());
        assert_eq!(err.to_string(), "Communication failure: timeout");
    }

    #[test]
    fn test_invalid_operation_error() {
        let err = ToolError::InvalidOperation("robot is not in IDLE mode".to_string());
        assert_eq!(err.to_string(), "Invalid operation: robot is not in IDLE mode");
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = ToolError::InvalidArgument("tool [Gripper] does not exist".to_string());
        assert_eq!(err.to_string(), "Invalid argument: tool [Gripper] does not exist");
    }

    #[test]
    fn test_only_communication_failure_is_retryable() {
        assert!(ToolError::CommunicationFailure("x".into()).is_retryable());
        assert!(!ToolError::InvalidOperation("x".into()).is_retryable());
        assert!(!ToolError::InvalidArgument("x".into()).is_retryable());
    }

    #[test]
    fn test_logic_errors() {
        assert!(ToolError::InvalidOperation("x".into()).is_logic_error());
        assert!(ToolError::InvalidArgument("x".into()).is_logic_error());
        assert!(!ToolError::CommunicationFailure("x".into()).is_logic_error());
    }

    #[test]
    fn test_timeout_conversion() {
        let err: ToolError = TransportError::Timeout(Duration::from_millis(500)).into();
        assert!(matches!(err, ToolError::CommunicationFailure(_)));
        assert!(err.to_string().contains("500ms"));
    }

    #[test]
    fn test_disconnected_conversion() {
        let err: ToolError = TransportError::Disconnected.into();
        assert_eq!(err, ToolError::CommunicationFailure("channel closed".to_string()));
    }

    #[test]
    fn test_malformed_conversion() {
        let err: ToolError = TransportError::Malformed("truncated frame".into()).into();
        assert!(err.to_string().contains("truncated frame"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ToolError::InvalidOperation("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
