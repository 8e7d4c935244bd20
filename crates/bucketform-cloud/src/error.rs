//! Provider error types

use thiserror::Error;

/// Errors produced by resource lifecycle operations
#[derive(Error, Debug)]
pub enum CloudError {
    /// The host handed over provider data of an unexpected type, or the
    /// provider configuration itself is invalid
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A lifecycle operation ran before `configure` stored a client
    #[error("Resource is not configured: {0}")]
    NotConfigured(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    /// A remote mutation succeeded but a follow-up step and its rollback
    /// both failed, leaving remote state without a matching local record
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("State error: {0}")]
    StateError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Short, human-readable summary used as a diagnostic headline
    pub fn summary(&self) -> &'static str {
        match self {
            CloudError::Configuration(_) => "Invalid Provider Configuration",
            CloudError::NotConfigured(_) => "Unconfigured Resource",
            CloudError::ResourceNotFound(_) => "Resource Not Found",
            CloudError::ApiError(_) => "Remote API Error",
            CloudError::PartialFailure(_) => "Partial Failure",
            CloudError::StateError(_) | CloudError::Json(_) => "Invalid Resource State",
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CloudError::ResourceNotFound("my-bucket".to_string());
        assert_eq!(err.to_string(), "Resource not found: my-bucket");
        assert_eq!(err.summary(), "Resource Not Found");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CloudError = json_err.into();
        assert!(matches!(err, CloudError::Json(_)));
        assert_eq!(err.summary(), "Invalid Resource State");
    }
}
