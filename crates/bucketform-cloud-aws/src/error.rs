//! AWS provider error types

use bucketform_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Bucket creation failed: {0}")]
    CreationFailed(String),

    #[error("Bucket tagging failed: {0}")]
    TaggingFailed(String),

    #[error("Bucket lookup failed: {0}")]
    LookupFailed(String),

    #[error("Bucket deletion failed: {0}")]
    DeletionFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cloud error: {0}")]
    CloudError(#[from] CloudError),
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::BucketNotFound(name) => CloudError::ResourceNotFound(name),
            AwsError::InvalidConfig(msg) => CloudError::Configuration(msg),
            AwsError::CloudError(e) => e,
            other => CloudError::ApiError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
