//! S3 provider for Bucketform
//!
//! This crate implements the bucket resource on top of Amazon S3 or any
//! S3-compatible service.
//!
//! # Features
//!
//! - Bucket lifecycle (create, existence check, tag update, delete)
//! - A single `tfkey` tag per bucket
//! - Rollback of the created bucket when tagging fails
//!
//! # Requirements
//!
//! - AWS credentials resolvable through the default chain (env, profile, IMDS)
//! - Optional overrides: `BUCKETFORM_REGION`, `BUCKETFORM_ENDPOINT_URL`,
//!   `BUCKETFORM_FORCE_PATH_STYLE`
//!
//! # Example
//!
//! ```ignore
//! use bucketform_cloud::{Provider, StateValue};
//! use bucketform_cloud_aws::S3Provider;
//!
//! let provider = S3Provider::default();
//! let data = provider.configure(&StateValue::default()).await?;
//!
//! let mut resources = provider.resources();
//! let bucket = &mut resources[0];
//! bucket.configure(Some(&data));
//!
//! let plan = StateValue::new(serde_json::json!({
//!     "name": "my-bucket",
//!     "tags": "env=prod",
//! }));
//! let response = bucket.create(&plan).await;
//! ```

pub mod bucket;
pub mod config;
pub mod error;
pub mod provider;
pub mod store;

pub use bucket::{BucketModel, BucketResource, Clock, TAG_KEY, normalize};
pub use config::ProviderConfig;
pub use error::{AwsError, Result};
pub use provider::{DEFAULT_TYPE_NAME, S3Provider, S3Session};
pub use store::{BucketStore, MemoryBucketStore, S3BucketStore, StoreCall, Tag};
