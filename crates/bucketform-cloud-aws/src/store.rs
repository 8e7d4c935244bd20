//! Remote bucket operations
//!
//! [`BucketStore`] is the seam between the bucket resource and the storage
//! service. [`S3BucketStore`] talks to S3 (or an S3-compatible endpoint)
//! through the AWS SDK; [`MemoryBucketStore`] keeps buckets in memory and can
//! be told to fail individual calls.

use crate::error::{AwsError, Result};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration, Tagging};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Region whose buckets must be created without a location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// A single bucket tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Remote bucket operations used by the bucket resource
#[async_trait]
pub trait BucketStore: Send + Sync {
    async fn create_bucket(&self, name: &str) -> Result<()>;

    /// Replace the bucket's whole tag set
    async fn put_bucket_tagging(&self, name: &str, tags: &[Tag]) -> Result<()>;

    /// Existence probe; a missing bucket is [`AwsError::BucketNotFound`]
    async fn head_bucket(&self, name: &str) -> Result<()>;

    async fn delete_bucket(&self, name: &str) -> Result<()>;
}

/// S3 implementation of [`BucketStore`]
#[derive(Clone)]
pub struct S3BucketStore {
    client: aws_sdk_s3::Client,
    region: Option<String>,
}

impl S3BucketStore {
    pub fn new(client: aws_sdk_s3::Client, region: Option<String>) -> Self {
        Self { client, region }
    }
}

fn location_constraint(region: Option<&str>) -> Option<CreateBucketConfiguration> {
    region
        .filter(|region| *region != DEFAULT_REGION)
        .map(|region| {
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build()
        })
}

#[async_trait]
impl BucketStore for S3BucketStore {
    async fn create_bucket(&self, name: &str) -> Result<()> {
        tracing::debug!("CreateBucket {}", name);
        self.client
            .create_bucket()
            .bucket(name)
            .set_create_bucket_configuration(location_constraint(self.region.as_deref()))
            .send()
            .await
            .map_err(|e| {
                AwsError::CreationFailed(format!("{}: {}", name, DisplayErrorContext(&e)))
            })?;
        Ok(())
    }

    async fn put_bucket_tagging(&self, name: &str, tags: &[Tag]) -> Result<()> {
        tracing::debug!("PutBucketTagging {} ({} tags)", name, tags.len());
        let tag_set = tags
            .iter()
            .map(|tag| {
                aws_sdk_s3::types::Tag::builder()
                    .key(&tag.key)
                    .value(&tag.value)
                    .build()
                    .map_err(|e| AwsError::TaggingFailed(format!("{}: {}", name, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set))
            .build()
            .map_err(|e| AwsError::TaggingFailed(format!("{}: {}", name, e)))?;

        self.client
            .put_bucket_tagging()
            .bucket(name)
            .tagging(tagging)
            .send()
            .await
            .map_err(|e| {
                AwsError::TaggingFailed(format!("{}: {}", name, DisplayErrorContext(&e)))
            })?;
        Ok(())
    }

    async fn head_bucket(&self, name: &str) -> Result<()> {
        tracing::debug!("HeadBucket {}", name);
        match self.client.head_bucket().bucket(name).send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_not_found())
                    .unwrap_or(false);
                if not_found {
                    Err(AwsError::BucketNotFound(name.to_string()))
                } else {
                    Err(AwsError::LookupFailed(format!(
                        "{}: {}",
                        name,
                        DisplayErrorContext(&e)
                    )))
                }
            }
        }
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        tracing::debug!("DeleteBucket {}", name);
        self.client
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| {
                AwsError::DeletionFailed(format!("{}: {}", name, DisplayErrorContext(&e)))
            })?;
        Ok(())
    }
}

/// Calls that [`MemoryBucketStore`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreCall {
    CreateBucket,
    PutBucketTagging,
    HeadBucket,
    DeleteBucket,
}

impl std::fmt::Display for StoreCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreCall::CreateBucket => write!(f, "CreateBucket"),
            StoreCall::PutBucketTagging => write!(f, "PutBucketTagging"),
            StoreCall::HeadBucket => write!(f, "HeadBucket"),
            StoreCall::DeleteBucket => write!(f, "DeleteBucket"),
        }
    }
}

#[derive(Default)]
struct MemoryState {
    buckets: HashMap<String, Vec<Tag>>,
    failures: HashMap<StoreCall, String>,
    calls: Vec<(StoreCall, String)>,
}

/// In-memory [`BucketStore`]
#[derive(Default)]
pub struct MemoryBucketStore {
    state: Mutex<MemoryState>,
}

impl MemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `call` fail with `message`
    pub fn fail(&self, call: StoreCall, message: impl Into<String>) {
        self.lock().failures.insert(call, message.into());
    }

    /// Let `call` succeed again
    pub fn recover(&self, call: StoreCall) {
        self.lock().failures.remove(&call);
    }

    /// Add a bucket without going through `create_bucket`
    pub fn insert_bucket(&self, name: impl Into<String>) {
        self.lock().buckets.insert(name.into(), Vec::new());
    }

    /// Remove a bucket behind the resource's back
    pub fn remove_bucket(&self, name: &str) {
        self.lock().buckets.remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().buckets.contains_key(name)
    }

    pub fn tags(&self, name: &str) -> Option<Vec<Tag>> {
        self.lock().buckets.get(name).cloned()
    }

    /// Every call received so far, with the bucket name it targeted
    pub fn calls(&self) -> Vec<(StoreCall, String)> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, call: StoreCall, name: &str) -> std::result::Result<(), String> {
        tracing::debug!("{} {}", call, name);
        let mut state = self.lock();
        state.calls.push((call, name.to_string()));
        match state.failures.get(&call) {
            Some(msg) => Err(format!("{}: {}", name, msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BucketStore for MemoryBucketStore {
    async fn create_bucket(&self, name: &str) -> Result<()> {
        self.begin(StoreCall::CreateBucket, name)
            .map_err(AwsError::CreationFailed)?;
        let mut state = self.lock();
        if state.buckets.contains_key(name) {
            return Err(AwsError::CreationFailed(format!(
                "{}: BucketAlreadyOwnedByYou",
                name
            )));
        }
        state.buckets.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn put_bucket_tagging(&self, name: &str, tags: &[Tag]) -> Result<()> {
        self.begin(StoreCall::PutBucketTagging, name)
            .map_err(AwsError::TaggingFailed)?;
        match self.lock().buckets.get_mut(name) {
            Some(existing) => {
                *existing = tags.to_vec();
                Ok(())
            }
            None => Err(AwsError::TaggingFailed(format!("{}: NoSuchBucket", name))),
        }
    }

    async fn head_bucket(&self, name: &str) -> Result<()> {
        self.begin(StoreCall::HeadBucket, name)
            .map_err(AwsError::LookupFailed)?;
        if self.contains(name) {
            Ok(())
        } else {
            Err(AwsError::BucketNotFound(name.to_string()))
        }
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        self.begin(StoreCall::DeleteBucket, name)
            .map_err(AwsError::DeletionFailed)?;
        match self.lock().buckets.remove(name) {
            Some(_) => Ok(()),
            None => Err(AwsError::DeletionFailed(format!("{}: NoSuchBucket", name))),
        }
    }
}
