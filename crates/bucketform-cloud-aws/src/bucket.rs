//! S3 bucket resource
//!
//! Manages one bucket and a single tag on it. The tag always uses the key
//! [`TAG_KEY`]; the resource's `tags` attribute is its value.

use crate::provider::S3Session;
use crate::store::{BucketStore, Tag};
use async_trait::async_trait;
use bucketform_cloud::{
    Attribute, CloudError, ProviderData, Resource, Result, Schema, downcast_provider_data,
    format_rfc850,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Key of the single tag written to every managed bucket
pub const TAG_KEY: &str = "tfkey";

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Persisted record of a bucket resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketModel {
    pub name: String,
    pub tags: String,

    /// Creation timestamp (RFC 850)
    #[serde(default)]
    pub date: Option<String>,

    /// Timestamp of the last successful create or update (RFC 850)
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl BucketModel {
    /// A plan as the host would send it: computed attributes unset
    pub fn planned(name: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: tags.into(),
            date: None,
            last_updated: None,
        }
    }
}

/// Strip quote characters left over from string-encoded input
pub fn normalize(value: &str) -> String {
    value.replace('"', "")
}

/// Bucket resource
pub struct BucketResource {
    session: Option<S3Session>,
    clock: Clock,
}

impl Default for BucketResource {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketResource {
    pub fn new() -> Self {
        Self {
            session: None,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.session.is_some()
    }

    fn store(&self) -> Result<&Arc<dyn BucketStore>> {
        self.session.as_ref().map(S3Session::store).ok_or_else(|| {
            CloudError::NotConfigured(
                "the bucket resource has no S3 client; the provider must be configured first"
                    .to_string(),
            )
        })
    }

    fn now(&self) -> String {
        format_rfc850((self.clock)())
    }

    fn tag_set(tags: &str) -> Vec<Tag> {
        vec![Tag::new(TAG_KEY, tags)]
    }
}

#[async_trait]
impl Resource for BucketResource {
    type Model = BucketModel;

    fn type_suffix(&self) -> &str {
        "bucket"
    }

    fn schema(&self) -> Schema {
        Schema::new("Manages an s3 bucket.")
            .with_attribute("last_updated", Attribute::computed_string("Date Updated"))
            .with_attribute("date", Attribute::computed_string("Date Created"))
            .with_attribute("name", Attribute::required_string("S3 Bucket Name"))
            .with_attribute("tags", Attribute::required_string("S3 Bucket Tags"))
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Result<()> {
        let Some(data) = data else {
            return Ok(());
        };
        self.session = Some(downcast_provider_data::<S3Session>(data)?);
        Ok(())
    }

    async fn create(&self, plan: BucketModel) -> Result<BucketModel> {
        let store = self.store()?;
        let name = normalize(&plan.name);
        let tags = normalize(&plan.tags);

        store.create_bucket(&name).await?;

        if let Err(tag_err) = store.put_bucket_tagging(&name, &Self::tag_set(&tags)).await {
            tracing::warn!("Tagging bucket {} failed, deleting it again: {}", name, tag_err);
            return match store.delete_bucket(&name).await {
                Ok(()) => Err(CloudError::ApiError(format!(
                    "could not tag bucket {}, the bucket was removed again: {}",
                    name, tag_err
                ))),
                Err(rollback_err) => Err(CloudError::PartialFailure(format!(
                    "could not tag bucket {} ({}) and could not remove it afterwards ({}); \
                     the bucket exists without recorded state",
                    name, tag_err, rollback_err
                ))),
            };
        }

        tracing::info!("Bucket {} created", name);

        let now = self.now();
        Ok(BucketModel {
            name,
            tags,
            date: Some(now.clone()),
            last_updated: Some(now),
        })
    }

    async fn read(&self, state: BucketModel) -> Result<BucketModel> {
        let store = self.store()?;
        let name = normalize(&state.name);

        store.head_bucket(&name).await?;
        tracing::debug!("Bucket {} exists", name);

        Ok(state)
    }

    async fn update(&self, prior: BucketModel, plan: BucketModel) -> Result<BucketModel> {
        let store = self.store()?;
        let name = normalize(&plan.name);
        let tags = normalize(&plan.tags);

        let prior_name = normalize(&prior.name);
        if prior_name != name {
            return Err(CloudError::StateError(format!(
                "bucket name cannot change in place ({} -> {}); the resource must be replaced",
                prior_name, name
            )));
        }

        store.put_bucket_tagging(&name, &Self::tag_set(&tags)).await?;
        tracing::info!("Bucket {} tagged with {}={}", name, TAG_KEY, tags);

        // date is rewritten along with last_updated on every update
        let now = self.now();
        Ok(BucketModel {
            name,
            tags,
            date: Some(now.clone()),
            last_updated: Some(now),
        })
    }

    async fn delete(&self, state: BucketModel) -> Result<()> {
        let store = self.store()?;
        let name = normalize(&state.name);

        store.delete_bucket(&name).await?;
        tracing::info!("Bucket {} deleted", name);

        Ok(())
    }
}
