//! S3 provider implementation

use crate::bucket::BucketResource;
use crate::config::ProviderConfig;
use crate::store::{BucketStore, S3BucketStore};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use bucketform_cloud::{Provider, ProviderData, ResourceHandler, ResourceServer, StateValue};
use std::sync::Arc;

pub const DEFAULT_TYPE_NAME: &str = "bucketform";

/// Shared client handle every resource of this provider receives
#[derive(Clone)]
pub struct S3Session {
    store: Arc<dyn BucketStore>,
}

impl S3Session {
    pub fn new(store: Arc<dyn BucketStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn BucketStore> {
        &self.store
    }

    /// Wrap the session as opaque provider data for the configure handshake
    pub fn into_provider_data(self) -> ProviderData {
        Arc::new(self)
    }
}

impl std::fmt::Debug for S3Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Session").finish_non_exhaustive()
    }
}

/// S3 provider
pub struct S3Provider {
    type_name: String,
}

impl Default for S3Provider {
    fn default() -> Self {
        Self::new(DEFAULT_TYPE_NAME)
    }
}

impl S3Provider {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    /// Build an S3 client from explicit configuration and the AWS default
    /// credential chain
    pub async fn connect(&self, config: &ProviderConfig) -> S3Session {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        if let Some(force) = config.force_path_style {
            builder = builder.force_path_style(force);
        }

        let region = shared.region().map(|r| r.to_string());
        tracing::info!(
            "Configured S3 client (region: {}, endpoint: {})",
            region.as_deref().unwrap_or("default"),
            config.endpoint_url.as_deref().unwrap_or("default")
        );

        let client = aws_sdk_s3::Client::from_conf(builder.build());
        S3Session::new(Arc::new(S3BucketStore::new(client, region)))
    }
}

#[async_trait]
impl Provider for S3Provider {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    async fn configure(&self, config: &StateValue) -> bucketform_cloud::Result<ProviderData> {
        let config = ProviderConfig::from_state(config)?.merge_env()?;
        Ok(self.connect(&config).await.into_provider_data())
    }

    fn resources(&self) -> Vec<Box<dyn ResourceHandler>> {
        vec![Box::new(ResourceServer::new(
            self.type_name.clone(),
            BucketResource::new(),
        ))]
    }
}
