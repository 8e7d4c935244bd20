//! Provider trait definition and provider-data handshake

use crate::error::{CloudError, Result};
use crate::resource::ResourceHandler;
use crate::state::StateValue;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// Opaque client handle produced by a provider's configure step and handed
/// to every resource it offers
pub type ProviderData = Arc<dyn Any + Send + Sync>;

/// Provider abstraction trait
///
/// A provider turns its configuration into a shared client handle and
/// offers one or more resource types that use it.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider type name, the prefix of every resource type name
    fn type_name(&self) -> &str;

    /// Build the shared client from the provider configuration block
    async fn configure(&self, config: &StateValue) -> Result<ProviderData>;

    /// Resource types offered by this provider, not yet configured
    fn resources(&self) -> Vec<Box<dyn ResourceHandler>>;
}

/// Externally visible resource type name, e.g. `bucketform_bucket`
pub fn resource_type_name(provider_type_name: &str, suffix: &str) -> String {
    format!("{}_{}", provider_type_name, suffix)
}

/// Recover the concrete client type from provider data
pub fn downcast_provider_data<T>(data: &ProviderData) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    data.downcast_ref::<T>().cloned().ok_or_else(|| {
        CloudError::Configuration(format!(
            "Unexpected Resource Configure Type: expected {}. \
             Please report this issue to the provider developers.",
            std::any::type_name::<T>()
        ))
    })
}
