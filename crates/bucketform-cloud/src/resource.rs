//! Resource lifecycle trait and the host-facing adapter around it

use crate::action::{Operation, ResourceResponse};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::provider::{ProviderData, resource_type_name};
use crate::schema::Schema;
use crate::state::StateValue;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Typed lifecycle of one resource type
///
/// Every lifecycle method requires a prior successful [`Resource::configure`]
/// with provider data; implementations return
/// [`CloudError::NotConfigured`](crate::CloudError::NotConfigured) otherwise.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Flat record persisted by the host
    type Model: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Type name suffix, joined to the provider type name
    fn type_suffix(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Store the provider's client. `None` means the provider itself is not
    /// configured yet and must be accepted as a no-op.
    fn configure(&mut self, data: Option<&ProviderData>) -> Result<()>;

    async fn create(&self, plan: Self::Model) -> Result<Self::Model>;

    async fn read(&self, state: Self::Model) -> Result<Self::Model>;

    async fn update(&self, prior: Self::Model, plan: Self::Model) -> Result<Self::Model>;

    async fn delete(&self, state: Self::Model) -> Result<()>;
}

/// Untyped resource interface spoken with the host
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Full type name, e.g. `bucketform_bucket`
    fn type_name(&self) -> String;

    fn schema(&self) -> Schema;

    fn configure(&mut self, data: Option<&ProviderData>) -> Diagnostics;

    async fn create(&self, plan: &StateValue) -> ResourceResponse;

    async fn read(&self, state: &StateValue) -> ResourceResponse;

    async fn update(&self, prior: &StateValue, plan: &StateValue) -> ResourceResponse;

    async fn delete(&self, state: &StateValue) -> ResourceResponse;
}

/// Adapter turning a typed [`Resource`] into a [`ResourceHandler`]
///
/// Decodes plan/state objects, validates plans against the schema and folds
/// every error into diagnostics so nothing escapes an operation boundary.
pub struct ResourceServer<R: Resource> {
    resource: R,
    provider_type_name: String,
}

impl<R: Resource> ResourceServer<R> {
    pub fn new(provider_type_name: impl Into<String>, resource: R) -> Self {
        Self {
            resource,
            provider_type_name: provider_type_name.into(),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    fn decode(&self, op: Operation, value: &StateValue) -> Result<R::Model> {
        tracing::debug!("Decoding {} input for {}", op, self.type_name());
        value.get()
    }

    fn encode(model: &R::Model) -> Result<StateValue> {
        StateValue::from_model(model)
    }

    fn validate(&self, plan: &StateValue) -> Diagnostics {
        self.resource.schema().validate_plan(plan)
    }
}

#[async_trait]
impl<R: Resource> ResourceHandler for ResourceServer<R> {
    fn type_name(&self) -> String {
        resource_type_name(&self.provider_type_name, self.resource.type_suffix())
    }

    fn schema(&self) -> Schema {
        self.resource.schema()
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Diagnostics {
        match self.resource.configure(data) {
            Ok(()) => Diagnostics::new(),
            Err(e) => {
                tracing::error!(
                    "Failed to {} {}: {}",
                    Operation::Configure,
                    self.type_name(),
                    e
                );
                Diagnostics::from(&e)
            }
        }
    }

    async fn create(&self, plan: &StateValue) -> ResourceResponse {
        let diags = self.validate(plan);
        if diags.has_error() {
            return ResourceResponse::failed(None, diags);
        }

        let result = async {
            let model = self.decode(Operation::Create, plan)?;
            let created = self.resource.create(model).await?;
            Self::encode(&created)
        }
        .await;

        match result {
            Ok(state) => ResourceResponse::with_state(state),
            Err(e) => ResourceResponse::from_error(None, &e),
        }
    }

    async fn read(&self, state: &StateValue) -> ResourceResponse {
        let result = async {
            let model = self.decode(Operation::Read, state)?;
            let refreshed = self.resource.read(model).await?;
            Self::encode(&refreshed)
        }
        .await;

        match result {
            Ok(refreshed) => ResourceResponse::with_state(refreshed),
            Err(e) => ResourceResponse::from_error(Some(state.clone()), &e),
        }
    }

    async fn update(&self, prior: &StateValue, plan: &StateValue) -> ResourceResponse {
        let diags = self.validate(plan);
        if diags.has_error() {
            return ResourceResponse::failed(Some(prior.clone()), diags);
        }

        let result = async {
            let prior_model = self.decode(Operation::Update, prior)?;
            let plan_model = self.decode(Operation::Update, plan)?;
            let updated = self.resource.update(prior_model, plan_model).await?;
            Self::encode(&updated)
        }
        .await;

        match result {
            Ok(state) => ResourceResponse::with_state(state),
            Err(e) => ResourceResponse::from_error(Some(prior.clone()), &e),
        }
    }

    async fn delete(&self, state: &StateValue) -> ResourceResponse {
        let result = async {
            let model = self.decode(Operation::Delete, state)?;
            self.resource.delete(model).await
        }
        .await;

        match result {
            Ok(()) => ResourceResponse::new(),
            Err(e) => ResourceResponse::from_error(Some(state.clone()), &e),
        }
    }
}
