//! Bucketform provider framework
//!
//! This crate provides the pieces a resource provider needs to talk to a
//! declarative orchestrator: typed lifecycle operations, structured
//! diagnostics and the plan/state container the orchestrator round-trips.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              Orchestrator (host)                 │
//! │        plan / state / provider config            │
//! └─────────────────┬───────────────────────────────┘
//!                   │  StateValue + Diagnostics
//! ┌─────────────────▼───────────────────────────────┐
//! │               bucketform-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ResourceServer (ResourceHandler)         │   │
//! │  │  schema validation, decode / encode       │   │
//! │  └──────────────────┬───────────────────────┘   │
//! │  ┌──────────────────▼───────────────────────┐   │
//! │  │  trait Resource { create, read, ... }     │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────┐
//! │      bucketform-cloud-aws       │
//! │   S3 provider, bucket resource  │
//! └─────────────────────────────────┘
//! ```

pub mod action;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod state;
pub mod timestamp;

// Re-exports
pub use action::{Operation, OperationResult, ResourceResponse};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{CloudError, Result};
pub use logging::{init_logging, try_init_logging};
pub use provider::{Provider, ProviderData, downcast_provider_data, resource_type_name};
pub use resource::{Resource, ResourceHandler, ResourceServer};
pub use schema::{Attribute, AttributeType, Schema};
pub use state::StateValue;
pub use timestamp::{format_rfc850, parse_rfc850};
