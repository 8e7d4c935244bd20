//! Lifecycle operations and their host-facing results

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::CloudError;
use crate::state::StateValue;
use serde::{Deserialize, Serialize};

/// Lifecycle operation invoked by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Configure,
    Create,
    Read,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Configure => write!(f, "configure"),
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Uniform result of a lifecycle operation: the state to persist, or the
/// first error reported
pub type OperationResult = std::result::Result<Option<StateValue>, Diagnostic>;

/// Response returned to the host for every lifecycle operation
///
/// `state` is what the host should persist afterwards. `None` means the
/// resource is absent: nothing was created, or it was deleted. When an
/// operation on an existing resource fails, `state` holds the prior state
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub state: Option<StateValue>,
    pub diagnostics: Diagnostics,
}

impl ResourceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StateValue) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Failed response keeping `prior` as the state to persist
    pub fn failed(prior: Option<StateValue>, diagnostics: impl Into<Diagnostics>) -> Self {
        Self {
            state: prior,
            diagnostics: diagnostics.into(),
        }
    }

    pub fn from_error(prior: Option<StateValue>, err: &CloudError) -> Self {
        Self::failed(prior, err)
    }

    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_error()
    }

    pub fn into_result(self) -> OperationResult {
        match self.diagnostics.into_iter().find(Diagnostic::is_error) {
            Some(err) => Err(err),
            None => Ok(self.state),
        }
    }
}
