//! Plan/state container exchanged with the host
//!
//! The host round-trips every resource as a flat JSON object. A
//! [`StateValue`] wraps that object and converts it to and from the typed
//! model a resource works with.

use crate::error::{CloudError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Untyped plan or state object for a single resource instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateValue(serde_json::Value);

impl Default for StateValue {
    fn default() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }
}

impl StateValue {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Serialize a typed model into a state object
    pub fn from_model<T: Serialize>(model: &T) -> Result<Self> {
        let value = serde_json::to_value(model)?;
        if !value.is_object() {
            return Err(CloudError::StateError(format!(
                "expected a JSON object, got {}",
                kind_of(&value)
            )));
        }
        Ok(Self(value))
    }

    /// Deserialize into the typed model
    pub fn get<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| CloudError::StateError(format!("cannot decode resource data: {}", e)))
    }

    /// Replace the contents with a serialized model
    pub fn set<T: Serialize>(&mut self, model: &T) -> Result<()> {
        *self = Self::from_model(model)?;
        Ok(())
    }

    /// Get a single attribute as a specific type
    pub fn get_attribute<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Raw attribute value, `None` when absent
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }

    /// Serialized form persisted by the host
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl From<serde_json::Value> for StateValue {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
