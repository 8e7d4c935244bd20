//! Resource schema declarations and plan validation

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::state::StateValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
}

/// A single attribute of a resource schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub attribute_type: AttributeType,
    pub description: String,

    /// Must be supplied by the user
    pub required: bool,

    /// Set by the provider, never by the user
    pub computed: bool,
}

impl Attribute {
    pub fn required_string(description: impl Into<String>) -> Self {
        Self {
            attribute_type: AttributeType::String,
            description: description.into(),
            required: true,
            computed: false,
        }
    }

    pub fn computed_string(description: impl Into<String>) -> Self {
        Self {
            attribute_type: AttributeType::String,
            description: description.into(),
            required: false,
            computed: true,
        }
    }
}

/// Schema of a resource type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Validate a plan against the schema
    ///
    /// Required attributes must be present and non-empty, every present
    /// attribute must be of the declared type, and unknown attributes are
    /// rejected. Computed
    /// attributes may carry values from prior state.
    pub fn validate_plan(&self, plan: &StateValue) -> Diagnostics {
        let mut diags = Diagnostics::new();

        let Some(object) = plan.as_json().as_object() else {
            diags.add_error("Invalid Plan", "resource plan must be a JSON object");
            return diags;
        };

        for (name, attr) in &self.attributes {
            let value = object.get(name).filter(|v| !v.is_null());
            match value {
                None if attr.required => diags.push(
                    Diagnostic::error(
                        "Missing Required Attribute",
                        format!("the attribute \"{}\" is required", name),
                    )
                    .with_attribute(name),
                ),
                Some(v) if attr.attribute_type == AttributeType::String && !v.is_string() => {
                    diags.push(
                        Diagnostic::error(
                            "Incorrect Attribute Type",
                            format!("the attribute \"{}\" must be a string", name),
                        )
                        .with_attribute(name),
                    )
                }
                Some(v) if attr.required && v.as_str().is_some_and(str::is_empty) => diags.push(
                    Diagnostic::error(
                        "Empty Required Attribute",
                        format!("the attribute \"{}\" must not be empty", name),
                    )
                    .with_attribute(name),
                ),
                _ => {}
            }
        }

        for name in object.keys() {
            if !self.attributes.contains_key(name) {
                diags.push(
                    Diagnostic::error(
                        "Unsupported Attribute",
                        format!("the attribute \"{}\" is not expected here", name),
                    )
                    .with_attribute(name),
                );
            }
        }

        diags
    }
}
