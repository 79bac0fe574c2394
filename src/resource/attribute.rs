//! Attribute and calculation descriptors
//!
//! Descriptors are immutable metadata sourced from the resource definition.
//! The pipeline reads them; it never mutates them.

use serde::{Deserialize, Serialize};

use super::types::{AttributeType, Constraints};

/// A declared attribute on a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Field name
    pub name: String,
    /// Declared runtime type
    #[serde(flatten)]
    pub attr_type: AttributeType,
    /// Type constraints
    #[serde(default)]
    pub constraints: Constraints,
    /// Always carried on returned records, selection cannot blank it
    #[serde(default)]
    pub always_select: bool,
    /// Part of the resource's primary key
    #[serde(default)]
    pub primary_key: bool,
}

impl Attribute {
    /// Create an attribute of the given type with default constraints
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            constraints: Constraints::default(),
            always_select: false,
            primary_key: false,
        }
    }

    /// Set type constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Mark the attribute as always selected
    pub fn always_selected(mut self) -> Self {
        self.always_select = true;
        self
    }

    /// Mark the attribute as part of the primary key
    pub fn as_primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Whether the storage layer returns this attribute in runtime form
    pub fn is_storage_native(&self) -> bool {
        self.attr_type.is_storage_native(&self.constraints)
    }
}

/// A declared calculation on a resource.
///
/// Calculations produce derived values during an action. Their raw output
/// lands in the record's `calculations` sub-map under the calculation's own
/// name, unless `load` redirects it into a top-level record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Calculation name
    pub name: String,
    /// Declared output type
    #[serde(flatten)]
    pub calc_type: AttributeType,
    /// Type constraints
    #[serde(default)]
    pub constraints: Constraints,
    /// Top-level record field the raw output was materialized under, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<String>,
}

impl Calculation {
    /// Create a calculation of the given output type
    pub fn new(name: impl Into<String>, calc_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            calc_type,
            constraints: Constraints::default(),
            load: None,
        }
    }

    /// Set type constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Redirect the raw output into a top-level record field
    pub fn loaded_as(mut self, field: impl Into<String>) -> Self {
        self.load = Some(field.into());
        self
    }

    /// Whether the storage layer returns this output in runtime form
    pub fn is_storage_native(&self) -> bool {
        self.calc_type.is_storage_native(&self.constraints)
    }
}
