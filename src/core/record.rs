//! Result records
//!
//! A record is what the storage engine hands back for one row of a result:
//! a field map, a sub-map of calculation outputs, and metadata the pipeline
//! stamps on the way out. The caster and selector transform records
//! copy-on-write; nothing here is retained across calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// One record in an action result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the resource the record belongs to
    resource: String,
    /// Attribute values by field name
    fields: BTreeMap<String, Value>,
    /// Calculation outputs by calculation name
    #[serde(default)]
    calculations: BTreeMap<String, Value>,
    /// Pipeline-stamped metadata
    #[serde(default)]
    metadata: RecordMetadata,
}

/// Metadata stamped onto a record by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Fields the caller actually selected; None when selection was not
    /// applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<Vec<String>>,
}

impl Record {
    /// Create an empty record for a resource
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            fields: BTreeMap::new(),
            calculations: BTreeMap::new(),
            metadata: RecordMetadata::default(),
        }
    }

    /// Add a field value
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a calculation output
    pub fn with_calculation(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.calculations.insert(name.into(), value.into());
        self
    }

    /// Returns the resource name
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field value
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Remove and return a field value
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Get a calculation output
    pub fn calculation(&self, name: &str) -> Option<&Value> {
        self.calculations.get(name)
    }

    /// Set a calculation output
    pub fn put_calculation(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.calculations.insert(name.into(), value.into());
    }

    /// Remove and return a calculation output
    pub fn remove_calculation(&mut self, name: &str) -> Option<Value> {
        self.calculations.remove(name)
    }

    /// Field names present on the record
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the record metadata
    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    /// Stamp the selected field set
    pub fn set_selected(&mut self, selected: Vec<String>) {
        self.metadata.selected = Some(selected);
    }
}
