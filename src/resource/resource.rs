//! Resource definitions
//!
//! A resource is the schema an action runs against: a named, ordered set of
//! attribute and calculation descriptors. Definitions are built once and
//! shared behind `Arc`; the pipeline only ever reads them.

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, Calculation};
use super::errors::{ResourceError, ResourceResult};

/// A resource definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceInfo {
    /// Unique resource name
    name: String,
    /// Attribute descriptors, in declaration order
    attributes: Vec<Attribute>,
    /// Calculation descriptors, in declaration order
    #[serde(default)]
    calculations: Vec<Calculation>,
}

impl ResourceInfo {
    /// Create an empty resource definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            calculations: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a calculation
    pub fn with_calculation(mut self, calculation: Calculation) -> Self {
        self.calculations.push(calculation);
        self
    }

    /// Returns the resource name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all attributes in declaration order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns all calculations in declaration order
    pub fn calculations(&self) -> &[Calculation] {
        &self.calculations
    }

    /// Look up a calculation by name
    pub fn calculation(&self, name: &str) -> Option<&Calculation> {
        self.calculations.iter().find(|c| c.name == name)
    }

    /// Names of the primary key attributes, in declaration order
    pub fn primary_key(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|a| a.primary_key)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Validates the definition itself (not a record).
    ///
    /// # Errors
    ///
    /// Returns `ResourceError` if the resource declares no primary key or
    /// declares the same attribute name twice.
    pub fn validate_structure(&self) -> ResourceResult<()> {
        if !self.attributes.iter().any(|a| a.primary_key) {
            return Err(ResourceError::MissingPrimaryKey(self.name.clone()));
        }

        for (i, attr) in self.attributes.iter().enumerate() {
            if self.attributes[..i].iter().any(|a| a.name == attr.name) {
                return Err(ResourceError::DuplicateAttribute {
                    resource: self.name.clone(),
                    name: attr.name.clone(),
                });
            }
        }

        Ok(())
    }
}
