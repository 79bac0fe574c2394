//! Error types for resource definitions and runtime casting.

use thiserror::Error;

/// Result type for resource definition operations
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors in the structure or use of a resource definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// Every resource must declare at least one primary key attribute
    #[error("resource `{0}` has no primary key attribute")]
    MissingPrimaryKey(String),

    /// Attribute names must be unique within a resource
    #[error("resource `{resource}` declares attribute `{name}` more than once")]
    DuplicateAttribute { resource: String, name: String },

    /// A calculation was requested that the resource does not declare
    #[error("resource `{resource}` has no calculation named `{name}`")]
    UnknownCalculation { resource: String, name: String },
}

/// A stored value could not be cast into its declared runtime type.
///
/// Always fatal to the batch it occurred in; the caster never applies
/// a partial cast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for `{field}`: expected {expected}, got {found}")]
pub struct CastError {
    /// Field the bad value was stored under, including array index when nested
    pub field: String,
    /// The declared runtime type, or the constraint that rejected the value
    pub expected: String,
    /// What the storage layer actually returned
    pub found: String,
}

impl CastError {
    /// Create a cast error with no field attribution yet
    pub fn new(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            field: String::new(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Attribute the error to a named field, prefixing any nested path
    pub fn at(mut self, field: &str) -> Self {
        self.field = format!("{}{}", field, self.field);
        self
    }

    /// Attribute the error to an array element
    pub fn at_index(mut self, index: usize) -> Self {
        self.field = format!("[{}]{}", index, self.field);
        self
    }
}
