//! Pipeline subjects
//!
//! All actions route through one of two subjects: a `Query` for reads, a
//! `Changeset` for writes. Both carry a resource handle, an action context,
//! and an optional select list; the pipeline operates on them through the
//! `SubjectContext` capability trait so every stage works on either variant
//! or the `Subject` union.

use std::sync::Arc;

use crate::core::context::ActionContext;
use crate::core::errors::ActionError;
use crate::resource::{ResourceError, ResourceInfo, ResourceResult};

/// Capability the pipeline needs from any subject
pub trait SubjectContext {
    /// The resource the action runs against
    fn resource(&self) -> &Arc<ResourceInfo>;

    /// The subject's action context
    fn context(&self) -> &ActionContext;

    /// Mutable access to the subject's action context
    fn context_mut(&mut self) -> &mut ActionContext;
}

/// Capability the result selector needs from a subject
pub trait SelectionSource {
    /// The resource whose attributes drive the projection
    fn selection_resource(&self) -> &ResourceInfo;

    /// The requested select set; None means no projection
    fn selected(&self) -> Option<&[String]>;
}

/// A read action under construction
#[derive(Debug, Clone)]
pub struct Query {
    resource: Arc<ResourceInfo>,
    select: Option<Vec<String>>,
    calculations: Vec<String>,
    context: ActionContext,
}

impl Query {
    /// Create a query against a resource
    pub fn new(resource: Arc<ResourceInfo>) -> Self {
        Self {
            resource,
            select: None,
            calculations: Vec::new(),
            context: ActionContext::default(),
        }
    }

    /// Request a field selection
    pub fn with_select(mut self, fields: Vec<String>) -> Self {
        self.select = Some(fields);
        self
    }

    /// Request a calculation by name.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::UnknownCalculation` when the resource does
    /// not declare the calculation.
    pub fn load(mut self, calculation: &str) -> ResourceResult<Self> {
        if self.resource.calculation(calculation).is_none() {
            return Err(ResourceError::UnknownCalculation {
                resource: self.resource.name().to_string(),
                name: calculation.to_string(),
            });
        }
        self.calculations.push(calculation.to_string());
        Ok(self)
    }

    /// Requested calculation names
    pub fn calculations(&self) -> &[String] {
        &self.calculations
    }
}

impl SubjectContext for Query {
    fn resource(&self) -> &Arc<ResourceInfo> {
        &self.resource
    }

    fn context(&self) -> &ActionContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ActionContext {
        &mut self.context
    }
}

impl SelectionSource for Query {
    fn selection_resource(&self) -> &ResourceInfo {
        &self.resource
    }

    fn selected(&self) -> Option<&[String]> {
        self.select.as_deref()
    }
}

/// A write action under construction
#[derive(Debug, Clone)]
pub struct Changeset {
    resource: Arc<ResourceInfo>,
    select: Option<Vec<String>>,
    errors: Vec<ActionError>,
    context: ActionContext,
}

impl Changeset {
    /// Create a changeset against a resource
    pub fn new(resource: Arc<ResourceInfo>) -> Self {
        Self {
            resource,
            select: None,
            errors: Vec::new(),
            context: ActionContext::default(),
        }
    }

    /// Request a field selection for the returned record
    pub fn with_select(mut self, fields: Vec<String>) -> Self {
        self.select = Some(fields);
        self
    }

    /// Ingest an error into the changeset's error list.
    ///
    /// Aggregates are expanded into their members and exact duplicates are
    /// dropped.
    pub fn add_error(&mut self, error: ActionError) {
        match error {
            ActionError::Multiple(errors) => {
                for error in errors {
                    self.add_error(error);
                }
            }
            error => {
                if !self.errors.contains(&error) {
                    self.errors.push(error);
                }
            }
        }
    }

    /// The accumulated errors, in ingestion order
    pub fn errors(&self) -> &[ActionError] {
        &self.errors
    }

    /// Drop all accumulated errors
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl SubjectContext for Changeset {
    fn resource(&self) -> &Arc<ResourceInfo> {
        &self.resource
    }

    fn context(&self) -> &ActionContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ActionContext {
        &mut self.context
    }
}

impl SelectionSource for Changeset {
    fn selection_resource(&self) -> &ResourceInfo {
        &self.resource
    }

    fn selected(&self) -> Option<&[String]> {
        self.select.as_deref()
    }
}

/// Either subject, for callers that handle both
#[derive(Debug, Clone)]
pub enum Subject {
    /// A read action
    Query(Query),
    /// A write action
    Changeset(Changeset),
}

impl SubjectContext for Subject {
    fn resource(&self) -> &Arc<ResourceInfo> {
        match self {
            Subject::Query(query) => query.resource(),
            Subject::Changeset(changeset) => changeset.resource(),
        }
    }

    fn context(&self) -> &ActionContext {
        match self {
            Subject::Query(query) => query.context(),
            Subject::Changeset(changeset) => changeset.context(),
        }
    }

    fn context_mut(&mut self) -> &mut ActionContext {
        match self {
            Subject::Query(query) => query.context_mut(),
            Subject::Changeset(changeset) => changeset.context_mut(),
        }
    }
}
