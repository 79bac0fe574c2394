//! actra - action pipeline core for a declarative resource framework
//!
//! Executes the cross-cutting concerns around every read/write action:
//! propagating ambient request context into the query or changeset,
//! normalizing action errors, casting stored values back into their
//! declared runtime types, and trimming unrequested attributes from
//! returned records.

pub mod core;
pub mod domain;
pub mod observability;
pub mod resource;
