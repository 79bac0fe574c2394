//! Resource metadata subsystem
//!
//! Resources are first-class schemas: named attribute and calculation
//! catalogs the action pipeline consults for casting and selection.
//!
//! # Design Principles
//!
//! - Definitions are immutable once built and shared behind `Arc`
//! - Attribute order is declaration order, everywhere
//! - No implicit type coercion during casts
//! - Structural problems are surfaced by `validate_structure`, not at use

mod attribute;
mod errors;
mod resource;
mod types;

pub use attribute::{Attribute, Calculation};
pub use errors::{CastError, ResourceError, ResourceResult};
pub use resource::ResourceInfo;
pub use types::{cast_from_storage, AttributeType, Constraints};
