//! Observability subsystem
//!
//! Structured JSON logging and the tracer seam the pipeline propagates into
//! every action. Observability is read-only: nothing here influences
//! pipeline behavior.

pub mod logger;
mod tracer;

pub use logger::Severity;
pub use tracer::{default_tracer, set_default_tracer, LogTracer, Tracer};
