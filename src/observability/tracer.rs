//! Tracing seam for the action pipeline
//!
//! The pipeline does not trace anything itself; it resolves which tracer an
//! action should carry and hands it downstream. A process-wide default can
//! be configured once and acts as the fallback of last resort during option
//! resolution.

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::logger;

/// A tracer observes the lifecycle of an action.
///
/// Implementations must be cheap to clone behind `Arc` and safe to call from
/// any task.
pub trait Tracer: fmt::Debug + Send + Sync {
    /// An action span has started
    fn start_span(&self, kind: &str, name: &str);

    /// The current action span has finished
    fn stop_span(&self);

    /// The current action span failed
    fn set_error(&self, message: &str);
}

/// Tracer that emits structured log events for every span transition
#[derive(Debug, Default, Clone)]
pub struct LogTracer;

impl LogTracer {
    /// Create a log-backed tracer
    pub fn new() -> Self {
        Self
    }
}

impl Tracer for LogTracer {
    fn start_span(&self, kind: &str, name: &str) {
        logger::trace("SPAN_BEGIN", &[("kind", kind), ("name", name)]);
    }

    fn stop_span(&self) {
        logger::trace("SPAN_COMPLETE", &[]);
    }

    fn set_error(&self, message: &str) {
        logger::error("SPAN_FAILED", &[("reason", message)]);
    }
}

/// Process-wide default tracer, configured once at startup
static DEFAULT_TRACER: OnceLock<Arc<dyn Tracer>> = OnceLock::new();

/// Configure the process-wide default tracer.
///
/// Returns false if a default was already configured; the first
/// configuration wins and later calls are ignored.
pub fn set_default_tracer(tracer: Arc<dyn Tracer>) -> bool {
    DEFAULT_TRACER.set(tracer).is_ok()
}

/// The process-wide default tracer, if one was configured
pub fn default_tracer() -> Option<Arc<dyn Tracer>> {
    DEFAULT_TRACER.get().cloned()
}
