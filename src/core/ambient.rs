//! Ambient context store
//!
//! Task-scoped defaults for actor, authorization flag, tenant, tracer, and
//! shared context. An enclosing caller opens a scope around a logical
//! request; every pipeline call inside the scope reads the same snapshot.
//! Concurrent tasks never observe each other's scopes, and the defaults
//! vanish when the scope ends. The pipeline itself only reads this store.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use tokio::task_local;

use crate::core::context::Actor;
use crate::core::value::Value;
use crate::observability::Tracer;

task_local! {
    static AMBIENT: AmbientDefaults;
}

/// Defaults an enclosing caller establishes for nested pipeline calls
#[derive(Debug, Clone, Default)]
pub struct AmbientDefaults {
    /// Default actor
    pub actor: Option<Actor>,
    /// Default authorization flag
    pub authorize: Option<bool>,
    /// Default tenant
    pub tenant: Option<Value>,
    /// Default tracer
    pub tracer: Option<Arc<dyn Tracer>>,
    /// Shared context folded into every subject resolved inside the scope
    pub context: BTreeMap<String, Value>,
}

impl AmbientDefaults {
    /// Create empty defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default actor
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Set the default authorization flag
    pub fn with_authorize(mut self, authorize: bool) -> Self {
        self.authorize = Some(authorize);
        self
    }

    /// Set the default tenant
    pub fn with_tenant(mut self, tenant: impl Into<Value>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Set the default tracer
    pub fn with_tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Add a shared context default
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Run a future with the given ambient defaults in scope
pub async fn scope<F>(defaults: AmbientDefaults, f: F) -> F::Output
where
    F: Future,
{
    AMBIENT.scope(defaults, f).await
}

/// Run a closure with the given ambient defaults in scope
pub fn sync_scope<R>(defaults: AmbientDefaults, f: impl FnOnce() -> R) -> R {
    AMBIENT.sync_scope(defaults, f)
}

/// Snapshot of the current scope's defaults; empty outside any scope
pub fn current() -> AmbientDefaults {
    AMBIENT.try_with(Clone::clone).unwrap_or_default()
}
