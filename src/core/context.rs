//! Action context
//!
//! Context carried on every query and changeset. The shared map is visible
//! to user code; the private section holds the resolved actor, authorization
//! flag, tenant, and tracer so downstream stages of one call chain see a
//! consistent view.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::options::Setting;
use crate::core::value::Value;
use crate::observability::Tracer;

/// The identity performing an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier for the actor
    pub id: Value,
    /// Additional claims attached to the identity
    #[serde(default)]
    pub claims: BTreeMap<String, Value>,
}

impl Actor {
    /// Create an actor with the given identifier
    pub fn new(id: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            claims: BTreeMap::new(),
        }
    }

    /// Attach a claim
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }
}

/// Context carried by a subject through the pipeline
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    /// Context visible to user code
    pub shared: BTreeMap<String, Value>,
    /// Pipeline-owned section; keys are only ever added, never removed
    pub private: PrivateContext,
}

impl ActionContext {
    /// Merge a context override in, replacing values per key
    pub fn merge_shared(&mut self, overrides: BTreeMap<String, Value>) {
        for (key, value) in overrides {
            self.shared.insert(key, value);
        }
    }

    /// Merge defaults in without overriding existing keys
    pub fn merge_shared_defaults(&mut self, defaults: BTreeMap<String, Value>) {
        for (key, value) in defaults {
            self.shared.entry(key).or_insert(value);
        }
    }
}

/// Pipeline-owned context slots.
///
/// Slots keep presence semantics: an explicitly null actor recorded here is
/// different from one that was never resolved.
#[derive(Debug, Clone, Default)]
pub struct PrivateContext {
    /// Resolved actor
    pub actor: Setting<Actor>,
    /// Resolved authorization flag
    pub authorize: Setting<bool>,
    /// Resolved tenant
    pub tenant: Setting<Value>,
    /// Resolved tracer
    pub tracer: Setting<Arc<dyn Tracer>>,
}

impl PrivateContext {
    /// Record the finalized actor; an unset slot leaves history intact
    pub(crate) fn record_actor(&mut self, actor: &Setting<Actor>) {
        if actor.is_present() {
            self.actor = actor.clone();
        }
    }

    /// Record the finalized authorization flag
    pub(crate) fn record_authorize(&mut self, authorize: &Setting<bool>) {
        if authorize.is_present() {
            self.authorize = authorize.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_shared_overrides_per_key() {
        let mut ctx = ActionContext::default();
        ctx.shared.insert("locale".into(), Value::from("en"));
        ctx.shared.insert("theme".into(), Value::from("dark"));

        let mut overrides = BTreeMap::new();
        overrides.insert("locale".into(), Value::from("fr"));
        ctx.merge_shared(overrides);

        assert_eq!(ctx.shared["locale"], Value::from("fr"));
        assert_eq!(ctx.shared["theme"], Value::from("dark"));
    }

    #[test]
    fn test_merge_shared_defaults_fills_gaps_only() {
        let mut ctx = ActionContext::default();
        ctx.shared.insert("locale".into(), Value::from("en"));

        let mut defaults = BTreeMap::new();
        defaults.insert("locale".into(), Value::from("fr"));
        defaults.insert("region".into(), Value::from("eu"));
        ctx.merge_shared_defaults(defaults);

        assert_eq!(ctx.shared["locale"], Value::from("en"));
        assert_eq!(ctx.shared["region"], Value::from("eu"));
    }

    #[test]
    fn test_record_actor_never_clears() {
        let mut private = PrivateContext::default();
        private.record_actor(&Setting::Set(Actor::new("u1")));
        assert!(private.actor.value().is_some());

        private.record_actor(&Setting::Unset);
        assert!(private.actor.value().is_some());

        private.record_actor(&Setting::Null);
        assert_eq!(private.actor, Setting::Null);
    }
}
