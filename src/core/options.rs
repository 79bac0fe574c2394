//! Per-call action options
//!
//! `ActionOptions` is the authoritative configuration for one action
//! invocation, built fresh per call by the option resolver. Precedence is
//! presence-based: a slot explicitly set to null is present and must not be
//! overridden by ambient or domain defaults.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::context::Actor;
use crate::core::value::Value;
use crate::observability::Tracer;

/// A slot that distinguishes "omitted" from "explicitly set", including
/// explicitly set to null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    /// Never set; fallbacks may fill it
    Unset,
    /// Explicitly set to null; fallbacks must leave it alone
    Null,
    /// Explicitly set to a value
    Set(T),
}

// Hand-written so the default needs no `T: Default`
impl<T> Default for Setting<T> {
    fn default() -> Self {
        Setting::Unset
    }
}

impl<T> Setting<T> {
    /// True when the slot was never set
    pub fn is_unset(&self) -> bool {
        matches!(self, Setting::Unset)
    }

    /// True when the slot was explicitly set, even to null
    pub fn is_present(&self) -> bool {
        !self.is_unset()
    }

    /// The contained value, when one was set
    pub fn value(&self) -> Option<&T> {
        match self {
            Setting::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Consume the slot, yielding the contained value if any
    pub fn into_value(self) -> Option<T> {
        match self {
            Setting::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Keep this slot unless unset, in which case take the fallback
    pub fn or(self, fallback: Setting<T>) -> Setting<T> {
        if self.is_unset() {
            fallback
        } else {
            self
        }
    }
}

/// The authoritative option set for one action invocation.
///
/// Built by [`resolve`](crate::core::resolve::resolve); not persisted
/// anywhere.
#[derive(Debug, Clone, Default)]
pub struct ActionOptions {
    /// Who is performing the action
    pub actor: Setting<Actor>,
    /// Whether authorization runs for this action
    pub authorize: Setting<bool>,
    /// Tenant the action is scoped to
    pub tenant: Setting<Value>,
    /// Tracer the action reports to
    pub tracer: Setting<Arc<dyn Tracer>>,
    /// Per-call override merged into the subject's shared context
    pub context: BTreeMap<String, Value>,
    /// Caller-supplied extras, passed through untouched
    pub extra: BTreeMap<String, Value>,
}

impl ActionOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the actor
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Setting::Set(actor);
        self
    }

    /// Explicitly set the actor to null, blocking ambient fallback
    pub fn without_actor(mut self) -> Self {
        self.actor = Setting::Null;
        self
    }

    /// Set the authorization flag
    pub fn with_authorize(mut self, authorize: bool) -> Self {
        self.authorize = Setting::Set(authorize);
        self
    }

    /// Set the tenant
    pub fn with_tenant(mut self, tenant: impl Into<Value>) -> Self {
        self.tenant = Setting::Set(tenant.into());
        self
    }

    /// Set the tracer
    pub fn with_tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Setting::Set(tracer);
        self
    }

    /// Add a key to the per-call context override
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Add a caller-supplied extra
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_presence() {
        assert!(Setting::<i32>::Unset.is_unset());
        assert!(Setting::<i32>::Null.is_present());
        assert!(Setting::Set(1).is_present());
        assert_eq!(Setting::Set(1).value(), Some(&1));
        assert_eq!(Setting::<i32>::Null.value(), None);
    }

    #[test]
    fn test_setting_or_respects_explicit_null() {
        let filled = Setting::<i32>::Unset.or(Setting::Set(3));
        assert_eq!(filled, Setting::Set(3));

        let kept = Setting::<i32>::Null.or(Setting::Set(3));
        assert_eq!(kept, Setting::Null);
    }

    #[test]
    fn test_builder_slots() {
        let options = ActionOptions::new()
            .with_authorize(false)
            .with_tenant("org_1")
            .with_context("locale", "en");
        assert_eq!(options.authorize, Setting::Set(false));
        assert_eq!(options.tenant, Setting::Set(Value::from("org_1")));
        assert!(options.actor.is_unset());
        assert_eq!(options.context["locale"], Value::from("en"));
    }
}
