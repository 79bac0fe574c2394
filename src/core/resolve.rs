//! Option resolution
//!
//! Merges ambient defaults, the subject's embedded context, and explicit
//! call-site options into one finalized option set, then writes the
//! resolved actor and authorization flag back into the subject so every
//! later stage of the call chain sees the same view.
//!
//! Precedence, strongest first:
//! 1. explicit call-site options (presence-based, an explicit null wins)
//! 2. the subject's private context, set by an outer wrapper
//! 3. ambient defaults from the enclosing scope
//! 4. domain policy fill (authorization mode), default tracer
//!
//! The one exception is `AuthorizationMode::Always`, which forces the
//! authorization flag to true over even an explicit value.

use crate::core::ambient;
use crate::core::errors::ActorRequired;
use crate::core::options::{ActionOptions, Setting};
use crate::core::subject::SubjectContext;
use crate::domain::{AuthorizationMode, Domain};
use crate::observability;

/// Resolve the finalized options for one action invocation.
///
/// The subject's shared context absorbs the per-call context override and
/// the ambient context snapshot; its private context receives the finalized
/// actor and authorization flag (only those two). Private keys are only
/// ever added, never removed.
///
/// A missing domain handle skips actor requirement and authorization-mode
/// handling; an outer caller holding the handle re-resolves later.
///
/// # Errors
///
/// Returns [`ActorRequired`] when the domain mandates an actor for every
/// action and none (non-null) was resolvable. This is configuration misuse,
/// fatal to the call.
pub fn resolve<S: SubjectContext>(
    subject: &mut S,
    options: ActionOptions,
    domain: Option<&Domain>,
) -> Result<ActionOptions, ActorRequired> {
    // One snapshot at call start; every fallback below reads from it
    let ambient = ambient::current();
    let mut options = options;

    // 1. Per-call context override merges into the subject, key by key
    if !options.context.is_empty() {
        subject.context_mut().merge_shared(options.context.clone());
    }

    // 2. Decisions an outer wrapper already resolved flow in through the
    //    subject's private context, but never over explicit options
    {
        let private = &subject.context().private;
        if options.actor.is_unset() {
            options.actor = private.actor.clone();
        }
        if options.authorize.is_unset() {
            options.authorize = private.authorize.clone();
        }
        if options.tracer.is_unset() {
            options.tracer = private.tracer.clone();
        }
    }

    // 3. Actor: ambient fallback, then the domain's actor requirement
    if options.actor.is_unset() {
        if let Some(actor) = ambient.actor.clone() {
            options.actor = Setting::Set(actor);
        }
    }
    if let Some(domain) = domain {
        if domain.requires_actor() && options.actor.value().is_none() {
            return Err(ActorRequired {
                domain: domain.name().to_string(),
            });
        }
    }

    // 4. Authorization flag: ambient fallback, then the domain's mode
    if options.authorize.is_unset() {
        if let Some(authorize) = ambient.authorize {
            options.authorize = Setting::Set(authorize);
        }
    }
    if let Some(domain) = domain {
        match domain.authorization_mode() {
            // Forces true over even an explicit prior value
            AuthorizationMode::Always => {
                options.authorize = Setting::Set(true);
            }
            AuthorizationMode::ByDefault => {
                if options.authorize.is_unset() {
                    options.authorize = Setting::Set(true);
                }
            }
            AuthorizationMode::WhenRequested => {
                if options.authorize.is_unset() && options.actor.value().is_some() {
                    options.authorize = Setting::Set(true);
                }
            }
        }
    }

    // 5. Tenant: ambient fallback only
    if options.tenant.is_unset() {
        if let Some(tenant) = ambient.tenant.clone() {
            options.tenant = Setting::Set(tenant);
        }
    }

    // 6. Tracer: ambient fallback, then the process-wide default
    if options.tracer.is_unset() {
        if let Some(tracer) = ambient.tracer.clone() {
            options.tracer = Setting::Set(tracer);
        } else if let Some(tracer) = observability::default_tracer() {
            options.tracer = Setting::Set(tracer);
        }
    }

    // 7. Inject the finalized actor and authorization flag, after folding
    //    in the ambient context snapshot captured above
    let context = subject.context_mut();
    context.merge_shared_defaults(ambient.context);
    context.private.record_actor(&options.actor);
    context.private.record_authorize(&options.authorize);

    Ok(options)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::ambient::AmbientDefaults;
    use crate::core::context::Actor;
    use crate::core::subject::Query;
    use crate::core::value::Value;
    use crate::resource::{Attribute, AttributeType, ResourceInfo};

    fn users() -> Arc<ResourceInfo> {
        Arc::new(
            ResourceInfo::new("users")
                .with_attribute(Attribute::new("id", AttributeType::Uuid).as_primary_key()),
        )
    }

    #[test]
    fn test_explicit_actor_beats_ambient() {
        let defaults = AmbientDefaults::new().with_actor(Actor::new("ambient"));
        ambient::sync_scope(defaults, || {
            let mut query = Query::new(users());
            let options = ActionOptions::new().with_actor(Actor::new("explicit"));
            let resolved = resolve(&mut query, options, None).unwrap();
            assert_eq!(
                resolved.actor.value().map(|a| &a.id),
                Some(&Value::from("explicit"))
            );
        });
    }

    #[test]
    fn test_explicit_null_actor_beats_ambient() {
        let defaults = AmbientDefaults::new().with_actor(Actor::new("ambient"));
        ambient::sync_scope(defaults, || {
            let mut query = Query::new(users());
            let options = ActionOptions::new().without_actor();
            let resolved = resolve(&mut query, options, None).unwrap();
            assert_eq!(resolved.actor, Setting::Null);
        });
    }

    #[test]
    fn test_ambient_actor_fills_gap() {
        let defaults = AmbientDefaults::new().with_actor(Actor::new("ambient"));
        ambient::sync_scope(defaults, || {
            let mut query = Query::new(users());
            let resolved = resolve(&mut query, ActionOptions::new(), None).unwrap();
            assert_eq!(
                resolved.actor.value().map(|a| &a.id),
                Some(&Value::from("ambient"))
            );
        });
    }

    #[test]
    fn test_actor_required_without_actor() {
        let domain = Domain::new("accounts").require_actor();
        let mut query = Query::new(users());
        let err = resolve(&mut query, ActionOptions::new(), Some(&domain)).unwrap_err();
        assert_eq!(err.domain, "accounts");
    }

    #[test]
    fn test_actor_required_rejects_explicit_null() {
        let domain = Domain::new("accounts").require_actor();
        let mut query = Query::new(users());
        let options = ActionOptions::new().without_actor();
        assert!(resolve(&mut query, options, Some(&domain)).is_err());
    }

    #[test]
    fn test_no_domain_defers_actor_requirement() {
        let mut query = Query::new(users());
        assert!(resolve(&mut query, ActionOptions::new(), None).is_ok());
    }

    #[test]
    fn test_always_overrides_explicit_false() {
        let domain = Domain::new("accounts").with_authorization(AuthorizationMode::Always);
        let mut query = Query::new(users());
        let options = ActionOptions::new().with_authorize(false);
        let resolved = resolve(&mut query, options, Some(&domain)).unwrap();
        assert_eq!(resolved.authorize, Setting::Set(true));
    }

    #[test]
    fn test_by_default_fills_gap_only() {
        let domain = Domain::new("accounts").with_authorization(AuthorizationMode::ByDefault);

        let mut query = Query::new(users());
        let resolved = resolve(&mut query, ActionOptions::new(), Some(&domain)).unwrap();
        assert_eq!(resolved.authorize, Setting::Set(true));

        let mut query = Query::new(users());
        let options = ActionOptions::new().with_authorize(false);
        let resolved = resolve(&mut query, options, Some(&domain)).unwrap();
        assert_eq!(resolved.authorize, Setting::Set(false));
    }

    #[test]
    fn test_when_requested_needs_actor() {
        let domain = Domain::new("accounts").with_authorization(AuthorizationMode::WhenRequested);

        let mut query = Query::new(users());
        let resolved = resolve(&mut query, ActionOptions::new(), Some(&domain)).unwrap();
        assert!(resolved.authorize.is_unset());

        let mut query = Query::new(users());
        let options = ActionOptions::new().with_actor(Actor::new("u1"));
        let resolved = resolve(&mut query, options, Some(&domain)).unwrap();
        assert_eq!(resolved.authorize, Setting::Set(true));
    }

    #[test]
    fn test_tenant_fills_from_ambient() {
        let defaults = AmbientDefaults::new().with_tenant("org_1");
        ambient::sync_scope(defaults, || {
            let mut query = Query::new(users());
            let resolved = resolve(&mut query, ActionOptions::new(), None).unwrap();
            assert_eq!(resolved.tenant, Setting::Set(Value::from("org_1")));
        });
    }

    #[test]
    fn test_injection_writes_private_context() {
        let mut query = Query::new(users());
        let options = ActionOptions::new()
            .with_actor(Actor::new("u1"))
            .with_authorize(true);
        resolve(&mut query, options, None).unwrap();

        let private = &query.context().private;
        assert_eq!(private.actor.value().map(|a| &a.id), Some(&Value::from("u1")));
        assert_eq!(private.authorize, Setting::Set(true));
    }

    #[test]
    fn test_private_context_seeds_inner_call() {
        let mut query = Query::new(users());
        let options = ActionOptions::new().with_actor(Actor::new("outer"));
        resolve(&mut query, options, None).unwrap();

        // An inner call with silent options inherits the outer decision
        let resolved = resolve(&mut query, ActionOptions::new(), None).unwrap();
        assert_eq!(
            resolved.actor.value().map(|a| &a.id),
            Some(&Value::from("outer"))
        );
    }

    #[test]
    fn test_context_override_merges_into_subject() {
        let mut query = Query::new(users());
        query
            .context_mut()
            .shared
            .insert("theme".into(), "dark".into());

        let options = ActionOptions::new().with_context("locale", "fr");
        resolve(&mut query, options, None).unwrap();

        assert_eq!(query.context().shared["locale"], Value::from("fr"));
        assert_eq!(query.context().shared["theme"], Value::from("dark"));
    }

    #[test]
    fn test_ambient_context_folds_in_without_overriding() {
        let defaults = AmbientDefaults::new()
            .with_context("locale", "en")
            .with_context("region", "eu");
        ambient::sync_scope(defaults, || {
            let mut query = Query::new(users());
            query
                .context_mut()
                .shared
                .insert("locale".into(), "fr".into());
            resolve(&mut query, ActionOptions::new(), None).unwrap();

            assert_eq!(query.context().shared["locale"], Value::from("fr"));
            assert_eq!(query.context().shared["region"], Value::from("eu"));
        });
    }
}
