//! Error types for the action pipeline
//!
//! Two channels exist on purpose. `ActorRequired` comes straight out of
//! option resolution as its own error type: it signals configuration misuse
//! and is fatal to the call. Everything downstream flows through
//! `ActionError`, the outcome error channel a caller may inspect.

use thiserror::Error;

use crate::resource::CastError;

/// An error produced while executing an action.
///
/// The normalized form of several errors is `Multiple`; a single error
/// stays scalar so single-error call sites can match on it directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// An attribute value was rejected
    #[error("invalid attribute `{field}`: {message}")]
    InvalidAttribute {
        /// Offending field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// A stored value could not be cast to its declared type
    #[error(transparent)]
    Cast(#[from] CastError),

    /// The action was denied by policy
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Failure inside the framework or a storage adapter
    #[error("framework error: {0}")]
    Framework(String),

    /// Several errors occurred during one action
    #[error("{} errors occurred during the action", .0.len())]
    Multiple(Vec<ActionError>),
}

impl ActionError {
    /// Number of leaf errors, counting aggregate members
    pub fn len(&self) -> usize {
        match self {
            ActionError::Multiple(errors) => errors.iter().map(ActionError::len).sum(),
            _ => 1,
        }
    }

    /// True only for an empty aggregate
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Option resolution determined the action mandates an actor and none was
/// resolvable. Configuration misuse: fatal to the call, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("actor is required for actions in domain `{domain}`")]
pub struct ActorRequired {
    /// Domain whose configuration mandates the actor
    pub domain: String,
}

/// Notifications were produced by an action but never handed back to the
/// caller for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{count} notification(s) from `{resource}.{action}` were not delivered")]
pub struct MissedNotifications {
    /// Resource the action ran against
    pub resource: String,
    /// Action name
    pub action: String,
    /// How many notifications went undelivered
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_counts_leaves() {
        let err = ActionError::Multiple(vec![
            ActionError::Forbidden("nope".into()),
            ActionError::Multiple(vec![ActionError::Framework("x".into())]),
        ]);
        assert_eq!(err.len(), 2);
        assert!(!err.is_empty());
    }

    #[test]
    fn test_display_messages() {
        let err = ActionError::InvalidAttribute {
            field: "name".into(),
            message: "must not be blank".into(),
        };
        assert!(err.to_string().contains("name"));

        let err = ActorRequired {
            domain: "accounts".into(),
        };
        assert!(err.to_string().contains("accounts"));
    }
}
