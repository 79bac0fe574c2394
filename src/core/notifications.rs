//! Missed notification diagnostics
//!
//! Actions produce notifications for the delivery subsystem. When the
//! orchestration layer ends up holding notifications it never handed back
//! to the caller, this hook decides what happens to them: silently dropped,
//! surfaced as a fatal error, or logged with a captured backtrace so the
//! drop site can be found.

use std::backtrace::Backtrace;

use serde::{Deserialize, Serialize};

use crate::core::errors::MissedNotifications;
use crate::core::value::Value;
use crate::observability::logger;
use crate::resource::ResourceInfo;

/// A pending notification produced by an action
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Resource the action ran against
    pub resource: String,
    /// Action name
    pub action: String,
    /// Notification payload
    pub payload: Value,
}

impl Notification {
    /// Create a notification
    pub fn new(
        resource: impl Into<String>,
        action: impl Into<String>,
        payload: impl Into<Value>,
    ) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            payload: payload.into(),
        }
    }
}

/// What to do with notifications that were never handed back for delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissedNotificationPolicy {
    /// Drop them silently
    Ignore,
    /// Surface a fatal error
    Raise,
    /// Log them with a captured backtrace
    #[default]
    Warn,
}

/// Apply the configured policy to undelivered notifications.
///
/// A no-op when the list is empty.
///
/// # Errors
///
/// Returns [`MissedNotifications`] under the `Raise` policy.
pub fn warn_on_missed_notifications(
    resource: &ResourceInfo,
    action: &str,
    missed: &[Notification],
    policy: MissedNotificationPolicy,
) -> Result<(), MissedNotifications> {
    if missed.is_empty() {
        return Ok(());
    }

    match policy {
        MissedNotificationPolicy::Ignore => Ok(()),
        MissedNotificationPolicy::Raise => Err(MissedNotifications {
            resource: resource.name().to_string(),
            action: action.to_string(),
            count: missed.len(),
        }),
        MissedNotificationPolicy::Warn => {
            // Captured unconditionally so the drop site is always traceable
            let backtrace = Backtrace::force_capture().to_string();
            logger::warn(
                "NOTIFICATIONS_MISSED",
                &[
                    ("resource", resource.name()),
                    ("action", action),
                    ("count", &missed.len().to_string()),
                    ("backtrace", &backtrace),
                ],
            );
            Ok(())
        }
    }
}
