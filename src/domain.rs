//! Domain configuration
//!
//! A domain groups resources under one policy configuration. The pipeline
//! consults it during option resolution for two things: whether every
//! action mandates an actor, and how the authorization flag defaults. The
//! handle is optional everywhere; a call without one defers both checks to
//! an outer caller that has it.

use serde::{Deserialize, Serialize};

/// How a domain defaults the authorization flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationMode {
    /// Authorization always runs, even over an explicit opt-out
    Always,
    /// Authorization runs unless explicitly disabled
    ByDefault,
    /// Authorization runs when an actor was supplied
    #[default]
    WhenRequested,
}

/// A domain's policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    name: String,
    require_actor: bool,
    authorization: AuthorizationMode,
}

impl Domain {
    /// Create a domain with default policy
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            require_actor: false,
            authorization: AuthorizationMode::default(),
        }
    }

    /// Mandate a non-null actor for every action in this domain
    pub fn require_actor(mut self) -> Self {
        self.require_actor = true;
        self
    }

    /// Set the authorization mode
    pub fn with_authorization(mut self, mode: AuthorizationMode) -> Self {
        self.authorization = mode;
        self
    }

    /// Returns the domain name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether every action in this domain mandates an actor
    pub fn requires_actor(&self) -> bool {
        self.require_actor
    }

    /// Returns the authorization mode
    pub fn authorization_mode(&self) -> AuthorizationMode {
        self.authorization
    }
}
