//! Reply Rule Entity
//!
//! A (trigger substring, canned response) pair used for automated replies.

use serde::{Deserialize, Serialize};

/// A keyword-triggered canned reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRule {
    /// Substring looked up in the normalized message text
    pub trigger: String,
    /// Reply sent when the trigger matches
    pub response: String,
    /// Disabled rules are skipped during selection
    pub enabled: bool,
}

impl ReplyRule {
    /// Create a new enabled rule
    pub fn new(trigger: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            response: response.into(),
            enabled: true,
        }
    }

    /// Enable or disable the rule
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this rule fires for already-normalized text
    pub fn matches(&self, normalized: &str) -> bool {
        self.enabled && normalized.contains(&self.trigger.to_lowercase())
    }
}
