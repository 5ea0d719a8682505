//! Branch models
//!
//! A branch is a physical or logical sub-location of a store holding its
//! own inventory ledger. Branches are supplied by the store-settings
//! subsystem and are immutable during a transfer session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A store branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    /// Arabic display name, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localized: Option<String>,
    /// Optional short code shown on chips and labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub is_main_branch: bool,
}

impl Branch {
    /// Display name for a branch, preferring the localized name when present
    pub fn display_name(&self, arabic: bool) -> &str {
        if arabic {
            self.name_localized.as_deref().unwrap_or(&self.name)
        } else {
            &self.name
        }
    }
}
