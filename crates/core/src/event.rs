//! Notifications raised by the progression core.

use serde::{Deserialize, Serialize};
use crate::catalog::Module;
use crate::id::ModuleId;
use crate::Time;

/// A gated module just became available through user progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleUnlocked {
    /// The unlocked module
    pub module_id: ModuleId,

    /// Display name shown in the celebration
    pub title: String,

    /// When the unlock was observed
    pub unlocked_at: Time,
}

impl ModuleUnlocked {
    /// Build the event for `module`, stamped now.
    pub fn new(module: &Module) -> Self {
        Self {
            module_id: module.id.clone(),
            title: module.title.clone(),
            unlocked_at: chrono::Utc::now(),
        }
    }
}
