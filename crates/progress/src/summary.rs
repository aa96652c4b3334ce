//! Aggregate completion figures for display.

use serde::{Deserialize, Serialize};
use rocketsci_core::{ModuleId, ModuleStatus};

/// Completion of one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleProgress {
    /// Module id
    pub module_id: ModuleId,
    /// Display name
    pub title: String,
    /// Completed lessons in this module
    pub completed_lessons: usize,
    /// Lessons in this module
    pub total_lessons: usize,
    /// Progression state
    pub status: ModuleStatus,
}

/// Completion across the catalog.
///
/// Only catalog lessons are counted, so stale ids never push the
/// percentage past 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Completed catalog lessons
    pub completed_lessons: usize,
    /// Lessons in the catalog
    pub total_lessons: usize,
    /// Percentage complete (0-100)
    pub percentage: f32,
    /// Per-module breakdown in catalog order
    pub modules: Vec<ModuleProgress>,
}

impl ProgressSummary {
    /// Total up a per-module breakdown.
    pub fn from_modules(modules: Vec<ModuleProgress>) -> Self {
        let completed_lessons = modules.iter().map(|m| m.completed_lessons).sum();
        let total_lessons = modules.iter().map(|m| m.total_lessons).sum();

        let percentage = if total_lessons > 0 {
            (completed_lessons as f32 / total_lessons as f32) * 100.0
        } else {
            0.0
        };

        Self {
            completed_lessons,
            total_lessons,
            percentage,
            modules,
        }
    }

    /// Modules with every lesson done.
    pub fn completed_modules(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| m.status == ModuleStatus::Completed)
            .count()
    }
}
