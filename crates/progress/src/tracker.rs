//! Progress tracking service.

use std::collections::BTreeSet;
use std::sync::Arc;
use rocketsci_core::{Catalog, LessonId, ModuleId, ModuleStatus, ProgressState};
use tracing::{debug, warn};
use crate::summary::{ModuleProgress, ProgressSummary};
use crate::unlock;

/// Owns the completed-lesson set and derives module state from the catalog.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    catalog: Arc<Catalog>,
    state: ProgressState,
}

impl ProgressTracker {
    /// Create a tracker with no progress.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_state(catalog, ProgressState::new())
    }

    /// Create a tracker from a previously saved state.
    pub fn with_state(catalog: Arc<Catalog>, state: ProgressState) -> Self {
        Self { catalog, state }
    }

    /// The catalog progress is measured against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The raw completed-lesson set.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Mark a lesson complete. Returns `false` if it already was.
    ///
    /// Ids outside the catalog are recorded anyway; they are harmless.
    pub fn mark_lesson_complete(&mut self, lesson_id: impl Into<LessonId>) -> bool {
        let lesson_id = lesson_id.into();
        if self.catalog.lesson(lesson_id.as_str()).is_none() {
            warn!("Marking unknown lesson {} complete", lesson_id);
        }
        let inserted = self.state.insert(lesson_id.clone());
        if inserted {
            debug!("Lesson {} completed", lesson_id);
        }
        inserted
    }

    /// Whether a lesson is completed.
    pub fn is_lesson_completed(&self, lesson_id: &str) -> bool {
        self.state.contains(lesson_id)
    }

    /// Whether every lesson of a module is completed.
    pub fn is_module_completed(&self, module_id: &str) -> bool {
        unlock::is_module_completed(&self.catalog, &self.state, module_id)
    }

    /// Whether a module is available. Unknown modules are not.
    pub fn is_module_unlocked(&self, module_id: &str) -> bool {
        self.catalog
            .module(module_id)
            .is_some_and(|m| unlock::is_unlocked(&self.catalog, &self.state, m))
    }

    /// Ids of all unlocked modules.
    pub fn unlocked_modules(&self) -> BTreeSet<ModuleId> {
        unlock::compute_unlocked_modules(&self.catalog, &self.state)
    }

    /// Progression state of one module, `None` for unknown ids.
    pub fn module_status(&self, module_id: &str) -> Option<ModuleStatus> {
        let module = self.catalog.module(module_id)?;
        let status = if !unlock::is_unlocked(&self.catalog, &self.state, module) {
            ModuleStatus::Locked
        } else if self.is_module_completed(module_id) {
            ModuleStatus::Completed
        } else {
            ModuleStatus::Unlocked
        };
        Some(status)
    }

    /// Completion counts for the whole catalog.
    pub fn summary(&self) -> ProgressSummary {
        let modules: Vec<ModuleProgress> = self
            .catalog
            .modules()
            .iter()
            .map(|module| {
                let completed = module
                    .lessons
                    .iter()
                    .filter(|l| self.state.contains(l.id.as_str()))
                    .count();
                ModuleProgress {
                    module_id: module.id.clone(),
                    title: module.title.clone(),
                    completed_lessons: completed,
                    total_lessons: module.lessons.len(),
                    // Every catalog module has a status
                    status: self.module_status(module.id.as_str()).unwrap_or(ModuleStatus::Locked),
                }
            })
            .collect();

        ProgressSummary::from_modules(modules)
    }

    /// Forget all completed lessons.
    pub fn reset(&mut self) {
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ProgressTracker {
        ProgressTracker::new(Arc::new(Catalog::reference()))
    }

    fn complete_module(tracker: &mut ProgressTracker, module_id: &str) {
        let lessons: Vec<LessonId> = tracker
            .catalog()
            .module(module_id)
            .unwrap()
            .lessons
            .iter()
            .map(|l| l.id.clone())
            .collect();
        for lesson in lessons {
            tracker.mark_lesson_complete(lesson);
        }
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut tracker = tracker();
        assert!(tracker.mark_lesson_complete("n1"));
        assert!(!tracker.mark_lesson_complete("n1"));
        assert!(tracker.is_lesson_completed("n1"));
        assert_eq!(tracker.state().len(), 1);
    }

    #[test]
    fn test_module_completes_after_last_lesson() {
        let mut tracker = tracker();
        tracker.mark_lesson_complete("n1");
        tracker.mark_lesson_complete("n2");
        assert!(!tracker.is_module_completed("newton"));
        tracker.mark_lesson_complete("n3");
        assert!(tracker.is_module_completed("newton"));
    }

    #[test]
    fn test_status_transitions_forward() {
        let mut tracker = tracker();
        assert_eq!(tracker.module_status("newton"), Some(ModuleStatus::Unlocked));
        assert_eq!(tracker.module_status("space"), Some(ModuleStatus::Locked));

        complete_module(&mut tracker, "newton");
        assert_eq!(tracker.module_status("newton"), Some(ModuleStatus::Completed));
        assert_eq!(tracker.module_status("space"), Some(ModuleStatus::Unlocked));

        complete_module(&mut tracker, "space");
        assert_eq!(tracker.module_status("space"), Some(ModuleStatus::Completed));
        assert_eq!(tracker.module_status("gravity"), Some(ModuleStatus::Unlocked));
        assert_eq!(tracker.module_status("failures"), Some(ModuleStatus::Locked));
    }

    #[test]
    fn test_completion_is_monotonic() {
        let mut tracker = tracker();
        complete_module(&mut tracker, "newton");
        for extra in ["s1", "g2", "bogus", "n1"] {
            tracker.mark_lesson_complete(extra);
            assert!(tracker.is_module_completed("newton"));
        }
    }

    #[test]
    fn test_unknown_module_status() {
        let tracker = tracker();
        assert_eq!(tracker.module_status("nope"), None);
        assert!(!tracker.is_module_unlocked("nope"));
    }

    #[test]
    fn test_root_always_unlocked() {
        let mut tracker = tracker();
        assert!(tracker.is_module_unlocked("newton"));
        complete_module(&mut tracker, "lunar");
        assert!(tracker.is_module_unlocked("newton"));
    }

    #[test]
    fn test_unlock_matches_prerequisite_completion() {
        let mut tracker = tracker();
        complete_module(&mut tracker, "newton");
        complete_module(&mut tracker, "gravity");
        tracker.mark_lesson_complete("st1");

        let catalog = Catalog::reference();
        for module in catalog.modules() {
            if let Some(required) = &module.required_module_id {
                assert_eq!(
                    tracker.is_module_unlocked(module.id.as_str()),
                    tracker.is_module_completed(required.as_str()),
                    "module {}",
                    module.id
                );
            }
        }
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut tracker = tracker();
        complete_module(&mut tracker, "newton");
        tracker.reset();
        assert!(tracker.state().is_empty());
        assert_eq!(tracker.unlocked_modules().len(), 1);
        assert_eq!(tracker.summary().completed_lessons, 0);
    }
}
