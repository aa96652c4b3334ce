//! Progress model - the persisted set of completed lessons.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use crate::id::LessonId;

/// Completed lesson ids.
///
/// Ids are not checked against the catalog; unknown ids are kept but can
/// never complete a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Completed lessons
    #[serde(default)]
    pub completed_lessons: BTreeSet<LessonId>,
}

impl ProgressState {
    /// Create an empty progress state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lesson as completed. Returns `false` if it already was.
    pub fn insert(&mut self, lesson_id: LessonId) -> bool {
        self.completed_lessons.insert(lesson_id)
    }

    /// Whether the lesson is completed.
    pub fn contains(&self, lesson_id: &str) -> bool {
        self.completed_lessons.contains(lesson_id)
    }

    /// Number of completed ids, including unknown ones.
    pub fn len(&self) -> usize {
        self.completed_lessons.len()
    }

    /// Whether nothing is completed.
    pub fn is_empty(&self) -> bool {
        self.completed_lessons.is_empty()
    }

    /// Iterate completed ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &LessonId> {
        self.completed_lessons.iter()
    }

    /// Forget all progress.
    pub fn clear(&mut self) {
        self.completed_lessons.clear();
    }
}

impl FromIterator<LessonId> for ProgressState {
    fn from_iter<I: IntoIterator<Item = LessonId>>(iter: I) -> Self {
        Self {
            completed_lessons: iter.into_iter().collect(),
        }
    }
}

/// Per-module progression state.
///
/// Transitions only move forward: `Locked -> Unlocked -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleStatus {
    /// Prerequisite not yet complete
    Locked,
    /// Available, some lessons outstanding
    Unlocked,
    /// Available and every lesson completed
    Completed,
}

impl ModuleStatus {
    /// Whether lessons in the module can be opened.
    pub fn is_unlocked(self) -> bool {
        !matches!(self, ModuleStatus::Locked)
    }
}
