//! Module catalog - the static lesson structure.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use crate::id::{LessonId, ModuleId};

/// An atomic unit of content that can be marked complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier
    pub id: LessonId,

    /// Lesson title
    pub title: String,

    /// Reading time label, e.g. "3 min"
    pub duration: String,

    /// Lesson body
    pub content: String,
}

impl Lesson {
    /// Create a new lesson.
    pub fn new(
        id: impl Into<LessonId>,
        title: impl Into<String>,
        duration: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: duration.into(),
            content: content.into(),
        }
    }
}

/// A thematically grouped set of lessons, optionally gated behind a
/// prerequisite module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: ModuleId,

    /// Display name
    pub title: String,

    /// Short tagline
    pub subtitle: String,

    /// Lessons in display order
    pub lessons: Vec<Lesson>,

    /// Module that must be completed before this one unlocks
    pub required_module_id: Option<ModuleId>,
}

impl Module {
    /// Create a root module (no prerequisite).
    pub fn new(id: impl Into<ModuleId>, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            lessons: Vec::new(),
            required_module_id: None,
        }
    }

    /// Gate this module behind `module_id`.
    pub fn requires(mut self, module_id: impl Into<ModuleId>) -> Self {
        self.required_module_id = Some(module_id.into());
        self
    }

    /// Append a lesson.
    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Whether the module is always unlocked.
    pub fn is_root(&self) -> bool {
        self.required_module_id.is_none()
    }

    /// Whether `lesson_id` belongs to this module.
    pub fn contains_lesson(&self, lesson_id: &str) -> bool {
        self.lessons.iter().any(|l| l.id.as_str() == lesson_id)
    }
}

/// Errors detected while assembling a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two modules share an id
    #[error("duplicate module id: {0}")]
    DuplicateModule(ModuleId),

    /// Two lessons share an id
    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    /// A prerequisite points at a module that does not exist
    #[error("module {module} requires unknown module {required}")]
    MissingPrerequisite {
        /// The gated module
        module: ModuleId,
        /// The missing prerequisite
        required: ModuleId,
    },

    /// Prerequisite links loop back on themselves
    #[error("prerequisite cycle: {}", format_chain(.0))]
    PrerequisiteCycle(Vec<ModuleId>),
}

fn format_chain(chain: &[ModuleId]) -> String {
    chain
        .iter()
        .map(ModuleId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// The immutable module list, in display order.
///
/// Lookups go through an id index, so a module may name a prerequisite that
/// appears later in the list.
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<Module>,
    index: HashMap<ModuleId, usize>,
}

impl Catalog {
    /// Build a catalog, validating ids and prerequisite links.
    pub fn new(modules: Vec<Module>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(modules.len());
        let mut lesson_ids = HashSet::new();

        for (pos, module) in modules.iter().enumerate() {
            if index.insert(module.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateModule(module.id.clone()));
            }
            for lesson in &module.lessons {
                if !lesson_ids.insert(lesson.id.clone()) {
                    return Err(CatalogError::DuplicateLesson(lesson.id.clone()));
                }
            }
        }

        for module in &modules {
            if let Some(required) = &module.required_module_id {
                if !index.contains_key(required) {
                    return Err(CatalogError::MissingPrerequisite {
                        module: module.id.clone(),
                        required: required.clone(),
                    });
                }
            }
        }

        let catalog = Self { modules, index };
        catalog.check_cycles()?;
        Ok(catalog)
    }

    /// Build without validation, for content known to be well formed.
    pub(crate) fn unchecked(modules: Vec<Module>) -> Self {
        let index = modules
            .iter()
            .enumerate()
            .map(|(pos, m)| (m.id.clone(), pos))
            .collect();
        Self { modules, index }
    }

    /// Each module has at most one prerequisite, so walking the chain from
    /// every module is enough to find any loop.
    fn check_cycles(&self) -> Result<(), CatalogError> {
        let mut cleared: HashSet<&ModuleId> = HashSet::new();

        for start in &self.modules {
            let mut chain: Vec<&ModuleId> = Vec::new();
            let mut current = Some(start);

            while let Some(module) = current {
                if cleared.contains(&module.id) {
                    break;
                }
                if let Some(pos) = chain.iter().position(|id| **id == module.id) {
                    let mut cycle: Vec<ModuleId> = chain[pos..].iter().map(|id| (*id).clone()).collect();
                    cycle.push(module.id.clone());
                    return Err(CatalogError::PrerequisiteCycle(cycle));
                }
                chain.push(&module.id);
                current = module
                    .required_module_id
                    .as_ref()
                    .and_then(|id| self.module(id.as_str()));
            }

            cleared.extend(chain);
        }

        Ok(())
    }

    /// All modules in display order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up a module by id.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.index.get(id).map(|&pos| &self.modules[pos])
    }

    /// Find the module owning a lesson.
    pub fn module_of_lesson(&self, lesson_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.contains_lesson(lesson_id))
    }

    /// Look up a lesson by id.
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.modules
            .iter()
            .flat_map(|m| m.lessons.iter())
            .find(|l| l.id.as_str() == lesson_id)
    }

    /// Total number of lessons across all modules.
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the catalog has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
