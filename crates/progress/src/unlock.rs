//! Unlock derivation over a catalog and a completed-lesson set.
//!
//! Everything here is recomputed from scratch on each call; nothing is
//! cached or persisted.

use std::collections::BTreeSet;
use rocketsci_core::{Catalog, Module, ModuleId, ProgressState};

/// Whether every lesson of `module_id` is completed.
///
/// A module without lessons is vacuously complete. An unknown module id is
/// never complete.
pub fn is_module_completed(catalog: &Catalog, completed: &ProgressState, module_id: &str) -> bool {
    catalog
        .module(module_id)
        .is_some_and(|module| module_lessons_completed(module, completed))
}

fn module_lessons_completed(module: &Module, completed: &ProgressState) -> bool {
    module.lessons.iter().all(|l| completed.contains(l.id.as_str()))
}

/// Whether `module` is available: it has no prerequisite or its
/// prerequisite is complete.
pub fn is_unlocked(catalog: &Catalog, completed: &ProgressState, module: &Module) -> bool {
    match &module.required_module_id {
        None => true,
        Some(required) => is_module_completed(catalog, completed, required.as_str()),
    }
}

/// Ids of every unlocked module.
///
/// Single pass in catalog order. Each module depends only on whether its
/// direct prerequisite is *complete*, not on that prerequisite being
/// unlocked, so list order and forward references do not matter.
pub fn compute_unlocked_modules(catalog: &Catalog, completed: &ProgressState) -> BTreeSet<ModuleId> {
    catalog
        .modules()
        .iter()
        .filter(|m| is_unlocked(catalog, completed, m))
        .map(|m| m.id.clone())
        .collect()
}

/// The module to celebrate after a transition from `previous` to `current`.
///
/// Only gated modules celebrate, and nothing fires when `previous` is empty
/// (the first computation at startup). When several modules unlock at once
/// the first in catalog order is reported.
pub fn detect_newly_unlocked<'a>(
    previous: &BTreeSet<ModuleId>,
    current: &BTreeSet<ModuleId>,
    catalog: &'a Catalog,
) -> Option<&'a Module> {
    if previous.is_empty() {
        return None;
    }

    catalog
        .modules()
        .iter()
        .find(|m| !m.is_root() && current.contains(&m.id) && !previous.contains(&m.id))
}
