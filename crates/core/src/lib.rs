//! Rocket Science core data models.
//!
//! This crate defines the catalog, progress, launch and preference records
//! shared by the tracker, the lab and the application state.

#![warn(missing_docs)]

// Identities
mod id;

// Lesson structure
mod catalog;
mod reference;

// Persisted records
mod progress;
mod career;
mod preferences;

// Launch lab
mod launch;

// Notifications
mod event;

pub use id::{LessonId, ModuleId};
pub use catalog::{Catalog, CatalogError, Lesson, Module};
pub use reference::reference_modules;
pub use progress::{ModuleStatus, ProgressState};
pub use career::CareerStats;
pub use preferences::{AudioSettings, OnboardingState};
pub use launch::{Bounds, DesignError, DesignRanges, LaunchDesign, LaunchOutcome, LaunchReport};
pub use event::ModuleUnlocked;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
