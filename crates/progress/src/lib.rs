//! Progress Tracking
//!
//! Completed lessons, module unlocking, and unlock celebration detection.

#![warn(missing_docs)]

pub mod tracker;
pub mod unlock;
pub mod summary;

pub use tracker::ProgressTracker;
pub use unlock::{compute_unlocked_modules, detect_newly_unlocked, is_module_completed};
pub use summary::{ModuleProgress, ProgressSummary};
