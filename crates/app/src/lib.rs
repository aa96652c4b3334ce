//! Rocket Science application layer.
//!
//! Owns the progression and lab state, wires it to persistent storage and
//! notifies listeners of module unlocks.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod state;

pub use config::{AppConfig, DEFAULT_DATA_DIR};
pub use error::{AppError, Result};
pub use state::{AppState, AUDIO_KEY, CAREER_KEY, ONBOARDING_KEY, PROGRESS_KEY};
