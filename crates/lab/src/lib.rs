//! Virtual lab - launch evaluation and the Moon Mission game.

#![warn(missing_docs)]

pub mod model;
pub mod mission;

pub use model::LaunchModel;
pub use mission::{MissionPhase, MoonMission, PhaseResult, LANDING_SCORE};
