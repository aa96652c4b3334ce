//! Scripted Moon Mission: a chain of phases, each passed or failed by a
//! single roll against its success rate.
//!
//! Timing and animation belong to the caller; [`MoonMission::advance`]
//! resolves whichever phase is in flight.

use std::time::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Points awarded for a completed landing.
pub const LANDING_SCORE: u32 = 100;

/// Mission phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionPhase {
    /// On the pad
    Ready,
    /// Earth launch
    Launch,
    /// Parking orbit stabilization
    Orbit,
    /// Trans-lunar injection
    Transfer,
    /// Powered descent
    Descent,
    /// Touchdown
    Landing,
    /// Landed
    Success,
    /// Lost
    Failure,
}

impl MissionPhase {
    /// Phases flown in order, excluding the terminal states.
    pub const FLIGHT: [MissionPhase; 5] = [
        MissionPhase::Launch,
        MissionPhase::Orbit,
        MissionPhase::Transfer,
        MissionPhase::Descent,
        MissionPhase::Landing,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            MissionPhase::Ready => "Ready",
            MissionPhase::Launch => "Earth Launch",
            MissionPhase::Orbit => "Orbit Stabilization",
            MissionPhase::Transfer => "Moon Transfer",
            MissionPhase::Descent => "Lunar Descent",
            MissionPhase::Landing => "Soft Landing",
            MissionPhase::Success => "Mission Complete",
            MissionPhase::Failure => "Mission Failed",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            MissionPhase::Ready => "Prepare for launch",
            MissionPhase::Launch => "Escape Earth's atmosphere",
            MissionPhase::Orbit => "Achieve stable parking orbit",
            MissionPhase::Transfer => "Trans-lunar injection burn",
            MissionPhase::Descent => "Begin powered descent",
            MissionPhase::Landing => "Touch down on the Moon",
            MissionPhase::Success => "Successful Moon landing!",
            MissionPhase::Failure => "Better luck next time",
        }
    }

    /// How long the presentation should spend on the phase.
    pub fn duration(self) -> Duration {
        let ms = match self {
            MissionPhase::Launch | MissionPhase::Transfer | MissionPhase::Landing => 3000,
            MissionPhase::Orbit | MissionPhase::Descent => 2500,
            _ => 0,
        };
        Duration::from_millis(ms)
    }

    /// Chance of passing the phase.
    pub fn success_rate(self) -> f64 {
        match self {
            MissionPhase::Launch => 0.95,
            MissionPhase::Orbit => 0.9,
            MissionPhase::Transfer => 0.92,
            MissionPhase::Descent => 0.88,
            MissionPhase::Landing => 0.85,
            _ => 1.0,
        }
    }

    /// Phase entered after passing this one.
    pub fn next(self) -> Option<MissionPhase> {
        match self {
            MissionPhase::Ready => Some(MissionPhase::Launch),
            MissionPhase::Launch => Some(MissionPhase::Orbit),
            MissionPhase::Orbit => Some(MissionPhase::Transfer),
            MissionPhase::Transfer => Some(MissionPhase::Descent),
            MissionPhase::Descent => Some(MissionPhase::Landing),
            MissionPhase::Landing => Some(MissionPhase::Success),
            MissionPhase::Success | MissionPhase::Failure => None,
        }
    }

    /// Whether the phase is being flown.
    pub fn is_active(self) -> bool {
        Self::FLIGHT.contains(&self)
    }

    /// Whether the mission has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, MissionPhase::Success | MissionPhase::Failure)
    }
}

/// What one call to [`MoonMission::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseResult {
    /// The phase passed and `next` is now current
    Passed {
        /// Resolved phase
        phase: MissionPhase,
        /// Phase now in flight, or `Success`
        next: MissionPhase,
    },
    /// The phase failed and the mission is over
    Failed {
        /// Resolved phase
        phase: MissionPhase,
        /// Why
        reason: String,
    },
    /// Nothing in flight
    Idle,
}

/// Moon Mission state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoonMission {
    phase: MissionPhase,
    completed_phases: Vec<MissionPhase>,
    score: u32,
    attempts: u32,
    failure_reason: Option<String>,
}

impl Default for MoonMission {
    fn default() -> Self {
        Self::new()
    }
}

impl MoonMission {
    /// A mission on the pad.
    pub fn new() -> Self {
        Self {
            phase: MissionPhase::Ready,
            completed_phases: Vec::new(),
            score: 0,
            attempts: 0,
            failure_reason: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    /// Phases passed in the current attempt.
    pub fn completed_phases(&self) -> &[MissionPhase] {
        &self.completed_phases
    }

    /// Points earned across attempts.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Missions started.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Share of attempts that ended in a landing, 0 before the first one.
    pub fn success_rate(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            (self.score / LANDING_SCORE) as f32 / self.attempts as f32
        }
    }

    /// Why the last attempt failed.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Begin a new attempt from launch.
    pub fn start(&mut self) {
        self.phase = MissionPhase::Launch;
        self.completed_phases.clear();
        self.failure_reason = None;
        self.attempts += 1;
        info!("Moon mission attempt {} started", self.attempts);
    }

    /// Return to the pad, keeping score and attempt count.
    pub fn reset(&mut self) {
        self.phase = MissionPhase::Ready;
        self.completed_phases.clear();
        self.failure_reason = None;
    }

    /// Resolve the phase in flight.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PhaseResult {
        let phase = self.phase;
        if !phase.is_active() {
            return PhaseResult::Idle;
        }

        let roll: f64 = rng.gen();
        if roll > phase.success_rate() {
            let reason = failure_reason(phase, rng);
            info!("Moon mission failed during {}: {}", phase.name(), reason);
            self.phase = MissionPhase::Failure;
            self.failure_reason = Some(reason.clone());
            return PhaseResult::Failed { phase, reason };
        }

        self.completed_phases.push(phase);
        let next = phase.next().unwrap_or(MissionPhase::Success);
        self.phase = next;
        if next == MissionPhase::Success {
            self.score += LANDING_SCORE;
            info!("Moon landing achieved, score {}", self.score);
        } else {
            debug!("{} complete, entering {}", phase.name(), next.name());
        }
        PhaseResult::Passed { phase, next }
    }

    /// Fly phases until the mission ends, returning the final phase.
    ///
    /// Starts a new attempt if the mission is not already in flight.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MissionPhase {
        if !self.phase.is_active() {
            self.start();
        }
        while self.phase.is_active() {
            self.advance(rng);
        }
        self.phase
    }
}

fn failure_reason<R: Rng + ?Sized>(phase: MissionPhase, rng: &mut R) -> String {
    let reasons = [
        format!("Engine malfunction during {}", phase.name().to_lowercase()),
        "Navigation error detected".to_string(),
        "Fuel exhausted prematurely".to_string(),
        "Communication lost".to_string(),
        "Unexpected system failure".to_string(),
    ];
    let pick: f64 = rng.gen();
    let idx = ((pick * reasons.len() as f64) as usize).min(reasons.len() - 1);
    reasons[idx].clone()
}
