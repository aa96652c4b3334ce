//! Launch design inputs and classified results.

use serde::{Deserialize, Serialize};

/// A rocket design submitted to the launch evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchDesign {
    /// Engine thrust, kN
    pub thrust_kn: f64,

    /// Carried fuel, kg
    pub fuel_mass_kg: f64,

    /// Payload, kg
    pub payload_mass_kg: f64,
}

impl LaunchDesign {
    /// Create a design.
    pub fn new(thrust_kn: f64, fuel_mass_kg: f64, payload_mass_kg: f64) -> Self {
        Self {
            thrust_kn,
            fuel_mass_kg,
            payload_mass_kg,
        }
    }
}

impl Default for LaunchDesign {
    /// The lab's starting design.
    fn default() -> Self {
        Self::new(300.0, 5000.0, 200.0)
    }
}

/// Discrete mission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaunchOutcome {
    /// Thrust-to-weight below 1, the rocket never leaves the pad
    LaunchFailure,
    /// Lifted off but far short of orbital velocity
    InsufficientVelocity,
    /// Reached altitude without achieving orbit
    PartialSuccess,
    /// Stable low orbit
    OrbitAchieved,
}

impl LaunchOutcome {
    /// Short status line.
    pub fn status(self) -> &'static str {
        match self {
            LaunchOutcome::LaunchFailure => "Launch Failure",
            LaunchOutcome::InsufficientVelocity => "Insufficient Velocity",
            LaunchOutcome::PartialSuccess => "Partial Success",
            LaunchOutcome::OrbitAchieved => "Orbit Achieved!",
        }
    }

    /// Whether this counts as a successful launch.
    pub fn is_success(self) -> bool {
        matches!(self, LaunchOutcome::OrbitAchieved)
    }
}

/// Result of evaluating a design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchReport {
    /// The evaluated design
    pub design: LaunchDesign,

    /// Classified outcome
    pub outcome: LaunchOutcome,

    /// Reported altitude, km
    pub altitude_km: u32,

    /// Thrust-to-weight ratio at liftoff
    pub thrust_to_weight: f64,

    /// Achievable velocity change, m/s
    pub delta_v: f64,

    /// Fuel + payload + structure, kg
    pub total_mass_kg: f64,
}

impl LaunchReport {
    /// Whether the launch reached orbit.
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Explanation shown alongside the status line.
    pub fn details(&self) -> String {
        match self.outcome {
            LaunchOutcome::LaunchFailure => {
                "Thrust-to-weight ratio below 1! Rocket cannot lift off. Increase thrust or reduce mass."
                    .to_string()
            }
            LaunchOutcome::InsufficientVelocity => {
                "Not enough delta-v to reach orbit. Add more fuel or reduce payload.".to_string()
            }
            LaunchOutcome::PartialSuccess => format!(
                "Reached {}km but couldn't achieve orbit. Need more delta-v!",
                self.altitude_km
            ),
            LaunchOutcome::OrbitAchieved => format!(
                "Congratulations! Your rocket reached stable Low Earth Orbit at {}km.",
                self.altitude_km
            ),
        }
    }
}

/// Inclusive bounds for one design parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lowest accepted value
    pub min: f64,
    /// Highest accepted value
    pub max: f64,
}

impl Bounds {
    /// Create bounds.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Input ranges the design controls allow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignRanges {
    /// Thrust, kN
    pub thrust_kn: Bounds,
    /// Fuel mass, kg
    pub fuel_mass_kg: Bounds,
    /// Payload mass, kg
    pub payload_mass_kg: Bounds,
}

impl Default for DesignRanges {
    fn default() -> Self {
        Self {
            thrust_kn: Bounds::new(100.0, 800.0),
            fuel_mass_kg: Bounds::new(1000.0, 15000.0),
            payload_mass_kg: Bounds::new(50.0, 1000.0),
        }
    }
}

/// A design parameter outside its allowed range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{parameter} {value} is outside [{}, {}]", .bounds.min, .bounds.max)]
pub struct DesignError {
    /// Offending parameter name
    pub parameter: &'static str,
    /// Submitted value
    pub value: f64,
    /// Allowed range
    pub bounds: Bounds,
}

impl DesignRanges {
    /// Check every parameter of `design`, reporting the first violation.
    pub fn validate(&self, design: &LaunchDesign) -> Result<(), DesignError> {
        let checks = [
            ("thrust", design.thrust_kn, self.thrust_kn),
            ("fuel mass", design.fuel_mass_kg, self.fuel_mass_kg),
            ("payload mass", design.payload_mass_kg, self.payload_mass_kg),
        ];

        for (parameter, value, bounds) in checks {
            if !bounds.contains(value) {
                return Err(DesignError {
                    parameter,
                    value,
                    bounds,
                });
            }
        }
        Ok(())
    }
}
