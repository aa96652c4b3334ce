//! Career statistics accumulated across launch attempts.

use serde::{Deserialize, Serialize};
use crate::launch::LaunchReport;

/// Aggregate launch statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerStats {
    /// Evaluated launch attempts
    pub simulation_count: u64,

    /// Attempts that reached orbit (never exceeds `simulation_count`)
    pub successful_launches: u64,

    /// Highest altitude reached in any attempt, km
    pub best_altitude_km: u32,
}

impl CareerStats {
    /// Fold one evaluated attempt into the totals.
    pub fn record(&mut self, report: &LaunchReport) {
        self.simulation_count += 1;
        if report.is_success() {
            self.successful_launches += 1;
        }
        self.best_altitude_km = self.best_altitude_km.max(report.altitude_km);
    }

    /// Share of attempts that reached orbit, 0 when nothing was flown.
    pub fn success_rate(&self) -> f32 {
        if self.simulation_count == 0 {
            0.0
        } else {
            self.successful_launches as f32 / self.simulation_count as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::{LaunchDesign, LaunchOutcome};

    fn report(outcome: LaunchOutcome, altitude_km: u32) -> LaunchReport {
        LaunchReport {
            design: LaunchDesign::default(),
            outcome,
            altitude_km,
            thrust_to_weight: 2.0,
            delta_v: 0.0,
            total_mass_kg: 5700.0,
        }
    }

    #[test]
    fn test_record_accumulates() {
        let mut stats = CareerStats::default();
        stats.record(&report(LaunchOutcome::PartialSuccess, 218));
        stats.record(&report(LaunchOutcome::LaunchFailure, 0));
        stats.record(&report(LaunchOutcome::OrbitAchieved, 400));
        stats.record(&report(LaunchOutcome::InsufficientVelocity, 150));

        assert_eq!(stats.simulation_count, 4);
        assert_eq!(stats.successful_launches, 1);
        assert_eq!(stats.best_altitude_km, 400);
        assert!((stats.success_rate() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_best_altitude_never_decreases() {
        let mut stats = CareerStats::default();
        stats.record(&report(LaunchOutcome::PartialSuccess, 300));
        stats.record(&report(LaunchOutcome::PartialSuccess, 100));
        assert_eq!(stats.best_altitude_km, 300);
    }
}
