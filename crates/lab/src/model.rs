//! Single-stage launch model.
//!
//! Thrust-to-weight decides liftoff; the Tsiolkovsky rocket equation with a
//! fixed specific impulse gives delta-v, which is bucketed against fixed
//! thresholds. Nothing is integrated over time.

use serde::{Deserialize, Serialize};
use rocketsci_core::{LaunchDesign, LaunchOutcome, LaunchReport};
use tracing::debug;

/// Constants of the launch model.
///
/// Defaults reproduce the lab's classic behaviour; every field can be
/// overridden from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchModel {
    /// Dry structure mass excluding fuel and payload, kg
    pub structure_mass_kg: f64,

    /// Standard gravity, m/s²
    pub gravity: f64,

    /// Engine specific impulse, s
    pub specific_impulse_s: f64,

    /// Share of carried fuel that is actually burned
    pub usable_fuel_fraction: f64,

    /// Below this delta-v the flight is a short hop, m/s
    pub min_useful_delta_v: f64,

    /// Delta-v needed for orbit, m/s
    pub orbital_delta_v: f64,

    /// Altitude reported for an orbit, km
    pub orbit_altitude_km: f64,

    /// Altitude per m/s of delta-v for short hops, km
    pub hop_km_per_delta_v: f64,
}

impl Default for LaunchModel {
    fn default() -> Self {
        Self {
            structure_mass_kg: 500.0,
            gravity: 9.8,
            specific_impulse_s: 320.0,
            usable_fuel_fraction: 0.9,
            min_useful_delta_v: 2000.0,
            orbital_delta_v: 9000.0,
            orbit_altitude_km: 400.0,
            hop_km_per_delta_v: 5.0,
        }
    }
}

impl LaunchModel {
    /// Fuel + payload + structure, kg.
    pub fn total_mass(&self, design: &LaunchDesign) -> f64 {
        design.fuel_mass_kg + design.payload_mass_kg + self.structure_mass_kg
    }

    /// Thrust (converted to N) over liftoff weight.
    pub fn thrust_to_weight(&self, design: &LaunchDesign) -> f64 {
        (design.thrust_kn * 1000.0) / (self.total_mass(design) * self.gravity)
    }

    /// Mass of propellant actually burned, kg.
    pub fn propellant_mass(&self, design: &LaunchDesign) -> f64 {
        design.fuel_mass_kg * self.usable_fuel_fraction
    }

    /// Ideal velocity change, m/s.
    ///
    /// `None` when the burnout mass is not positive, where the rocket
    /// equation has no finite answer.
    pub fn delta_v(&self, design: &LaunchDesign) -> Option<f64> {
        let total = self.total_mass(design);
        let burnout = total - self.propellant_mass(design);
        if total <= 0.0 || burnout <= 0.0 {
            return None;
        }
        let dv = self.specific_impulse_s * self.gravity * (total / burnout).ln();
        dv.is_finite().then_some(dv)
    }

    /// Classify a design.
    ///
    /// Rules apply in order and the first match wins: no liftoff, short hop,
    /// suborbital, orbit. A design with non-positive or non-finite inputs,
    /// or one that would burn more than its own mass, is a launch failure.
    pub fn evaluate(&self, design: LaunchDesign) -> LaunchReport {
        let total_mass = self.total_mass(&design);
        let twr = self.thrust_to_weight(&design);

        let inputs_valid = [design.thrust_kn, design.fuel_mass_kg, design.payload_mass_kg]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);

        let delta_v = match self.delta_v(&design) {
            Some(dv) if inputs_valid && twr.is_finite() => dv,
            _ => {
                debug!("Degenerate design {:?}, reporting launch failure", design);
                return LaunchReport {
                    design,
                    outcome: LaunchOutcome::LaunchFailure,
                    altitude_km: 0,
                    thrust_to_weight: if twr.is_finite() { twr } else { 0.0 },
                    delta_v: 0.0,
                    total_mass_kg: if total_mass.is_finite() { total_mass } else { 0.0 },
                };
            }
        };

        let (outcome, altitude) = if twr < 1.0 {
            (LaunchOutcome::LaunchFailure, 0.0)
        } else if delta_v < self.min_useful_delta_v {
            (LaunchOutcome::InsufficientVelocity, delta_v * self.hop_km_per_delta_v)
        } else if delta_v < self.orbital_delta_v {
            (
                LaunchOutcome::PartialSuccess,
                (delta_v / self.orbital_delta_v) * self.orbit_altitude_km,
            )
        } else {
            (LaunchOutcome::OrbitAchieved, self.orbit_altitude_km)
        };

        let report = LaunchReport {
            design,
            outcome,
            altitude_km: to_km(altitude),
            thrust_to_weight: twr,
            delta_v,
            total_mass_kg: total_mass,
        };
        debug!(
            "Evaluated launch: twr={:.2} dv={:.0} -> {:?} at {}km",
            report.thrust_to_weight, report.delta_v, report.outcome, report.altitude_km
        );
        report
    }
}

/// Round to whole kilometres; negative altitudes report as 0.
fn to_km(altitude: f64) -> u32 {
    altitude.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(thrust: f64, fuel: f64, payload: f64) -> LaunchReport {
        LaunchModel::default().evaluate(LaunchDesign::new(thrust, fuel, payload))
    }

    #[test]
    fn test_low_thrust_cannot_lift_off() {
        let report = evaluate(50.0, 5000.0, 200.0);
        assert_eq!(report.total_mass_kg, 5700.0);
        assert!((report.thrust_to_weight - 0.895).abs() < 0.001);
        assert_eq!(report.outcome, LaunchOutcome::LaunchFailure);
        assert_eq!(report.altitude_km, 0);
    }

    #[test]
    fn test_light_rocket_partial_success() {
        // dv = 3136 * ln(1700 / 800) ≈ 2363.8 m/s
        let report = evaluate(300.0, 1000.0, 200.0);
        assert!(report.thrust_to_weight > 1.0);
        assert!((report.delta_v - 2363.8).abs() < 0.5);
        assert_eq!(report.outcome, LaunchOutcome::PartialSuccess);
        assert_eq!(report.altitude_km, 105);
    }

    #[test]
    fn test_default_design_partial_success() {
        // dv = 3136 * ln(5700 / 1200) ≈ 4886.3 m/s
        let report = LaunchModel::default().evaluate(LaunchDesign::default());
        assert!((report.delta_v - 4886.3).abs() < 0.5);
        assert_eq!(report.outcome, LaunchOutcome::PartialSuccess);
        assert_eq!(report.altitude_km, 217);
    }

    #[test]
    fn test_heavy_payload_insufficient_velocity() {
        // dv = 3136 * ln(2500 / 1600) ≈ 1399.6 m/s
        let report = evaluate(100.0, 1000.0, 1000.0);
        assert_eq!(report.outcome, LaunchOutcome::InsufficientVelocity);
        assert_eq!(report.altitude_km, 6998);
    }

    #[test]
    fn test_orbit_unreachable_with_default_constants() {
        let report = evaluate(800.0, 15000.0, 50.0);
        assert!(report.delta_v < 9000.0);
        assert_eq!(report.outcome, LaunchOutcome::PartialSuccess);
    }

    #[test]
    fn test_high_isp_reaches_orbit() {
        // dv = 500 * 9.8 * ln(15550 / 2050) ≈ 9928 m/s
        let model = LaunchModel {
            specific_impulse_s: 500.0,
            ..LaunchModel::default()
        };
        let report = model.evaluate(LaunchDesign::new(800.0, 15000.0, 50.0));
        assert!(report.delta_v >= 9000.0);
        assert_eq!(report.outcome, LaunchOutcome::OrbitAchieved);
        assert_eq!(report.altitude_km, 400);
        assert!(report.is_success());
    }

    #[test]
    fn test_twr_checked_before_delta_v() {
        // Plenty of delta-v but far too heavy to leave the pad.
        let model = LaunchModel {
            specific_impulse_s: 5000.0,
            ..LaunchModel::default()
        };
        let report = model.evaluate(LaunchDesign::new(100.0, 15000.0, 50.0));
        assert_eq!(report.outcome, LaunchOutcome::LaunchFailure);
    }

    #[test]
    fn test_burning_whole_mass_is_failure_not_nan() {
        let model = LaunchModel {
            structure_mass_kg: 0.0,
            usable_fuel_fraction: 1.5,
            ..LaunchModel::default()
        };
        let report = model.evaluate(LaunchDesign::new(800.0, 5000.0, 50.0));
        assert_eq!(report.outcome, LaunchOutcome::LaunchFailure);
        assert_eq!(report.altitude_km, 0);
        assert!(report.delta_v.is_finite());
        assert!(report.thrust_to_weight.is_finite());
    }

    #[test]
    fn test_non_positive_inputs_are_failure() {
        for design in [
            LaunchDesign::new(0.0, 5000.0, 200.0),
            LaunchDesign::new(300.0, -10.0, 200.0),
            LaunchDesign::new(300.0, 5000.0, f64::NAN),
        ] {
            let report = LaunchModel::default().evaluate(design);
            assert_eq!(report.outcome, LaunchOutcome::LaunchFailure);
            assert_eq!(report.altitude_km, 0);
            assert!(report.delta_v.is_finite());
        }
    }

    #[test]
    fn test_every_slider_corner_is_finite() {
        let model = LaunchModel::default();
        for thrust in [100.0, 800.0] {
            for fuel in [1000.0, 15000.0] {
                for payload in [50.0, 1000.0] {
                    let report = model.evaluate(LaunchDesign::new(thrust, fuel, payload));
                    assert!(report.delta_v.is_finite() && report.delta_v > 0.0);
                    assert!(report.thrust_to_weight.is_finite());
                }
            }
        }
    }
}
