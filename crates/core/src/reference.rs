//! The shipped lesson catalog.
//!
//! Eight modules forming a single unlock chain, three lessons each.

use crate::catalog::{Catalog, Lesson, Module};

/// Build the reference module list.
pub fn reference_modules() -> Vec<Module> {
    vec![
        Module::new("newton", "Newton's Laws", "The foundation of rocket science")
            .with_lesson(Lesson::new(
                "n1",
                "First Law: Inertia",
                "3 min",
                "An object at rest stays at rest, and an object in motion stays in motion unless a force acts on it. In space there is no air resistance, so rockets keep moving even after engines cut off.",
            ))
            .with_lesson(Lesson::new(
                "n2",
                "Second Law: F=ma",
                "4 min",
                "Force equals mass times acceleration. The less mass a rocket has, the faster it accelerates with the same thrust.",
            ))
            .with_lesson(Lesson::new(
                "n3",
                "Third Law: Action-Reaction",
                "3 min",
                "Rockets push hot gas down, and the gas pushes the rocket up. This is how rockets work in the vacuum of space.",
            )),
        Module::new("space", "Rockets in Space", "Why rockets work in vacuum")
            .requires("newton")
            .with_lesson(Lesson::new(
                "s1",
                "No Air, No Problem",
                "3 min",
                "Rockets don't push against air, they push against their own exhaust.",
            ))
            .with_lesson(Lesson::new(
                "s2",
                "Thrust and Propellant",
                "4 min",
                "Rockets carry their own oxidizer mixed with fuel. Burned propellant expands and leaves the nozzle at enormous speed, creating thrust.",
            ))
            .with_lesson(Lesson::new(
                "s3",
                "The Rocket Equation",
                "5 min",
                "The Tsiolkovsky equation: going faster needs more fuel, but more fuel is more mass to push. That balance is why rockets have stages.",
            )),
        Module::new("gravity", "Gravity & Escape", "Breaking free from Earth")
            .requires("space")
            .with_lesson(Lesson::new(
                "g1",
                "What is Gravity?",
                "3 min",
                "Earth's gravity pulls everything toward its center at 9.8 m/s². Rockets must fight this constant pull.",
            ))
            .with_lesson(Lesson::new(
                "g2",
                "Escape Velocity",
                "4 min",
                "Leaving Earth for good takes 11.2 km/s, the speed needed to break free of its gravitational pull.",
            ))
            .with_lesson(Lesson::new(
                "g3",
                "Orbital Mechanics",
                "5 min",
                "Go sideways fast enough (7.8 km/s) and Earth curves away beneath you as you fall. Always falling, always missing the ground.",
            )),
        Module::new("failures", "Why Missions Fail", "Learning from mistakes")
            .requires("gravity")
            .with_lesson(Lesson::new(
                "f1",
                "Fuel Miscalculations",
                "4 min",
                "Running out of fuel mid-mission is catastrophic. Early Moon missions underestimated the fuel needed for landing and return.",
            ))
            .with_lesson(Lesson::new(
                "f2",
                "Navigation Errors",
                "4 min",
                "A tiny navigation error can mean missing the Moon by thousands of kilometers.",
            ))
            .with_lesson(Lesson::new(
                "f3",
                "Landing Challenges",
                "5 min",
                "The Moon has no atmosphere for parachutes. Landers burn precious fuel to slow down.",
            )),
        Module::new("staging", "Rocket Staging", "Shedding weight to go faster")
            .requires("failures")
            .with_lesson(Lesson::new(
                "st1",
                "Why Use Stages?",
                "4 min",
                "Empty tanks are dead weight. Dropping used stages makes the rocket lighter. Saturn V used 3 stages to reach the Moon.",
            ))
            .with_lesson(Lesson::new(
                "st2",
                "Stage Separation",
                "3 min",
                "Explosive bolts and separation motors push stages apart in milliseconds. Timing must be perfect.",
            ))
            .with_lesson(Lesson::new(
                "st3",
                "Optimal Staging",
                "5 min",
                "Drop a stage too early and fuel is wasted; too late and you carry dead weight.",
            )),
        Module::new("navigation", "Space Navigation", "Finding your way in the void")
            .requires("staging")
            .with_lesson(Lesson::new(
                "nav1",
                "Star Tracking",
                "4 min",
                "There is no GPS in deep space. Spacecraft navigate by tracking stars with precise instruments.",
            ))
            .with_lesson(Lesson::new(
                "nav2",
                "Trajectory Planning",
                "5 min",
                "You don't aim at the Moon, you aim at where it will be in 3 days.",
            ))
            .with_lesson(Lesson::new(
                "nav3",
                "Mid-Course Corrections",
                "4 min",
                "Small burns adjust the trajectory in flight. Tiny errors compound over vast distances.",
            )),
        Module::new("lunar", "Lunar Operations", "Surviving on the Moon")
            .requires("navigation")
            .with_lesson(Lesson::new(
                "lu1",
                "Lunar Descent",
                "5 min",
                "With no atmosphere, landers use rockets to slow from 6,000 km/h to zero while fuel runs out.",
            ))
            .with_lesson(Lesson::new(
                "lu2",
                "Surface Operations",
                "4 min",
                "One sixth of Earth's gravity, extreme temperature swings and deadly radiation. Every EVA is carefully planned.",
            ))
            .with_lesson(Lesson::new(
                "lu3",
                "Lunar Ascent",
                "4 min",
                "The ascent module must work on the first try. No rescue mission is possible.",
            )),
        Module::new("advanced", "Mission Control", "The brains behind the mission")
            .requires("lunar")
            .with_lesson(Lesson::new(
                "adv1",
                "Communication Delays",
                "4 min",
                "Radio signals take 1.3 seconds to reach the Moon, so real-time control is impossible.",
            ))
            .with_lesson(Lesson::new(
                "adv2",
                "Abort Scenarios",
                "5 min",
                "Return to launch site, emergency orbit, lunar flyby return: crews train for every abort mode.",
            ))
            .with_lesson(Lesson::new(
                "adv3",
                "Redundancy & Backup",
                "4 min",
                "Critical systems have backups for their backups. Apollo 13 survived because of them.",
            )),
    ]
}

impl Catalog {
    /// The shipped catalog.
    pub fn reference() -> Self {
        Catalog::unchecked(reference_modules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_catalog_validates() {
        assert!(Catalog::new(reference_modules()).is_ok());
    }

    #[test]
    fn test_reference_catalog_shape() {
        let catalog = Catalog::reference();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.lesson_count(), 24);

        let roots: Vec<_> = catalog.modules().iter().filter(|m| m.is_root()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id.as_str(), "newton");
    }

    #[test]
    fn test_reference_catalog_is_a_chain() {
        let catalog = Catalog::reference();
        let modules = catalog.modules();
        for pair in modules.windows(2) {
            assert_eq!(pair[1].required_module_id.as_ref(), Some(&pair[0].id));
        }
    }
}
