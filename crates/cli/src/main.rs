//! Rocket Science CLI - lessons, launch lab and Moon Mission.

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rocketsci_app::{AppConfig, AppState};
use rocketsci_core::{Catalog, LaunchDesign, ModuleStatus};
use rocketsci_lab::MissionPhase;
use rocketsci_storage::JsonStorage;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rocketsci")]
#[command(about = "Learn rocket science: lessons, launch lab and Moon Mission", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, default_value = "rocketsci.toml")]
    config: PathBuf,

    /// Directory for saved progress (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules and lessons
    Modules,
    /// Mark a lesson complete
    Complete {
        /// Lesson ID
        lesson: String,
    },
    /// Evaluate a rocket design
    Launch {
        /// Thrust (kN)
        #[arg(long, default_value = "300")]
        thrust: f64,
        /// Fuel mass (kg)
        #[arg(long, default_value = "5000")]
        fuel: f64,
        /// Payload mass (kg)
        #[arg(long, default_value = "200")]
        payload: f64,
    },
    /// Show progress and career stats
    Stats,
    /// Fly the Moon Mission
    Mission {
        /// RNG seed for a repeatable flight
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Reset saved state (progress and career when no flag is given)
    Reset {
        /// Clear completed lessons
        #[arg(long)]
        progress: bool,
        /// Zero career stats
        #[arg(long)]
        career: bool,
        /// Show onboarding again
        #[arg(long)]
        onboarding: bool,
    },
    /// Finish onboarding and accept the disclaimer
    Onboard,
    /// Show or change audio settings
    Audio {
        /// Mute all sound
        #[arg(long, conflicts_with = "unmute")]
        mute: bool,
        /// Unmute
        #[arg(long)]
        unmute: bool,
        /// Music volume (0-1)
        #[arg(long)]
        music: Option<f32>,
        /// Effects volume (0-1)
        #[arg(long)]
        sfx: Option<f32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(Some(cli.config.as_path())).await?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    // Open storage
    let storage = JsonStorage::new(&config.data_dir).await?;
    info!("Using data directory {}", storage.root().display());
    let mut state = AppState::load(storage, Arc::new(Catalog::reference()), &config).await?;

    match cli.command {
        Commands::Modules => {
            let summary = state.progress_summary();
            println!(
                "Lessons {}/{} ({:.0}%)",
                summary.completed_lessons, summary.total_lessons, summary.percentage
            );
            for module in state.catalog().modules() {
                let status = state
                    .module_completion_status(module.id.as_str())
                    .unwrap_or(ModuleStatus::Locked);
                println!("{} {} - {} [{}]", format_status(status), module.id, module.title, module.subtitle);
                if !status.is_unlocked() {
                    continue;
                }
                for lesson in &module.lessons {
                    let mark = if state.is_lesson_completed(lesson.id.as_str()) { "x" } else { " " };
                    println!("    [{}] {:5} {} ({})", mark, lesson.id, lesson.title, lesson.duration);
                }
            }
        }
        Commands::Complete { lesson } => {
            state.on_module_unlocked(|event| {
                println!("Module unlocked: {}!", event.title);
            });

            if state.catalog().lesson(&lesson).is_none() {
                println!("Unknown lesson: {}", lesson);
                return Ok(());
            }
            if let Some(blocker) = state.blocking_prerequisite(&lesson) {
                println!("Lesson {} is locked. Complete \"{}\" to unlock", lesson, blocker.title);
                return Ok(());
            }
            let already = state.is_lesson_completed(&lesson);
            state.mark_lesson_complete(lesson.as_str()).await;
            if already {
                println!("Lesson {} was already complete", lesson);
            } else {
                println!("Completed lesson {}", lesson);
            }
        }
        Commands::Launch { thrust, fuel, payload } => {
            state.validate_design(&LaunchDesign::new(thrust, fuel, payload))?;

            let report = state.evaluate_launch(thrust, fuel, payload).await;
            println!("Design: {} kN thrust, {} kg fuel, {} kg payload", thrust, fuel, payload);
            println!("  Total mass: {:.0} kg", report.total_mass_kg);
            println!("  Thrust-to-weight: {:.2}", report.thrust_to_weight);
            println!("  Delta-v: {:.0} m/s", report.delta_v);
            println!("{}", report.outcome.status());
            println!("  {}", report.details());
            if report.altitude_km > 0 {
                println!("  Max altitude: {} km", report.altitude_km);
            }
        }
        Commands::Stats => {
            let summary = state.progress_summary();
            let stats = state.career_stats();
            println!("Rocket Science Status");
            println!(
                "  Lessons: {}/{} ({:.0}%)",
                summary.completed_lessons, summary.total_lessons, summary.percentage
            );
            println!("  Modules completed: {}/{}", summary.completed_modules(), summary.modules.len());
            println!("  Simulations: {}", stats.simulation_count);
            println!(
                "  Successful launches: {} ({:.0}%)",
                stats.successful_launches,
                stats.success_rate() * 100.0
            );
            println!("  Best altitude: {} km", stats.best_altitude_km);
        }
        Commands::Mission { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let end = state.fly_mission(&mut rng);

            let mission = state.mission();
            for phase in mission.completed_phases() {
                println!(
                    "  {} complete - {} ({:.1}s)",
                    phase.name(),
                    phase.description(),
                    phase.duration().as_secs_f32()
                );
            }
            match end {
                MissionPhase::Success => println!("Mission Complete! You landed on the Moon!"),
                _ => println!(
                    "Mission Failed: {}",
                    mission.failure_reason().unwrap_or("unknown failure")
                ),
            }
            println!(
                "Score {} | Attempts {} | Success rate {:.0}%",
                mission.score(),
                mission.attempts(),
                mission.success_rate() * 100.0
            );
        }
        Commands::Reset { progress, career, onboarding } => {
            let all = !(progress || career || onboarding);
            if progress || all {
                state.reset_progress().await;
                println!("Progress reset");
            }
            if career || all {
                state.reset_career_stats().await;
                println!("Career stats reset");
            }
            if onboarding {
                state.reset_onboarding().await;
                println!("Onboarding reset");
            }
        }
        Commands::Onboard => {
            state.complete_onboarding().await;
            state.accept_disclaimer().await;
            println!("Welcome aboard!");
        }
        Commands::Audio { mute, unmute, music, sfx } => {
            let muted = state.audio().is_muted;
            if (mute && !muted) || (unmute && muted) {
                state.toggle_mute().await;
            }
            if let Some(volume) = music {
                state.set_music_volume(volume).await;
            }
            if let Some(volume) = sfx {
                state.set_sfx_volume(volume).await;
            }

            let audio = state.audio();
            println!("Audio");
            println!("  Muted: {}", audio.is_muted);
            println!("  Music volume: {:.2}", audio.music_volume);
            println!("  Effects volume: {:.2}", audio.sfx_volume);
        }
    }

    Ok(())
}

fn format_status(status: ModuleStatus) -> &'static str {
    match status {
        ModuleStatus::Locked => "LOCKED",
        ModuleStatus::Unlocked => "OPEN  ",
        ModuleStatus::Completed => "DONE  ",
    }
}
