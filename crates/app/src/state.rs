//! Application state container.
//!
//! `AppState` is owned by the application root and handed to the
//! presentation layer by reference. It loads every persisted record at
//! startup and writes the affected record back after each mutation.

use std::collections::BTreeSet;
use std::sync::Arc;
use rand::Rng;
use rocketsci_core::{
    AudioSettings, CareerStats, Catalog, DesignRanges, LaunchDesign, LaunchReport, LessonId,
    Module, ModuleId, ModuleStatus, ModuleUnlocked, OnboardingState, ProgressState,
};
use rocketsci_lab::{LaunchModel, MissionPhase, MoonMission};
use rocketsci_progress::{detect_newly_unlocked, ProgressSummary, ProgressTracker};
use rocketsci_storage::{load_or_default, save_record, KeyValueStore};
use serde::Serialize;
use tracing::{info, warn};
use crate::config::AppConfig;
use crate::error::Result;

/// Storage key for completed lessons.
pub const PROGRESS_KEY: &str = "rocket-science-progress";
/// Storage key for career statistics.
pub const CAREER_KEY: &str = "rocket-science-career";
/// Storage key for onboarding flags.
pub const ONBOARDING_KEY: &str = "rocket-science-onboarding";
/// Storage key for audio settings.
pub const AUDIO_KEY: &str = "rocket-science-audio";

type UnlockListener = Box<dyn FnMut(&ModuleUnlocked) + Send>;

/// Everything the presentation layer reads and mutates.
pub struct AppState<S: KeyValueStore> {
    storage: S,
    tracker: ProgressTracker,
    career: CareerStats,
    onboarding: OnboardingState,
    audio: AudioSettings,
    model: LaunchModel,
    ranges: DesignRanges,
    mission: MoonMission,
    /// Unlocked set from the previous computation, for celebration detection
    previous_unlocked: BTreeSet<ModuleId>,
    listeners: Vec<UnlockListener>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Rehydrate state from `storage`. Absent records start empty.
    ///
    /// The unlock view computed here is the baseline; it never raises a
    /// celebration.
    pub async fn load(storage: S, catalog: Arc<Catalog>, config: &AppConfig) -> Result<Self> {
        let progress: ProgressState = load_or_default(&storage, PROGRESS_KEY).await?;
        let career: CareerStats = load_or_default(&storage, CAREER_KEY).await?;
        let onboarding: OnboardingState = load_or_default(&storage, ONBOARDING_KEY).await?;
        let audio: AudioSettings = load_or_default(&storage, AUDIO_KEY).await?;

        let tracker = ProgressTracker::with_state(catalog, progress);
        let previous_unlocked = tracker.unlocked_modules();
        info!(
            "Loaded state: {} lessons completed, {} modules unlocked, {} launches",
            tracker.state().len(),
            previous_unlocked.len(),
            career.simulation_count
        );

        Ok(Self {
            storage,
            tracker,
            career,
            onboarding,
            audio,
            model: config.launch,
            ranges: config.ranges,
            mission: MoonMission::new(),
            previous_unlocked,
            listeners: Vec::new(),
        })
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // === Reads ===

    /// The lesson catalog.
    pub fn catalog(&self) -> &Catalog {
        self.tracker.catalog()
    }

    /// Completed lesson ids.
    pub fn completed_lessons(&self) -> &ProgressState {
        self.tracker.state()
    }

    /// Whether a lesson is completed.
    pub fn is_lesson_completed(&self, lesson_id: &str) -> bool {
        self.tracker.is_lesson_completed(lesson_id)
    }

    /// Ids of every unlocked module, recomputed on each call.
    pub fn unlocked_modules(&self) -> BTreeSet<ModuleId> {
        self.tracker.unlocked_modules()
    }

    /// Progression state of a module, `None` for unknown ids.
    pub fn module_completion_status(&self, module_id: &str) -> Option<ModuleStatus> {
        self.tracker.module_status(module_id)
    }

    /// Completion totals.
    pub fn progress_summary(&self) -> ProgressSummary {
        self.tracker.summary()
    }

    /// Launch statistics.
    pub fn career_stats(&self) -> CareerStats {
        self.career
    }

    /// Onboarding flags.
    pub fn onboarding(&self) -> OnboardingState {
        self.onboarding
    }

    /// Audio settings.
    pub fn audio(&self) -> AudioSettings {
        self.audio
    }

    /// The unfinished prerequisite that keeps a lesson's module locked.
    ///
    /// `None` when the lesson is open for study or not in the catalog.
    pub fn blocking_prerequisite(&self, lesson_id: &str) -> Option<&Module> {
        let module = self.catalog().module_of_lesson(lesson_id)?;
        if self.module_completion_status(module.id.as_str())?.is_unlocked() {
            return None;
        }
        let required = module.required_module_id.as_ref()?;
        self.catalog().module(required.as_str())
    }

    /// Check a design against the configured ranges.
    pub fn validate_design(&self, design: &LaunchDesign) -> Result<()> {
        Ok(self.ranges.validate(design)?)
    }

    /// Moon Mission state for this session.
    pub fn mission(&self) -> &MoonMission {
        &self.mission
    }

    // === Notifications ===

    /// Call `listener` whenever user progress unlocks a gated module.
    pub fn on_module_unlocked<F>(&mut self, listener: F)
    where
        F: FnMut(&ModuleUnlocked) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // === Writes ===

    /// Mark a lesson complete and persist.
    ///
    /// Returns the unlock event if this completion unlocked a module.
    pub async fn mark_lesson_complete(&mut self, lesson_id: impl Into<LessonId>) -> Option<ModuleUnlocked> {
        if !self.tracker.mark_lesson_complete(lesson_id) {
            return None;
        }
        persist(&mut self.storage, PROGRESS_KEY, self.tracker.state()).await;
        self.refresh_unlocks()
    }

    /// Recompute the unlock view and notify listeners of a new unlock.
    fn refresh_unlocks(&mut self) -> Option<ModuleUnlocked> {
        let current = self.tracker.unlocked_modules();
        let event = detect_newly_unlocked(&self.previous_unlocked, &current, self.tracker.catalog())
            .map(ModuleUnlocked::new);
        self.previous_unlocked = current;

        let event = event?;
        info!("Module unlocked: {} ({})", event.title, event.module_id);
        for listener in &mut self.listeners {
            listener(&event);
        }
        Some(event)
    }

    /// Evaluate a design, fold it into career stats and persist.
    pub async fn evaluate_launch(
        &mut self,
        thrust_kn: f64,
        fuel_mass_kg: f64,
        payload_mass_kg: f64,
    ) -> LaunchReport {
        let report = self
            .model
            .evaluate(LaunchDesign::new(thrust_kn, fuel_mass_kg, payload_mass_kg));
        self.career.record(&report);
        persist(&mut self.storage, CAREER_KEY, &self.career).await;
        report
    }

    /// Clear completed lessons. Raises no unlock event.
    pub async fn reset_progress(&mut self) {
        self.tracker.reset();
        self.previous_unlocked = self.tracker.unlocked_modules();
        persist(&mut self.storage, PROGRESS_KEY, self.tracker.state()).await;
        info!("Progress reset");
    }

    /// Zero career statistics.
    pub async fn reset_career_stats(&mut self) {
        self.career = CareerStats::default();
        persist(&mut self.storage, CAREER_KEY, &self.career).await;
        info!("Career stats reset");
    }

    /// Record that onboarding finished.
    pub async fn complete_onboarding(&mut self) {
        self.onboarding.has_completed_onboarding = true;
        persist(&mut self.storage, ONBOARDING_KEY, &self.onboarding).await;
    }

    /// Record that the disclaimer was accepted.
    pub async fn accept_disclaimer(&mut self) {
        self.onboarding.has_accepted_disclaimer = true;
        persist(&mut self.storage, ONBOARDING_KEY, &self.onboarding).await;
    }

    /// Show onboarding again on next start.
    pub async fn reset_onboarding(&mut self) {
        self.onboarding = OnboardingState::default();
        persist(&mut self.storage, ONBOARDING_KEY, &self.onboarding).await;
    }

    /// Flip mute.
    pub async fn toggle_mute(&mut self) {
        self.audio.toggle_mute();
        persist(&mut self.storage, AUDIO_KEY, &self.audio).await;
    }

    /// Set music volume (clamped to 0..=1).
    pub async fn set_music_volume(&mut self, volume: f32) {
        self.audio.set_music_volume(volume);
        persist(&mut self.storage, AUDIO_KEY, &self.audio).await;
    }

    /// Set effect volume (clamped to 0..=1).
    pub async fn set_sfx_volume(&mut self, volume: f32) {
        self.audio.set_sfx_volume(volume);
        persist(&mut self.storage, AUDIO_KEY, &self.audio).await;
    }

    /// Fly a complete Moon Mission attempt.
    pub fn fly_mission<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MissionPhase {
        self.mission.run(rng)
    }
}

/// Save a record; failures are logged and otherwise ignored.
async fn persist<S, T>(storage: &mut S, key: &str, record: &T)
where
    S: KeyValueStore,
    T: Serialize + Sync,
{
    if let Err(e) = save_record(storage, key, record).await {
        warn!("Failed to persist {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketsci_core::LaunchOutcome;
    use rocketsci_storage::{MemoryStorage, Result as StorageResult, StorageError};
    use serde_json::Value;
    use std::sync::Mutex;

    async fn fresh() -> AppState<MemoryStorage> {
        AppState::load(MemoryStorage::new(), Arc::new(Catalog::reference()), &AppConfig::default())
            .await
            .unwrap()
    }

    async fn complete_module<S: KeyValueStore>(state: &mut AppState<S>, module_id: &str) -> Vec<ModuleUnlocked> {
        let lessons: Vec<LessonId> = state
            .catalog()
            .module(module_id)
            .unwrap()
            .lessons
            .iter()
            .map(|l| l.id.clone())
            .collect();
        let mut events = Vec::new();
        for lesson in lessons {
            events.extend(state.mark_lesson_complete(lesson).await);
        }
        events
    }

    #[tokio::test]
    async fn test_initial_state_is_empty() {
        let state = fresh().await;
        assert!(state.completed_lessons().is_empty());
        assert_eq!(state.career_stats(), CareerStats::default());
        assert_eq!(state.onboarding(), OnboardingState::default());
        assert_eq!(state.audio(), AudioSettings::default());
        assert_eq!(state.unlocked_modules().len(), 1);
    }

    #[tokio::test]
    async fn test_unlock_fires_once_with_title() {
        let mut state = fresh().await;
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        state.on_module_unlocked(move |event| sink.lock().unwrap().push(event.title.clone()));

        let events = complete_module(&mut state, "newton").await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].module_id.as_str(), "space");
        assert_eq!(*seen.lock().unwrap(), vec!["Rockets in Space".to_string()]);

        // Repeating a completed lesson changes nothing.
        assert!(state.mark_lesson_complete("n3").await.is_none());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_startup_never_celebrates() {
        let mut storage = MemoryStorage::new();
        save_record(
            &mut storage,
            PROGRESS_KEY,
            &["n1", "n2", "n3"].into_iter().map(LessonId::new).collect::<ProgressState>(),
        )
        .await
        .unwrap();

        let mut state = AppState::load(storage, Arc::new(Catalog::reference()), &AppConfig::default())
            .await
            .unwrap();
        assert!(state.unlocked_modules().contains("space"));

        // An unrelated lesson after startup must not report the already-unlocked module.
        assert!(state.mark_lesson_complete("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_locked_lesson_reports_prerequisite() {
        let mut state = fresh().await;
        assert!(state.blocking_prerequisite("n1").is_none());
        assert!(state.blocking_prerequisite("zz9").is_none());

        let blocker = state.blocking_prerequisite("s1").unwrap();
        assert_eq!(blocker.title, "Newton's Laws");
        // Gravity stays behind Rockets in Space, not Newton.
        assert_eq!(state.blocking_prerequisite("g1").unwrap().id.as_str(), "space");

        complete_module(&mut state, "newton").await;
        assert!(state.blocking_prerequisite("s1").is_none());
        assert_eq!(state.blocking_prerequisite("g1").unwrap().id.as_str(), "space");
    }

    #[tokio::test]
    async fn test_design_outside_ranges_is_rejected() {
        let state = fresh().await;
        assert!(state.validate_design(&LaunchDesign::default()).is_ok());

        let err = state
            .validate_design(&LaunchDesign::new(300.0, 20000.0, 200.0))
            .unwrap_err();
        match err {
            crate::AppError::Design(e) => assert_eq!(e.parameter, "fuel mass"),
            other => panic!("expected design error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_lesson_is_harmless() {
        let mut state = fresh().await;
        assert!(state.mark_lesson_complete("zz9").await.is_none());
        assert!(state.is_lesson_completed("zz9"));
        assert_eq!(state.progress_summary().completed_lessons, 0);
    }

    #[tokio::test]
    async fn test_launch_updates_stats() {
        let mut state = fresh().await;
        let fail = state.evaluate_launch(50.0, 5000.0, 200.0).await;
        let partial = state.evaluate_launch(300.0, 5000.0, 200.0).await;
        let light = state.evaluate_launch(300.0, 1000.0, 200.0).await;

        assert_eq!(fail.outcome, LaunchOutcome::LaunchFailure);
        assert_eq!(partial.outcome, LaunchOutcome::PartialSuccess);
        assert_eq!(light.outcome, LaunchOutcome::PartialSuccess);

        let stats = state.career_stats();
        assert_eq!(stats.simulation_count, 3);
        assert_eq!(stats.successful_launches, 0);
        assert_eq!(stats.best_altitude_km, partial.altitude_km);
    }

    #[tokio::test]
    async fn test_orbit_counts_as_success() {
        let config = AppConfig {
            launch: LaunchModel {
                specific_impulse_s: 500.0,
                ..LaunchModel::default()
            },
            ..AppConfig::default()
        };
        let mut state = AppState::load(MemoryStorage::new(), Arc::new(Catalog::reference()), &config)
            .await
            .unwrap();

        let report = state.evaluate_launch(800.0, 15000.0, 50.0).await;
        assert_eq!(report.outcome, LaunchOutcome::OrbitAchieved);
        assert_eq!(state.career_stats().successful_launches, 1);
        assert_eq!(state.career_stats().best_altitude_km, 400);
    }

    #[tokio::test]
    async fn test_resets_restore_initial_values() {
        let mut state = fresh().await;
        complete_module(&mut state, "newton").await;
        state.evaluate_launch(300.0, 5000.0, 200.0).await;

        state.reset_progress().await;
        assert!(state.completed_lessons().is_empty());
        assert_eq!(state.module_completion_status("newton"), Some(ModuleStatus::Unlocked));
        assert_eq!(state.module_completion_status("space"), Some(ModuleStatus::Locked));
        assert_eq!(state.career_stats().simulation_count, 1);

        state.reset_career_stats().await;
        assert_eq!(state.career_stats(), CareerStats::default());

        // Re-completing after a reset celebrates again.
        let events = complete_module(&mut state, "newton").await;
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_state_survives_reload() {
        let mut state = fresh().await;
        complete_module(&mut state, "newton").await;
        state.evaluate_launch(300.0, 5000.0, 200.0).await;
        state.complete_onboarding().await;
        state.set_music_volume(0.8).await;
        state.toggle_mute().await;

        let storage = state.into_storage();
        let reloaded = AppState::load(storage, Arc::new(Catalog::reference()), &AppConfig::default())
            .await
            .unwrap();

        assert!(reloaded.is_lesson_completed("n2"));
        assert_eq!(reloaded.module_completion_status("newton"), Some(ModuleStatus::Completed));
        assert_eq!(reloaded.career_stats().simulation_count, 1);
        assert!(reloaded.onboarding().has_completed_onboarding);
        assert!(!reloaded.onboarding().has_accepted_disclaimer);
        assert!(reloaded.audio().is_muted);
        assert_eq!(reloaded.audio().music_volume, 0.8);
    }

    #[tokio::test]
    async fn test_json_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = rocketsci_storage::JsonStorage::new(dir.path()).await.unwrap();
        let mut state = AppState::load(storage, Arc::new(Catalog::reference()), &AppConfig::default())
            .await
            .unwrap();
        state.mark_lesson_complete("n1").await;
        drop(state);

        let storage = rocketsci_storage::JsonStorage::new(dir.path()).await.unwrap();
        let state = AppState::load(storage, Arc::new(Catalog::reference()), &AppConfig::default())
            .await
            .unwrap();
        assert!(state.is_lesson_completed("n1"));
    }

    /// Store whose writes always fail.
    struct ReadOnlyStorage;

    #[async_trait::async_trait]
    impl KeyValueStore for ReadOnlyStorage {
        async fn load(&self, _key: &str) -> StorageResult<Option<Value>> {
            Ok(None)
        }
        async fn save(&mut self, key: &str, _value: &Value) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
        async fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_save_failure_does_not_block_mutation() {
        let mut state = AppState::load(ReadOnlyStorage, Arc::new(Catalog::reference()), &AppConfig::default())
            .await
            .unwrap();
        complete_module(&mut state, "newton").await;
        assert!(state.unlocked_modules().contains("space"));
        state.evaluate_launch(300.0, 5000.0, 200.0).await;
        assert_eq!(state.career_stats().simulation_count, 1);
    }

    #[tokio::test]
    async fn test_mission_session() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut state = fresh().await;
        let mut rng = StdRng::seed_from_u64(42);
        let end = state.fly_mission(&mut rng);
        assert!(end.is_terminal());
        assert_eq!(state.mission().attempts(), 1);
    }
}
