//! User preferences persisted alongside progress.

use serde::{Deserialize, Serialize};

/// First-run flow flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingState {
    /// Intro slides were finished
    pub has_completed_onboarding: bool,

    /// Educational-use disclaimer was accepted
    pub has_accepted_disclaimer: bool,
}

/// Sound settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master mute
    pub is_muted: bool,

    /// Background music volume, 0..=1
    pub music_volume: f32,

    /// Sound effect volume, 0..=1
    pub sfx_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            is_muted: false,
            music_volume: 0.3,
            sfx_volume: 0.5,
        }
    }
}

impl AudioSettings {
    /// Flip the mute flag.
    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    /// Set music volume, clamped to 0..=1.
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    /// Set effect volume, clamped to 0..=1.
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = clamp_volume(volume);
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
