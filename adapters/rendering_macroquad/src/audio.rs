//! Fire-and-forget sound playback for simulation cues.
//!
//! Missing sound files degrade to silence instead of failing the boot, the
//! same way missing sprites degrade to placeholder rectangles.

use std::collections::HashMap;

use garden_invasion_core::SoundCue;
use macroquad::audio::{load_sound, play_sound, PlaySoundParams, Sound};

const CUE_FILES: [(SoundCue, &str); 5] = [
    (SoundCue::PlantShoot, "assets/sounds/shoot_plant.wav"),
    (SoundCue::PlantHit, "assets/sounds/plant_hit.wav"),
    (SoundCue::ZombieHit, "assets/sounds/zombie_hit.wav"),
    (
        SoundCue::WallNutDestroyed,
        "assets/sounds/wallnut_destroyed.wav",
    ),
    (SoundCue::GameOver, "assets/sounds/game_over.wav"),
];

/// Cache of decoded sound effects keyed by simulation cue.
#[derive(Debug)]
pub struct SoundBank {
    sounds: HashMap<SoundCue, Sound>,
    volume: f32,
}

impl SoundBank {
    /// Loads every known cue from disk, skipping files that are missing.
    ///
    /// Must be called from within the macroquad runtime.
    pub async fn load(volume_percent: u32) -> Self {
        let mut sounds = HashMap::new();
        for (cue, path) in CUE_FILES {
            match load_sound(path).await {
                Ok(sound) => {
                    let _ = sounds.insert(cue, sound);
                }
                Err(error) => {
                    println!("warning: could not load sound {path}: {error}");
                }
            }
        }
        Self {
            sounds,
            volume: volume_from_percent(volume_percent),
        }
    }

    /// Creates a bank that swallows every cue.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            sounds: HashMap::new(),
            volume: 0.0,
        }
    }

    /// Updates the playback volume from a 0–100 settings value.
    pub fn set_volume(&mut self, volume_percent: u32) {
        self.volume = volume_from_percent(volume_percent);
    }

    /// Triggers the cue's sound effect without waiting for completion.
    pub fn play(&self, cue: SoundCue) {
        if let Some(sound) = self.sounds.get(&cue) {
            play_sound(
                *sound,
                PlaySoundParams {
                    looped: false,
                    volume: self.volume,
                },
            );
        }
    }
}

fn volume_from_percent(volume_percent: u32) -> f32 {
    (volume_percent.min(100) as f32) / 100.0
}
