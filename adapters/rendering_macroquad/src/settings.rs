//! Flat JSON settings blob persisted between sessions.
//!
//! The file holds the mixer volume and the selected plant skin. A missing or
//! corrupt file falls back to defaults; the blob is rewritten whenever a
//! value changes so the file always reflects the last session.

use std::{fs, io, path::Path};

use garden_invasion_rendering::{palette, Color};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default mixer volume on a 0–100 scale.
pub const DEFAULT_VOLUME: u32 = 50;

const MAX_VOLUME: u32 = 100;
const DEFAULT_SKIN: &str = "default";

/// Failures that can occur while loading or saving the settings blob.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("failed to access settings file: {0}")]
    Io(#[from] io::Error),
    /// The settings file exists but does not contain valid JSON.
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_volume() -> u32 {
    DEFAULT_VOLUME
}

fn default_skin() -> String {
    DEFAULT_SKIN.to_owned()
}

/// User-tunable settings persisted as a flat JSON object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_volume")]
    volume: u32,
    #[serde(default = "default_skin")]
    player_skin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            player_skin: default_skin(),
        }
    }
}

impl Settings {
    /// Loads settings from the provided path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&contents)?;
        settings.volume = settings.volume.min(MAX_VOLUME);
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// corrupt.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Writes the settings blob to the provided path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');
        fs::write(path, contents)?;
        Ok(())
    }

    /// Mixer volume on a 0–100 scale.
    #[must_use]
    pub const fn volume(&self) -> u32 {
        self.volume
    }

    /// Updates the mixer volume, clamping it to the 0–100 scale.
    pub fn set_volume(&mut self, volume: u32) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Identifier of the selected plant skin.
    #[must_use]
    pub fn player_skin(&self) -> &str {
        &self.player_skin
    }

    /// Selects a plant skin by identifier.
    pub fn set_player_skin(&mut self, skin: impl Into<String>) {
        self.player_skin = skin.into();
    }

    /// Tint applied to the plant body for the selected skin.
    ///
    /// Unknown identifiers fall back to the default tint.
    #[must_use]
    pub fn plant_tint(&self) -> Color {
        match self.player_skin.as_str() {
            "Carnivorous" => Color::from_rgb_u8(0xc8, 0x2a, 0x36),
            "Cactus" => Color::from_rgb_u8(0x2f, 0x95, 0x32),
            _ => palette::PLANT_GREEN,
        }
    }
}
