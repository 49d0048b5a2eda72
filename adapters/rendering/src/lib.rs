#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Garden Invasion adapters.
//!
//! Backends receive a declarative [`Scene`] every frame and draw it however
//! they like; the frame callback owns the simulation and answers with
//! [`FrameDirectives`] describing the side effects the backend must perform
//! (sound cues to trigger, whether to leave the loop).

use anyhow::Result;
use garden_invasion_core::{Health, Rect, SoundCue, WallNutSlot, ZombieId, ZombieKind};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Placeholder palette used when no sprite assets are available.
///
/// The byte values reproduce the original fallback rectangles.
pub mod palette {
    use super::Color;

    /// Default plant body.
    pub const PLANT_GREEN: Color = Color::from_rgb_u8(0x62, 0xde, 0x6d);
    /// Red zombie body.
    pub const ZOMBIE_RED: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
    /// Orange zombie body.
    pub const ZOMBIE_ORANGE: Color = Color::from_rgb_u8(0xff, 0xa5, 0x00);
    /// Undamaged wall-nut shell.
    pub const WALL_NUT_BROWN: Color = Color::from_rgb_u8(0x8b, 0x45, 0x13);
    /// Plant projectile.
    pub const PROJECTILE_GREEN: Color = Color::from_rgb_u8(0x2f, 0x95, 0x32);
    /// Zombie projectile.
    pub const PROJECTILE_YELLOW: Color = Color::from_rgb_u8(0xff, 0xff, 0x00);
    /// Life counter hearts.
    pub const HEART_RED: Color = Color::from_rgb_u8(0xc8, 0x2a, 0x36);
    /// Garden background.
    pub const GARDEN_NIGHT: Color = Color::from_rgb_u8(0x10, 0x18, 0x10);
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the move-left key is held this frame.
    pub move_left: bool,
    /// Whether the move-right key is held this frame.
    pub move_right: bool,
    /// Wall-nut slot requested by a number key press, if any.
    pub place_slot: Option<WallNutSlot>,
    /// Whether the adapter detected a quit request this frame.
    pub quit_requested: bool,
}

/// Side effects the frame callback asks the backend to perform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameDirectives {
    /// Fire-and-forget sound cues to trigger this frame.
    pub sound_cues: Vec<SoundCue>,
    /// Whether the backend should leave its frame loop.
    pub exit_requested: bool,
}

impl FrameDirectives {
    /// Creates an empty directive set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Immutable description of the plant for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantPresentation {
    /// Bounding box of the plant.
    pub rect: Rect,
    /// Tint selected by the active skin.
    pub tint: Color,
}

/// Immutable description of a zombie for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombiePresentation {
    /// Identifier of the zombie.
    pub id: ZombieId,
    /// Variant of the zombie, selecting its body color.
    pub kind: ZombieKind,
    /// Bounding box of the zombie.
    pub rect: Rect,
    /// Whether the zombie is past its activation delay.
    pub active: bool,
}

impl ZombiePresentation {
    /// Body color for the zombie's variant.
    #[must_use]
    pub const fn body_color(&self) -> Color {
        match self.kind {
            ZombieKind::Red => palette::ZOMBIE_RED,
            ZombieKind::Orange => palette::ZOMBIE_ORANGE,
        }
    }
}

/// Immutable description of a wall-nut for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallNutPresentation {
    /// Slot the wall-nut occupies.
    pub slot: WallNutSlot,
    /// Bounding box of the wall-nut.
    pub rect: Rect,
    /// Health remaining, selecting the damage tint.
    pub health: Health,
}

impl WallNutPresentation {
    /// Shell color, lightened once the wall-nut has taken damage.
    #[must_use]
    pub fn shell_color(&self) -> Color {
        if self.health.get() <= 1 {
            palette::WALL_NUT_BROWN.lighten(0.35)
        } else {
            palette::WALL_NUT_BROWN
        }
    }
}

/// Immutable description of a projectile for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Bounding box of the projectile.
    pub rect: Rect,
    /// Fill color of the projectile.
    pub color: Color,
}

/// Heads-up display state rendered above the playfield.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudPresentation {
    /// Life points remaining on the plant.
    pub lives: u32,
    /// One-line description of the campaign state.
    pub status_line: String,
}

/// Declarative scene drawn by rendering backends each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Width of the playfield in world units.
    pub playfield_width: f32,
    /// Height of the playfield in world units.
    pub playfield_height: f32,
    /// The plant, absent once it has been destroyed.
    pub plant: Option<PlantPresentation>,
    /// Every zombie on the playfield.
    pub zombies: Vec<ZombiePresentation>,
    /// Every standing wall-nut.
    pub wall_nuts: Vec<WallNutPresentation>,
    /// Live plant projectiles.
    pub plant_projectiles: Vec<ProjectilePresentation>,
    /// Live zombie projectiles.
    pub zombie_projectiles: Vec<ProjectilePresentation>,
    /// Heads-up display state.
    pub hud: HudPresentation,
    /// Whether the defeat overlay should be drawn.
    pub game_over: bool,
    /// Whether the victory overlay should be drawn.
    pub victory: bool,
}

impl Scene {
    /// Creates an empty scene for a playfield of the provided dimensions.
    #[must_use]
    pub fn new(playfield_width: f32, playfield_height: f32) -> Self {
        Self {
            playfield_width,
            playfield_height,
            plant: None,
            zombies: Vec::new(),
            wall_nuts: Vec::new(),
            plant_projectiles: Vec::new(),
            zombie_projectiles: Vec::new(),
            hud: HudPresentation::default(),
            game_over: false,
            victory: false,
        }
    }

    /// Clears the per-frame entity lists while keeping the configuration.
    pub fn clear_entities(&mut self) {
        self.plant = None;
        self.zombies.clear();
        self.wall_nuts.clear();
        self.plant_projectiles.clear();
        self.zombie_projectiles.clear();
    }
}

/// Top-level description of the window a backend should open.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title applied to the backend's window.
    pub window_title: String,
    /// Color used to clear the frame before drawing.
    pub clear_color: Color,
    /// Initial scene presented before the first update.
    pub scene: Scene,
}

/// Abstraction implemented by rendering backends.
pub trait RenderingBackend {
    /// Runs the frame loop until the callback requests an exit.
    ///
    /// The callback receives the frame delta time and the polled input, and
    /// mutates the scene in place; the returned directives tell the backend
    /// which sounds to trigger and when to stop.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameDirectives + 'static;
}
