#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Garden Invasion.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries. This adapter opts into the `audio` feature because the game
//! triggers fire-and-forget sound cues; on machines without the native
//! libraries the sound bank degrades to silence while rendering keeps
//! working.
//!
//! All visuals are flat colored rectangles. The original artwork pipeline is
//! deliberately absent, so the placeholder path that other implementations
//! fall back to is the only drawing path here.

mod audio;
mod settings;

pub use audio::SoundBank;
pub use settings::{Settings, SettingsError, DEFAULT_VOLUME};

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    input::{is_key_down, is_key_pressed, KeyCode},
    shapes::draw_rectangle,
    text::{draw_text, measure_text},
    time::get_frame_time,
    window::{clear_background, next_frame, screen_height, screen_width},
};

use garden_invasion_core::{Rect, WallNutSlot};
use garden_invasion_rendering::{
    palette, Color, FrameDirectives, FrameInput, Presentation, RenderingBackend, Scene,
};

const HEART_SIZE: f32 = 20.0;
const HEART_SPACING: f32 = 28.0;
const HUD_MARGIN: f32 = 10.0;
const HUD_FONT_SIZE: f32 = 24.0;
const OVERLAY_FONT_SIZE: f32 = 64.0;
const INERT_ALPHA: f32 = 0.45;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sounds: bool,
    volume: u32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sounds: true,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = if enabled { Some(1) } else { Some(0) };
        self
    }

    /// Configures whether the backend prints frame timing metrics once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sound assets.
    #[must_use]
    pub fn with_sound_loading(mut self, enabled: bool) -> Self {
        self.load_sounds = enabled;
        self
    }

    /// Applies the mixer volume from the persisted settings.
    #[must_use]
    pub fn with_volume(mut self, volume: u32) -> Self {
        self.volume = volume;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameDirectives + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sounds,
            volume,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.playfield_width as i32,
            window_height: scene.playfield_height as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let sound_bank = if load_sounds {
                SoundBank::load(volume).await
            } else {
                SoundBank::silent()
            };

            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let background = to_macroquad_color(clear_color);

            loop {
                let input = poll_frame_input();

                let dt_seconds = get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let directives = update_scene(frame_dt, input, &mut scene);

                for cue in &directives.sound_cues {
                    sound_bank.play(*cue);
                }

                clear_background(background);
                let metrics = ScreenMetrics::fit(&scene, screen_width(), screen_height());
                draw_scene(&scene, &metrics);

                if show_fps {
                    if let Some(fps) = fps_counter.record(frame_dt) {
                        println!("FPS: {fps:.2}");
                    }
                }

                if directives.exit_requested || input.quit_requested {
                    break;
                }

                next_frame().await;
            }
        });

        Ok(())
    }
}

/// Snapshot of the keys observed during a single frame.
fn poll_frame_input() -> FrameInput {
    let move_left = is_key_down(KeyCode::Left) || is_key_down(KeyCode::A);
    let move_right = is_key_down(KeyCode::Right) || is_key_down(KeyCode::D);
    let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

    let place_slot = if is_key_pressed(KeyCode::Key1) {
        Some(WallNutSlot::new(0))
    } else if is_key_pressed(KeyCode::Key2) {
        Some(WallNutSlot::new(1))
    } else if is_key_pressed(KeyCode::Key3) {
        Some(WallNutSlot::new(2))
    } else if is_key_pressed(KeyCode::Key4) {
        Some(WallNutSlot::new(3))
    } else {
        None
    };

    FrameInput {
        move_left,
        move_right,
        place_slot,
        quit_requested,
    }
}

/// Uniform world-to-screen transform that letterboxes the playfield.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScreenMetrics {
    scale: f32,
    offset: Vec2,
}

impl ScreenMetrics {
    fn fit(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let scale = if scene.playfield_width > 0.0 && scene.playfield_height > 0.0 {
            (screen_width / scene.playfield_width).min(screen_height / scene.playfield_height)
        } else {
            1.0
        };
        let offset = Vec2::new(
            (screen_width - scene.playfield_width * scale) / 2.0,
            (screen_height - scene.playfield_height * scale) / 2.0,
        );
        Self { scale, offset }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

fn draw_world_rect(rect: &Rect, color: Color, metrics: &ScreenMetrics) {
    let top_left = metrics.to_screen(Vec2::new(rect.left(), rect.top()));
    draw_rectangle(
        top_left.x,
        top_left.y,
        rect.extent().width() * metrics.scale,
        rect.extent().height() * metrics.scale,
        to_macroquad_color(color),
    );
}

fn draw_scene(scene: &Scene, metrics: &ScreenMetrics) {
    for wall_nut in &scene.wall_nuts {
        draw_world_rect(&wall_nut.rect, wall_nut.shell_color(), metrics);
    }

    for projectile in &scene.plant_projectiles {
        draw_world_rect(&projectile.rect, projectile.color, metrics);
    }
    for projectile in &scene.zombie_projectiles {
        draw_world_rect(&projectile.rect, projectile.color, metrics);
    }

    for zombie in &scene.zombies {
        let mut color = zombie.body_color();
        if !zombie.active {
            color.alpha = INERT_ALPHA;
        }
        draw_world_rect(&zombie.rect, color, metrics);
    }

    if let Some(plant) = &scene.plant {
        draw_world_rect(&plant.rect, plant.tint, metrics);
    }

    draw_hud(scene, metrics);

    if scene.game_over {
        draw_overlay("GAME OVER", metrics, scene);
    } else if scene.victory {
        draw_overlay("VICTORY!", metrics, scene);
    }
}

fn draw_hud(scene: &Scene, metrics: &ScreenMetrics) {
    let anchor = metrics.to_screen(Vec2::new(HUD_MARGIN, HUD_MARGIN));
    for index in 0..scene.hud.lives {
        draw_rectangle(
            anchor.x + index as f32 * HEART_SPACING * metrics.scale,
            anchor.y,
            HEART_SIZE * metrics.scale,
            HEART_SIZE * metrics.scale,
            to_macroquad_color(palette::HEART_RED),
        );
    }

    let status_anchor =
        metrics.to_screen(Vec2::new(HUD_MARGIN, HUD_MARGIN + HEART_SIZE + HUD_FONT_SIZE));
    draw_text(
        &scene.hud.status_line,
        status_anchor.x,
        status_anchor.y,
        HUD_FONT_SIZE * metrics.scale,
        macroquad::color::WHITE,
    );
}

fn draw_overlay(message: &str, metrics: &ScreenMetrics, scene: &Scene) {
    let font_size = OVERLAY_FONT_SIZE * metrics.scale;
    let dimensions = measure_text(message, None, font_size as u16, 1.0);
    let center = metrics.to_screen(Vec2::new(
        scene.playfield_width / 2.0,
        scene.playfield_height / 2.0,
    ));
    draw_text(
        message,
        center.x - dimensions.width / 2.0,
        center.y,
        font_size,
        macroquad::color::WHITE,
    );
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame, yielding the average once per second.
    fn record(&mut self, dt: Duration) -> Option<f32> {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.frames += 1;
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(fps)
    }
}
