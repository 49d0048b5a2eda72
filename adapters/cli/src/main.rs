#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line launcher that boots the Garden Invasion experience.

mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use garden_invasion_rendering::{palette, FrameInput, Presentation, RenderingBackend, Scene};
use garden_invasion_rendering_macroquad::{MacroquadBackend, Settings};

use crate::session::GameSession;

const HEADLESS_FRAME: Duration = Duration::from_millis(16);

/// Launcher options for the Garden Invasion game.
#[derive(Debug, Parser)]
#[command(name = "garden-invasion", about = "Defend the garden against five waves of zombies")]
struct Options {
    /// Run the scripted simulation without opening a window.
    #[arg(long)]
    headless: bool,

    /// Maximum number of frames to simulate in headless mode.
    #[arg(long, default_value_t = 18_000)]
    frames: u32,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Render as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,

    /// Skip sound loading entirely.
    #[arg(long)]
    no_sound: bool,

    /// Path of the JSON settings blob.
    #[arg(long, default_value = "garden-invasion-settings.json")]
    settings: PathBuf,
}

fn main() -> Result<()> {
    let options = Options::parse();

    let settings = Settings::load_or_default(&options.settings);
    if !options.settings.exists() {
        if let Err(error) = settings.save(&options.settings) {
            println!("warning: could not write settings file: {error}");
        }
    }

    let session = GameSession::new(settings.plant_tint());
    println!("{}", session.welcome_banner());

    if options.headless {
        run_headless(session, options.frames);
        return Ok(());
    }

    run_windowed(session, &options, &settings)
}

/// Drives the session frame by frame without a display or audio device.
fn run_headless(mut session: GameSession, frames: u32) {
    for _ in 0..frames {
        let _ = session.advance_frame(HEADLESS_FRAME, FrameInput::default());
        if session.game_over() || session.victory() {
            break;
        }
    }
    println!("{}", session.status_line());
}

fn run_windowed(session: GameSession, options: &Options, settings: &Settings) -> Result<()> {
    let (width, height) = session.playfield_size();
    let mut scene = Scene::new(width, height);
    session.populate_scene(&mut scene);

    let presentation = Presentation {
        window_title: "Garden Invasion".to_owned(),
        clear_color: palette::GARDEN_NIGHT,
        scene,
    };

    let backend = MacroquadBackend::new()
        .with_vsync(!options.no_vsync)
        .with_show_fps(options.show_fps)
        .with_sound_loading(!options.no_sound)
        .with_volume(settings.volume());

    let mut session = session;
    backend.run(presentation, move |dt, input, scene| {
        let directives = session.advance_frame(dt, input);
        session.populate_scene(scene);
        directives
    })
}
