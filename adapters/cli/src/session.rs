//! Frame driver that wires the world and the pure systems together.

use std::time::Duration;

use garden_invasion_core::{Command, Event, MoveDirection};
use garden_invasion_rendering::{
    palette, Color, FrameDirectives, FrameInput, PlantPresentation, ProjectilePresentation,
    Scene, WallNutPresentation, ZombiePresentation,
};
use garden_invasion_system_bootstrap::Bootstrap;
use garden_invasion_system_combat::Combat;
use garden_invasion_system_waves::{WaveDirector, WaveStatus};
use garden_invasion_world::{self as world, query, World};

/// One running game: the authoritative world plus its systems.
///
/// The same session drives both the windowed and the headless frontends; each
/// frame consists of input commands, one world tick, the system reactions,
/// and the harvest of side effects.
pub(crate) struct GameSession {
    world: World,
    waves: WaveDirector,
    combat: Combat,
    plant_tint: Color,
    game_over: bool,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl GameSession {
    /// Opens a fresh session: wall-nuts in every slot, first wave scheduled.
    pub(crate) fn new(plant_tint: Color) -> Self {
        let mut world = World::new();
        let bootstrap = Bootstrap;
        let mut commands = Vec::new();
        bootstrap.opening_commands(&mut commands);
        let mut events = Vec::new();
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }

        let mut waves = WaveDirector::new();
        waves.start_first_wave();

        Self {
            world,
            waves,
            combat: Combat::new(),
            plant_tint,
            game_over: false,
            events,
            commands,
        }
    }

    /// Banner shown when the session opens.
    pub(crate) fn welcome_banner(&self) -> &str {
        query::welcome_banner(&self.world)
    }

    /// Reports whether the plant has been destroyed.
    pub(crate) fn game_over(&self) -> bool {
        self.game_over
    }

    /// Reports whether every wave has been cleared.
    pub(crate) fn victory(&self) -> bool {
        !self.game_over && self.waves.all_waves_completed()
    }

    /// One-line campaign status for operator output and the HUD.
    pub(crate) fn status_line(&self) -> String {
        if self.game_over {
            return "GAME OVER".to_owned();
        }
        match self.waves.status() {
            WaveStatus::Waiting {
                next_wave,
                remaining,
            } => format!("Wave {next_wave} in {}s", remaining.as_secs()),
            WaveStatus::Active { wave, zombies } => {
                format!("Wave {wave} - zombies: {zombies}")
            }
            WaveStatus::Complete { wave } => format!("Wave {wave} complete"),
            WaveStatus::Victory => "VICTORY!".to_owned(),
        }
    }

    /// Advances the simulation by one frame.
    pub(crate) fn advance_frame(&mut self, dt: Duration, input: FrameInput) -> FrameDirectives {
        let mut directives = FrameDirectives::new();
        if input.quit_requested {
            directives.exit_requested = true;
        }
        if self.game_over {
            return directives;
        }

        self.events.clear();

        if input.move_left {
            world::apply(
                &mut self.world,
                Command::MovePlant {
                    direction: MoveDirection::Left,
                },
                &mut self.events,
            );
        }
        if input.move_right {
            world::apply(
                &mut self.world,
                Command::MovePlant {
                    direction: MoveDirection::Right,
                },
                &mut self.events,
            );
        }
        if let Some(slot) = input.place_slot {
            world::apply(
                &mut self.world,
                Command::PlaceWallNut { slot },
                &mut self.events,
            );
        }

        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        self.commands.clear();
        self.waves.handle(&self.events, &mut self.commands);
        self.combat.handle(
            query::plant_cooldown(&self.world),
            query::zombie_cooldown_view(&self.world),
            &mut self.commands,
        );

        let mut confirmations = Vec::new();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut confirmations);
        }
        self.waves.handle(&confirmations, &mut self.commands);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut confirmations);
        }
        self.events.append(&mut confirmations);

        for event in &self.events {
            match event {
                Event::SoundRequested { cue } => directives.sound_cues.push(*cue),
                Event::PlantDestroyed => self.game_over = true,
                _ => {}
            }
        }

        directives
    }

    /// Writes the current world state into the scene for drawing.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        scene.clear_entities();

        let plant = query::plant(&self.world);
        if !plant.life_points.is_depleted() {
            scene.plant = Some(PlantPresentation {
                rect: plant.rect,
                tint: self.plant_tint,
            });
        }

        for zombie in query::zombie_view(&self.world).iter() {
            scene.zombies.push(ZombiePresentation {
                id: zombie.id,
                kind: zombie.kind,
                rect: zombie.rect,
                active: zombie.active,
            });
        }

        for wall_nut in query::wall_nut_view(&self.world).iter() {
            scene.wall_nuts.push(WallNutPresentation {
                slot: wall_nut.slot,
                rect: wall_nut.rect,
                health: wall_nut.health,
            });
        }

        for rect in query::plant_projectiles(&self.world) {
            scene.plant_projectiles.push(ProjectilePresentation {
                rect,
                color: palette::PROJECTILE_GREEN,
            });
        }
        for rect in query::zombie_projectiles(&self.world) {
            scene.zombie_projectiles.push(ProjectilePresentation {
                rect,
                color: palette::PROJECTILE_YELLOW,
            });
        }

        scene.hud.lives = plant.life_points.get();
        scene.hud.status_line = self.status_line();
        scene.game_over = self.game_over;
        scene.victory = self.victory();
    }

    /// Playfield dimensions for sizing the window and the scene.
    pub(crate) fn playfield_size(&self) -> (f32, f32) {
        let playfield = query::playfield(&self.world);
        (playfield.width(), playfield.height())
    }
}
