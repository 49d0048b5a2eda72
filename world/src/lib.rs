#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Garden Invasion.

mod collision;

use std::time::Duration;

use garden_invasion_core::{
    Command, Event, Extent, Health, MoveDirection, MovementPattern, PlacementError, Position,
    Rect, SoundCue, SpawnPoint, WallNutSlot, ZombieId, ZombieKind, WELCOME_BANNER,
};

const DEFAULT_PLAYFIELD_WIDTH: f32 = 600.0;
const DEFAULT_PLAYFIELD_HEIGHT: f32 = 600.0;

const PLANT_EXTENT: Extent = Extent::new(60.0, 80.0);
const PLANT_STEP: f32 = 5.0;
const PLANT_MAX_LIFE: Health = Health::new(2);
const PLANT_SHOT_COOLDOWN: Duration = Duration::from_millis(500);
const PLANT_ANCHOR_FRACTION: f32 = 0.95;

const PLANT_PROJECTILE_EXTENT: Extent = Extent::new(20.0, 30.0);
const PLANT_PROJECTILE_SPEED: f32 = 10.0;

const ZOMBIE_EXTENT: Extent = Extent::new(40.0, 70.0);
const ZOMBIE_SPAWN_Y: f32 = -50.0;
const ZOMBIE_SHOT_COOLDOWN: Duration = Duration::from_millis(1000);

const ZOMBIE_PROJECTILE_EXTENT: Extent = Extent::new(20.0, 40.0);
const ZOMBIE_PROJECTILE_SPEED: f32 = 5.0;

const WALL_NUT_EXTENT: Extent = Extent::new(60.0, 60.0);
const WALL_NUT_MAX_HEALTH: Health = Health::new(2);
const WALL_NUT_OFFSET_Y: f32 = -150.0;
const WALL_NUT_SPAN_FRACTION: f32 = 0.9;

// Roam bounds reproduce the original playfield insets. The right inset is
// larger than the left because it is measured from the body's left edge.
const ROAM_BOUND_LEFT: f32 = 15.0;
const ROAM_BOUND_RIGHT_INSET: f32 = 45.0;
const ROAM_CENTER_GAP: f32 = 30.0;
const ROAM_SPEED: f32 = 2.5;
const ROAM_FULL_BOOSTED_SPEED: f32 = 3.0;
const ZIGZAG_HALF_INSET: f32 = 15.0;
const ZIGZAG_FLIP_INTERVAL: u32 = 32;

/// Describes the rectangular playable area in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    width: f32,
    height: f32,
}

impl Playfield {
    const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the playable area.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the playable area.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Horizontal center of the playable area.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Represents the authoritative Garden Invasion world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    playfield: Playfield,
    plant: Plant,
    plant_projectiles: Vec<PlantProjectile>,
    zombies: Vec<Zombie>,
    zombie_projectiles: Vec<ZombieProjectile>,
    wall_nuts: WallNutSlots,
    next_zombie_id: u32,
}

impl World {
    /// Creates a new Garden Invasion world ready for simulation.
    #[must_use]
    pub fn new() -> Self {
        let playfield = Playfield::new(DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT);
        Self {
            banner: WELCOME_BANNER,
            plant: Plant::centered_on(&playfield),
            plant_projectiles: Vec::new(),
            zombies: Vec::new(),
            zombie_projectiles: Vec::new(),
            wall_nuts: WallNutSlots::aligned_with(&playfield),
            playfield,
            next_zombie_id: 0,
        }
    }

    fn allocate_zombie_id(&mut self) -> ZombieId {
        let id = ZombieId::new(self.next_zombie_id);
        self.next_zombie_id = self.next_zombie_id.wrapping_add(1);
        id
    }

    fn zombie_mut(&mut self, id: ZombieId) -> Option<&mut Zombie> {
        self.zombies.iter_mut().find(|zombie| zombie.id == id)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigurePlayfield { width, height } => {
            let playfield = Playfield::new(width.max(0.0), height.max(0.0));
            world.plant = Plant::centered_on(&playfield);
            world.wall_nuts = WallNutSlots::aligned_with(&playfield);
            world.plant_projectiles.clear();
            world.zombies.clear();
            world.zombie_projectiles.clear();
            world.playfield = playfield;
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            advance_clocks(world, dt);
            advance_plant_projectiles(world);
            advance_zombie_projectiles(world);
            advance_zombies(world, out_events);
            collision::resolve(
                &mut world.plant,
                &mut world.plant_projectiles,
                &mut world.zombies,
                &mut world.zombie_projectiles,
                &mut world.wall_nuts,
                out_events,
            );
        }
        Command::MovePlant { direction } => {
            world.plant.shift(direction, &world.playfield);
        }
        Command::FirePlantProjectile => {
            if world.plant.shot_ready_in.is_zero() && world.plant.is_alive() {
                let muzzle = world.plant.rect().midtop();
                world
                    .plant_projectiles
                    .push(PlantProjectile::launched_from(muzzle));
                world.plant.shot_ready_in = PLANT_SHOT_COOLDOWN;
                out_events.push(Event::PlantProjectileFired);
                out_events.push(Event::SoundRequested {
                    cue: SoundCue::PlantShoot,
                });
            }
        }
        Command::PlaceWallNut { slot } => match world.wall_nuts.place(slot) {
            Ok(()) => out_events.push(Event::WallNutPlaced { slot }),
            Err(reason) => out_events.push(Event::WallNutPlacementRejected { slot, reason }),
        },
        Command::SpawnZombie {
            kind,
            spawn_point,
            pattern,
            activation_delay,
        } => {
            let id = world.allocate_zombie_id();
            world.zombies.push(Zombie::spawned(
                id,
                kind,
                spawn_point,
                pattern,
                activation_delay,
                &world.playfield,
            ));
            out_events.push(Event::ZombieSpawned {
                zombie: id,
                kind,
                spawn_point,
            });
        }
        Command::FireZombieProjectile { zombie } => {
            let Some(shooter) = world.zombie_mut(zombie) else {
                return;
            };
            if !shooter.kind.can_shoot() || !shooter.is_active() || !shooter.shot_ready_in.is_zero()
            {
                return;
            }
            let muzzle = shooter.rect().midbottom();
            shooter.shot_ready_in = ZOMBIE_SHOT_COOLDOWN;
            world
                .zombie_projectiles
                .push(ZombieProjectile::launched_from(muzzle));
            out_events.push(Event::ZombieProjectileFired { zombie });
        }
    }
}

fn advance_clocks(world: &mut World, dt: Duration) {
    world.plant.shot_ready_in = world.plant.shot_ready_in.saturating_sub(dt);
    for zombie in world.zombies.iter_mut() {
        zombie.activation_remaining = zombie.activation_remaining.saturating_sub(dt);
        // The shot clock runs even while the zombie is inert; firing itself
        // stays gated on activation.
        zombie.shot_ready_in = zombie.shot_ready_in.saturating_sub(dt);
    }
}

fn advance_plant_projectiles(world: &mut World) {
    for projectile in world.plant_projectiles.iter_mut() {
        projectile.y -= PLANT_PROJECTILE_SPEED;
    }
    world
        .plant_projectiles
        .retain(|projectile| projectile.rect().bottom() >= 0.0);
}

fn advance_zombie_projectiles(world: &mut World) {
    let bottom = world.playfield.height();
    for projectile in world.zombie_projectiles.iter_mut() {
        projectile.y += ZOMBIE_PROJECTILE_SPEED;
    }
    world
        .zombie_projectiles
        .retain(|projectile| projectile.rect().top() <= bottom);
}

fn advance_zombies(world: &mut World, out_events: &mut Vec<Event>) {
    let playfield = world.playfield;
    for zombie in world.zombies.iter_mut() {
        zombie.step(&playfield);
    }

    for zombie in &world.zombies {
        if zombie.y > playfield.height() {
            out_events.push(Event::ZombieExited { zombie: zombie.id });
        }
    }
    world
        .zombies
        .retain(|zombie| zombie.y <= playfield.height());
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Playfield, World};
    use garden_invasion_core::{
        PlantSnapshot, Rect, WallNutSnapshot, WallNutView, ZombieCooldownSnapshot,
        ZombieCooldownView, ZombieSnapshot, ZombieView,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the playfield definition.
    #[must_use]
    pub fn playfield(world: &World) -> &Playfield {
        &world.playfield
    }

    /// Captures the plant's current state.
    #[must_use]
    pub fn plant(world: &World) -> PlantSnapshot {
        PlantSnapshot {
            rect: world.plant.rect(),
            life_points: world.plant.life_points,
            shot_ready_in: world.plant.shot_ready_in,
        }
    }

    /// Time remaining until the plant may fire again.
    #[must_use]
    pub fn plant_cooldown(world: &World) -> Duration {
        world.plant.shot_ready_in
    }

    /// Captures a read-only view of the zombies on the playfield.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        let snapshots: Vec<ZombieSnapshot> = world
            .zombies
            .iter()
            .map(|zombie| ZombieSnapshot {
                id: zombie.id,
                kind: zombie.kind,
                pattern: zombie.pattern,
                spawn_point: zombie.spawn_point,
                rect: zombie.rect(),
                health: zombie.health,
                active: zombie.is_active(),
            })
            .collect();
        ZombieView::from_snapshots(snapshots)
    }

    /// Captures the shot cooldown of every ranged zombie.
    #[must_use]
    pub fn zombie_cooldown_view(world: &World) -> ZombieCooldownView {
        let snapshots: Vec<ZombieCooldownSnapshot> = world
            .zombies
            .iter()
            .filter(|zombie| zombie.kind.can_shoot())
            .map(|zombie| ZombieCooldownSnapshot {
                zombie: zombie.id,
                ready_in: zombie.shot_ready_in,
                active: zombie.is_active(),
            })
            .collect();
        ZombieCooldownView::from_snapshots(snapshots)
    }

    /// Number of zombies currently on the playfield.
    #[must_use]
    pub fn zombies_alive(world: &World) -> usize {
        world.zombies.len()
    }

    /// Bounding boxes of the plant's live projectiles.
    #[must_use]
    pub fn plant_projectiles(world: &World) -> Vec<Rect> {
        world
            .plant_projectiles
            .iter()
            .map(super::PlantProjectile::rect)
            .collect()
    }

    /// Bounding boxes of the zombies' live projectiles.
    #[must_use]
    pub fn zombie_projectiles(world: &World) -> Vec<Rect> {
        world
            .zombie_projectiles
            .iter()
            .map(super::ZombieProjectile::rect)
            .collect()
    }

    /// Captures a read-only view of the standing wall-nuts.
    #[must_use]
    pub fn wall_nut_view(world: &World) -> WallNutView {
        let snapshots: Vec<WallNutSnapshot> = world
            .wall_nuts
            .standing()
            .map(|wall_nut| WallNutSnapshot {
                slot: wall_nut.slot,
                rect: wall_nut.rect(),
                health: wall_nut.health,
            })
            .collect();
        WallNutView::from_snapshots(snapshots)
    }
}

#[derive(Clone, Copy, Debug)]
struct Plant {
    x: f32,
    bottom_y: f32,
    life_points: Health,
    shot_ready_in: Duration,
}

impl Plant {
    fn centered_on(playfield: &Playfield) -> Self {
        Self {
            x: playfield.center_x() - PLANT_EXTENT.width() / 2.0,
            bottom_y: playfield.height() * PLANT_ANCHOR_FRACTION,
            life_points: PLANT_MAX_LIFE,
            shot_ready_in: Duration::ZERO,
        }
    }

    fn rect(&self) -> Rect {
        Rect::from_origin_and_extent(
            Position::new(self.x, self.bottom_y - PLANT_EXTENT.height()),
            PLANT_EXTENT,
        )
    }

    fn shift(&mut self, direction: MoveDirection, playfield: &Playfield) {
        match direction {
            MoveDirection::Left => self.x -= PLANT_STEP,
            MoveDirection::Right => self.x += PLANT_STEP,
        }
        let max_x = (playfield.width() - PLANT_EXTENT.width()).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
    }

    fn is_alive(&self) -> bool {
        !self.life_points.is_depleted()
    }

    /// Applies one point of damage, reporting whether the plant is now at
    /// zero life points.
    fn take_damage(&mut self) -> bool {
        self.life_points = self.life_points.damaged();
        self.life_points.is_depleted()
    }
}

#[derive(Clone, Copy, Debug)]
struct PlantProjectile {
    x: f32,
    y: f32,
}

impl PlantProjectile {
    fn launched_from(midbottom: Position) -> Self {
        let rect = Rect::from_midbottom(midbottom, PLANT_PROJECTILE_EXTENT);
        Self {
            x: rect.left(),
            y: rect.top(),
        }
    }

    fn rect(&self) -> Rect {
        Rect::from_origin_and_extent(Position::new(self.x, self.y), PLANT_PROJECTILE_EXTENT)
    }
}

#[derive(Clone, Copy, Debug)]
struct ZombieProjectile {
    x: f32,
    y: f32,
}

impl ZombieProjectile {
    fn launched_from(midbottom: Position) -> Self {
        let rect = Rect::from_midbottom(midbottom, ZOMBIE_PROJECTILE_EXTENT);
        Self {
            x: rect.left(),
            y: rect.top(),
        }
    }

    fn rect(&self) -> Rect {
        Rect::from_origin_and_extent(Position::new(self.x, self.y), ZOMBIE_PROJECTILE_EXTENT)
    }
}

#[derive(Clone, Copy, Debug)]
struct Zombie {
    id: ZombieId,
    kind: ZombieKind,
    pattern: MovementPattern,
    spawn_point: SpawnPoint,
    x: f32,
    y: f32,
    health: Health,
    direction: f32,
    zigzag_counter: u32,
    activation_remaining: Duration,
    shot_ready_in: Duration,
}

impl Zombie {
    fn spawned(
        id: ZombieId,
        kind: ZombieKind,
        spawn_point: SpawnPoint,
        pattern: MovementPattern,
        activation_delay: Duration,
        playfield: &Playfield,
    ) -> Self {
        let midtop = Position::new(spawn_point.anchor_x(playfield.width()), ZOMBIE_SPAWN_Y);
        let rect = Rect::from_midtop(midtop, ZOMBIE_EXTENT);
        let direction = match pattern {
            MovementPattern::RoamRight => -1.0,
            _ => 1.0,
        };
        Self {
            id,
            kind,
            pattern,
            spawn_point,
            x: rect.left(),
            y: rect.top(),
            health: kind.max_health(),
            direction,
            zigzag_counter: 0,
            activation_remaining: activation_delay,
            shot_ready_in: ZOMBIE_SHOT_COOLDOWN,
        }
    }

    fn rect(&self) -> Rect {
        Rect::from_origin_and_extent(Position::new(self.x, self.y), ZOMBIE_EXTENT)
    }

    fn is_active(&self) -> bool {
        self.activation_remaining.is_zero()
    }

    /// Applies one simulation step of movement. Inert zombies do not move.
    fn step(&mut self, playfield: &Playfield) {
        if !self.is_active() {
            return;
        }

        self.y += self.kind.fall_speed();

        match self.pattern {
            MovementPattern::Straight => {}
            MovementPattern::Zigzag => self.step_zigzag(playfield),
            MovementPattern::RoamLeft => {
                let center = playfield.center_x();
                self.step_roam(ROAM_BOUND_LEFT, center - ROAM_CENTER_GAP);
            }
            MovementPattern::RoamRight => {
                let center = playfield.center_x();
                self.step_roam(center, playfield.width() - ROAM_BOUND_RIGHT_INSET);
            }
            MovementPattern::RoamFull => {
                self.step_roam(ROAM_BOUND_LEFT, playfield.width() - ROAM_BOUND_RIGHT_INSET);
            }
        }
    }

    fn step_zigzag(&mut self, playfield: &Playfield) {
        self.zigzag_counter += 1;
        if self.zigzag_counter >= ZIGZAG_FLIP_INTERVAL {
            self.direction = -self.direction;
            self.zigzag_counter = 0;
        }

        self.x += self.direction * self.kind.zigzag_amplitude();

        // Orange zombies roam the full width; red zombies stay in the half
        // of the playfield they spawned in.
        let (min_x, max_x) = match self.kind {
            ZombieKind::Orange => (
                ROAM_BOUND_LEFT,
                playfield.width() - ROAM_BOUND_RIGHT_INSET,
            ),
            ZombieKind::Red => {
                if self.spawn_point.is_left_half() {
                    (ROAM_BOUND_LEFT, playfield.center_x() - ZIGZAG_HALF_INSET)
                } else {
                    (
                        playfield.center_x() + ZIGZAG_HALF_INSET,
                        playfield.width() - ROAM_BOUND_RIGHT_INSET,
                    )
                }
            }
        };

        if self.x < min_x {
            self.x = min_x;
            self.direction = 1.0;
        } else if self.x > max_x {
            self.x = max_x;
            self.direction = -1.0;
        }
    }

    fn step_roam(&mut self, min_x: f32, max_x: f32) {
        self.x += self.direction * self.roam_speed();

        if self.x <= min_x {
            self.x = min_x;
            self.direction = 1.0;
        } else if self.x >= max_x {
            self.x = max_x;
            self.direction = -1.0;
        }
    }

    // Documented special case: the wave-4 orange zombie roaming the full
    // width from spawn point A moves faster than the base roam speed.
    fn roam_speed(&self) -> f32 {
        if self.kind == ZombieKind::Orange
            && self.pattern == MovementPattern::RoamFull
            && self.spawn_point == SpawnPoint::A
        {
            ROAM_FULL_BOOSTED_SPEED
        } else {
            ROAM_SPEED
        }
    }

    /// Applies damage, reporting whether the zombie is now at zero health.
    fn take_damage(&mut self, damage: u32) -> bool {
        for _ in 0..damage {
            self.health = self.health.damaged();
        }
        self.health.is_depleted()
    }
}

#[derive(Clone, Copy, Debug)]
struct WallNut {
    slot: WallNutSlot,
    center: Position,
    health: Health,
}

impl WallNut {
    fn rect(&self) -> Rect {
        Rect::from_center(self.center, WALL_NUT_EXTENT)
    }

    /// Applies one point of damage, reporting whether the wall-nut is now at
    /// zero health.
    fn take_damage(&mut self) -> bool {
        self.health = self.health.damaged();
        self.health.is_depleted()
    }
}

#[derive(Clone, Copy, Debug)]
enum SlotState {
    /// Nothing has been placed in the slot yet.
    Empty,
    /// A wall-nut currently stands in the slot.
    Occupied(WallNut),
    /// The slot's wall-nut was destroyed; the slot stays spent.
    Consumed,
}

#[derive(Clone, Copy, Debug)]
struct WallNutSlots {
    states: [SlotState; WallNutSlot::COUNT as usize],
    centers: [Position; WallNutSlot::COUNT as usize],
}

impl WallNutSlots {
    fn aligned_with(playfield: &Playfield) -> Self {
        let plant_x = playfield.center_x();
        let plant_y = playfield.height() * PLANT_ANCHOR_FRACTION;
        let span = playfield.width() * WALL_NUT_SPAN_FRACTION;
        let spacing = span / (WallNutSlot::COUNT - 1) as f32;
        let start_x = plant_x - span / 2.0;
        let y = plant_y + WALL_NUT_OFFSET_Y;

        let mut centers = [Position::new(0.0, 0.0); WallNutSlot::COUNT as usize];
        for (index, center) in centers.iter_mut().enumerate() {
            *center = Position::new(start_x + index as f32 * spacing, y);
        }

        Self {
            states: [SlotState::Empty; WallNutSlot::COUNT as usize],
            centers,
        }
    }

    fn place(&mut self, slot: WallNutSlot) -> Result<(), PlacementError> {
        let index = slot.get() as usize;
        if slot.get() >= WallNutSlot::COUNT {
            return Err(PlacementError::InvalidSlot);
        }
        match self.states[index] {
            SlotState::Empty => {
                self.states[index] = SlotState::Occupied(WallNut {
                    slot,
                    center: self.centers[index],
                    health: WALL_NUT_MAX_HEALTH,
                });
                Ok(())
            }
            SlotState::Occupied(_) | SlotState::Consumed => Err(PlacementError::Occupied),
        }
    }

    fn standing(&self) -> impl Iterator<Item = &WallNut> {
        self.states.iter().filter_map(|state| match state {
            SlotState::Occupied(wall_nut) => Some(wall_nut),
            SlotState::Empty | SlotState::Consumed => None,
        })
    }

    fn standing_mut(&mut self) -> impl Iterator<Item = &mut WallNut> {
        self.states.iter_mut().filter_map(|state| match state {
            SlotState::Occupied(wall_nut) => Some(wall_nut),
            SlotState::Empty | SlotState::Consumed => None,
        })
    }

    fn consume(&mut self, slot: WallNutSlot) {
        let index = slot.get() as usize;
        if index < self.states.len() {
            self.states[index] = SlotState::Consumed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_invasion_core::{Command, Event};

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    fn spawn(
        world: &mut World,
        kind: ZombieKind,
        spawn_point: SpawnPoint,
        pattern: MovementPattern,
    ) -> ZombieId {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnZombie {
                kind,
                spawn_point,
                pattern,
                activation_delay: Duration::ZERO,
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::ZombieSpawned { zombie, .. }] => *zombie,
            _ => panic!("expected ZombieSpawned event"),
        }
    }

    #[test]
    fn plant_damage_reports_depletion_from_the_second_hit_onwards() {
        let mut plant = Plant::centered_on(&Playfield::new(600.0, 600.0));
        assert!(!plant.take_damage());
        assert!(plant.take_damage());
        assert!(!plant.is_alive());
        // Health floors at zero and keeps reporting depletion.
        assert!(plant.take_damage());
        assert_eq!(plant.life_points, Health::new(0));
    }

    #[test]
    fn zombie_damage_reports_depletion_on_every_call_past_the_last_hit() {
        let playfield = Playfield::new(600.0, 600.0);
        let mut zombie = Zombie::spawned(
            ZombieId::new(0),
            ZombieKind::Orange,
            SpawnPoint::A,
            MovementPattern::Straight,
            Duration::ZERO,
            &playfield,
        );
        assert!(!zombie.take_damage(1));
        assert!(zombie.take_damage(1));
        assert!(zombie.take_damage(1));
        assert_eq!(zombie.health, Health::new(0));
    }

    #[test]
    fn new_world_centers_the_plant() {
        let world = World::new();
        let plant = query::plant(&world);
        assert_eq!(plant.life_points, Health::new(2));
        assert!((plant.rect.midbottom().x() - 300.0).abs() < f32::EPSILON);
        assert!((plant.rect.midbottom().y() - 570.0).abs() < f32::EPSILON);
    }

    #[test]
    fn plant_movement_clamps_to_the_playfield() {
        let mut world = World::new();
        let mut events = Vec::new();
        for _ in 0..200 {
            apply(
                &mut world,
                Command::MovePlant {
                    direction: MoveDirection::Left,
                },
                &mut events,
            );
        }
        assert!((query::plant(&world).rect.left() - 0.0).abs() < f32::EPSILON);

        for _ in 0..400 {
            apply(
                &mut world,
                Command::MovePlant {
                    direction: MoveDirection::Right,
                },
                &mut events,
            );
        }
        assert!((query::plant(&world).rect.right() - 600.0).abs() < f32::EPSILON);
    }

    #[test]
    fn plant_fires_only_when_cooldown_elapsed() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::FirePlantProjectile, &mut events);
        assert_eq!(query::plant_projectiles(&world).len(), 1);
        assert!(events.contains(&Event::PlantProjectileFired));
        assert!(events.contains(&Event::SoundRequested {
            cue: SoundCue::PlantShoot
        }));

        events.clear();
        apply(&mut world, Command::FirePlantProjectile, &mut events);
        assert_eq!(query::plant_projectiles(&world).len(), 1);
        assert!(events.is_empty());

        let _ = tick(&mut world, 500);
        events.clear();
        apply(&mut world, Command::FirePlantProjectile, &mut events);
        assert_eq!(query::plant_projectiles(&world).len(), 2);
    }

    #[test]
    fn plant_projectile_leaves_through_the_top_edge() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::FirePlantProjectile, &mut events);

        // Launched with its bottom at the plant's midtop (y = 490); 50 steps
        // of 10 px carry the projectile fully past the top edge.
        for _ in 0..49 {
            let _ = tick(&mut world, 16);
        }
        assert_eq!(query::plant_projectiles(&world).len(), 1);
        let _ = tick(&mut world, 16);
        assert!(query::plant_projectiles(&world).is_empty());
    }

    #[test]
    fn straight_zombie_descends_without_drift() {
        let mut world = World::new();
        let id = spawn(
            &mut world,
            ZombieKind::Red,
            SpawnPoint::A,
            MovementPattern::Straight,
        );
        let before = query::zombie_view(&world)
            .into_vec()
            .into_iter()
            .find(|snapshot| snapshot.id == id)
            .expect("zombie snapshot");

        let _ = tick(&mut world, 16);

        let after = query::zombie_view(&world)
            .into_vec()
            .into_iter()
            .find(|snapshot| snapshot.id == id)
            .expect("zombie snapshot");
        assert!((after.rect.midtop().x() - before.rect.midtop().x()).abs() < f32::EPSILON);
        assert!((after.rect.top() - before.rect.top() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn delayed_zombie_stays_inert_until_activation() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnZombie {
                kind: ZombieKind::Orange,
                spawn_point: SpawnPoint::A,
                pattern: MovementPattern::RoamFull,
                activation_delay: Duration::from_millis(1000),
            },
            &mut events,
        );

        let before = query::zombie_view(&world).into_vec()[0];
        assert!(!before.active);

        let _ = tick(&mut world, 500);
        let paused = query::zombie_view(&world).into_vec()[0];
        assert_eq!(paused.rect, before.rect);

        let _ = tick(&mut world, 500);
        let _ = tick(&mut world, 16);
        let moving = query::zombie_view(&world).into_vec()[0];
        assert!(moving.active);
        assert!(moving.rect.top() > before.rect.top());
    }

    #[test]
    fn roam_left_zombie_bounces_inside_its_half() {
        let mut world = World::new();
        let _ = spawn(
            &mut world,
            ZombieKind::Red,
            SpawnPoint::B,
            MovementPattern::RoamLeft,
        );

        let mut min_left = f32::MAX;
        let mut max_left = f32::MIN;
        for _ in 0..400 {
            let _ = tick(&mut world, 16);
            let Some(snapshot) = query::zombie_view(&world).into_vec().first().copied() else {
                break;
            };
            min_left = min_left.min(snapshot.rect.left());
            max_left = max_left.max(snapshot.rect.left());
        }

        assert!(min_left >= ROAM_BOUND_LEFT - f32::EPSILON);
        assert!(max_left <= 300.0 - ROAM_CENTER_GAP + f32::EPSILON);
    }

    #[test]
    fn zombie_exits_past_the_bottom_edge() {
        let mut world = World::new();
        let id = spawn(
            &mut world,
            ZombieKind::Red,
            SpawnPoint::D,
            MovementPattern::Straight,
        );

        // From y = -50 at 2 px per step the zombie's top passes 600 after
        // 326 steps.
        let mut exited = false;
        for _ in 0..340 {
            let events = tick(&mut world, 16);
            if events.contains(&Event::ZombieExited { zombie: id }) {
                exited = true;
                break;
            }
        }
        assert!(exited);
        assert_eq!(query::zombies_alive(&world), 0);
    }

    #[test]
    fn wall_nut_placement_rejects_occupied_and_invalid_slots() {
        let mut world = World::new();
        let mut events = Vec::new();
        let slot = WallNutSlot::new(1);

        apply(&mut world, Command::PlaceWallNut { slot }, &mut events);
        assert!(events.contains(&Event::WallNutPlaced { slot }));

        events.clear();
        apply(&mut world, Command::PlaceWallNut { slot }, &mut events);
        assert_eq!(
            events,
            vec![Event::WallNutPlacementRejected {
                slot,
                reason: PlacementError::Occupied,
            }],
        );

        events.clear();
        let invalid = WallNutSlot::new(7);
        apply(
            &mut world,
            Command::PlaceWallNut { slot: invalid },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::WallNutPlacementRejected {
                slot: invalid,
                reason: PlacementError::InvalidSlot,
            }],
        );

        // The standing wall-nut is untouched by the rejected attempts.
        let view = query::wall_nut_view(&world).into_vec();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].health, Health::new(2));
    }

    #[test]
    fn wall_nut_slots_span_the_playfield() {
        let mut world = World::new();
        let mut events = Vec::new();
        for slot in WallNutSlot::ALL {
            apply(&mut world, Command::PlaceWallNut { slot }, &mut events);
        }

        let centers: Vec<f32> = query::wall_nut_view(&world)
            .into_vec()
            .into_iter()
            .map(|snapshot| snapshot.rect.midtop().x())
            .collect();
        assert_eq!(centers.len(), 4);
        let expected = [30.0, 210.0, 390.0, 570.0];
        for (center, expected) in centers.into_iter().zip(expected) {
            assert!((center - expected).abs() < 0.001);
        }
    }

    #[test]
    fn zombie_fire_command_respects_cooldown_and_kind() {
        let mut world = World::new();
        let red = spawn(
            &mut world,
            ZombieKind::Red,
            SpawnPoint::B,
            MovementPattern::Straight,
        );
        let orange = spawn(
            &mut world,
            ZombieKind::Orange,
            SpawnPoint::C,
            MovementPattern::Straight,
        );

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::FireZombieProjectile { zombie: red },
            &mut events,
        );
        apply(
            &mut world,
            Command::FireZombieProjectile { zombie: orange },
            &mut events,
        );
        assert!(events.is_empty());
        assert!(query::zombie_projectiles(&world).is_empty());

        let _ = tick(&mut world, 1000);
        events.clear();
        apply(
            &mut world,
            Command::FireZombieProjectile { zombie: orange },
            &mut events,
        );
        assert_eq!(events, vec![Event::ZombieProjectileFired { zombie: orange }]);
        assert_eq!(query::zombie_projectiles(&world).len(), 1);

        // Cooldown was reset by the shot.
        events.clear();
        apply(
            &mut world,
            Command::FireZombieProjectile { zombie: orange },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn configure_playfield_resets_the_scene() {
        let mut world = World::new();
        let mut events = Vec::new();
        let _ = spawn(
            &mut world,
            ZombieKind::Red,
            SpawnPoint::A,
            MovementPattern::Straight,
        );
        apply(&mut world, Command::FirePlantProjectile, &mut events);

        apply(
            &mut world,
            Command::ConfigurePlayfield {
                width: 900.0,
                height: 900.0,
            },
            &mut events,
        );

        assert_eq!(query::zombies_alive(&world), 0);
        assert!(query::plant_projectiles(&world).is_empty());
        assert!((query::playfield(&world).width() - 900.0).abs() < f32::EPSILON);
        assert!((query::plant(&world).rect.midbottom().x() - 450.0).abs() < f32::EPSILON);
    }
}
