#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Invasion engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Garden Invasion.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Configures the playfield using the provided dimensions in pixels.
    ConfigurePlayfield {
        /// Width of the playable area.
        width: f32,
        /// Height of the playable area.
        height: f32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the plant shift one step along the horizontal axis.
    MovePlant {
        /// Direction of the requested shift.
        direction: MoveDirection,
    },
    /// Requests that the plant fire one projectile from its current position.
    FirePlantProjectile,
    /// Requests placement of a wall-nut into the provided slot.
    PlaceWallNut {
        /// Slot targeted for placement.
        slot: WallNutSlot,
    },
    /// Requests that a zombie enter the playfield at a spawn point.
    SpawnZombie {
        /// Variant of zombie to create.
        kind: ZombieKind,
        /// Spawn point the zombie descends from.
        spawn_point: SpawnPoint,
        /// Horizontal movement pattern assigned to the zombie.
        pattern: MovementPattern,
        /// Grace period during which the zombie stays inert after spawning.
        activation_delay: Duration,
    },
    /// Requests that the identified zombie fire one projectile downward.
    FireZombieProjectile {
        /// Identifier of the shooting zombie.
        zombie: ZombieId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a zombie entered the playfield.
    ZombieSpawned {
        /// Identifier assigned to the new zombie.
        zombie: ZombieId,
        /// Variant of the spawned zombie.
        kind: ZombieKind,
        /// Spawn point the zombie descends from.
        spawn_point: SpawnPoint,
    },
    /// Reports that a zombie was destroyed by damage or contact.
    ZombieDestroyed {
        /// Identifier of the destroyed zombie.
        zombie: ZombieId,
        /// What destroyed the zombie.
        cause: DestructionCause,
    },
    /// Reports that a zombie left the playfield past the bottom edge.
    ZombieExited {
        /// Identifier of the departed zombie.
        zombie: ZombieId,
    },
    /// Confirms that the plant fired one projectile.
    PlantProjectileFired,
    /// Confirms that a zombie fired one projectile.
    ZombieProjectileFired {
        /// Identifier of the shooting zombie.
        zombie: ZombieId,
    },
    /// Reports that a wall-nut absorbed a plant projectile without damage.
    ProjectileBlocked {
        /// Slot of the blocking wall-nut.
        slot: WallNutSlot,
    },
    /// Reports that the plant lost one life point.
    PlantDamaged {
        /// Life points remaining after the hit.
        remaining: Health,
    },
    /// Announces that the plant reached zero life points. Game over.
    PlantDestroyed,
    /// Confirms that a wall-nut was placed into a slot.
    WallNutPlaced {
        /// Slot that received the wall-nut.
        slot: WallNutSlot,
    },
    /// Reports that a wall-nut placement request was rejected.
    WallNutPlacementRejected {
        /// Slot provided in the placement request.
        slot: WallNutSlot,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a wall-nut absorbed one point of damage.
    WallNutDamaged {
        /// Slot of the damaged wall-nut.
        slot: WallNutSlot,
        /// Health remaining after the hit.
        remaining: Health,
    },
    /// Reports that a wall-nut was destroyed.
    WallNutDestroyed {
        /// Slot of the destroyed wall-nut.
        slot: WallNutSlot,
    },
    /// Asks adapters to trigger a fire-and-forget sound effect.
    SoundRequested {
        /// Cue naming the effect to play.
        cue: SoundCue,
    },
}

/// Horizontal directions available to the plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Movement toward decreasing x coordinates.
    Left,
    /// Movement toward increasing x coordinates.
    Right,
}

/// What removed a zombie from the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DestructionCause {
    /// A plant projectile reduced the zombie's health to zero.
    Projectile,
    /// The zombie expired on contact with a wall-nut.
    Barrier,
    /// The zombie expired on contact with the plant.
    Plant,
}

/// Named fire-and-forget sound effects the simulation can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// The plant fired a projectile.
    PlantShoot,
    /// The plant absorbed a hit.
    PlantHit,
    /// A zombie absorbed a hit.
    ZombieHit,
    /// A wall-nut crumbled.
    WallNutDestroyed,
    /// The plant was destroyed.
    GameOver,
}

/// Unique identifier assigned to a zombie.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One of the four wall-nut positions in front of the plant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WallNutSlot(u32);

impl WallNutSlot {
    /// Number of wall-nut slots available in front of the plant.
    pub const COUNT: u32 = 4;

    /// Every slot in left-to-right order.
    pub const ALL: [WallNutSlot; 4] = [
        WallNutSlot::new(0),
        WallNutSlot::new(1),
        WallNutSlot::new(2),
        WallNutSlot::new(3),
    ];

    /// Creates a new slot index wrapper. Validity is checked by the world.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying slot index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reasons a wall-nut placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The provided slot index lies outside the four available slots.
    InvalidSlot,
    /// The requested slot already holds, or held, a wall-nut.
    Occupied,
}

/// Variants of zombie that descend on the garden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombieKind {
    /// Fast single-hit zombie. Cannot shoot.
    Red,
    /// Slower two-hit zombie armed with a ranged attack.
    Orange,
}

impl ZombieKind {
    /// Health the zombie spawns with.
    #[must_use]
    pub const fn max_health(self) -> Health {
        match self {
            Self::Red => Health::new(1),
            Self::Orange => Health::new(2),
        }
    }

    /// Vertical descent applied every simulation step, in pixels.
    #[must_use]
    pub const fn fall_speed(self) -> f32 {
        match self {
            Self::Red => 2.0,
            Self::Orange => 1.5,
        }
    }

    /// Whether this variant carries a ranged attack.
    #[must_use]
    pub const fn can_shoot(self) -> bool {
        matches!(self, Self::Orange)
    }

    /// Horizontal step applied per frame while zigzagging.
    #[must_use]
    pub const fn zigzag_amplitude(self) -> f32 {
        match self {
            Self::Red => 2.5,
            Self::Orange => 5.0,
        }
    }
}

/// Horizontal movement patterns available to zombies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementPattern {
    /// No horizontal motion.
    Straight,
    /// Oscillates direction on a fixed frame cadence.
    Zigzag,
    /// Bounces between the left edge and the horizontal center.
    RoamLeft,
    /// Bounces between the horizontal center and the right edge.
    RoamRight,
    /// Bounces across the full playfield width.
    RoamFull,
}

/// Named spawn points just above the visible playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnPoint {
    /// Horizontal center.
    A,
    /// One third of the width.
    B,
    /// Two thirds of the width.
    C,
    /// One quarter of the width.
    D,
    /// Three quarters of the width.
    E,
}

impl SpawnPoint {
    /// Every spawn point in declaration order.
    pub const ALL: [SpawnPoint; 5] = [
        SpawnPoint::A,
        SpawnPoint::B,
        SpawnPoint::C,
        SpawnPoint::D,
        SpawnPoint::E,
    ];

    /// Horizontal anchor for this spawn point on a playfield of the given width.
    #[must_use]
    pub fn anchor_x(self, playfield_width: f32) -> f32 {
        match self {
            Self::A => playfield_width / 2.0,
            Self::B => playfield_width / 3.0,
            Self::C => playfield_width * 2.0 / 3.0,
            Self::D => playfield_width / 4.0,
            Self::E => playfield_width * 3.0 / 4.0,
        }
    }

    /// Whether the spawn point lies in the left half of the playfield.
    ///
    /// Red zigzag zombies are confined to the half they spawned in.
    #[must_use]
    pub const fn is_left_half(self) -> bool {
        matches!(self, Self::B | Self::D)
    }
}

/// Whole number of hit points carried by a damageable entity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the remaining hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the health after absorbing one point of damage.
    ///
    /// Health never drops below zero.
    #[must_use]
    pub const fn damaged(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Location of a point on the playfield expressed in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate, increasing to the right.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate, increasing downward.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Dimensions of an axis-aligned box measured in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    width: f32,
    height: f32,
}

impl Extent {
    /// Creates a new extent with explicit dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the box.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the box.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Axis-aligned bounding box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    origin: Position,
    extent: Extent,
}

impl Rect {
    /// Constructs a rectangle from a top-left origin and size.
    #[must_use]
    pub const fn from_origin_and_extent(origin: Position, extent: Extent) -> Self {
        Self { origin, extent }
    }

    /// Constructs a rectangle anchored at its top-center point.
    #[must_use]
    pub fn from_midtop(midtop: Position, extent: Extent) -> Self {
        Self {
            origin: Position::new(midtop.x() - extent.width() / 2.0, midtop.y()),
            extent,
        }
    }

    /// Constructs a rectangle anchored at its bottom-center point.
    #[must_use]
    pub fn from_midbottom(midbottom: Position, extent: Extent) -> Self {
        Self {
            origin: Position::new(
                midbottom.x() - extent.width() / 2.0,
                midbottom.y() - extent.height(),
            ),
            extent,
        }
    }

    /// Constructs a rectangle anchored at its center point.
    #[must_use]
    pub fn from_center(center: Position, extent: Extent) -> Self {
        Self {
            origin: Position::new(
                center.x() - extent.width() / 2.0,
                center.y() - extent.height() / 2.0,
            ),
            extent,
        }
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    /// Dimensions of the rectangle.
    #[must_use]
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// Coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.origin.x()
    }

    /// Coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.origin.x() + self.extent.width()
    }

    /// Coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.origin.y()
    }

    /// Coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.origin.y() + self.extent.height()
    }

    /// Top-center point of the rectangle.
    #[must_use]
    pub fn midtop(&self) -> Position {
        Position::new(self.origin.x() + self.extent.width() / 2.0, self.top())
    }

    /// Bottom-center point of the rectangle.
    #[must_use]
    pub fn midbottom(&self) -> Position {
        Position::new(self.origin.x() + self.extent.width() / 2.0, self.bottom())
    }

    /// Reports whether two rectangles strictly overlap.
    ///
    /// Touching edges do not count as an overlap.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Immutable representation of the plant's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantSnapshot {
    /// Bounding box currently occupied by the plant.
    pub rect: Rect,
    /// Life points remaining.
    pub life_points: Health,
    /// Time remaining until the plant may fire again.
    pub shot_ready_in: Duration,
}

/// Immutable representation of a single zombie's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieSnapshot {
    /// Unique identifier assigned to the zombie.
    pub id: ZombieId,
    /// Variant of the zombie.
    pub kind: ZombieKind,
    /// Horizontal movement pattern assigned at spawn.
    pub pattern: MovementPattern,
    /// Spawn point the zombie descended from.
    pub spawn_point: SpawnPoint,
    /// Bounding box currently occupied by the zombie.
    pub rect: Rect,
    /// Health remaining.
    pub health: Health,
    /// Whether the zombie's activation delay has elapsed.
    pub active: bool,
}

/// Read-only snapshot describing all zombies on the playfield.
#[derive(Clone, Debug, Default)]
pub struct ZombieView {
    snapshots: Vec<ZombieSnapshot>,
}

impl ZombieView {
    /// Creates a new zombie view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ZombieSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ZombieSnapshot> {
        self.snapshots.iter()
    }

    /// Number of zombies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no zombies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ZombieSnapshot> {
        self.snapshots
    }
}

/// Cooldown readiness of a single ranged zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZombieCooldownSnapshot {
    /// Identifier of the armed zombie.
    pub zombie: ZombieId,
    /// Time remaining until the zombie may fire again.
    pub ready_in: Duration,
    /// Whether the zombie's activation delay has elapsed.
    pub active: bool,
}

/// Read-only snapshot of every ranged zombie's shot cooldown.
#[derive(Clone, Debug, Default)]
pub struct ZombieCooldownView {
    snapshots: Vec<ZombieCooldownSnapshot>,
}

impl ZombieCooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ZombieCooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.zombie);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ZombieCooldownSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ZombieCooldownSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a standing wall-nut used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallNutSnapshot {
    /// Slot the wall-nut occupies.
    pub slot: WallNutSlot,
    /// Bounding box occupied by the wall-nut.
    pub rect: Rect,
    /// Health remaining.
    pub health: Health,
}

/// Read-only snapshot describing all standing wall-nuts.
#[derive(Clone, Debug, Default)]
pub struct WallNutView {
    snapshots: Vec<WallNutSnapshot>,
}

impl WallNutView {
    /// Creates a new wall-nut view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<WallNutSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.slot);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &WallNutSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<WallNutSnapshot> {
        self.snapshots
    }
}
