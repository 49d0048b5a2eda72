#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave director that drives the five scripted attack waves.

use std::time::Duration;

use garden_invasion_core::{Command, Event, MovementPattern, SpawnPoint, ZombieKind};

/// Number of scripted waves in the campaign.
pub const TOTAL_WAVES: u32 = 5;

/// Pause between the end of one wave and the start of the next.
pub const INTER_WAVE_DELAY: Duration = Duration::from_millis(3000);

const WAVE_FIVE_PHASE_TWO_DELAY: Duration = Duration::from_millis(1000);
const WAVE_FIVE_PHASE_THREE_DELAY: Duration = Duration::from_millis(2000);

/// One scripted zombie entry inside a wave table.
#[derive(Clone, Copy, Debug)]
struct ScriptedSpawn {
    kind: ZombieKind,
    spawn_point: SpawnPoint,
    pattern: MovementPattern,
    activation_delay: Duration,
}

impl ScriptedSpawn {
    const fn new(
        kind: ZombieKind,
        spawn_point: SpawnPoint,
        pattern: MovementPattern,
        activation_delay_ms: u64,
    ) -> Self {
        Self {
            kind,
            spawn_point,
            pattern,
            activation_delay: Duration::from_millis(activation_delay_ms),
        }
    }
}

const WAVE_ONE: &[ScriptedSpawn] = &[ScriptedSpawn::new(
    ZombieKind::Red,
    SpawnPoint::A,
    MovementPattern::Straight,
    0,
)];

const WAVE_TWO: &[ScriptedSpawn] = &[
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::B, MovementPattern::RoamLeft, 0),
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::C, MovementPattern::RoamRight, 0),
];

const WAVE_THREE: &[ScriptedSpawn] = &[
    ScriptedSpawn::new(
        ZombieKind::Orange,
        SpawnPoint::B,
        MovementPattern::RoamLeft,
        0,
    ),
    ScriptedSpawn::new(
        ZombieKind::Orange,
        SpawnPoint::C,
        MovementPattern::RoamRight,
        0,
    ),
];

const WAVE_FOUR: &[ScriptedSpawn] = &[
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::B, MovementPattern::RoamLeft, 0),
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::C, MovementPattern::RoamRight, 0),
    ScriptedSpawn::new(
        ZombieKind::Orange,
        SpawnPoint::A,
        MovementPattern::RoamFull,
        1000,
    ),
];

const WAVE_FIVE_OPENING: &[ScriptedSpawn] = &[
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::D, MovementPattern::Straight, 0),
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::A, MovementPattern::Straight, 0),
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::E, MovementPattern::Straight, 0),
];

const WAVE_FIVE_PHASE_TWO: &[ScriptedSpawn] = &[
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::B, MovementPattern::RoamLeft, 0),
    ScriptedSpawn::new(ZombieKind::Red, SpawnPoint::C, MovementPattern::RoamRight, 0),
];

const WAVE_FIVE_PHASE_THREE: &[ScriptedSpawn] = &[
    ScriptedSpawn::new(
        ZombieKind::Orange,
        SpawnPoint::B,
        MovementPattern::RoamLeft,
        0,
    ),
    ScriptedSpawn::new(
        ZombieKind::Orange,
        SpawnPoint::C,
        MovementPattern::RoamRight,
        0,
    ),
];

/// Delayed spawn batch scheduled by a multi-phase wave script.
#[derive(Clone, Copy, Debug)]
struct PendingPhase {
    due: Duration,
    spawns: &'static [ScriptedSpawn],
}

/// Player-facing description of the campaign's current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveStatus {
    /// The next wave is counting down.
    Waiting {
        /// Number of the wave about to start.
        next_wave: u32,
        /// Time remaining before the wave starts.
        remaining: Duration,
    },
    /// A wave is in progress.
    Active {
        /// Number of the running wave.
        wave: u32,
        /// Zombies currently on the playfield.
        zombies: usize,
    },
    /// The most recent wave was cleared and no further wave is scheduled yet.
    Complete {
        /// Number of the cleared wave.
        wave: u32,
    },
    /// Every wave has been cleared.
    Victory,
}

/// Pure system that schedules the scripted waves and tracks their progress.
#[derive(Debug)]
pub struct WaveDirector {
    clock: Duration,
    current_wave: u32,
    wave_complete: bool,
    waiting_for_next_wave: bool,
    next_wave_deadline: Duration,
    pending_phases: Vec<PendingPhase>,
    zombies_alive: usize,
    awaiting_spawns: usize,
}

impl WaveDirector {
    /// Creates a new director with no wave scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Duration::ZERO,
            current_wave: 0,
            wave_complete: true,
            waiting_for_next_wave: false,
            next_wave_deadline: Duration::ZERO,
            pending_phases: Vec::new(),
            zombies_alive: 0,
            awaiting_spawns: 0,
        }
    }

    /// Schedules the first wave after the standard inter-wave pause.
    pub fn start_first_wave(&mut self) {
        self.current_wave = 0;
        self.wave_complete = true;
        self.waiting_for_next_wave = true;
        self.next_wave_deadline = self.clock + INTER_WAVE_DELAY;
    }

    /// Consumes world events and emits the spawn commands due this frame.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.clock = self.clock.saturating_add(*dt);
                }
                Event::ZombieSpawned { .. } => {
                    self.awaiting_spawns = self.awaiting_spawns.saturating_sub(1);
                    self.zombies_alive += 1;
                }
                Event::ZombieDestroyed { .. } | Event::ZombieExited { .. } => {
                    self.zombies_alive = self.zombies_alive.saturating_sub(1);
                }
                _ => {}
            }
        }

        if self.waiting_for_next_wave && self.clock >= self.next_wave_deadline {
            self.execute_wave_start(out);
        }

        self.release_due_phases(out);

        if !self.wave_complete
            && !self.waiting_for_next_wave
            && self.zombies_alive == 0
            && self.awaiting_spawns == 0
            && self.pending_phases.is_empty()
        {
            self.wave_complete = true;
            if self.current_wave < TOTAL_WAVES {
                self.waiting_for_next_wave = true;
                self.next_wave_deadline = self.clock + INTER_WAVE_DELAY;
            }
        }
    }

    fn execute_wave_start(&mut self, out: &mut Vec<Command>) {
        self.waiting_for_next_wave = false;
        self.current_wave += 1;
        self.wave_complete = false;
        self.pending_phases.clear();

        match self.current_wave {
            1 => self.emit_spawns(WAVE_ONE, out),
            2 => self.emit_spawns(WAVE_TWO, out),
            3 => self.emit_spawns(WAVE_THREE, out),
            4 => self.emit_spawns(WAVE_FOUR, out),
            5 => {
                self.emit_spawns(WAVE_FIVE_OPENING, out);
                self.pending_phases.push(PendingPhase {
                    due: self.clock + WAVE_FIVE_PHASE_TWO_DELAY,
                    spawns: WAVE_FIVE_PHASE_TWO,
                });
                self.pending_phases.push(PendingPhase {
                    due: self.clock + WAVE_FIVE_PHASE_THREE_DELAY,
                    spawns: WAVE_FIVE_PHASE_THREE,
                });
            }
            _ => {}
        }
    }

    fn release_due_phases(&mut self, out: &mut Vec<Command>) {
        let clock = self.clock;
        let due: Vec<PendingPhase> = self
            .pending_phases
            .iter()
            .copied()
            .filter(|phase| clock >= phase.due)
            .collect();
        self.pending_phases.retain(|phase| clock < phase.due);
        for phase in due {
            self.emit_spawns(phase.spawns, out);
        }
    }

    fn emit_spawns(&mut self, entries: &[ScriptedSpawn], out: &mut Vec<Command>) {
        for entry in entries {
            self.awaiting_spawns += 1;
            out.push(Command::SpawnZombie {
                kind: entry.kind,
                spawn_point: entry.spawn_point,
                pattern: entry.pattern,
                activation_delay: entry.activation_delay,
            });
        }
    }

    /// Number of the wave currently running (or most recently started).
    #[must_use]
    pub const fn current_wave(&self) -> u32 {
        self.current_wave
    }

    /// Reports whether the director is counting down to the next wave.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        self.waiting_for_next_wave
    }

    /// Reports whether the current wave has been cleared.
    #[must_use]
    pub const fn wave_complete(&self) -> bool {
        self.wave_complete
    }

    /// Reports whether every scripted wave has been cleared.
    #[must_use]
    pub const fn all_waves_completed(&self) -> bool {
        self.current_wave >= TOTAL_WAVES && self.wave_complete
    }

    /// Describes the campaign state for presentation purposes.
    #[must_use]
    pub fn status(&self) -> WaveStatus {
        if self.waiting_for_next_wave {
            WaveStatus::Waiting {
                next_wave: self.current_wave + 1,
                remaining: self.next_wave_deadline.saturating_sub(self.clock),
            }
        } else if self.all_waves_completed() {
            WaveStatus::Victory
        } else if self.wave_complete {
            WaveStatus::Complete {
                wave: self.current_wave,
            }
        } else {
            WaveStatus::Active {
                wave: self.current_wave,
                zombies: self.zombies_alive,
            }
        }
    }
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new()
    }
}
