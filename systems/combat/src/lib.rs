#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands for ready shooters.

use std::time::Duration;

use garden_invasion_core::{Command, ZombieCooldownView};

/// Combat system that queues firing commands for the plant and for every
/// ranged zombie whose cooldown has elapsed.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<Command>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits fire commands for every shooter that is ready this frame.
    ///
    /// The plant fires automatically whenever its cooldown is over; zombies
    /// additionally have to be past their activation delay. The world
    /// re-validates both conditions when the commands are applied.
    pub fn handle(
        &mut self,
        plant_ready_in: Duration,
        zombie_cooldowns: ZombieCooldownView,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();

        if plant_ready_in.is_zero() {
            self.scratch.push(Command::FirePlantProjectile);
        }

        for snapshot in zombie_cooldowns.iter() {
            if snapshot.active && snapshot.ready_in.is_zero() {
                self.scratch.push(Command::FireZombieProjectile {
                    zombie: snapshot.zombie,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
