#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Garden Invasion experience.

use garden_invasion_core::{Command, WallNutSlot};
use garden_invasion_world::{query, Playfield, World};

/// Produces the data and commands required to open a fresh game.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the playfield configuration required for rendering.
    #[must_use]
    pub fn playfield<'world>(&self, world: &'world World) -> &'world Playfield {
        query::playfield(world)
    }

    /// Emits the start-of-game command batch: a wall-nut in every slot.
    pub fn opening_commands(&self, out: &mut Vec<Command>) {
        for slot in WallNutSlot::ALL {
            out.push(Command::PlaceWallNut { slot });
        }
    }
}
