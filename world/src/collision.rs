//! Fixed-order collision resolution executed once per simulation tick.
//!
//! Every check collects its overlapping pairs against the pre-damage entity
//! sets first and applies damage and removals afterwards, so no collection is
//! ever mutated while it is being scanned.

use garden_invasion_core::{DestructionCause, Event, SoundCue, WallNutSlot};

use super::{Plant, PlantProjectile, WallNutSlots, Zombie, ZombieProjectile};

/// Runs the per-tick collision pass in its fixed order.
pub(super) fn resolve(
    plant: &mut Plant,
    plant_projectiles: &mut Vec<PlantProjectile>,
    zombies: &mut Vec<Zombie>,
    zombie_projectiles: &mut Vec<ZombieProjectile>,
    wall_nuts: &mut WallNutSlots,
    out_events: &mut Vec<Event>,
) {
    let _ = block_plant_projectiles(plant_projectiles, wall_nuts, out_events);
    let _ = plant_projectiles_vs_zombies(plant_projectiles, zombies, out_events);
    let _ = zombie_projectiles_vs_plant(zombie_projectiles, plant, out_events);
    let _ = zombie_projectiles_vs_wall_nuts(zombie_projectiles, wall_nuts, out_events);
    let _ = zombies_vs_wall_nuts(zombies, wall_nuts, out_events);
    let _ = zombies_vs_plant(zombies, plant, out_events);
}

/// Wall-nuts absorb friendly projectiles without taking damage.
fn block_plant_projectiles(
    projectiles: &mut Vec<PlantProjectile>,
    wall_nuts: &WallNutSlots,
    out_events: &mut Vec<Event>,
) -> bool {
    let mut blocked = vec![false; projectiles.len()];
    for (index, projectile) in projectiles.iter().enumerate() {
        let rect = projectile.rect();
        if let Some(slot) = wall_nuts
            .standing()
            .find(|wall_nut| wall_nut.rect().intersects(&rect))
            .map(|wall_nut| wall_nut.slot)
        {
            blocked[index] = true;
            out_events.push(Event::ProjectileBlocked { slot });
        }
    }

    let any = blocked.iter().any(|flag| *flag);
    compact(projectiles, &blocked);
    any
}

/// Check 1: plant projectiles strike zombies for one point of damage each.
fn plant_projectiles_vs_zombies(
    projectiles: &mut Vec<PlantProjectile>,
    zombies: &mut Vec<Zombie>,
    out_events: &mut Vec<Event>,
) -> bool {
    let mut consumed = vec![false; projectiles.len()];
    let mut hits: Vec<usize> = Vec::new();
    for (projectile_index, projectile) in projectiles.iter().enumerate() {
        let rect = projectile.rect();
        for (zombie_index, zombie) in zombies.iter().enumerate() {
            if zombie.rect().intersects(&rect) {
                consumed[projectile_index] = true;
                hits.push(zombie_index);
            }
        }
    }

    let any = consumed.iter().any(|flag| *flag);
    compact(projectiles, &consumed);

    for zombie_index in hits {
        let zombie = &mut zombies[zombie_index];
        out_events.push(Event::SoundRequested {
            cue: SoundCue::ZombieHit,
        });
        // A zombie hit twice in one pass reports destruction on both hits;
        // the event fires only on the transition to zero health.
        let was_standing = !zombie.health.is_depleted();
        if zombie.take_damage(1) && was_standing {
            out_events.push(Event::ZombieDestroyed {
                zombie: zombie.id,
                cause: DestructionCause::Projectile,
            });
        }
    }
    zombies.retain(|zombie| !zombie.health.is_depleted());

    any
}

/// Check 2: zombie projectiles strike the plant. True only when the plant
/// reached zero life points in this pass.
fn zombie_projectiles_vs_plant(
    projectiles: &mut Vec<ZombieProjectile>,
    plant: &mut Plant,
    out_events: &mut Vec<Event>,
) -> bool {
    let plant_rect = plant.rect();
    let before = projectiles.len();
    projectiles.retain(|projectile| !projectile.rect().intersects(&plant_rect));
    let hits = before - projectiles.len();

    let mut destroyed = false;
    for _ in 0..hits {
        out_events.push(Event::SoundRequested {
            cue: SoundCue::PlantHit,
        });
        let was_alive = plant.is_alive();
        let depleted = plant.take_damage();
        out_events.push(Event::PlantDamaged {
            remaining: plant.life_points,
        });
        if depleted && was_alive {
            destroyed = true;
            out_events.push(Event::PlantDestroyed);
            out_events.push(Event::SoundRequested {
                cue: SoundCue::GameOver,
            });
            break;
        }
    }
    destroyed
}

/// Check 3: zombie projectiles strike wall-nuts for one point of damage each.
fn zombie_projectiles_vs_wall_nuts(
    projectiles: &mut Vec<ZombieProjectile>,
    wall_nuts: &mut WallNutSlots,
    out_events: &mut Vec<Event>,
) -> bool {
    let mut consumed = vec![false; projectiles.len()];
    let mut hit_slots: Vec<WallNutSlot> = Vec::new();
    for (index, projectile) in projectiles.iter().enumerate() {
        let rect = projectile.rect();
        for wall_nut in wall_nuts.standing() {
            if wall_nut.rect().intersects(&rect) {
                consumed[index] = true;
                hit_slots.push(wall_nut.slot);
            }
        }
    }

    let any = consumed.iter().any(|flag| *flag);
    compact(projectiles, &consumed);
    apply_wall_nut_damage(wall_nuts, &hit_slots, out_events);
    any
}

/// Check 4: zombies expire on contact with wall-nuts, damaging them.
fn zombies_vs_wall_nuts(
    zombies: &mut Vec<Zombie>,
    wall_nuts: &mut WallNutSlots,
    out_events: &mut Vec<Event>,
) -> bool {
    let mut crushed = vec![false; zombies.len()];
    let mut hit_slots: Vec<WallNutSlot> = Vec::new();
    for (index, zombie) in zombies.iter().enumerate() {
        let rect = zombie.rect();
        for wall_nut in wall_nuts.standing() {
            if wall_nut.rect().intersects(&rect) {
                crushed[index] = true;
                hit_slots.push(wall_nut.slot);
            }
        }
    }

    let any = crushed.iter().any(|flag| *flag);
    for (index, zombie) in zombies.iter().enumerate() {
        if crushed[index] {
            out_events.push(Event::ZombieDestroyed {
                zombie: zombie.id,
                cause: DestructionCause::Barrier,
            });
        }
    }
    compact(zombies, &crushed);
    apply_wall_nut_damage(wall_nuts, &hit_slots, out_events);
    any
}

/// Check 5: zombies expire on contact with the plant, damaging it. True only
/// when the plant reached zero life points in this pass.
fn zombies_vs_plant(
    zombies: &mut Vec<Zombie>,
    plant: &mut Plant,
    out_events: &mut Vec<Event>,
) -> bool {
    let plant_rect = plant.rect();
    let mut contact = vec![false; zombies.len()];
    for (index, zombie) in zombies.iter().enumerate() {
        if zombie.rect().intersects(&plant_rect) {
            contact[index] = true;
        }
    }

    let mut destroyed = false;
    for (index, zombie) in zombies.iter().enumerate() {
        if contact[index] {
            out_events.push(Event::ZombieDestroyed {
                zombie: zombie.id,
                cause: DestructionCause::Plant,
            });
            out_events.push(Event::SoundRequested {
                cue: SoundCue::PlantHit,
            });
            let was_alive = plant.is_alive();
            let depleted = plant.take_damage();
            out_events.push(Event::PlantDamaged {
                remaining: plant.life_points,
            });
            if depleted && was_alive {
                destroyed = true;
                out_events.push(Event::PlantDestroyed);
                out_events.push(Event::SoundRequested {
                    cue: SoundCue::GameOver,
                });
            }
        }
    }
    compact(zombies, &contact);
    destroyed
}

fn apply_wall_nut_damage(
    wall_nuts: &mut WallNutSlots,
    hit_slots: &[WallNutSlot],
    out_events: &mut Vec<Event>,
) {
    for slot in hit_slots {
        let mut destroyed_slot = None;
        for wall_nut in wall_nuts.standing_mut() {
            if wall_nut.slot == *slot {
                if wall_nut.take_damage() {
                    destroyed_slot = Some(*slot);
                    out_events.push(Event::WallNutDestroyed { slot: *slot });
                    out_events.push(Event::SoundRequested {
                        cue: SoundCue::WallNutDestroyed,
                    });
                } else {
                    out_events.push(Event::WallNutDamaged {
                        slot: *slot,
                        remaining: wall_nut.health,
                    });
                }
                break;
            }
        }
        if let Some(slot) = destroyed_slot {
            wall_nuts.consume(slot);
        }
    }
}

fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::{Plant, PlantProjectile, Playfield, WallNutSlots, Zombie, ZombieProjectile};
    use super::*;
    use garden_invasion_core::{
        Health, MovementPattern, Position, SpawnPoint, ZombieId, ZombieKind,
    };

    fn playfield() -> Playfield {
        Playfield::new(600.0, 600.0)
    }

    fn zombie_at(id: u32, kind: ZombieKind, x: f32, y: f32) -> Zombie {
        let mut zombie = Zombie::spawned(
            ZombieId::new(id),
            kind,
            SpawnPoint::A,
            MovementPattern::Straight,
            Duration::ZERO,
            &playfield(),
        );
        zombie.x = x;
        zombie.y = y;
        zombie
    }

    fn plant_projectile_at(x: f32, y: f32) -> PlantProjectile {
        let mut projectile = PlantProjectile::launched_from(Position::new(0.0, 0.0));
        projectile.x = x;
        projectile.y = y;
        projectile
    }

    fn zombie_projectile_at(x: f32, y: f32) -> ZombieProjectile {
        let mut projectile = ZombieProjectile::launched_from(Position::new(0.0, 0.0));
        projectile.x = x;
        projectile.y = y;
        projectile
    }

    fn occupied_slots() -> WallNutSlots {
        let mut wall_nuts = WallNutSlots::aligned_with(&playfield());
        for slot in garden_invasion_core::WallNutSlot::ALL {
            wall_nuts.place(slot).expect("slot is empty");
        }
        wall_nuts
    }

    #[test]
    fn projectile_hit_removes_projectile_and_damages_zombie() {
        let mut projectiles = vec![plant_projectile_at(100.0, 100.0)];
        let mut zombies = vec![zombie_at(0, ZombieKind::Orange, 90.0, 80.0)];
        let mut events = Vec::new();

        let any = plant_projectiles_vs_zombies(&mut projectiles, &mut zombies, &mut events);

        assert!(any);
        assert!(projectiles.is_empty());
        assert_eq!(zombies.len(), 1);
        assert_eq!(zombies[0].health, Health::new(1));
        assert!(events.contains(&Event::SoundRequested {
            cue: SoundCue::ZombieHit
        }));
    }

    #[test]
    fn lethal_projectile_hit_destroys_the_zombie() {
        let mut projectiles = vec![plant_projectile_at(100.0, 100.0)];
        let mut zombies = vec![zombie_at(3, ZombieKind::Red, 90.0, 80.0)];
        let mut events = Vec::new();

        let any = plant_projectiles_vs_zombies(&mut projectiles, &mut zombies, &mut events);

        assert!(any);
        assert!(projectiles.is_empty());
        assert!(zombies.is_empty());
        assert!(events.contains(&Event::ZombieDestroyed {
            zombie: ZombieId::new(3),
            cause: DestructionCause::Projectile,
        }));
    }

    #[test]
    fn simultaneous_hits_apply_independently() {
        let mut projectiles = vec![
            plant_projectile_at(95.0, 100.0),
            plant_projectile_at(105.0, 100.0),
        ];
        let mut zombies = vec![zombie_at(0, ZombieKind::Orange, 90.0, 80.0)];
        let mut events = Vec::new();

        let _ = plant_projectiles_vs_zombies(&mut projectiles, &mut zombies, &mut events);

        // Both projectiles are consumed and both damage points land even
        // though the second hit finds the zombie already destroyed.
        assert!(projectiles.is_empty());
        assert!(zombies.is_empty());
    }

    #[test]
    fn missed_projectiles_stay_live() {
        let mut projectiles = vec![plant_projectile_at(500.0, 500.0)];
        let mut zombies = vec![zombie_at(0, ZombieKind::Red, 90.0, 80.0)];
        let mut events = Vec::new();

        let any = plant_projectiles_vs_zombies(&mut projectiles, &mut zombies, &mut events);

        assert!(!any);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(zombies.len(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn wall_nut_blocks_without_taking_damage() {
        let mut wall_nuts = occupied_slots();
        // Slot 1 is centered at (210, 420).
        let mut projectiles = vec![plant_projectile_at(205.0, 410.0)];
        let mut zombies = vec![zombie_at(0, ZombieKind::Red, 200.0, 380.0)];
        let mut events = Vec::new();

        let any = block_plant_projectiles(&mut projectiles, &wall_nuts, &mut events);
        let follow_up = plant_projectiles_vs_zombies(&mut projectiles, &mut zombies, &mut events);

        assert!(any);
        assert!(!follow_up);
        assert!(projectiles.is_empty());
        assert_eq!(zombies[0].health, Health::new(1));
        let standing: Vec<Health> = wall_nuts.standing().map(|nut| nut.health).collect();
        assert!(standing.iter().all(|health| *health == Health::new(2)));
        assert!(events.contains(&Event::ProjectileBlocked {
            slot: WallNutSlot::new(1)
        }));
    }

    #[test]
    fn plant_survives_the_first_projectile_hit() {
        let mut plant = Plant::centered_on(&playfield());
        let mut projectiles = vec![zombie_projectile_at(290.0, 500.0)];
        let mut events = Vec::new();

        let destroyed = zombie_projectiles_vs_plant(&mut projectiles, &mut plant, &mut events);

        assert!(!destroyed);
        assert!(projectiles.is_empty());
        assert_eq!(plant.life_points, Health::new(1));
        assert!(events.contains(&Event::PlantDamaged {
            remaining: Health::new(1)
        }));
        assert!(!events.contains(&Event::PlantDestroyed));
    }

    #[test]
    fn two_projectile_hits_in_one_pass_destroy_the_plant() {
        let mut plant = Plant::centered_on(&playfield());
        let mut projectiles = vec![
            zombie_projectile_at(280.0, 500.0),
            zombie_projectile_at(300.0, 500.0),
        ];
        let mut events = Vec::new();

        let destroyed = zombie_projectiles_vs_plant(&mut projectiles, &mut plant, &mut events);

        assert!(destroyed);
        assert!(plant.life_points.is_depleted());
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::PlantDestroyed))
                .count(),
            1
        );
        assert!(events.contains(&Event::SoundRequested {
            cue: SoundCue::GameOver
        }));
    }

    #[test]
    fn zombie_projectiles_wear_down_a_wall_nut() {
        let mut wall_nuts = occupied_slots();
        let mut events = Vec::new();

        let mut projectiles = vec![zombie_projectile_at(205.0, 400.0)];
        let any = zombie_projectiles_vs_wall_nuts(&mut projectiles, &mut wall_nuts, &mut events);
        assert!(any);
        assert!(projectiles.is_empty());
        assert!(events.contains(&Event::WallNutDamaged {
            slot: WallNutSlot::new(1),
            remaining: Health::new(1),
        }));

        events.clear();
        let mut projectiles = vec![zombie_projectile_at(205.0, 400.0)];
        let _ = zombie_projectiles_vs_wall_nuts(&mut projectiles, &mut wall_nuts, &mut events);
        assert!(events.contains(&Event::WallNutDestroyed {
            slot: WallNutSlot::new(1)
        }));
        assert!(events.contains(&Event::SoundRequested {
            cue: SoundCue::WallNutDestroyed
        }));
        assert_eq!(wall_nuts.standing().count(), 3);
    }

    #[test]
    fn zombie_expires_on_wall_nut_contact() {
        let mut wall_nuts = occupied_slots();
        let mut zombies = vec![zombie_at(7, ZombieKind::Orange, 190.0, 400.0)];
        let mut events = Vec::new();

        let any = zombies_vs_wall_nuts(&mut zombies, &mut wall_nuts, &mut events);

        assert!(any);
        assert!(zombies.is_empty());
        assert!(events.contains(&Event::ZombieDestroyed {
            zombie: ZombieId::new(7),
            cause: DestructionCause::Barrier,
        }));
        assert!(events.contains(&Event::WallNutDamaged {
            slot: WallNutSlot::new(1),
            remaining: Health::new(1),
        }));
    }

    #[test]
    fn zombie_contact_damages_the_plant() {
        let mut plant = Plant::centered_on(&playfield());
        let mut zombies = vec![zombie_at(2, ZombieKind::Red, 280.0, 480.0)];
        let mut events = Vec::new();

        let destroyed = zombies_vs_plant(&mut zombies, &mut plant, &mut events);

        assert!(!destroyed);
        assert!(zombies.is_empty());
        assert_eq!(plant.life_points, Health::new(1));
        assert!(events.contains(&Event::ZombieDestroyed {
            zombie: ZombieId::new(2),
            cause: DestructionCause::Plant,
        }));
    }

    #[test]
    fn two_zombies_reaching_the_plant_end_the_game() {
        let mut plant = Plant::centered_on(&playfield());
        let mut zombies = vec![
            zombie_at(0, ZombieKind::Red, 270.0, 480.0),
            zombie_at(1, ZombieKind::Red, 300.0, 480.0),
        ];
        let mut events = Vec::new();

        let destroyed = zombies_vs_plant(&mut zombies, &mut plant, &mut events);

        assert!(destroyed);
        assert!(zombies.is_empty());
        assert!(plant.life_points.is_depleted());
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::PlantDestroyed))
                .count(),
            1
        );
    }
}
