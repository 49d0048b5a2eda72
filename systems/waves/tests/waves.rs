use std::time::Duration;

use garden_invasion_core::{Command, Event, Health, ZombieKind};
use garden_invasion_system_waves::{WaveDirector, WaveStatus, TOTAL_WAVES};
use garden_invasion_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);

/// Advances the simulation by one frame: tick the world, let the director
/// react, apply its commands, and feed the confirmations back.
fn pump_frame(world: &mut World, director: &mut WaveDirector) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);

    let mut commands = Vec::new();
    director.handle(&events, &mut commands);

    let mut confirmations = Vec::new();
    for command in commands {
        world::apply(world, command, &mut confirmations);
    }
    director.handle(&confirmations, &mut Vec::new());

    events.extend(confirmations);
    events
}

#[test]
fn campaign_spawns_the_scripted_cardinalities() {
    let mut world = World::new();
    let mut director = WaveDirector::new();
    director.start_first_wave();

    assert_eq!(
        director.status(),
        WaveStatus::Waiting {
            next_wave: 1,
            remaining: Duration::from_millis(3000),
        },
    );

    let mut spawns_per_wave = [0usize; TOTAL_WAVES as usize];
    let mut frames = 0u32;
    while !director.all_waves_completed() {
        let events = pump_frame(&mut world, &mut director);
        for event in &events {
            if matches!(event, Event::ZombieSpawned { .. }) {
                let wave = director.current_wave() as usize;
                assert!(wave >= 1 && wave <= TOTAL_WAVES as usize);
                spawns_per_wave[wave - 1] += 1;
            }
        }

        frames += 1;
        assert!(frames < 20_000, "campaign did not finish");
    }

    assert_eq!(spawns_per_wave, [1, 2, 2, 3, 7]);
    assert_eq!(director.status(), WaveStatus::Victory);
    assert_eq!(query::zombies_alive(&world), 0);
}

#[test]
fn third_wave_zombies_spawn_with_two_hit_points() {
    let mut world = World::new();
    let mut director = WaveDirector::new();
    director.start_first_wave();

    let mut frames = 0u32;
    loop {
        let events = pump_frame(&mut world, &mut director);
        let spawned_this_frame = events
            .iter()
            .any(|event| matches!(event, Event::ZombieSpawned { .. }));
        if director.current_wave() == 3 && spawned_this_frame {
            break;
        }
        frames += 1;
        assert!(frames < 10_000, "third wave never started");
    }

    let zombies = query::zombie_view(&world).into_vec();
    assert_eq!(zombies.len(), 2);
    for zombie in zombies {
        assert_eq!(zombie.kind, ZombieKind::Orange);
        assert_eq!(zombie.health, Health::new(2));
    }
}

#[test]
fn waves_pause_for_three_seconds_between_each_other() {
    let mut world = World::new();
    let mut director = WaveDirector::new();
    director.start_first_wave();

    // Clear wave 1 by letting its single zombie fall off the bottom edge.
    let mut frames = 0u32;
    while !(director.wave_complete() && director.current_wave() == 1) {
        let _ = pump_frame(&mut world, &mut director);
        frames += 1;
        assert!(frames < 10_000, "first wave never cleared");
    }

    match director.status() {
        WaveStatus::Waiting {
            next_wave,
            remaining,
        } => {
            assert_eq!(next_wave, 2);
            assert!(remaining <= Duration::from_millis(3000));
            assert!(remaining > Duration::from_millis(2900));
        }
        status => panic!("expected waiting status, got {status:?}"),
    }
}
