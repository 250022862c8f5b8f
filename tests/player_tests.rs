#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use kontagion::simulation::entity::{Entity, EntityKind};
use kontagion::simulation::events::{EventQueue, Key, SoundCue};
use kontagion::simulation::geometric_utils::{bearing_degrees, distance, point};
use kontagion::simulation::goodie::GoodieKind;
use kontagion::simulation::health::Health;
use kontagion::simulation::locatable::Locatable;
use kontagion::simulation::params::GameConfig;
use kontagion::simulation::player::{Player, flame_burst_headings};
use kontagion::simulation::world::{TickOutcome, World};

fn create_test_config() -> GameConfig {
    GameConfig {
        rng_seed: Some(11),
        pit_spawn_chance: i32::MAX,
        fungus_roll_floor: i32::MAX,
        goodie_roll_floor: i32::MAX,
        ..GameConfig::default()
    }
}

/// A world holding only the player and a dormant pit that keeps the level open.
fn create_test_world() -> World {
    let config = create_test_config();
    let mut world = World::new(config.clone(), 1);
    world.spawn(Entity::pit(&config, point(128.0, 200.0)));
    world.set_player(Player::new(&config));
    world
}

fn angle_between(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

fn projectiles(world: &World) -> Vec<&Entity> {
    world
        .entities()
        .iter()
        .filter(|e| matches!(e.kind, EntityKind::Projectile(_)))
        .collect()
}

#[test]
fn test_player_starts_on_ring() {
    let config = create_test_config();
    let player = Player::new(&config);

    assert_eq!(player.pos()[0], 0.0);
    assert_eq!(player.pos()[1], 128.0);
    assert_eq!(player.heading(), 0.0);
    assert_eq!(player.health(), 100);
    assert_eq!(player.spray_charges(), 20);
    assert_eq!(player.flame_charges(), 5);
}

#[test]
fn test_rotation_stays_on_ring_facing_center() {
    let config = create_test_config();
    let mut player = Player::new(&config);
    let center = point(128.0, 128.0);

    for delta in [5.0, 5.0, -5.0, 13.7, -200.0, 95.0, 5.0, -5.0, 359.0] {
        player.rotate(delta, &config);
        assert!((distance(player.pos(), &center) - 128.0).abs() < 1e-2);
        assert!((0.0..360.0).contains(&player.heading()));
        let inward = bearing_degrees(player.pos(), &center);
        assert!(angle_between(player.heading(), inward) < 1e-2);
    }
}

#[test]
fn test_rotation_snaps_back_onto_ring() {
    let config = create_test_config();
    let mut player = Player::new(&config);
    *player.pos_mut() = point(10.0, 128.0);

    player.rotate(0.0, &config);

    assert!((player.pos()[0] - 0.0).abs() < 1e-3);
    assert!((player.pos()[1] - 128.0).abs() < 1e-3);
}

#[test]
fn test_left_moves_counter_clockwise() {
    let mut world = create_test_world();
    world.push_key(Key::Left);

    assert_eq!(world.tick(), TickOutcome::Continue);

    let player = world.player().unwrap();
    // from angle 180 to 185 around the centre
    assert!(player.pos()[1] < 128.0);
    assert!((player.heading() - 5.0).abs() < 1e-3);
}

#[test]
fn test_one_key_per_tick() {
    let mut world = create_test_world();
    world.push_key(Key::Left);
    world.push_key(Key::Right);

    world.tick();
    assert_eq!(world.pending_keys(), 1);

    world.tick();
    assert_eq!(world.pending_keys(), 0);
    let player = world.player().unwrap();
    assert!(player.pos()[0].abs() < 1e-3);
    assert!((player.pos()[1] - 128.0).abs() < 1e-3);
}

#[test]
fn test_spray_fires_one_sprite_ahead() {
    let mut world = create_test_world();
    world.push_key(Key::Space);

    world.tick();

    assert_eq!(world.player().unwrap().spray_charges(), 19);
    let shots = projectiles(&world);
    assert_eq!(shots.len(), 1);
    assert!((shots[0].pos()[0] - 8.0).abs() < 1e-4);
    assert!((shots[0].pos()[1] - 128.0).abs() < 1e-4);
    assert_eq!(shots[0].heading(), 0.0);
    assert!(world.pending_sounds().contains(&SoundCue::PlayerSpray));
}

#[test]
fn test_spray_needs_charges() {
    let mut world = create_test_world();
    world.player_mut().unwrap().set_spray_charges(0);
    world.push_key(Key::Space);

    world.tick();

    // the key is consumed, so no charge regenerates this tick
    assert_eq!(world.pending_keys(), 0);
    assert_eq!(world.player().unwrap().spray_charges(), 0);
    assert!(projectiles(&world).is_empty());
    assert!(!world.pending_sounds().contains(&SoundCue::PlayerSpray));
}

#[test]
fn test_spray_regenerates_up_to_cap() {
    let mut world = create_test_world();
    world.player_mut().unwrap().set_spray_charges(18);

    world.tick();
    assert_eq!(world.player().unwrap().spray_charges(), 19);
    world.tick();
    assert_eq!(world.player().unwrap().spray_charges(), 20);
    world.tick();
    assert_eq!(world.player().unwrap().spray_charges(), 20);
}

#[test]
fn test_flame_burst() {
    let mut world = create_test_world();
    world.push_key(Key::Enter);

    world.tick();

    let player = world.player().unwrap();
    assert_eq!(player.flame_charges(), 4);

    let flames = projectiles(&world);
    assert_eq!(flames.len(), 16);
    for (i, flame) in flames.iter().enumerate() {
        assert_eq!(flame.heading(), i as f32 * 22.5);
        assert!((distance(flame.pos(), player.pos()) - 8.0).abs() < 1e-3);
    }
    assert!(world.pending_sounds().contains(&SoundCue::PlayerFire));
}

#[test]
fn test_flame_needs_charges() {
    let mut world = create_test_world();
    world.player_mut().unwrap().set_flame_charges(0);
    world.push_key(Key::Enter);

    world.tick();

    assert!(projectiles(&world).is_empty());
    assert!(!world.pending_sounds().contains(&SoundCue::PlayerFire));
}

#[test]
fn test_flame_burst_headings_wrap() {
    let headings = flame_burst_headings(350.0, 16);

    assert_eq!(headings.len(), 16);
    assert_eq!(headings[0], 350.0);
    assert_eq!(headings[1], 12.5);
    assert!(headings.iter().all(|h| (0.0..360.0).contains(h)));
}

#[test]
fn test_take_damage_cues() {
    let config = create_test_config();
    let mut player = Player::new(&config);
    let mut cues = EventQueue::new();

    player.take_damage(30, &mut cues);
    assert_eq!(player.health(), 70);
    assert_eq!(cues.pending(), &[SoundCue::PlayerHurt]);

    player.take_damage(70, &mut cues);
    assert_eq!(player.health(), 0);
    assert_eq!(cues.pending().len(), 1);
    // still alive until its next update notices
    assert!(player.is_alive());
}

#[test]
fn test_fatal_fungus_costs_a_life() {
    let mut world = create_test_world();
    world.player_mut().unwrap().health = Health::new(5);
    world.spawn(Entity::goodie(GoodieKind::Fungus, 100, point(3.0, 128.0)));
    world.drain_sounds();

    assert_eq!(world.tick(), TickOutcome::PlayerDied);

    assert!(world.player().is_none());
    assert_eq!(world.scoreboard().lives, 2);
    assert_eq!(world.scoreboard().score, -50);
    let sounds = world.drain_sounds();
    assert!(sounds.contains(&SoundCue::PlayerDie));
    assert!(!sounds.contains(&SoundCue::PlayerHurt));
}

#[test]
fn test_dead_world_keeps_ticking_without_player() {
    let mut world = create_test_world();
    world.player_mut().unwrap().health = Health::new(0);

    assert_eq!(world.tick(), TickOutcome::PlayerDied);
    assert_eq!(world.tick(), TickOutcome::Continue);
    assert_eq!(world.scoreboard().lives, 2);
}
