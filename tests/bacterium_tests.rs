#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use kontagion::simulation::bacterium::{Bacterium, Strain};
use kontagion::simulation::entity::{Entity, EntityKind};
use kontagion::simulation::events::{EventQueue, SoundCue};
use kontagion::simulation::geometric_utils::{distance, point};
use kontagion::simulation::locatable::Locatable;
use kontagion::simulation::params::GameConfig;
use kontagion::simulation::player::Player;
use kontagion::simulation::world::{TickOutcome, World};

fn create_test_config() -> GameConfig {
    GameConfig {
        rng_seed: Some(5),
        pit_spawn_chance: i32::MAX,
        fungus_roll_floor: i32::MAX,
        goodie_roll_floor: i32::MAX,
        ..GameConfig::default()
    }
}

fn bacteria(world: &World) -> Vec<&Entity> {
    world
        .entities()
        .iter()
        .filter(|e| e.as_bacterium().is_some())
        .collect()
}

fn assert_near(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_strain_stats() {
    for (strain, health, damage) in [
        (Strain::RegularSalmonella, 4, 1),
        (Strain::AggressiveSalmonella, 10, 2),
        (Strain::Ecoli, 5, 4),
    ] {
        let bacterium = Bacterium::new(strain);
        assert_eq!(bacterium.health.points(), health);
        assert_eq!(strain.damage(), damage);
        assert_eq!(bacterium.move_plan, 0);
        assert_eq!(bacterium.food_eaten, 0);
    }
}

#[test]
fn test_hurt_cue_only_while_alive() {
    let mut cues = EventQueue::new();
    let mut bacterium = Bacterium::new(Strain::Ecoli);

    bacterium.take_damage(2, &mut cues);
    assert_eq!(cues.pending(), &[SoundCue::EcoliHurt]);

    bacterium.take_damage(3, &mut cues);
    assert!(bacterium.health.is_depleted());
    assert_eq!(cues.pending().len(), 1);
}

#[test]
fn test_depleted_bacterium_dies_next_tick() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(60.0, 128.0)));
    world.apply_damage_at(60.0, 128.0, 4);
    world.drain_sounds();

    let outcome = world.tick();

    assert_eq!(outcome, TickOutcome::LevelFinished);
    assert!(bacteria(&world).is_empty());
    assert_eq!(world.scoreboard().score, 100);
    assert!(world.pending_sounds().contains(&SoundCue::SalmonellaDie));

    // a dying bacterium leaves at most one food behind, where it died
    let food: Vec<&Entity> = world
        .entities()
        .iter()
        .filter(|e| matches!(e.kind, EntityKind::Food))
        .collect();
    assert!(food.len() <= 1);
    for item in food {
        assert_near(item.pos()[0], 60.0);
        assert_near(item.pos()[1], 128.0);
    }
}

#[test]
fn test_ecoli_death_cue() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::Ecoli, point(60.0, 128.0)));
    world.apply_damage_at(60.0, 128.0, 5);

    world.tick();

    assert!(world.pending_sounds().contains(&SoundCue::EcoliDie));
}

#[test]
fn test_eats_food_then_divides() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(60.0, 128.0)));
    world.spawn(Entity::food(point(62.0, 128.0)));
    world.entities_mut()[0].as_bacterium_mut().unwrap().food_eaten = 2;

    world.tick();

    // the food was eaten and reaped
    assert_eq!(world.entities().len(), 1);
    assert_eq!(world.entities()[0].as_bacterium().unwrap().food_eaten, 3);

    world.tick();

    let all = bacteria(&world);
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|e| e.as_bacterium().unwrap().strain == Strain::RegularSalmonella));
    assert_eq!(all[0].as_bacterium().unwrap().food_eaten, 0);

    // offspring is nudged half a sprite towards the centre on x only
    assert_near(all[1].pos()[0], 64.0);
    assert_near(all[1].pos()[1], 128.0);
    assert_eq!(all[1].as_bacterium().unwrap().food_eaten, 0);
}

#[test]
fn test_food_cannot_be_eaten_twice() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(60.0, 128.0)));
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(64.0, 128.0)));
    world.spawn(Entity::food(point(62.0, 128.0)));

    world.tick();

    let eaten: u32 = bacteria(&world)
        .iter()
        .map(|e| e.as_bacterium().unwrap().food_eaten)
        .sum();
    assert_eq!(eaten, 1);
}

#[test]
fn test_follows_move_plan() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(60.0, 128.0)));
    {
        let entity = &mut world.entities_mut()[0];
        entity.set_heading(0.0);
        entity.as_bacterium_mut().unwrap().move_plan = 4;
    }

    world.tick();

    let entity = &world.entities()[0];
    assert_near(entity.pos()[0], 63.0);
    assert_near(entity.pos()[1], 128.0);
    assert_eq!(entity.as_bacterium().unwrap().move_plan, 3);
}

#[test]
fn test_blocked_step_picks_new_plan() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(60.0, 128.0)));
    world.spawn(Entity::dirt_pile(point(64.0, 128.0)));
    {
        let entity = &mut world.entities_mut()[0];
        entity.set_heading(0.0);
        entity.as_bacterium_mut().unwrap().move_plan = 4;
    }

    world.tick();

    let entity = &world.entities()[0];
    assert_near(entity.pos()[0], 60.0);
    assert_eq!(entity.as_bacterium().unwrap().move_plan, 10);
}

#[test]
fn test_heads_for_nearby_food() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(60.0, 128.0)));
    world.spawn(Entity::food(point(60.0, 160.0)));

    world.tick();

    let entity = &world.entities()[0];
    assert_near(entity.heading(), 90.0);
    assert_near(entity.pos()[0], 60.0);
    assert_near(entity.pos()[1], 131.0);
    assert_eq!(entity.as_bacterium().unwrap().move_plan, 0);
}

#[test]
fn test_aggressive_charges_player() {
    let config = create_test_config();
    let mut world = World::new(config.clone(), 1);
    world.set_player(Player::new(&config));
    world.spawn(Entity::bacterium(Strain::AggressiveSalmonella, point(50.0, 128.0)));
    world.entities_mut()[0].as_bacterium_mut().unwrap().move_plan = 5;

    world.tick();

    let entity = &world.entities()[0];
    assert_near(entity.pos()[0], 47.0);
    assert_near(entity.pos()[1], 128.0);
    assert_near(entity.heading(), 180.0);
    // the regular move plan was skipped
    assert_eq!(entity.as_bacterium().unwrap().move_plan, 5);
}

#[test]
fn test_aggressive_ignores_distant_player() {
    let config = create_test_config();
    let mut world = World::new(config.clone(), 1);
    world.set_player(Player::new(&config));
    world.spawn(Entity::bacterium(Strain::AggressiveSalmonella, point(128.0, 128.0)));
    {
        let entity = &mut world.entities_mut()[0];
        entity.set_heading(90.0);
        entity.as_bacterium_mut().unwrap().move_plan = 5;
    }

    world.tick();

    let entity = &world.entities()[0];
    assert_near(entity.pos()[0], 128.0);
    assert_near(entity.pos()[1], 131.0);
    assert_eq!(entity.as_bacterium().unwrap().move_plan, 4);
}

#[test]
fn test_touching_player_deals_damage_and_stops() {
    let config = create_test_config();
    let mut world = World::new(config.clone(), 1);
    world.set_player(Player::new(&config));
    world.spawn(Entity::bacterium(Strain::Ecoli, point(4.0, 128.0)));
    world.drain_sounds();

    world.tick();

    assert_eq!(world.player().unwrap().health(), 96);
    assert!(world.pending_sounds().contains(&SoundCue::PlayerHurt));
    let entity = &world.entities()[0];
    assert_near(entity.pos()[0], 4.0);
    assert_near(entity.pos()[1], 128.0);
}

#[test]
fn test_ecoli_steps_towards_player() {
    let config = create_test_config();
    let mut world = World::new(config.clone(), 1);
    world.set_player(Player::new(&config));
    world.spawn(Entity::bacterium(Strain::Ecoli, point(100.0, 128.0)));

    world.tick();

    let entity = &world.entities()[0];
    assert_near(entity.pos()[0], 98.0);
    assert_near(entity.pos()[1], 128.0);
    assert_near(entity.heading(), 180.0);
}

#[test]
fn test_ecoli_rotates_around_obstacle() {
    let config = create_test_config();
    let mut world = World::new(config.clone(), 1);
    world.set_player(Player::new(&config));
    world.spawn(Entity::bacterium(Strain::Ecoli, point(100.0, 128.0)));
    world.spawn(Entity::dirt_pile(point(96.0, 128.0)));

    world.tick();

    // 180..=250 are blocked by the dirt pile, 260 is the first free heading
    let entity = &world.entities()[0];
    assert_near(entity.heading(), 260.0);
    assert_near(distance(entity.pos(), &point(100.0, 128.0)), 2.0);
}

#[test]
fn test_ecoli_without_player_stays_put() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::Ecoli, point(100.0, 128.0)));

    world.tick();

    let entity = &world.entities()[0];
    assert_near(entity.pos()[0], 100.0);
    assert_near(entity.pos()[1], 128.0);
}

#[test]
fn test_dead_bacterium_does_nothing() {
    let mut world = World::new(create_test_config(), 1);
    world.spawn(Entity::bacterium(Strain::RegularSalmonella, point(60.0, 128.0)));
    world.spawn(Entity::food(point(62.0, 128.0)));
    world.entities_mut()[0].kill();
    world.drain_sounds();

    world.tick();

    // no score, no cue, the food survives
    assert_eq!(world.scoreboard().score, 0);
    assert!(world.pending_sounds().iter().all(|c| *c == SoundCue::FinishedLevel));
    assert_eq!(world.entities().len(), 1);
    assert!(matches!(world.entities()[0].kind, EntityKind::Food));
}
