#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use kontagion::simulation::bacterium::Strain;
use kontagion::simulation::entity::{ACTOR_DEPTH, Body, Entity, PROP_DEPTH};
use kontagion::simulation::geometric_utils::{
    bearing_degrees, distance, normalize_degrees, nudge_towards, point, point_on_circle,
};
use kontagion::simulation::locatable::Locatable;
use kontagion::simulation::params::GameConfig;

#[test]
fn test_normalize_degrees() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(372.5), 12.5);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(725.0), 5.0);
    let tiny = normalize_degrees(-1e-7);
    assert!((0.0..360.0).contains(&tiny));
}

#[test]
fn test_distance_and_bearing() {
    let a = point(0.0, 0.0);
    let b = point(3.0, 4.0);
    assert_eq!(distance(&a, &b), 5.0);

    assert!((bearing_degrees(&a, &point(0.0, 10.0)) - 90.0).abs() < 1e-4);
    assert!((bearing_degrees(&a, &point(0.0, -10.0)) - 270.0).abs() < 1e-4);
    assert!((bearing_degrees(&a, &point(-10.0, 0.0)) - 180.0).abs() < 1e-4);
}

#[test]
fn test_point_on_circle() {
    let p = point_on_circle((128.0, 128.0), 128.0, 90.0);
    assert!((p[0] - 128.0).abs() < 1e-3);
    assert!((p[1] - 256.0).abs() < 1e-3);
}

#[test]
fn test_nudge_towards() {
    assert_eq!(nudge_towards(60.0, 128.0, 4.0), 64.0);
    assert_eq!(nudge_towards(200.0, 128.0, 4.0), 196.0);
    assert_eq!(nudge_towards(128.0, 128.0, 4.0), 128.0);
}

#[test]
fn test_body_locatable() {
    let mut body = Body::new(point(10.0, 20.0), -90.0, PROP_DEPTH);

    assert_eq!(body.pos()[0], 10.0);
    assert_eq!(body.heading(), 270.0);

    body.set_heading(0.0);
    body.move_along(body.heading(), 8.0);
    assert_eq!(body.pos()[0], 18.0);
    assert_eq!(body.pos()[1], 20.0);

    assert!(body.overlaps(26.0, 20.0, 8.0));
    assert!(!body.overlaps(26.5, 20.0, 8.0));

    body.pos_mut()[1] = 30.0;
    assert_eq!(body.pos()[1], 30.0);

    assert!(body.is_alive());
    body.kill();
    assert!(!body.is_alive());
}

#[test]
fn test_entity_capabilities() {
    let config = GameConfig::default();
    let origin = point(0.0, 0.0);

    let dirt = Entity::dirt_pile(origin.clone());
    assert!(dirt.can_overlap_others());
    assert!(dirt.is_damageable());
    assert!(dirt.blocks_movement());
    assert!(!dirt.blocks_level_completion());

    let food = Entity::food(origin.clone());
    assert!(food.is_edible());
    assert!(!food.is_damageable());
    assert!(!food.can_overlap_others());
    assert_eq!(food.heading(), 90.0);

    let pit = Entity::pit(&config, origin.clone());
    assert!(!pit.is_damageable());
    assert!(pit.blocks_level_completion());

    let spray = Entity::spray(&config, origin.clone(), 45.0);
    assert!(!spray.is_damageable());
    assert!(!spray.blocks_level_completion());

    let bacterium = Entity::bacterium(Strain::Ecoli, origin);
    assert!(bacterium.is_damageable());
    assert!(bacterium.blocks_level_completion());
    assert!(!bacterium.blocks_movement());
    assert_eq!(bacterium.heading(), 90.0);
    assert_eq!(bacterium.body.depth, ACTOR_DEPTH);
    assert_eq!(dirt.body.depth, PROP_DEPTH);
}
