use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use journey::events::{DeathCause, GameEvent};
use journey::level::LevelId;
use journey::systems::components::{Body, Facing, Patrol};
use journey::systems::patrol::{patrol_collision_system, patrol_system};

mod common;

fn run_patrol(world: &mut bevy_ecs::world::World) {
    world
        .run_system_once(patrol_system)
        .expect("patrol system should run");
}

#[test]
fn test_patrol_overshoots_then_reverses() {
    let mut world = common::create_test_world(LevelId::Meadow);
    let patrol = world
        .spawn((
            Body::new(Vec2::new(195.0, 50.0), Vec2::new(16.0, 16.0)),
            Patrol {
                velocity_x: 2.0,
                range_x: (100.0, 200.0),
            },
            Facing::default(),
        ))
        .id();

    // The bound check runs after the move, so the patrol steps one tick
    // past 200 before turning.
    let expected = [197.0, 199.0, 201.0, 199.0, 197.0];
    for x in expected {
        run_patrol(&mut world);
        assert_eq!(world.get::<Body>(patrol).map(|b| b.position.x), Some(x));
    }
    assert_that(&world.get::<Facing>(patrol).map(|f| f.flipped)).is_equal_to(Some(true));
}

#[test]
fn test_patrol_reverses_again_at_lower_bound() {
    let mut world = common::create_test_world(LevelId::Meadow);
    let patrol = world
        .spawn((
            Body::new(Vec2::new(103.0, 50.0), Vec2::new(16.0, 16.0)),
            Patrol {
                velocity_x: -2.0,
                range_x: (100.0, 200.0),
            },
            Facing { flipped: true },
        ))
        .id();

    for x in [101.0, 99.0, 101.0] {
        run_patrol(&mut world);
        assert_eq!(world.get::<Body>(patrol).map(|b| b.position.x), Some(x));
    }
    assert_that(&world.get::<Facing>(patrol).map(|f| f.flipped)).is_equal_to(Some(false));
}

#[test]
fn test_touching_patrol_kills_player() {
    let mut world = common::create_test_world(LevelId::Hell);
    common::spawn_test_player(&mut world, Vec2::new(100.0, 50.0));
    world.spawn((
        Body::new(Vec2::new(105.0, 52.0), Vec2::new(16.0, 16.0)),
        Patrol {
            velocity_x: 2.0,
            range_x: (37.0, 248.0),
        },
        Facing::default(),
    ));

    world
        .run_system_once(patrol_collision_system)
        .expect("collision system should run");

    let events = common::drain_events::<GameEvent>(&mut world);
    assert_eq!(events, vec![GameEvent::PlayerDied(DeathCause::Enemy)]);
}

#[test]
fn test_distant_patrol_is_harmless() {
    let mut world = common::create_test_world(LevelId::Hell);
    common::spawn_test_player(&mut world, Vec2::new(100.0, 50.0));
    world.spawn((
        Body::new(Vec2::new(300.0, 52.0), Vec2::new(16.0, 16.0)),
        Patrol {
            velocity_x: 2.0,
            range_x: (37.0, 400.0),
        },
        Facing::default(),
    ));

    world
        .run_system_once(patrol_collision_system)
        .expect("collision system should run");

    assert_that(&common::drain_events::<GameEvent>(&mut world)).is_empty();
}

#[test]
fn test_edge_contact_does_not_kill() {
    let mut world = common::create_test_world(LevelId::Hell);
    // Player right edge exactly on the patrol's left edge. Overlap is
    // strict, so a shared edge is safe.
    common::spawn_test_player(&mut world, Vec2::new(100.0, 50.0));
    world.spawn((
        Body::new(Vec2::new(110.0, 50.0), Vec2::new(16.0, 16.0)),
        Patrol {
            velocity_x: 2.0,
            range_x: (37.0, 400.0),
        },
        Facing::default(),
    ));

    world
        .run_system_once(patrol_collision_system)
        .expect("collision system should run");

    assert_that(&common::drain_events::<GameEvent>(&mut world)).is_empty();
}
