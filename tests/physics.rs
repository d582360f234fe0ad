use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use journey::constants::physics::TERMINAL_VELOCITY;
use journey::level::LevelId;
use journey::systems::components::{
    Airborne, Body, Contacts, Gesture, InputState, Sprite, Velocity,
};
use journey::systems::physics::player_physics_system;

mod common;

fn run_physics(world: &mut bevy_ecs::world::World) {
    world
        .run_system_once(player_physics_system)
        .expect("physics system should run");
}

#[test]
fn test_walking_into_wall_clamps_right_edge() {
    let mut world = common::create_test_world(LevelId::Meadow);
    world.insert_resource(common::map_with(&[(1, 0)]));
    common::spawn_test_player(&mut world, Vec2::new(10.0, 0.0));
    world.resource_mut::<InputState>().right = true;

    run_physics(&mut world);

    let mut query = world.query::<(&Body, &Contacts)>();
    let (body, contacts) = query.single(&world).expect("player should exist");
    // Right edge flush against the tile at x = 16.
    assert_eq!(body.position.x, 6.0);
    assert_that(&contacts.contains(Contacts::RIGHT)).is_true();
    assert_that(&contacts.contains(Contacts::LEFT)).is_false();
}

#[test]
fn test_falling_lands_on_floor() {
    let mut world = common::create_test_world(LevelId::Meadow);
    world.insert_resource(common::map_with(&[(0, 1)]));
    let player = common::spawn_test_player(&mut world, Vec2::new(0.0, 10.0));
    world
        .entity_mut(player)
        .insert(Velocity(Vec2::new(0.0, 2.0)));

    run_physics(&mut world);

    let mut query = world.query::<(&Body, &Velocity, &Contacts, &Airborne)>();
    let (body, velocity, contacts, airborne) = query.single(&world).expect("player should exist");
    // Bottom edge flush against the floor top at y = 16.
    assert_eq!(body.position.y, 6.0);
    assert_that(&contacts.contains(Contacts::DOWN)).is_true();
    assert_eq!(velocity.0.y, 0.0);
    assert_eq!(airborne.0, 0);
}

#[test]
fn test_gravity_caps_at_terminal_velocity() {
    let mut world = common::create_test_world(LevelId::Meadow);
    common::spawn_test_player(&mut world, Vec2::ZERO);

    for _ in 0..100 {
        run_physics(&mut world);
    }

    let mut query = world.query::<&Velocity>();
    let velocity = query.single(&world).expect("player should exist");
    // Exactly the cap, not a float in its neighborhood.
    assert_eq!(velocity.0.y, TERMINAL_VELOCITY);
}

#[test]
fn test_free_fall_switches_to_jump_gesture() {
    let mut world = common::create_test_world(LevelId::Meadow);
    common::spawn_test_player(&mut world, Vec2::ZERO);

    // Four airborne ticks keep the idle gesture.
    for _ in 0..4 {
        run_physics(&mut world);
    }
    {
        let mut query = world.query::<&Gesture>();
        assert_eq!(*query.single(&world).expect("player should exist"), Gesture::Idle);
    }

    // The fifth crosses the threshold.
    run_physics(&mut world);
    let mut query = world.query::<(&Gesture, &Sprite)>();
    let (gesture, sprite) = query.single(&world).expect("player should exist");
    assert_eq!(*gesture, Gesture::Jump);
    // The sprite now holds a fresh copy of the jump strip.
    assert_eq!(sprite.animation.current_image(), common::JUMP_FRAME);
}

#[test]
fn test_running_on_ground_uses_run_gesture_and_faces_left() {
    let mut world = common::create_test_world(LevelId::Meadow);
    // A wide floor row under the player.
    world.insert_resource(common::map_with(&[(-2, 1), (-1, 1), (0, 1), (1, 1)]));
    common::spawn_test_player(&mut world, Vec2::new(0.0, 6.0));
    world.resource_mut::<InputState>().left = true;

    run_physics(&mut world);

    let mut query = world.query::<(
        &Gesture,
        &journey::systems::components::Facing,
        &Sprite,
    )>();
    let (gesture, facing, sprite) = query.single(&world).expect("player should exist");
    assert_eq!(*gesture, Gesture::Run);
    assert_that(&facing.flipped).is_true();
    assert_eq!(sprite.animation.current_image(), common::RUN_FRAME);

    // Releasing the key drops back to idle but keeps facing left.
    world.resource_mut::<InputState>().left = false;
    run_physics(&mut world);
    let mut query = world.query::<(&Gesture, &journey::systems::components::Facing)>();
    let (gesture, facing) = query.single(&world).expect("player should exist");
    assert_eq!(*gesture, Gesture::Idle);
    assert_that(&facing.flipped).is_true();
}

#[test]
fn test_player_settles_on_floor_after_long_fall() {
    let mut world = common::create_test_world(LevelId::Meadow);
    world.insert_resource(common::map_with(&[(-1, 2), (0, 2), (1, 2)]));
    common::spawn_test_player(&mut world, Vec2::ZERO);

    for _ in 0..200 {
        run_physics(&mut world);
    }

    // At rest the player alternates between a grounding frame and a
    // zero-velocity coast frame, so check the invariants over two ticks.
    let mut grounded_frames = 0;
    for _ in 0..2 {
        run_physics(&mut world);
        let mut query = world.query::<(&Body, &Velocity, &Contacts, &Gesture, &Airborne)>();
        let (body, velocity, contacts, gesture, airborne) =
            query.single(&world).expect("player should exist");
        // Flush on the floor row at y = 32.
        assert_eq!(body.position, Vec2::new(0.0, 22.0));
        assert_eq!(*gesture, Gesture::Idle);
        assert_that(&(airborne.0 <= 1)).is_true();
        assert_that(&(velocity.0.y <= 0.1)).is_true();
        if contacts.contains(Contacts::DOWN) {
            grounded_frames += 1;
        }
    }
    assert_eq!(grounded_frames, 1);
}
