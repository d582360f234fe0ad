use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use journey::error::LevelError;
use journey::level::LevelId;
use journey::map::tilemap::TileMap;
use journey::systems::components::{Body, Collectible, CollectionState};
use journey::systems::item::{collect_system, sample_positions};

mod common;

#[test]
fn test_sampling_open_map_fills_every_slot() {
    let config = LevelId::Meadow.config();
    let map = TileMap::new(16);

    let positions = sample_positions(config, &map).expect("open map should sample");

    assert_eq!(positions.len(), config.collect_count as usize);
    for pos in positions {
        assert_that(&(pos.x >= config.collect_x.0 as f32)).is_true();
        assert_that(&(pos.x <= config.collect_x.1 as f32)).is_true();
        assert_that(&(pos.y >= config.collect_y.0 as f32)).is_true();
        assert_that(&(pos.y <= config.collect_y.1 as f32)).is_true();
        // Candidates are drawn on the integer grid.
        assert_eq!(pos.x.fract(), 0.0);
        assert_eq!(pos.y.fract(), 0.0);
    }
}

#[test]
fn test_sampling_walled_map_reports_exhaustion() {
    let config = LevelId::Meadow.config();
    // Solid tiles over every cell the sampling ranges can land in.
    let mut cells = Vec::new();
    for x in -1..=26 {
        for y in 0..=4 {
            cells.push((x, y));
        }
    }
    let map = common::map_with(&cells);

    let result = sample_positions(config, &map);

    assert!(matches!(result, Err(LevelError::SpawnExhausted { .. })));
}

#[test]
fn test_overlapping_collectible_is_picked_up() {
    let mut world = common::create_test_world(LevelId::Meadow);
    world.insert_resource(CollectionState::new(2));
    common::spawn_test_player(&mut world, Vec2::ZERO);
    let near = world
        .spawn((
            Body::new(Vec2::new(5.0, 5.0), Vec2::new(7.0, 9.0)),
            Collectible { id: 0 },
        ))
        .id();
    let far = world
        .spawn((
            Body::new(Vec2::new(200.0, 5.0), Vec2::new(7.0, 9.0)),
            Collectible { id: 1 },
        ))
        .id();

    world
        .run_system_once(collect_system)
        .expect("collect system should run");

    assert_that(&world.get_entity(near).is_ok()).is_false();
    assert_that(&world.get_entity(far).is_ok()).is_true();
    let collection = world.resource::<CollectionState>();
    assert_eq!(collection.remaining, 1);
    assert_that(&collection.all_collected).is_false();
}

#[test]
fn test_collecting_the_last_bone_completes_the_set() {
    let mut world = common::create_test_world(LevelId::Meadow);
    world.insert_resource(CollectionState::new(1));
    common::spawn_test_player(&mut world, Vec2::ZERO);
    world.spawn((
        Body::new(Vec2::new(5.0, 5.0), Vec2::new(7.0, 9.0)),
        Collectible { id: 0 },
    ));

    world
        .run_system_once(collect_system)
        .expect("collect system should run");

    let collection = world.resource::<CollectionState>();
    assert_eq!(collection.remaining, 0);
    assert_that(&collection.all_collected).is_true();

    // Running again with nothing left keeps the flag set.
    world
        .run_system_once(collect_system)
        .expect("collect system should run");
    assert_that(&world.resource::<CollectionState>().all_collected).is_true();
}

#[test]
fn test_hitbox_inset_extends_the_grab_range() {
    let mut world = common::create_test_world(LevelId::Meadow);
    world.insert_resource(CollectionState::new(1));
    // Player right edge at x = 10; the collectible body starts at x = 11,
    // but its hitbox is shifted (-2, -2), so it still overlaps.
    common::spawn_test_player(&mut world, Vec2::ZERO);
    let bone = world
        .spawn((
            Body::new(Vec2::new(11.0, 5.0), Vec2::new(7.0, 9.0)),
            Collectible { id: 0 },
        ))
        .id();

    world
        .run_system_once(collect_system)
        .expect("collect system should run");

    assert_that(&world.get_entity(bone).is_ok()).is_false();
}
