//! Shared scaffolding for headless world tests.
//!
//! Builds a `World` with every resource the gameplay systems read, but no
//! SDL handles; the systems under test are all pure ECS.

#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{Event, EventRegistry, Events};
use bevy_ecs::world::World;
use glam::{IVec2, Vec2};

use journey::asset::SpriteId;
use journey::constants::mechanics::PLAYER_SIZE;
use journey::error::GameError;
use journey::events::{AudioEvent, GameEvent};
use journey::level::LevelId;
use journey::map::tilemap::{TileKind, TileMap};
use journey::systems::components::{
    ActiveLevel, Airborne, Body, Camera, CollectionState, Contacts, Facing, GameStage, Gesture,
    GlobalState, InputState, MessageBox, PendingTransition, PlayerAnimations, PlayerBundle,
    PlayerControlled, Sprite, Velocity,
};
use journey::texture::animation::AnimationSequence;

/// Frame handles are arbitrary in headless tests; spacing the strips apart
/// makes template swaps visible through `current_image`.
pub const IDLE_FRAME: SpriteId = SpriteId(0);
pub const RUN_FRAME: SpriteId = SpriteId(10);
pub const JUMP_FRAME: SpriteId = SpriteId(20);

pub fn test_animations() -> PlayerAnimations {
    let strip = |first: SpriteId| {
        AnimationSequence::new(vec![first, SpriteId(first.0 + 1)], 4, true)
            .expect("test strip is non-empty")
    };
    PlayerAnimations {
        idle: strip(IDLE_FRAME),
        run: strip(RUN_FRAME),
        jump: strip(JUMP_FRAME),
    }
}

pub fn create_test_world(level: LevelId) -> World {
    let mut world = World::default();

    EventRegistry::register_event::<GameError>(&mut world);
    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<AudioEvent>(&mut world);

    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(InputState::default());
    world.insert_resource(GameStage::Playing);
    world.insert_resource(PendingTransition::default());
    world.insert_resource(Camera::default());
    world.insert_resource(ActiveLevel(level));
    world.insert_resource(CollectionState::new(0));
    world.insert_resource(MessageBox {
        pos: Vec2::ZERO,
        visible: false,
    });
    world.insert_resource(test_animations());
    world.insert_resource(TileMap::new(16));

    world
}

/// A map whose only tiles are solid grass at the given cells.
pub fn map_with(cells: &[(i32, i32)]) -> TileMap {
    let mut map = TileMap::new(16);
    for (x, y) in cells {
        map.insert_tile(IVec2::new(*x, *y), TileKind::Grass, 0);
    }
    map
}

pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    let idle = world.resource::<PlayerAnimations>().idle.duplicate();
    let sprite = Sprite {
        animation: idle,
        layer: 2,
    };
    world
        .spawn(PlayerBundle {
            player: PlayerControlled,
            body: Body::new(position, PLAYER_SIZE),
            velocity: Velocity::default(),
            contacts: Contacts::empty(),
            gesture: Gesture::Idle,
            facing: Facing::default(),
            airborne: Airborne::default(),
            sprite,
        })
        .id()
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    world.send_event(event);
}

pub fn drain_events<E: Event>(world: &mut World) -> Vec<E> {
    world.resource_mut::<Events<E>>().drain().collect()
}
