//! Player movement and tile collision.
//!
//! Collision is resolved one axis at a time against the solid tiles in the
//! 3×3 neighborhood of the moved position: apply the X component, clamp,
//! commit, then the same for Y. Clamping moves the whole collision box so
//! the player ends flush against the tile face.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::physics::{
    FALL_SOUND_VELOCITY, GRAVITY, JUMP_GESTURE_AIRBORNE_TICKS, TERMINAL_VELOCITY,
};
use crate::events::AudioEvent;
use crate::map::tilemap::TileMap;
use crate::systems::components::{
    Airborne, Body, Contacts, Facing, Gesture, InputState, PlayerAnimations, PlayerControlled,
    Sprite, Velocity,
};

#[allow(clippy::type_complexity)]
pub fn player_physics_system(
    input: Res<InputState>,
    map: Res<TileMap>,
    animations: Res<PlayerAnimations>,
    mut audio: EventWriter<AudioEvent>,
    mut player: Query<
        (
            &mut Body,
            &mut Velocity,
            &mut Contacts,
            &mut Gesture,
            &mut Facing,
            &mut Airborne,
            &mut Sprite,
        ),
        With<PlayerControlled>,
    >,
) {
    let Ok((mut body, mut velocity, mut contacts, mut gesture, mut facing, mut airborne, mut sprite)) =
        player.single_mut()
    else {
        return;
    };

    *contacts = Contacts::empty();

    let axis = input.axis();
    let movement = Vec2::new(axis + velocity.0.x, velocity.0.y);

    // X axis: move, clamp against the neighborhood of the moved position.
    let mut rect = body.rect();
    rect.pos.x += movement.x;
    for tile in map.physics_rects(rect.pos) {
        if rect.intersects(&tile) {
            if movement.x > 0.0 {
                rect.set_right(tile.left());
                contacts.insert(Contacts::RIGHT);
            }
            if movement.x < 0.0 {
                rect.set_left(tile.right());
                contacts.insert(Contacts::LEFT);
            }
        }
    }
    body.position.x = rect.pos.x;

    // Y axis, same scheme.
    let mut rect = body.rect();
    rect.pos.y += movement.y;
    for tile in map.physics_rects(rect.pos) {
        if rect.intersects(&tile) {
            if movement.y > 0.0 {
                rect.set_bottom(tile.top());
                contacts.insert(Contacts::DOWN);
            }
            if movement.y < 0.0 {
                rect.set_top(tile.bottom());
                contacts.insert(Contacts::UP);
            }
        }
    }
    body.position.y = rect.pos.y;

    // Facing latches: a zero-axis frame keeps the previous direction.
    if axis > 0.0 {
        facing.flipped = false;
    } else if axis < 0.0 {
        facing.flipped = true;
    }

    velocity.0.y = (velocity.0.y + GRAVITY).min(TERMINAL_VELOCITY);
    if contacts.intersects(Contacts::UP | Contacts::DOWN) {
        velocity.0.y = 0.0;
    }

    airborne.0 += 1;
    if contacts.contains(Contacts::DOWN) {
        airborne.0 = 0;
    }

    // Gesture priority: airborne beats running beats idle. A gesture change
    // swaps in a fresh copy of the template so the strip restarts.
    let next = if airborne.0 > JUMP_GESTURE_AIRBORNE_TICKS {
        Gesture::Jump
    } else if axis != 0.0 {
        Gesture::Run
    } else {
        Gesture::Idle
    };
    if next != *gesture {
        *gesture = next;
        sprite.animation = animations.template(next).duplicate();
    }

    if velocity.0.y > FALL_SOUND_VELOCITY {
        // The audio side drops this while the fall channel is busy.
        audio.write(AudioEvent::Fall);
    }
}
