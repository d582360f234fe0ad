use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::{camera::SMOOTHING, CANVAS_SIZE};
use crate::systems::components::{Body, Camera, PlayerControlled};

/// First-order follow: each tick the camera closes a fixed fraction of the
/// distance to centering the player in the view. The offset stays float;
/// truncation happens only when rendering reads it.
pub fn camera_system(player: Query<&Body, With<PlayerControlled>>, mut camera: ResMut<Camera>) {
    let Ok(player) = player.single() else {
        return;
    };

    let view = Vec2::new(CANVAS_SIZE.x as f32, CANVAS_SIZE.y as f32);
    let target = player.rect().center() - view / 2.0;
    let offset = camera.offset;
    camera.offset = offset + (target - offset) / SMOOTHING;
}
