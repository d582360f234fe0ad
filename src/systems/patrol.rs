use bevy_ecs::prelude::*;

use crate::events::{DeathCause, GameEvent};
use crate::systems::components::{Body, Facing, Patrol, PlayerControlled};

/// Sweeps every patrol horizontally. The bounds check runs after the move,
/// so patrols overshoot their band by one tick before turning around.
pub fn patrol_system(mut patrols: Query<(&mut Body, &mut Patrol, &mut Facing)>) {
    for (mut body, mut patrol, mut facing) in patrols.iter_mut() {
        body.position.x += patrol.velocity_x;
        if body.position.x <= patrol.range_x.0 || body.position.x >= patrol.range_x.1 {
            patrol.velocity_x = -patrol.velocity_x;
        }
        facing.flipped = patrol.velocity_x < 0.0;
    }
}

/// Touching any patrol kills the player outright. Plain body rects here,
/// not the inset pickup hitbox.
pub fn patrol_collision_system(
    player: Query<&Body, With<PlayerControlled>>,
    patrols: Query<&Body, With<Patrol>>,
    mut events: EventWriter<GameEvent>,
) {
    let Ok(player) = player.single() else {
        return;
    };
    let player_rect = player.rect();

    for body in patrols.iter() {
        if player_rect.intersects(&body.rect()) {
            events.write(GameEvent::PlayerDied(DeathCause::Enemy));
            return;
        }
    }
}
