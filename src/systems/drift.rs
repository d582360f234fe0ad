use bevy_ecs::prelude::*;

use crate::constants::DRIFT_VELOCITY;
use crate::systems::components::{Body, Drift};

/// Moves the leaf particles down and to the right, snapping each back to
/// its source once it drifts past its reset line.
pub fn drift_system(mut drifters: Query<(&mut Body, &Drift)>) {
    for (mut body, drift) in drifters.iter_mut() {
        body.position += DRIFT_VELOCITY;
        if body.position.y >= drift.reset_y {
            body.position = drift.reset_pos;
        }
    }
}
