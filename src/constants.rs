//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{IVec2, UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the window, in pixels.
pub const WINDOW_SIZE: UVec2 = UVec2::new(640, 480);
/// The size of the backbuffer the world is drawn to before upscaling.
pub const CANVAS_SIZE: UVec2 = UVec2::new(320, 240);

/// The nine grid offsets checked when resolving collisions around a world
/// position. The ordering and shape are load-bearing: diagonal cells are
/// treated identically to orthogonal ones, so this is the full 3×3 block
/// in a fixed traversal order, not a strict 8-neighborhood.
pub const NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(0, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

pub mod physics {
    /// Downward acceleration applied every tick.
    pub const GRAVITY: f32 = 0.1;
    /// Terminal fall speed; gravity never pushes `velocity.y` past this.
    pub const TERMINAL_VELOCITY: f32 = 4.0;
    /// Vertical impulse applied on a jump press.
    pub const JUMP_VELOCITY: f32 = -2.0;
    /// Ticks off the ground before the jump gesture takes over.
    pub const JUMP_GESTURE_AIRBORNE_TICKS: u32 = 4;
    /// Falling faster than this triggers the falling sound.
    pub const FALL_SOUND_VELOCITY: f32 = 2.5;
}

pub mod mechanics {
    use glam::Vec2;

    /// The player's collision box.
    pub const PLAYER_SIZE: Vec2 = Vec2::new(10.0, 10.0);
    /// Fixed inward shift applied to collectible and NPC hit-boxes, and to
    /// sprite draw positions relative to the collision box.
    pub const HITBOX_INSET: Vec2 = Vec2::new(-2.0, -2.0);
    /// Falling to or past this Y reconstructs the level, unless the level
    /// has a fall exit.
    pub const DEATH_PLANE_Y: f32 = 250.0;
    /// Levels with a fall exit transition when the player falls to or past
    /// this Y; the fall exit takes precedence over the death plane.
    pub const FALL_EXIT_Y: f32 = 249.0;
    /// Attempt cap on collectible rejection sampling. Exceeding it is a
    /// level-construction error.
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
}

pub mod camera {
    /// Time-constant divisor of the first-order camera follow filter.
    pub const SMOOTHING: f32 = 30.0;
}

pub mod animation {
    /// Frame hold for the player's idle/run/jump strips.
    pub const PLAYER_FRAME_HOLD: u32 = 4;
    /// Frame hold for NPC and patrol strips.
    pub const NPC_FRAME_HOLD: u32 = 5;
}

pub mod audio {
    /// Mixer channel the level music plays on.
    pub const MUSIC_CHANNEL: i32 = 0;
    /// Mixer channel for the jump one-shot.
    pub const JUMP_CHANNEL: i32 = 1;
    /// Mixer channel for the falling one-shot.
    pub const FALL_CHANNEL: i32 = 2;

    pub const MUSIC_VOLUME: i32 = 51; // 40% of MIX_MAX_VOLUME
    pub const EFFECT_VOLUME: i32 = 13; // 10% of MIX_MAX_VOLUME
}

/// Drift velocity of the floating leaf particles, per tick.
pub const DRIFT_VELOCITY: Vec2 = Vec2::new(0.05, 0.15);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_canvas_upscale_ratio() {
        // The backbuffer upscales to the window by an integer factor.
        assert_eq!(WINDOW_SIZE.x % CANVAS_SIZE.x, 0);
        assert_eq!(WINDOW_SIZE.y % CANVAS_SIZE.y, 0);
        assert_eq!(WINDOW_SIZE.x / CANVAS_SIZE.x, WINDOW_SIZE.y / CANVAS_SIZE.y);
    }

    #[test]
    fn test_neighbor_offsets_cover_block() {
        // Every cell of the 3×3 block appears exactly once.
        for dx in -1..=1 {
            for dy in -1..=1 {
                let count = NEIGHBOR_OFFSETS.iter().filter(|o| **o == IVec2::new(dx, dy)).count();
                assert_eq!(count, 1, "offset ({dx},{dy}) missing or duplicated");
            }
        }
    }

    #[test]
    fn test_neighbor_offsets_order() {
        // The traversal order is part of the observed collision behavior.
        assert_eq!(NEIGHBOR_OFFSETS[0], IVec2::new(-1, 0));
        assert_eq!(NEIGHBOR_OFFSETS[5], IVec2::new(0, 0));
        assert_eq!(NEIGHBOR_OFFSETS[8], IVec2::new(1, 1));
    }

    #[test]
    fn test_fall_exit_below_death_plane() {
        assert!(mechanics::FALL_EXIT_Y < mechanics::DEATH_PLANE_Y);
    }

    #[test]
    fn test_gravity_reaches_terminal_velocity() {
        let mut v = 0.0f32;
        for _ in 0..100 {
            v = (v + physics::GRAVITY).min(physics::TERMINAL_VELOCITY);
        }
        assert_eq!(v, physics::TERMINAL_VELOCITY);
    }
}
