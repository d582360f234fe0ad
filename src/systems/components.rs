use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use bitflags::bitflags;
use glam::Vec2;

use crate::constants::mechanics::HITBOX_INSET;
use crate::level::LevelId;
use crate::rect::Rect;
use crate::texture::animation::AnimationSequence;

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// Position and collision size of a world entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// The rect used for pickup and NPC overlap, shifted by the fixed
    /// inward offset.
    pub fn hitbox(&self) -> Rect {
        self.rect().shifted(HITBOX_INSET)
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

bitflags! {
    /// Which sides touched a solid tile during the last physics pass.
    #[derive(Component, Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Contacts: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// The player's movement pose, in priority order: airborne beats running
/// beats standing still.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Run,
    Jump,
}

/// Horizontal mirroring state. Latched: a zero-axis frame keeps the last
/// direction.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facing {
    pub flipped: bool,
}

/// Ticks since the entity last stood on something.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Airborne(pub u32);

/// A component for entities drawn with an animated sprite, with a layer
/// for back-to-front ordering (higher draws on top).
#[derive(Component)]
pub struct Sprite {
    pub animation: AnimationSequence,
    pub layer: u8,
}

/// A horizontally sweeping enemy. Y never changes after spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct Patrol {
    pub velocity_x: f32,
    pub range_x: (f32, f32),
}

/// A tag component for the level's stationary character.
#[derive(Default, Component)]
pub struct Npc;

/// A collectible bone waiting to be picked up.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub id: u32,
}

/// A drifting leaf particle.
#[derive(Component, Debug, Clone, Copy)]
pub struct Drift {
    pub reset_y: f32,
    pub reset_pos: Vec2,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub body: Body,
    pub velocity: Velocity,
    pub contacts: Contacts,
    pub gesture: Gesture,
    pub facing: Facing,
    pub airborne: Airborne,
    pub sprite: Sprite,
}

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

/// Held horizontal movement keys, sampled every frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Net horizontal input. Both keys held cancel out.
    pub fn axis(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }
}

/// Smoothed camera offset. Float state; truncation to pixels happens only
/// at render time.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    pub fn render_offset(&self) -> glam::IVec2 {
        glam::IVec2::new(self.offset.x as i32, self.offset.y as i32)
    }
}

/// Collection progress for the current level. `all_collected` only ever
/// flips false to true; level reloads rebuild the resource from scratch.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CollectionState {
    pub remaining: u32,
    pub all_collected: bool,
}

impl CollectionState {
    pub fn new(total: u32) -> Self {
        Self {
            remaining: total,
            all_collected: total == 0,
        }
    }

    pub fn collect(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.all_collected = true;
        }
    }
}

/// The NPC's message box. Visibility is recomputed from the overlap test
/// every frame, so walking away hides it again.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MessageBox {
    pub pos: Vec2,
    pub visible: bool,
}

/// Whether the game is still being played or has been won.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStage {
    #[default]
    Playing,
    Complete,
}

/// The level currently loaded into the world.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLevel(pub LevelId);

/// Where to go at the end of this frame, decided by the stage system and
/// applied outside the schedule.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingTransition(pub Option<Transition>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Rebuild the current level from scratch.
    Reload,
    /// Tear down and enter another level.
    Advance(LevelId),
    /// Leave the game loop for the title screen.
    Menu,
}

/// The player's gesture animation templates, duplicated into the sprite
/// on each gesture change.
#[derive(Resource)]
pub struct PlayerAnimations {
    pub idle: AnimationSequence,
    pub run: AnimationSequence,
    pub jump: AnimationSequence,
}

impl PlayerAnimations {
    pub fn template(&self, gesture: Gesture) -> &AnimationSequence {
        match gesture {
            Gesture::Idle => &self.idle,
            Gesture::Run => &self.run,
            Gesture::Jump => &self.jump,
        }
    }
}
