//! Static per-level configuration.
//!
//! Everything that varies between levels lives in one table keyed by
//! [`LevelId`], so level flow is data instead of name checks scattered
//! through the systems.

use glam::Vec2;
use strum_macros::{Display, EnumString};

/// The four levels, in progression order. Heaven also has a hidden fall
/// exit into Hell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum LevelId {
    Heaven,
    Hell,
    Meadow,
    Forest,
}

impl LevelId {
    pub const ALL: [LevelId; 4] = [LevelId::Heaven, LevelId::Hell, LevelId::Meadow, LevelId::Forest];

    pub fn config(self) -> &'static LevelConfig {
        match self {
            LevelId::Heaven => &HEAVEN,
            LevelId::Hell => &HELL,
            LevelId::Meadow => &MEADOW,
            LevelId::Forest => &FOREST,
        }
    }
}

/// The kinds of patrolling enemies. The sea monster's image is allowed to
/// be missing from the asset tree; it patrols invisibly in that case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PatrolKind {
    Ghost,
    Dragon,
    SeaMonster,
    Dove,
}

impl PatrolKind {
    pub fn sprite_optional(self) -> bool {
        matches!(self, PatrolKind::SeaMonster)
    }
}

/// One patrol spawn: start position, collision size and the horizontal
/// band it sweeps.
#[derive(Clone, Copy, Debug)]
pub struct PatrolSpawn {
    pub kind: PatrolKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_x: f32,
    pub range_x: (f32, f32),
}

/// The stationary character that gates level completion.
#[derive(Clone, Copy, Debug)]
pub struct NpcSpawn {
    /// Sheet name under `assets/entities/npc/`.
    pub sprite: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
}

/// A leaf emitter: particles start at `start`, drift down-right, and snap
/// back to `reset_pos` when they pass `reset_y`.
#[derive(Clone, Copy, Debug)]
pub struct DriftSource {
    pub start: Vec2,
    pub reset_y: f32,
    pub reset_pos: Vec2,
}

#[derive(Debug)]
pub struct LevelConfig {
    pub id: LevelId,
    pub map_file: &'static str,
    pub background: &'static str,
    pub music: &'static str,
    pub player_spawn: Vec2,
    pub npc: NpcSpawn,
    pub message_pos: Vec2,
    /// Inclusive x and y sampling ranges for collectible placement.
    pub collect_x: (i32, i32),
    pub collect_y: (i32, i32),
    pub collect_count: u32,
    pub patrols: &'static [PatrolSpawn],
    pub drift_sources: &'static [DriftSource],
    /// Level entered after the NPC releases the player. `None` on the
    /// final level, which finishes at `finish_x` instead.
    pub next: Option<LevelId>,
    /// Level entered by falling off the bottom of this one. Takes
    /// precedence over the death plane.
    pub fall_exit: Option<LevelId>,
    /// Walking past this x with everything collected wins the game.
    pub finish_x: Option<f32>,
}

const PATROL_VELOCITY: f32 = 2.0;
const SMALL_PATROL: Vec2 = Vec2::new(16.0, 16.0);
const DRAGON_SIZE: Vec2 = Vec2::new(79.0, 45.0);

static HEAVEN: LevelConfig = LevelConfig {
    id: LevelId::Heaven,
    map_file: "heaven.json",
    background: "heaven-sunset",
    music: "heaven.ogg",
    player_spawn: Vec2::ZERO,
    npc: NpcSpawn {
        sprite: "willowisp",
        pos: Vec2::new(1359.0, -26.2),
        size: Vec2::new(18.0, 18.0),
    },
    message_pos: Vec2::new(1359.0, -100.0),
    collect_x: (-484, 800),
    collect_y: (40, 80),
    collect_count: 6,
    patrols: &[
        PatrolSpawn {
            kind: PatrolKind::Dove,
            pos: Vec2::new(200.0, -35.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (37.0, 240.0),
        },
        PatrolSpawn {
            kind: PatrolKind::Dove,
            pos: Vec2::new(150.0, 50.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (37.0, 260.0),
        },
        PatrolSpawn {
            kind: PatrolKind::Dove,
            pos: Vec2::new(300.0, 70.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (37.0, 400.0),
        },
    ],
    drift_sources: &[],
    next: Some(LevelId::Meadow),
    fall_exit: Some(LevelId::Hell),
    finish_x: None,
};

static HELL: LevelConfig = LevelConfig {
    id: LevelId::Hell,
    map_file: "hell.json",
    background: "hell",
    music: "background.ogg",
    player_spawn: Vec2::ZERO,
    npc: NpcSpawn {
        sprite: "fluffy",
        pos: Vec2::new(640.0, 231.0),
        size: Vec2::new(30.0, 30.0),
    },
    message_pos: Vec2::new(667.0, 188.0),
    collect_x: (-484, 266),
    collect_y: (40, 50),
    collect_count: 6,
    patrols: &[
        PatrolSpawn {
            kind: PatrolKind::Dragon,
            pos: Vec2::new(200.0, -28.0),
            size: DRAGON_SIZE,
            velocity_x: PATROL_VELOCITY,
            range_x: (37.0, 248.0),
        },
        PatrolSpawn {
            kind: PatrolKind::Dragon,
            pos: Vec2::new(270.0, 189.0),
            size: DRAGON_SIZE,
            velocity_x: PATROL_VELOCITY,
            range_x: (180.0, 380.0),
        },
        PatrolSpawn {
            kind: PatrolKind::Dragon,
            pos: Vec2::new(160.0, -80.0),
            size: DRAGON_SIZE,
            velocity_x: PATROL_VELOCITY,
            range_x: (120.0, 430.0),
        },
    ],
    drift_sources: &[],
    next: Some(LevelId::Meadow),
    fall_exit: None,
    finish_x: None,
};

static MEADOW: LevelConfig = LevelConfig {
    id: LevelId::Meadow,
    map_file: "meadow.json",
    background: "background",
    music: "background.ogg",
    player_spawn: Vec2::ZERO,
    npc: NpcSpawn {
        sprite: "tomato",
        pos: Vec2::new(419.0, 86.1),
        size: Vec2::new(16.0, 16.0),
    },
    message_pos: Vec2::new(419.0, 20.0),
    collect_x: (0, 400),
    collect_y: (20, 50),
    collect_count: 6,
    patrols: &[
        PatrolSpawn {
            kind: PatrolKind::Ghost,
            pos: Vec2::new(100.0, -35.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (80.0, 240.0),
        },
        PatrolSpawn {
            kind: PatrolKind::Ghost,
            pos: Vec2::new(150.0, 50.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (100.0, 260.0),
        },
        PatrolSpawn {
            kind: PatrolKind::Ghost,
            pos: Vec2::new(300.0, 70.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (200.0, 400.0),
        },
    ],
    drift_sources: &[
        DriftSource {
            start: Vec2::new(320.0, 40.0),
            reset_y: 100.0,
            reset_pos: Vec2::new(320.0, 40.0),
        },
        DriftSource {
            start: Vec2::new(174.0, 42.5),
            reset_y: 90.0,
            reset_pos: Vec2::new(174.0, 42.5),
        },
    ],
    next: Some(LevelId::Forest),
    fall_exit: None,
    finish_x: None,
};

static FOREST: LevelConfig = LevelConfig {
    id: LevelId::Forest,
    map_file: "forest.json",
    background: "forest-background",
    music: "background.ogg",
    player_spawn: Vec2::ZERO,
    npc: NpcSpawn {
        sprite: "chipmunk",
        pos: Vec2::new(742.0, 6.0),
        size: Vec2::new(16.0, 16.0),
    },
    message_pos: Vec2::new(770.0, -20.0),
    collect_x: (0, 500),
    collect_y: (-9, 50),
    collect_count: 6,
    patrols: &[
        PatrolSpawn {
            kind: PatrolKind::SeaMonster,
            pos: Vec2::new(200.0, -35.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (37.0, 240.0),
        },
        PatrolSpawn {
            kind: PatrolKind::SeaMonster,
            pos: Vec2::new(150.0, 50.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (37.0, 260.0),
        },
        PatrolSpawn {
            kind: PatrolKind::SeaMonster,
            pos: Vec2::new(300.0, 70.0),
            size: SMALL_PATROL,
            velocity_x: PATROL_VELOCITY,
            range_x: (37.0, 400.0),
        },
    ],
    drift_sources: &[DriftSource {
        start: Vec2::new(689.0, 6.0),
        reset_y: 20.0,
        reset_pos: Vec2::new(682.0, 0.0),
    }],
    next: None,
    fall_exit: None,
    finish_x: Some(1004.0),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progression_chain() {
        assert_eq!(LevelId::Heaven.config().next, Some(LevelId::Meadow));
        assert_eq!(LevelId::Hell.config().next, Some(LevelId::Meadow));
        assert_eq!(LevelId::Meadow.config().next, Some(LevelId::Forest));
        assert_eq!(LevelId::Forest.config().next, None);
        assert!(LevelId::Forest.config().finish_x.is_some());
    }

    #[test]
    fn test_only_heaven_has_fall_exit() {
        for id in LevelId::ALL {
            let expected = if id == LevelId::Heaven { Some(LevelId::Hell) } else { None };
            assert_eq!(id.config().fall_exit, expected);
        }
    }

    #[test]
    fn test_every_level_fully_specified() {
        for id in LevelId::ALL {
            let config = id.config();
            assert_eq!(config.id, id);
            assert_eq!(config.patrols.len(), 3);
            assert!(config.collect_count > 0);
            assert!(config.collect_x.0 <= config.collect_x.1);
            assert!(config.collect_y.0 <= config.collect_y.1);
            // Exactly one way out of every level.
            assert!(config.next.is_some() || config.finish_x.is_some());
        }
    }
}
