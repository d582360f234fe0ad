use bevy_ecs::prelude::*;
use tracing::info;

use crate::constants::mechanics::{DEATH_PLANE_Y, FALL_EXIT_Y};
use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{
    ActiveLevel, Body, CollectionState, GameStage, GlobalState, PendingTransition,
    PlayerControlled, Transition,
};

/// Turns the frame's events and the player's position into at most one
/// level transition, applied by the game loop after the schedule runs.
pub fn stage_system(
    mut events: EventReader<GameEvent>,
    player: Query<&Body, With<PlayerControlled>>,
    level: Res<ActiveLevel>,
    collection: Res<CollectionState>,
    mut stage: ResMut<GameStage>,
    mut pending: ResMut<PendingTransition>,
    mut global: ResMut<GlobalState>,
) {
    let config = level.0.config();

    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::Exit) => global.exit = true,
            GameEvent::Command(GameCommand::ReturnToMenu) => {
                pending.0 = Some(Transition::Menu);
            }
            GameEvent::PlayerDied(cause) => {
                info!(level = %config.id, ?cause, "player died");
                pending.0 = Some(Transition::Reload);
            }
            GameEvent::LevelComplete => {
                if let Some(next) = config.next {
                    info!(level = %config.id, next = %next, "level complete");
                    pending.0 = Some(Transition::Advance(next));
                }
            }
            GameEvent::Command(_) => {}
        }
    }

    if *stage != GameStage::Playing {
        return;
    }
    let Ok(player) = player.single() else {
        return;
    };

    // A fall exit claims every fall past its threshold; the death plane
    // only applies to levels without one.
    if let Some(below) = config.fall_exit {
        if player.position.y >= FALL_EXIT_Y {
            info!(level = %config.id, below = %below, "fell through");
            pending.0 = Some(Transition::Advance(below));
        }
    } else if player.position.y >= DEATH_PLANE_Y {
        info!(level = %config.id, "fell off the world");
        pending.0 = Some(Transition::Reload);
    }

    if let Some(finish_x) = config.finish_x {
        if player.position.x >= finish_x && collection.all_collected {
            info!("reached home");
            *stage = GameStage::Complete;
            pending.0 = None;
        }
    }
}
