use bevy_ecs::prelude::*;

use crate::level::LevelId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    Jump,
    ReturnToMenu,
    MuteAudio,
    SaveMap,
}

/// Why the player died. Falling deaths skip the event and set the reload
/// transition directly from the position check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    /// Touched a patrolling enemy.
    Enemy,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
    PlayerDied(DeathCause),
    /// All collectibles gathered and the NPC reached; advance to the
    /// successor level.
    LevelComplete,
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Sound triggers, consumed by the audio system at the end of the frame.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    Jump,
    Fall,
    Music(LevelId),
    ToggleMute,
}
