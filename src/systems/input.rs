use std::collections::HashMap;

use bevy_ecs::{
    event::EventWriter,
    prelude::*,
    resource::Resource,
    system::{NonSendMut, ResMut},
};
use sdl2::{event::Event, keyboard::Keycode, EventPump};

use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::systems::components::{InputState, PlayerControlled, Velocity};

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        key_bindings.insert(Keycode::Up, GameCommand::Jump);
        key_bindings.insert(Keycode::W, GameCommand::Jump);
        key_bindings.insert(Keycode::Space, GameCommand::Jump);

        key_bindings.insert(Keycode::M, GameCommand::MuteAudio);
        key_bindings.insert(Keycode::O, GameCommand::SaveMap);
        key_bindings.insert(Keycode::Escape, GameCommand::ReturnToMenu);
        key_bindings.insert(Keycode::Q, GameCommand::Exit);

        Self { key_bindings }
    }
}

/// Drains the SDL event queue. Horizontal movement is held-key state in
/// [`InputState`]; everything else becomes an edge-triggered command.
pub fn input_system(
    bindings: Res<Bindings>,
    mut input: ResMut<InputState>,
    mut writer: EventWriter<GameEvent>,
    mut pump: NonSendMut<EventPump>,
) {
    for event in pump.poll_iter() {
        match event {
            Event::Quit { .. } => {
                writer.write(GameEvent::Command(GameCommand::Exit));
            }
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                match key {
                    Keycode::Left | Keycode::A => input.left = true,
                    Keycode::Right | Keycode::D => input.right = true,
                    _ => {}
                }
                if let Some(command) = bindings.key_bindings.get(&key).copied() {
                    writer.write(GameEvent::Command(command));
                }
            }
            Event::KeyUp {
                keycode: Some(key), ..
            } => match key {
                Keycode::Left | Keycode::A => input.left = false,
                Keycode::Right | Keycode::D => input.right = false,
                _ => {}
            },
            _ => {}
        }
    }
}

/// Handles the commands that touch ambient machinery rather than the
/// player: mute and the map dump.
pub fn command_system(
    mut events: EventReader<GameEvent>,
    mut audio: EventWriter<AudioEvent>,
    map: Res<crate::map::tilemap::TileMap>,
) {
    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::MuteAudio) => {
                audio.write(AudioEvent::ToggleMute);
            }
            GameEvent::Command(GameCommand::SaveMap) => {
                match crate::map::parser::map_to_json(&map) {
                    Ok(json) => {
                        if let Err(e) = std::fs::write("map_save.json", json) {
                            tracing::warn!("could not write map save: {e}");
                        } else {
                            tracing::info!("map saved to map_save.json");
                        }
                    }
                    Err(e) => tracing::warn!("could not serialize map: {e}"),
                }
            }
            _ => {}
        }
    }
}

/// Applies the jump impulse. The impulse is unconditional; being airborne
/// does not consume or gate it.
pub fn jump_system(
    mut events: EventReader<GameEvent>,
    mut player: Query<&mut Velocity, With<PlayerControlled>>,
    mut audio: EventWriter<AudioEvent>,
) {
    for event in events.read() {
        if matches!(event, GameEvent::Command(GameCommand::Jump)) {
            if let Ok(mut velocity) = player.single_mut() {
                velocity.0.y = crate::constants::physics::JUMP_VELOCITY;
                audio.write(AudioEvent::Jump);
            }
        }
    }
}
