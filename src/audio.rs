//! This module handles the audio playback for the game.

use std::collections::HashMap;
use std::path::Path;

use sdl2::mixer::{self, Channel, Chunk, InitFlag, DEFAULT_FORMAT};

use crate::constants::audio::{EFFECT_VOLUME, FALL_CHANNEL, JUMP_CHANNEL, MUSIC_CHANNEL, MUSIC_VOLUME};
use crate::error::{GameError, GameResult};
use crate::level::LevelId;

/// The audio system for the game.
///
/// Three fixed channels: level music loops on one, the jump and fall
/// one-shots each own their own so they never cut each other off.
pub struct Audio {
    _mixer_context: mixer::Sdl2MixerContext,
    music: HashMap<LevelId, Chunk>,
    jump: Chunk,
    fall: Chunk,
    muted: bool,
}

impl Audio {
    /// Opens the mixer and loads every sound under `<asset_root>/sounds/`.
    pub fn new(asset_root: &Path) -> GameResult<Self> {
        let frequency = 44100;
        let chunk_size = 256;

        mixer::open_audio(frequency, DEFAULT_FORMAT, 2, chunk_size).map_err(GameError::Sdl)?;
        mixer::allocate_channels(3);
        let mixer_context = mixer::init(InitFlag::OGG).map_err(GameError::Sdl)?;

        Channel(MUSIC_CHANNEL).set_volume(MUSIC_VOLUME);
        Channel(JUMP_CHANNEL).set_volume(EFFECT_VOLUME);
        Channel(FALL_CHANNEL).set_volume(EFFECT_VOLUME);

        let sounds = asset_root.join("sounds");
        let load = |name: &str| -> GameResult<Chunk> {
            Chunk::from_file(sounds.join(name)).map_err(GameError::Sdl)
        };

        let mut music = HashMap::new();
        for id in LevelId::ALL {
            music.insert(id, load(id.config().music)?);
        }

        Ok(Audio {
            _mixer_context: mixer_context,
            music,
            jump: load("jump.ogg")?,
            fall: load("fall.ogg")?,
            muted: false,
        })
    }

    /// Stops whatever is on the music channel and loops this level's track.
    pub fn play_music(&self, level: LevelId) {
        Channel(MUSIC_CHANNEL).halt();
        if let Some(chunk) = self.music.get(&level) {
            if let Err(e) = Channel(MUSIC_CHANNEL).play(chunk, -1) {
                tracing::warn!(level = ?level, "could not play music: {e}");
            }
        }
    }

    pub fn play_jump(&self) {
        if let Err(e) = Channel(JUMP_CHANNEL).play(&self.jump, 0) {
            tracing::warn!("could not play jump sound: {e}");
        }
    }

    /// Starts the falling sound unless it is already playing. The caller
    /// fires this every fast-falling tick, so the busy check is what keeps
    /// it from stuttering.
    pub fn play_fall(&self) {
        if Channel(FALL_CHANNEL).is_playing() {
            return;
        }
        if let Err(e) = Channel(FALL_CHANNEL).play(&self.fall, 0) {
            tracing::warn!("could not play fall sound: {e}");
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        Channel(MUSIC_CHANNEL).set_volume(if self.muted { 0 } else { MUSIC_VOLUME });
        let effect_volume = if self.muted { 0 } else { EFFECT_VOLUME };
        Channel(JUMP_CHANNEL).set_volume(effect_volume);
        Channel(FALL_CHANNEL).set_volume(effect_volume);
    }
}
