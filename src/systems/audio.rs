use bevy_ecs::event::EventReader;
use bevy_ecs::system::NonSendMut;

use crate::audio::Audio;
use crate::events::AudioEvent;

/// Drains the frame's sound triggers into the mixer.
pub fn audio_system(mut events: EventReader<AudioEvent>, mut audio: NonSendMut<Audio>) {
    for event in events.read() {
        match event {
            AudioEvent::Jump => audio.play_jump(),
            AudioEvent::Fall => audio.play_fall(),
            AudioEvent::Music(level) => audio.play_music(*level),
            AudioEvent::ToggleMute => audio.toggle_mute(),
        }
    }
}
