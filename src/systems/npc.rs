use bevy_ecs::prelude::*;

use crate::events::GameEvent;
use crate::systems::components::{ActiveLevel, Body, CollectionState, MessageBox, Npc, PlayerControlled};

/// Overlap with the NPC shows the message box; the box hides again the
/// frame the overlap ends. Which message it shows is decided at draw time
/// from the live collection state, so it can flip mid-conversation.
///
/// When the overlap holds with everything collected, levels with a
/// successor are done. The final level's NPC only ever talks; finishing it
/// means walking past the finish line instead.
pub fn npc_system(
    player: Query<&Body, With<PlayerControlled>>,
    npc: Query<&Body, With<Npc>>,
    level: Res<ActiveLevel>,
    collection: Res<CollectionState>,
    mut message: ResMut<MessageBox>,
    mut events: EventWriter<GameEvent>,
) {
    let (Ok(player), Ok(npc)) = (player.single(), npc.single()) else {
        return;
    };

    let touching = player.rect().intersects(&npc.hitbox());
    message.visible = touching;

    if touching && collection.all_collected && level.0.config().next.is_some() {
        events.write(GameEvent::LevelComplete);
    }
}

/// The two lines of dialogue, chosen fresh every frame.
pub fn message_text(all_collected: bool) -> &'static str {
    if all_collected {
        "You are so close!\nYou have all\nthe magical bones!\nTime to go home!!!"
    } else {
        "You have not collected\nall magical bones.\nGo back to collect\nmagical bones."
    }
}
