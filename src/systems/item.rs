use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::Rng;
use tracing::{debug, warn};

use crate::constants::mechanics::MAX_SPAWN_ATTEMPTS;
use crate::error::LevelError;
use crate::level::LevelConfig;
use crate::map::tilemap::TileMap;
use crate::systems::components::{Body, Collectible, CollectionState, PlayerControlled};

/// Samples collectible positions for a level: integer coordinates drawn
/// uniformly from the level's ranges, rejected while any solid tile sits
/// in the surrounding neighborhood.
///
/// A level whose ranges are entirely walled off would otherwise spin
/// forever, so the loop is capped and surfaced as a construction error.
pub fn sample_positions(config: &LevelConfig, map: &TileMap) -> Result<Vec<Vec2>, LevelError> {
    let mut rng = rand::rng();
    let mut positions = Vec::with_capacity(config.collect_count as usize);

    for _ in 0..config.collect_count {
        let mut attempts = 0u32;
        let pos = loop {
            let candidate = Vec2::new(
                rng.random_range(config.collect_x.0..=config.collect_x.1) as f32,
                rng.random_range(config.collect_y.0..=config.collect_y.1) as f32,
            );
            if !map.is_obstructed(candidate) {
                break candidate;
            }
            attempts += 1;
            if attempts >= MAX_SPAWN_ATTEMPTS {
                warn!(level = %config.id, attempts, "collectible sampling exhausted");
                return Err(LevelError::SpawnExhausted { attempts });
            }
        };
        positions.push(pos);
    }
    Ok(positions)
}

/// Picks up collectibles the player overlaps. The collectible's hitbox is
/// its rect shifted by the fixed inward offset; the player uses its plain
/// rect.
pub fn collect_system(
    mut commands: Commands,
    player: Query<&Body, With<PlayerControlled>>,
    collectibles: Query<(Entity, &Body, &Collectible)>,
    mut collection: ResMut<CollectionState>,
) {
    let Ok(player) = player.single() else {
        return;
    };
    let player_rect = player.rect();

    for (entity, body, collectible) in collectibles.iter() {
        if player_rect.intersects(&body.hitbox()) {
            commands.entity(entity).despawn();
            collection.collect();
            debug!(
                id = collectible.id,
                remaining = collection.remaining,
                "collected"
            );
        }
    }
}
