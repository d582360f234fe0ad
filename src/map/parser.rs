//! JSON map format.
//!
//! Maps are stored as a sparse grid keyed by `"x;y"` strings plus a flat
//! list of off-grid decor:
//!
//! ```json
//! {
//!   "tilemap": { "3;10": { "type": "grass", "variant": 1, "pos": [3, 10] } },
//!   "tile_size": 16,
//!   "offgrid": [ { "type": "decor", "variant": 0, "pos": [48.0, 112.0] } ]
//! }
//! ```
//!
//! Any malformed key or unknown tile kind is fatal at load time; a level
//! with a half-parsed map is worse than no level.

use std::collections::HashMap;
use std::str::FromStr;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::map::tilemap::{OffgridTile, TileKind, TileMap};

#[derive(Debug, Serialize, Deserialize)]
struct RawMap {
    tilemap: HashMap<String, RawTile>,
    tile_size: u32,
    #[serde(default)]
    offgrid: Vec<RawTile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTile {
    #[serde(rename = "type")]
    kind: String,
    variant: u32,
    pos: [f32; 2],
}

fn parse_grid_key(key: &str) -> Result<IVec2, ParseError> {
    let bad = || ParseError::BadGridKey(key.to_string());
    let (x, y) = key.split_once(';').ok_or_else(bad)?;
    Ok(IVec2::new(
        x.trim().parse().map_err(|_| bad())?,
        y.trim().parse().map_err(|_| bad())?,
    ))
}

fn parse_kind(name: &str) -> Result<TileKind, ParseError> {
    TileKind::from_str(name).map_err(|_| ParseError::UnknownTileKind(name.to_string()))
}

/// Parses a map from its JSON text.
pub fn parse_map(json: &str) -> Result<TileMap, ParseError> {
    let raw: RawMap = serde_json::from_str(json)?;

    let mut map = TileMap::new(raw.tile_size);
    for (key, tile) in &raw.tilemap {
        let cell = parse_grid_key(key)?;
        map.insert_tile(cell, parse_kind(&tile.kind)?, tile.variant);
    }
    for tile in &raw.offgrid {
        map.push_offgrid(OffgridTile {
            kind: parse_kind(&tile.kind)?,
            variant: tile.variant,
            pos: Vec2::new(tile.pos[0], tile.pos[1]),
        });
    }
    Ok(map)
}

/// Serializes a map back into the JSON format `parse_map` accepts.
pub fn map_to_json(map: &TileMap) -> Result<String, ParseError> {
    let raw = RawMap {
        tilemap: map
            .iter()
            .map(|(cell, tile)| {
                let raw = RawTile {
                    kind: tile.kind.to_string(),
                    variant: tile.variant,
                    pos: [cell.x as f32, cell.y as f32],
                };
                (format!("{};{}", cell.x, cell.y), raw)
            })
            .collect(),
        tile_size: map.tile_size(),
        offgrid: map
            .offgrid()
            .iter()
            .map(|tile| RawTile {
                kind: tile.kind.to_string(),
                variant: tile.variant,
                pos: [tile.pos.x, tile.pos.y],
            })
            .collect(),
    };
    Ok(serde_json::to_string(&raw)?)
}
