use bevy_ecs::resource::Resource;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

use crate::constants::NEIGHBOR_OFFSETS;
use crate::rect::Rect;

/// Everything a tile can be. Solidity is a fixed property of the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TileKind {
    Grass,
    Stone,
    Cloud,
    Magma,
    Lava,
    Water,
    Decor,
    LargeDecor,
}

impl TileKind {
    /// Whether entities collide with tiles of this kind.
    pub fn is_solid(&self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Stone | TileKind::Cloud | TileKind::Magma)
    }
}

/// A tile on the grid. The position is the map key, not stored here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub variant: u32,
}

/// A decorative tile placed at an arbitrary pixel position, never collided
/// with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffgridTile {
    pub kind: TileKind,
    pub variant: u32,
    pub pos: Vec2,
}

/// Sparse tile grid plus off-grid decor, shared as a resource so every
/// gameplay system can query solidity.
#[derive(Resource)]
pub struct TileMap {
    tile_size: u32,
    tiles: HashMap<IVec2, Tile>,
    offgrid: Vec<OffgridTile>,
}

impl TileMap {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            tiles: HashMap::new(),
            offgrid: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn insert_tile(&mut self, cell: IVec2, kind: TileKind, variant: u32) {
        self.tiles.insert(cell, Tile { kind, variant });
    }

    pub fn push_offgrid(&mut self, tile: OffgridTile) {
        self.offgrid.push(tile);
    }

    pub fn offgrid(&self) -> &[OffgridTile] {
        &self.offgrid
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The grid cell containing a world position. Floor division, so
    /// negative coordinates map to negative cells rather than cell zero.
    pub fn cell_of(&self, pos: Vec2) -> IVec2 {
        let ts = self.tile_size as f32;
        IVec2::new((pos.x / ts).floor() as i32, (pos.y / ts).floor() as i32)
    }

    /// The tiles in the 3×3 block of cells around a world position, in the
    /// fixed neighborhood order.
    pub fn tiles_around(&self, pos: Vec2) -> SmallVec<[(IVec2, Tile); 9]> {
        let center = self.cell_of(pos);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|offset| {
                let cell = center + *offset;
                self.tiles.get(&cell).map(|tile| (cell, *tile))
            })
            .collect()
    }

    /// Collision rectangles of the solid tiles around a world position.
    pub fn physics_rects(&self, pos: Vec2) -> SmallVec<[Rect; 9]> {
        let ts = self.tile_size as f32;
        self.tiles_around(pos)
            .into_iter()
            .filter(|(_, tile)| tile.kind.is_solid())
            .map(|(cell, _)| Rect::new(Vec2::new(cell.x as f32 * ts, cell.y as f32 * ts), Vec2::splat(ts)))
            .collect()
    }

    /// Whether any solid tile sits in the neighborhood of a world position.
    /// Collectible placement samples against this.
    pub fn is_obstructed(&self, pos: Vec2) -> bool {
        self.tiles_around(pos).iter().any(|(_, tile)| tile.kind.is_solid())
    }

    /// Grid tiles overlapping a camera-space view rectangle, for rendering.
    /// The range is inclusive of the partially visible border cells.
    pub fn visible_tiles(&self, offset: IVec2, view: IVec2) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        let ts = self.tile_size as i32;
        let x_range = offset.x.div_euclid(ts)..=(offset.x + view.x).div_euclid(ts);
        let y_range = offset.y.div_euclid(ts)..=(offset.y + view.y).div_euclid(ts);
        y_range.flat_map(move |y| {
            x_range.clone().filter_map(move |x| {
                let cell = IVec2::new(x, y);
                self.tiles.get(&cell).map(|tile| (cell, *tile))
            })
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IVec2, &Tile)> {
        self.tiles.iter()
    }
}
