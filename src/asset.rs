//! Runtime asset loading.
//!
//! Images load from a directory tree under `assets/` into an [`AssetStore`]
//! that hands out lightweight [`SpriteId`] handles. Black is the universal
//! color key. The store is owned by whoever builds it and passed by
//! reference; nothing reaches for a global asset table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::UVec2;
use sdl2::image::LoadSurface;
use sdl2::pixels::Color;
use sdl2::render::{Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::WindowContext;
use tracing::debug;

use crate::error::AssetError;

/// Handle into the [`AssetStore`]. Cheap to copy, hash and compare, which
/// keeps animation frames and components free of texture lifetimes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

pub struct AssetStore {
    creator: TextureCreator<WindowContext>,
    textures: Vec<Texture>,
    sizes: Vec<UVec2>,
    by_name: HashMap<String, SpriteId>,
    sheets: HashMap<String, Vec<SpriteId>>,
}

impl AssetStore {
    pub fn new(creator: TextureCreator<WindowContext>) -> Self {
        Self {
            creator,
            textures: Vec::new(),
            sizes: Vec::new(),
            by_name: HashMap::new(),
            sheets: HashMap::new(),
        }
    }

    fn load_failed(path: &Path, reason: impl ToString) -> AssetError {
        AssetError::LoadFailed {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn load_texture(&mut self, path: &Path) -> Result<SpriteId, AssetError> {
        let mut surface = Surface::from_file(path).map_err(|e| Self::load_failed(path, e))?;
        surface
            .set_color_key(true, Color::BLACK)
            .map_err(|e| Self::load_failed(path, e))?;
        let texture = self
            .creator
            .create_texture_from_surface(&surface)
            .map_err(|e| Self::load_failed(path, e))?;

        let id = SpriteId(self.textures.len() as u32);
        self.sizes.push(UVec2::new(surface.width(), surface.height()));
        self.textures.push(texture);
        Ok(id)
    }

    /// Loads a single image under a logical name.
    pub fn load_image(&mut self, name: &str, path: impl AsRef<Path>) -> Result<SpriteId, AssetError> {
        let id = self.load_texture(path.as_ref())?;
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Loads every image in a directory as one sheet, ordered by filename.
    /// Filename order is the frame order of every animation strip.
    pub fn load_sheet(&mut self, name: &str, dir: impl AsRef<Path>) -> Result<&[SpriteId], AssetError> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut frames = Vec::with_capacity(paths.len());
        for path in &paths {
            frames.push(self.load_texture(path)?);
        }
        debug!(sheet = name, frames = frames.len(), "loaded sprite sheet");

        self.sheets.insert(name.to_string(), frames);
        Ok(&self.sheets[name])
    }

    pub fn sprite(&self, name: &str) -> Result<SpriteId, AssetError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    /// Lookup that tolerates absence, for entities documented as
    /// sprite-optional.
    pub fn sprite_opt(&self, name: &str) -> Option<SpriteId> {
        self.by_name.get(name).copied()
    }

    pub fn sheet(&self, name: &str) -> Result<&[SpriteId], AssetError> {
        self.sheets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    pub fn texture(&self, id: SpriteId) -> &Texture {
        &self.textures[id.0 as usize]
    }

    pub fn size(&self, id: SpriteId) -> UVec2 {
        self.sizes[id.0 as usize]
    }
}

const TILE_SHEETS: [&str; 8] = [
    "grass",
    "stone",
    "cloud",
    "magma",
    "lava",
    "water",
    "decor",
    "large_decor",
];
const SINGLE_IMAGES: [&str; 11] = [
    "heaven-sunset",
    "hell",
    "background",
    "forest-background",
    "titleBackground",
    "start",
    "exit",
    "bone",
    "ghost",
    "dragon",
    "dove",
];
const PLAYER_STRIPS: [&str; 3] = ["idle", "run", "jump"];
const NPC_SHEETS: [&str; 4] = ["willowisp", "fluffy", "tomato", "chipmunk"];

/// Loads the game's whole image tree. Everything listed is mandatory
/// except the sea monster, which some asset packs ship without.
pub fn load_game_assets(store: &mut AssetStore, root: &Path) -> Result<(), AssetError> {
    let images = root.join("images");

    for name in SINGLE_IMAGES {
        store.load_image(name, images.join(format!("{name}.png")))?;
    }

    let sea_monster = images.join("sea_monster.png");
    if sea_monster.is_file() {
        store.load_image("sea_monster", sea_monster)?;
    } else {
        debug!("no sea monster image, its patrols will be invisible");
    }

    for kind in TILE_SHEETS {
        store.load_sheet(kind, images.join("tiles").join(kind))?;
    }
    store.load_sheet("float", images.join("float"))?;

    for strip in PLAYER_STRIPS {
        store.load_sheet(
            &format!("player/{strip}"),
            images.join("entities").join("player").join(strip),
        )?;
    }
    for npc in NPC_SHEETS {
        store.load_sheet(
            &format!("npc/{npc}"),
            images.join("entities").join("npc").join(npc),
        )?;
    }

    Ok(())
}
