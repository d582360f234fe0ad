use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::prelude::*;
use bevy_ecs::system::NonSendMut;
use glam::IVec2;
use sdl2::pixels::Color;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

use crate::asset::AssetStore;
use crate::constants::mechanics::HITBOX_INSET;
use crate::constants::CANVAS_SIZE;
use crate::error::{GameError, TextureError};
use crate::map::tilemap::TileMap;
use crate::systems::components::{
    Body, Camera, CollectionState, Facing, GameStage, MessageBox, Sprite,
};
use crate::systems::npc::message_text;
use crate::texture::ttf::TtfAtlas;

/// A non-send resource wrapping the 320×240 render target everything draws
/// into before the upscaled present.
pub struct BackbufferResource(pub Texture);

/// The level's full-screen backdrop.
#[derive(Resource, Clone, Copy)]
pub struct Background(pub crate::asset::SpriteId);

const MESSAGE_BOX_SIZE: IVec2 = IVec2::new(120, 55);
const MESSAGE_BOX_COLOR: Color = Color::RGB(255, 192, 203);
const BANNER_COLOR: Color = Color::RGB(255, 215, 0);
const BANNER_TEXT: &str = "Congratulations! You reached home!";

/// Advances every sprite strip by one tick.
pub fn animation_system(mut sprites: Query<&mut Sprite>) {
    for mut sprite in sprites.iter_mut() {
        sprite.animation.advance();
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    mut backbuffer: NonSendMut<BackbufferResource>,
    assets: NonSendMut<AssetStore>,
    mut ttf: NonSendMut<TtfAtlas>,
    map: Res<TileMap>,
    camera: Res<Camera>,
    background: Res<Background>,
    message: Res<MessageBox>,
    collection: Res<CollectionState>,
    stage: Res<GameStage>,
    renderables: Query<(Entity, &Body, &Sprite, Option<&Facing>)>,
    mut errors: EventWriter<GameError>,
) {
    let scroll = camera.render_offset();
    let view = IVec2::new(CANVAS_SIZE.x as i32, CANVAS_SIZE.y as i32);
    let mut failures: Vec<String> = Vec::new();

    let result = canvas.with_texture_canvas(&mut backbuffer.0, |canvas| {
        canvas.set_draw_color(Color::BLACK);
        canvas.clear();

        if let Err(e) = canvas.copy(assets.texture(background.0), None, None) {
            failures.push(e);
        }

        // Off-grid decor sits behind the grid.
        for tile in map.offgrid() {
            let sprite = match assets.sheet(&tile.kind.to_string()) {
                Ok(sheet) => sheet.get(tile.variant as usize).copied(),
                Err(_) => None,
            };
            let Some(sprite) = sprite else {
                failures.push(format!("no image for offgrid {} #{}", tile.kind, tile.variant));
                continue;
            };
            let size = assets.size(sprite);
            let dest = SdlRect::new(
                tile.pos.x as i32 - scroll.x,
                tile.pos.y as i32 - scroll.y,
                size.x,
                size.y,
            );
            if let Err(e) = canvas.copy(assets.texture(sprite), None, dest) {
                failures.push(e);
            }
        }

        let ts = map.tile_size();
        for (cell, tile) in map.visible_tiles(scroll, view) {
            let sprite = match assets.sheet(&tile.kind.to_string()) {
                Ok(sheet) => sheet.get(tile.variant as usize).copied(),
                Err(_) => None,
            };
            let Some(sprite) = sprite else {
                failures.push(format!("no image for tile {} #{}", tile.kind, tile.variant));
                continue;
            };
            let dest = SdlRect::new(
                cell.x * ts as i32 - scroll.x,
                cell.y * ts as i32 - scroll.y,
                ts,
                ts,
            );
            if let Err(e) = canvas.copy(assets.texture(sprite), None, dest) {
                failures.push(e);
            }
        }

        // Entities back to front by layer. Sprites draw at the collision
        // box shifted by the fixed inset.
        for (_, body, sprite, facing) in renderables
            .iter()
            .sort_by_key::<(Entity, &Body, &Sprite, Option<&Facing>), _>(|(_, _, sprite, _)| sprite.layer)
        {
            let image = sprite.animation.current_image();
            let size = assets.size(image);
            let dest = SdlRect::new(
                (body.position.x + HITBOX_INSET.x) as i32 - scroll.x,
                (body.position.y + HITBOX_INSET.y) as i32 - scroll.y,
                size.x,
                size.y,
            );
            let flipped = facing.is_some_and(|f| f.flipped);
            if let Err(e) = canvas.copy_ex(assets.texture(image), None, dest, 0.0, None, flipped, false) {
                failures.push(e);
            }
        }

        if message.visible {
            let rect = SdlRect::new(
                message.pos.x as i32 - scroll.x,
                message.pos.y as i32 - scroll.y,
                MESSAGE_BOX_SIZE.x as u32,
                MESSAGE_BOX_SIZE.y as u32,
            );
            canvas.set_draw_color(MESSAGE_BOX_COLOR);
            if let Err(e) = canvas.fill_rect(rect) {
                failures.push(e);
            }
            canvas.set_draw_color(Color::BLACK);
            if let Err(e) = canvas.draw_rect(rect) {
                failures.push(e);
            }

            let mut y = rect.y() + 1;
            for line in message_text(collection.all_collected).lines() {
                if let Err(e) = ttf.render_text(canvas, line, IVec2::new(rect.x() + 5, y), Color::BLACK) {
                    failures.push(e);
                }
                y += ttf.line_height() as i32 + 1;
            }
        }

        if *stage == GameStage::Complete {
            let width = ttf.text_width(BANNER_TEXT) as i32;
            let pos = IVec2::new((view.x - width) / 2, view.y / 2 - ttf.line_height() as i32);
            if let Err(e) = ttf.render_text(canvas, BANNER_TEXT, pos, BANNER_COLOR) {
                failures.push(e);
            }
        }
    });

    if let Err(e) = result {
        failures.push(e.to_string());
    }
    for failure in failures {
        errors.write(TextureError::RenderFailed(failure).into());
    }
}

/// Upscales the backbuffer onto the window and flips it.
pub fn present_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    backbuffer: NonSendMut<BackbufferResource>,
    mut errors: EventWriter<GameError>,
) {
    if let Err(e) = canvas.copy(&backbuffer.0, None, None) {
        errors.write(TextureError::RenderFailed(e).into());
    }
    canvas.present();
}
