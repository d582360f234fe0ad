//! Pre-rendered glyph atlas for text.
//!
//! Every character the game can print is rendered once at startup into a
//! single texture, so drawing a string is just a row of texture copies
//! instead of per-frame font rasterization.

use std::collections::HashMap;

use glam::{IVec2, UVec2};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::ttf::Font;
use sdl2::video::{Window, WindowContext};

use crate::error::{GameError, GameResult};

/// One glyph's slot in the atlas.
#[derive(Clone, Copy, Debug)]
struct Glyph {
    pos: UVec2,
    size: UVec2,
    advance: u32,
}

const ATLAS_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789.,:;!?'- ";

pub struct TtfAtlas {
    texture: Texture,
    glyphs: HashMap<char, Glyph>,
    line_height: u32,
    last_modulation: Option<Color>,
}

impl TtfAtlas {
    /// Measures, packs and renders the character set into a fresh texture.
    pub fn new(
        canvas: &mut Canvas<Window>,
        creator: &TextureCreator<WindowContext>,
        font: &Font,
    ) -> GameResult<Self> {
        let sdl = |e: String| GameError::Sdl(e);

        let mut glyphs = HashMap::new();
        let mut line_height = 0u32;
        let mut cursor_x = 0u32;
        for c in ATLAS_CHARS.chars() {
            let (advance, height) = font.size_of(&c.to_string()).map_err(|e| sdl(e.to_string()))?;
            glyphs.insert(
                c,
                Glyph {
                    pos: UVec2::new(cursor_x, 0),
                    size: UVec2::new(advance, height),
                    advance,
                },
            );
            line_height = line_height.max(height);
            cursor_x += advance;
        }

        let mut texture = creator
            .create_texture_target(None, cursor_x.max(1), line_height.max(1))
            .map_err(|e| sdl(e.to_string()))?;
        texture.set_blend_mode(sdl2::render::BlendMode::Blend);

        let mut render_error: Option<GameError> = None;
        canvas
            .with_texture_canvas(&mut texture, |atlas_canvas| {
                atlas_canvas.set_draw_color(Color::RGBA(0, 0, 0, 0));
                atlas_canvas.clear();

                for (c, glyph) in &glyphs {
                    if *c == ' ' {
                        continue;
                    }
                    let rendered = font
                        .render(&c.to_string())
                        .blended(Color::WHITE)
                        .map_err(|e| sdl(e.to_string()))
                        .and_then(|surface| {
                            creator
                                .create_texture_from_surface(&surface)
                                .map_err(|e| sdl(e.to_string()))
                        });
                    let glyph_texture = match rendered {
                        Ok(t) => t,
                        Err(e) => {
                            render_error = Some(e);
                            return;
                        }
                    };

                    let dest = Rect::new(glyph.pos.x as i32, 0, glyph.size.x, glyph.size.y);
                    if let Err(e) = atlas_canvas.copy(&glyph_texture, None, dest) {
                        render_error = Some(sdl(e));
                        return;
                    }
                }
            })
            .map_err(|e| sdl(e.to_string()))?;
        if let Some(e) = render_error {
            return Err(e);
        }

        Ok(Self {
            texture,
            glyphs,
            line_height,
            last_modulation: None,
        })
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| self.glyphs.get(&c).map_or(0, |g| g.advance))
            .sum()
    }

    /// Draws one line of text at a pixel position.
    pub fn render_text<T: sdl2::render::RenderTarget>(
        &mut self,
        canvas: &mut Canvas<T>,
        text: &str,
        position: IVec2,
        color: Color,
    ) -> Result<(), String> {
        if self.last_modulation != Some(color) {
            self.texture.set_color_mod(color.r, color.g, color.b);
            self.texture.set_alpha_mod(color.a);
            self.last_modulation = Some(color);
        }

        let mut x = position.x;
        for c in text.chars() {
            let Some(glyph) = self.glyphs.get(&c) else {
                continue;
            };
            if c != ' ' {
                let src = Rect::new(glyph.pos.x as i32, 0, glyph.size.x, glyph.size.y);
                let dest = Rect::new(x, position.y, glyph.size.x, glyph.size.y);
                canvas.copy(&self.texture, src, dest)?;
            }
            x += glyph.advance as i32;
        }
        Ok(())
    }
}
