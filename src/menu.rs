//! The title screen.
//!
//! Runs its own small loop on the raw SDL handles before the ECS world
//! exists (and between games), drawing straight to the window at full
//! resolution.

use glam::IVec2;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;

use crate::asset::AssetStore;
use crate::constants::LOOP_TIME;
use crate::error::{GameError, GameResult};
use crate::texture::ttf::TtfAtlas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Exit,
}

const START_BUTTON_POS: IVec2 = IVec2::new(220, 305);
const EXIT_BUTTON_POS: IVec2 = IVec2::new(220, 370);

fn button_rect(assets: &AssetStore, sprite: crate::asset::SpriteId, pos: IVec2) -> SdlRect {
    let size = assets.size(sprite);
    SdlRect::new(pos.x, pos.y, size.x, size.y)
}

/// Blocks until the player picks Start or Exit (closing the window counts
/// as Exit).
pub fn run(
    canvas: &mut Canvas<Window>,
    pump: &mut EventPump,
    assets: &AssetStore,
    ttf: &mut TtfAtlas,
) -> GameResult<MenuChoice> {
    let background = assets.sprite("titleBackground")?;
    let start = assets.sprite("start")?;
    let exit = assets.sprite("exit")?;
    let start_rect = button_rect(assets, start, START_BUTTON_POS);
    let exit_rect = button_rect(assets, exit, EXIT_BUTTON_POS);

    loop {
        let mut clicked = None;
        for event in pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return Ok(MenuChoice::Exit),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => clicked = Some((x, y)),
                _ => {}
            }
        }

        if let Some((x, y)) = clicked {
            if start_rect.contains_point((x, y)) {
                return Ok(MenuChoice::Start);
            }
            if exit_rect.contains_point((x, y)) {
                return Ok(MenuChoice::Exit);
            }
        }

        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        canvas
            .copy(assets.texture(background), None, None)
            .map_err(GameError::Sdl)?;
        canvas
            .copy(assets.texture(start), None, start_rect)
            .map_err(GameError::Sdl)?;
        canvas
            .copy(assets.texture(exit), None, exit_rect)
            .map_err(GameError::Sdl)?;

        for (text, pos) in [
            ("A Dog's Journey", IVec2::new(140, 100)),
            ("Home", IVec2::new(260, 155)),
            ("Start", IVec2::new(285, 310)),
            ("Exit", IVec2::new(290, 375)),
        ] {
            ttf.render_text(canvas, text, pos, Color::WHITE)
                .map_err(GameError::Sdl)?;
        }

        canvas.present();
        spin_sleep::sleep(LOOP_TIME);
    }
}
