//! The main entry point of the application.
//!
//! Initializes SDL and the asset tree, then alternates between the title
//! screen and the fixed-rate game loop until the player exits.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use journey::asset::{load_game_assets, AssetStore};
use journey::audio::Audio;
use journey::constants::{LOOP_TIME, WINDOW_SIZE};
use journey::game::{Game, TickOutcome};
use journey::menu::{self, MenuChoice};
use journey::texture::ttf::TtfAtlas;

const FONT_POINT_SIZE: u16 = 10;

fn asset_root() -> PathBuf {
    std::env::var_os("JOURNEY_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

pub fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let video = sdl.video().map_err(|e| anyhow!(e))?;
    let _audio_subsystem = sdl.audio().map_err(|e| anyhow!(e))?;
    let _image = sdl2::image::init(sdl2::image::InitFlag::PNG).map_err(|e| anyhow!(e))?;
    let ttf_context = sdl2::ttf::init().map_err(|e| anyhow!(e))?;

    let window = video
        .window("A Dog's Journey Home", WINDOW_SIZE.x, WINDOW_SIZE.y)
        .position_centered()
        .build()?;
    let mut canvas = window.into_canvas().accelerated().build()?;
    let mut pump = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let root = asset_root();
    info!(root = %root.display(), "loading assets");

    let mut assets = AssetStore::new(canvas.texture_creator());
    load_game_assets(&mut assets, &root).context("loading image assets")?;

    let font = ttf_context
        .load_font(root.join("font.ttf"), FONT_POINT_SIZE)
        .map_err(|e| anyhow!(e))?;
    let creator = canvas.texture_creator();
    let mut ttf_atlas = TtfAtlas::new(&mut canvas, &creator, &font)?;

    let mut audio = Audio::new(&root)?;

    loop {
        match menu::run(&mut canvas, &mut pump, &assets, &mut ttf_atlas)? {
            MenuChoice::Exit => break,
            MenuChoice::Start => {}
        }

        let mut game = Game::new(canvas, pump, assets, audio, ttf_atlas, root.clone())?;

        info!(loop_time = ?LOOP_TIME, "starting game loop");
        let sleeper = spin_sleep::SpinSleeper::default();
        let outcome = loop {
            let frame_start = Instant::now();
            match game.tick()? {
                TickOutcome::Continue => {}
                outcome => break outcome,
            }

            let elapsed = frame_start.elapsed();
            if elapsed > LOOP_TIME {
                warn!(?elapsed, "frame ran over budget");
            } else {
                sleeper.sleep(LOOP_TIME - elapsed);
            }
        };

        (canvas, pump, assets, audio, ttf_atlas) = game.into_parts()?;
        if outcome == TickOutcome::Exit {
            break;
        }
    }

    Ok(())
}
