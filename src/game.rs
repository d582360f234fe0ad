//! This module contains the main game logic and state.

use std::path::PathBuf;

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use sdl2::render::ScaleMode;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use tracing::{debug, info, warn};

use crate::asset::AssetStore;
use crate::audio::Audio;
use crate::constants::animation::{NPC_FRAME_HOLD, PLAYER_FRAME_HOLD};
use crate::constants::mechanics::PLAYER_SIZE;
use crate::constants::CANVAS_SIZE;
use crate::error::{GameError, GameResult};
use crate::events::{AudioEvent, GameEvent};
use crate::level::LevelId;
use crate::map::parser;
use crate::systems::components::{
    ActiveLevel, Airborne, Body, Collectible, CollectionState, Contacts, Drift, Facing, GameStage,
    Gesture, GlobalState, InputState, MessageBox, Npc, Patrol, PendingTransition,
    PlayerAnimations, PlayerBundle, PlayerControlled, Sprite, Transition, Velocity,
};
use crate::systems::input::Bindings;
use crate::systems::render::{BackbufferResource, Background};
use crate::systems::{audio, camera, drift, input, item, npc, patrol, physics, render, stage};
use crate::texture::animation::AnimationSequence;
use crate::texture::ttf::TtfAtlas;

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that update the game state
    Update,
    /// Gameplay systems that respond to events
    Respond,
}

/// System set for all rendering systems to ensure they run after gameplay logic
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    Animation,
    Draw,
    Present,
}

/// Root of the asset tree, for the map files loaded on every transition.
#[derive(Resource, Clone)]
pub struct AssetRoot(pub PathBuf);

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Escape was pressed; hand the SDL handles back to the title screen.
    Menu,
    /// The window was closed or quit was requested.
    Exit,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Orchestrates all game systems through a centralized `World` containing
/// entities, components, and resources, while a `Schedule` defines system
/// execution order. SDL2 handles are stored as `NonSend` resources so the
/// render and audio systems can reach them.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    pub fn new(
        canvas: Canvas<Window>,
        event_pump: EventPump,
        assets: AssetStore,
        audio: Audio,
        ttf_atlas: TtfAtlas,
        asset_root: PathBuf,
    ) -> GameResult<Game> {
        info!("Starting game initialization");

        let texture_creator: TextureCreator<WindowContext> = canvas.texture_creator();
        let mut backbuffer = texture_creator
            .create_texture_target(None, CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        backbuffer.set_scale_mode(ScaleMode::Nearest);

        debug!("Initializing ECS world and system schedule");
        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);

        world.insert_resource(AssetRoot(asset_root));
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(Bindings::default());
        world.insert_resource(InputState::default());
        world.insert_resource(GameStage::Playing);
        world.insert_resource(PendingTransition::default());

        world.insert_non_send_resource(event_pump);
        world.insert_non_send_resource(canvas);
        world.insert_non_send_resource(BackbufferResource(backbuffer));
        world.insert_non_send_resource(assets);
        world.insert_non_send_resource(ttf_atlas);
        world.insert_non_send_resource(audio);

        Self::configure_schedule(&mut schedule);

        let mut game = Game { world, schedule };
        game.load_level(LevelId::Heaven)?;

        info!("Game initialization completed successfully");
        Ok(game)
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (input::input_system, input::command_system, input::jump_system)
                    .chain()
                    .in_set(GameplaySet::Input),
                (
                    physics::player_physics_system,
                    patrol::patrol_system,
                    patrol::patrol_collision_system,
                    item::collect_system,
                    npc::npc_system,
                    drift::drift_system,
                    camera::camera_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                stage::stage_system.in_set(GameplaySet::Respond),
                render::animation_system.in_set(RenderSet::Animation),
                render::render_system.in_set(RenderSet::Draw),
                (render::present_system, audio::audio_system)
                    .chain()
                    .in_set(RenderSet::Present),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update
                        .run_if(|stage: Res<GameStage>| *stage == GameStage::Playing),
                    GameplaySet::Respond,
                    RenderSet::Animation,
                    RenderSet::Draw,
                    RenderSet::Present,
                )
                    .chain(),
            );
    }

    /// Tears the world's entities down and builds `id` from scratch. Used
    /// for entry, death and advancement alike; nothing survives a
    /// transition except the global resources.
    pub fn load_level(&mut self, id: LevelId) -> GameResult<()> {
        let config = id.config();
        info!(level = %id, map = config.map_file, "loading level");

        let world = &mut self.world;
        world.clear_entities();

        // The store comes out of the world while we spawn against it.
        let assets = world
            .remove_non_send_resource::<AssetStore>()
            .ok_or_else(|| GameError::InvalidState("asset store missing".into()))?;
        let result = Self::build_level(world, &assets, id);
        world.insert_non_send_resource(assets);
        result?;

        world.insert_resource(ActiveLevel(id));
        world.insert_resource(GameStage::Playing);
        world.insert_resource(PendingTransition::default());
        world.insert_resource(InputState::default());
        world.insert_resource(crate::systems::components::Camera::default());
        world.insert_resource(CollectionState::new(config.collect_count));
        world.insert_resource(MessageBox {
            pos: config.message_pos,
            visible: false,
        });
        world.send_event(AudioEvent::Music(id));
        Ok(())
    }

    fn build_level(world: &mut World, assets: &AssetStore, id: LevelId) -> GameResult<()> {
        let config = id.config();

        let root = world.resource::<AssetRoot>().0.clone();
        let map_path = root.join("maps").join(config.map_file);
        let map = parser::parse_map(&std::fs::read_to_string(&map_path)?)?;

        world.insert_resource(Background(assets.sprite(config.background)?));

        let strip = |sheet: &str, hold: u32| -> GameResult<AnimationSequence> {
            Ok(AnimationSequence::new(assets.sheet(sheet)?.to_vec(), hold, true)
                .map_err(GameError::Animation)?)
        };
        let still = |sprite| -> GameResult<AnimationSequence> {
            Ok(AnimationSequence::new(vec![sprite], 1, true).map_err(GameError::Animation)?)
        };

        let animations = PlayerAnimations {
            idle: strip("player/idle", PLAYER_FRAME_HOLD)?,
            run: strip("player/run", PLAYER_FRAME_HOLD)?,
            jump: strip("player/jump", PLAYER_FRAME_HOLD)?,
        };
        world.spawn(PlayerBundle {
            player: PlayerControlled,
            body: Body::new(config.player_spawn, PLAYER_SIZE),
            velocity: Velocity::default(),
            contacts: Contacts::empty(),
            gesture: Gesture::Idle,
            facing: Facing::default(),
            airborne: Airborne::default(),
            sprite: Sprite {
                animation: animations.idle.duplicate(),
                layer: 2,
            },
        });
        world.insert_resource(animations);

        world.spawn((
            Npc,
            Body::new(config.npc.pos, config.npc.size),
            Sprite {
                animation: strip(&format!("npc/{}", config.npc.sprite), NPC_FRAME_HOLD)?,
                layer: 1,
            },
        ));

        for spawn in config.patrols {
            let sprite = match assets.sprite_opt(&spawn.kind.to_string()) {
                Some(sprite) => Some(Sprite {
                    animation: still(sprite)?,
                    layer: 3,
                }),
                // Patrols without an image still sweep and still kill.
                None if spawn.kind.sprite_optional() => None,
                None => {
                    return Err(crate::error::AssetError::NotFound(spawn.kind.to_string()).into())
                }
            };
            let mut patrol = world.spawn((
                Body::new(spawn.pos, spawn.size),
                Patrol {
                    velocity_x: spawn.velocity_x,
                    range_x: spawn.range_x,
                },
                Facing::default(),
            ));
            if let Some(sprite) = sprite {
                patrol.insert(sprite);
            }
        }

        let bone = assets.sprite("bone")?;
        let bone_size = assets.size(bone);
        let positions = item::sample_positions(config, &map).map_err(GameError::Level)?;
        debug!(count = positions.len(), level = %id, "placed collectibles");
        for (i, pos) in positions.into_iter().enumerate() {
            world.spawn((
                Body::new(pos, glam::Vec2::new(bone_size.x as f32, bone_size.y as f32)),
                Collectible { id: i as u32 },
                Sprite {
                    animation: still(bone)?,
                    layer: 4,
                },
            ));
        }

        let leaf = assets.sheet("float")?[0];
        let leaf_size = assets.size(leaf);
        for source in config.drift_sources {
            world.spawn((
                Body::new(source.start, glam::Vec2::new(leaf_size.x as f32, leaf_size.y as f32)),
                Drift {
                    reset_y: source.reset_y,
                    reset_pos: source.reset_pos,
                },
                Sprite {
                    animation: still(leaf)?,
                    layer: 0,
                },
            ));
        }

        world.insert_resource(map);
        Ok(())
    }

    /// Executes one frame: runs every scheduled system, reports non-fatal
    /// render errors, then applies whichever level transition the frame
    /// decided on.
    pub fn tick(&mut self) -> GameResult<TickOutcome> {
        self.schedule.run(&mut self.world);

        for error in self.world.resource_mut::<Events<GameError>>().drain() {
            warn!("non-fatal: {error}");
        }

        let pending = self.world.resource_mut::<PendingTransition>().0.take();
        match pending {
            Some(Transition::Reload) => {
                let id = self.world.resource::<ActiveLevel>().0;
                self.load_level(id)?;
            }
            Some(Transition::Advance(next)) => self.load_level(next)?,
            Some(Transition::Menu) => return Ok(TickOutcome::Menu),
            None => {}
        }

        if self.world.resource::<GlobalState>().exit {
            Ok(TickOutcome::Exit)
        } else {
            Ok(TickOutcome::Continue)
        }
    }

    /// Hands the SDL handles and loaded assets back to the caller, for the
    /// title screen.
    pub fn into_parts(mut self) -> GameResult<(Canvas<Window>, EventPump, AssetStore, Audio, TtfAtlas)> {
        let missing = |what: &str| GameError::InvalidState(format!("{what} missing from world"));
        Ok((
            self.world
                .remove_non_send_resource::<Canvas<Window>>()
                .ok_or_else(|| missing("canvas"))?,
            self.world
                .remove_non_send_resource::<EventPump>()
                .ok_or_else(|| missing("event pump"))?,
            self.world
                .remove_non_send_resource::<AssetStore>()
                .ok_or_else(|| missing("asset store"))?,
            self.world
                .remove_non_send_resource::<Audio>()
                .ok_or_else(|| missing("audio"))?,
            self.world
                .remove_non_send_resource::<TtfAtlas>()
                .ok_or_else(|| missing("glyph atlas"))?,
        ))
    }
}
