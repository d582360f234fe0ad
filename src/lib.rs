//! A side-scrolling tile platformer about a dog finding its way home.

pub mod asset;
pub mod audio;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod level;
pub mod map;
pub mod menu;
pub mod rect;
pub mod systems;
pub mod texture;
