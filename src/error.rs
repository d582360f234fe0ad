//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during game operation.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while loading images and sounds from the asset tree.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load '{path}': {reason}")]
    LoadFailed { path: String, reason: String },
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Malformed grid key '{0}', expected 'x;y'")]
    BadGridKey(String),

    #[error("Unknown tile kind: {0}")]
    UnknownTileKind(String),

    #[error("Map JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while constructing a level.
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("No open tile found for collectible after {attempts} attempts")]
    SpawnExhausted { attempts: u32 },
}

/// Errors related to texture operations.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Errors related to animation construction.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Animation sequence has no frames")]
    EmptyFrames,

    #[error("Animation frame hold must be at least 1 tick")]
    ZeroFrameHold,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
