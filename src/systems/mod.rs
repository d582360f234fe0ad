//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components,
//! systems, and resources.

pub mod audio;
pub mod camera;
pub mod components;
pub mod drift;
pub mod input;
pub mod item;
pub mod npc;
pub mod patrol;
pub mod physics;
pub mod render;
pub mod stage;
