//! Ember Core - Foundational types for the Ember effects engine
//!
//! This crate provides the types shared by the engine and its tools:
//! - `Color` - RGBA color with packed `0xRRGGBBAA` conversion
//! - `Camera2D`, `CameraView` - world to screen mapping for 2D scenes
//! - Error types and Result alias

mod camera;
mod error;
mod types;

pub use camera::{Camera2D, CameraView};
pub use error::{EmberError, Result};
pub use types::Color;

pub use glam::{Mat3, Vec2};
