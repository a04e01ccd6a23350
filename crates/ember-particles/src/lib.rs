//! Ember Particles - pooled 2D particle-effects engine
//!
//! Provides short-lived animated sprite effects for a 2D game:
//! - Fixed-capacity ring-buffer pool (oldest particles are overwritten)
//! - Per-effect emission profiles with TOML persistence
//! - One-shot bursts, continuous emitters and ambient weather
//! - Physics, homing, floating and after-image behaviors
//! - Blend-mode grouped quad generation through a camera transform

pub mod continuous;
pub mod curves;
pub mod effect;
pub mod emission;
pub mod manager;
pub mod particle;
pub mod persist;
pub mod profile;
pub mod rand;
pub mod render;
pub mod settings;
pub mod simulate;
pub mod texture;
pub mod tracked;

pub use continuous::FollowMode;
pub use effect::{BlendMode, EffectType, EmitterShape};
pub use emission::GhostParams;
pub use manager::ParticleManager;
pub use particle::{Behavior, Particle, ParticlePool, MAX_PARTICLES};
pub use persist::LoadOutcome;
pub use profile::{builtin_profiles, AnimationConfig, EmissionProfile, ProfileRepair};
pub use rand::{ParticleRng, RandomSource};
pub use render::{DrawStats, DrawTarget, SourceRect, SpriteQuad};
pub use settings::ParticleSettings;
pub use texture::{TextureHandle, TextureProvider};
pub use tracked::TrackedPoint;
