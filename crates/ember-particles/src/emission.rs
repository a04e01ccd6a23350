//! Turns a profile and a spawn point into initialized particle records

use crate::effect::{BlendMode, EffectType, EmitterShape};
use crate::particle::{Behavior, Particle, ParticlePool, SpriteAnimation};
use crate::profile::EmissionProfile;
use crate::rand::RandomSource;
use crate::texture::TextureHandle;
use crate::tracked::TrackedPoint;
use glam::Vec2;

/// Lifetime of a dash after-image, in ticks
pub const GHOST_LIFE: i32 = 20;
const GHOST_COLOR_START: u32 = 0x8888FFFF;
const GHOST_COLOR_END: u32 = 0x8888FF00;
const GHOST_SHRINK: f32 = 0.8;

/// Caller-supplied pose for a locomotion after-image
#[derive(Debug, Clone, Copy)]
pub struct GhostParams {
    pub position: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub flip_x: bool,
    pub texture: TextureHandle,
}

/// Sample a spawn offset from the emitter origin according to the shape
pub fn spawn_offset(profile: &EmissionProfile, rng: &mut impl RandomSource) -> Vec2 {
    match profile.emitter_shape {
        EmitterShape::Point => {
            let mut offset = Vec2::ZERO;
            if profile.emit_range.x > 0.0 {
                let half = profile.emit_range.x * 0.5;
                offset.x = rng.range(-half, half);
            }
            if profile.emit_range.y > 0.0 {
                let half = profile.emit_range.y * 0.5;
                offset.y = rng.range(-half, half);
            }
            offset
        }
        EmitterShape::Line => {
            let half = profile.emitter_size.x * 0.5;
            Vec2::new(rng.range(-half, half), 0.0)
        }
        EmitterShape::Rectangle => {
            let half = profile.emitter_size * 0.5;
            Vec2::new(rng.range(-half.x, half.x), rng.range(-half.y, half.y))
        }
    }
}

/// Emit one burst of `profile.count` particles at `origin`.
///
/// Particles home toward `target` only when the profile asks for homing.
/// A burst never writes more than the pool holds, and a particle rolled with
/// no life is skipped. Returns the number of live particles written (0 when
/// the texture is invalid).
pub fn emit_burst(
    pool: &mut ParticlePool,
    effect: EffectType,
    profile: &EmissionProfile,
    origin: Vec2,
    target: Option<&TrackedPoint>,
    rng: &mut impl RandomSource,
) -> usize {
    if !profile.texture.is_valid() {
        return 0;
    }

    let acceleration = profile.gravity + profile.acceleration;

    let count = (profile.count as usize).min(pool.capacity());
    let mut emitted = 0;
    for _ in 0..count {
        let life = rng.range_i32(profile.life_min, profile.life_max);
        if life <= 0 {
            continue;
        }
        let position = origin + spawn_offset(profile, rng);

        let speed = rng.range(profile.speed_min, profile.speed_max);
        let half_range = profile.angle_range * 0.5;
        let angle = (profile.angle_base + rng.range(-half_range, half_range)).to_radians();
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        let rotation_speed = rng.range(profile.rotation_speed_min, profile.rotation_speed_max);
        let draw_size = rng.range(profile.size_min, profile.size_max);

        let behavior = match target {
            Some(target) if profile.homing => Behavior::Homing {
                target: target.clone(),
                strength: profile.homing_strength,
            },
            _ if effect.floats_in_place() => Behavior::Stationary {
                anchor: position,
                amplitude: profile.float_amplitude,
                frequency: profile.float_frequency,
            },
            _ => Behavior::Physics,
        };

        let animation = profile.animation.enabled.then(|| SpriteAnimation {
            div_x: profile.animation.div_x.max(1),
            div_y: profile.animation.div_y.max(1),
            total_frames: profile.animation.total_frames.max(1),
            frame_duration: profile.animation.frame_duration,
            looping: profile.animation.looping,
            frame: 0,
            timer: 0.0,
        });

        *pool.acquire() = Particle {
            position,
            velocity,
            acceleration,
            rotation: 0.0,
            rotation_speed,
            remaining_life: life,
            initial_life: life,
            age: 0.0,
            texture: profile.texture,
            animation,
            draw_size,
            scale_start: profile.scale_start,
            scale_end: profile.scale_end,
            scale: profile.scale_start,
            color_start: profile.color_start,
            color_end: profile.color_end,
            color: profile.color_start,
            blend_mode: profile.blend_mode,
            flip_x: false,
            behavior,
            effect: Some(effect),
        };
        emitted += 1;
    }

    emitted
}

/// Write a short-lived fading copy of a sprite, bypassing profiles.
/// Returns false when the texture is invalid.
pub fn emit_ghost(pool: &mut ParticlePool, params: &GhostParams) -> bool {
    if !params.texture.is_valid() {
        return false;
    }

    *pool.acquire() = Particle {
        position: params.position,
        rotation: params.rotation,
        remaining_life: GHOST_LIFE,
        initial_life: GHOST_LIFE,
        texture: params.texture,
        draw_size: 0.0,
        scale_start: params.scale,
        scale_end: params.scale * GHOST_SHRINK,
        scale: params.scale,
        color_start: GHOST_COLOR_START,
        color_end: GHOST_COLOR_END,
        color: GHOST_COLOR_START,
        blend_mode: BlendMode::Normal,
        flip_x: params.flip_x,
        behavior: Behavior::Ghost,
        effect: None,
        ..Particle::dead()
    };
    true
}
