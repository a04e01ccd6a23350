//! Per-frame particle integration

use crate::curves::{lerp_f32, lerp_rgba};
use crate::effect::EffectType;
use crate::particle::{Behavior, Particle, ParticlePool};
use crate::profile::EmissionProfile;
use glam::Vec2;
use std::collections::BTreeMap;
use std::f32::consts::TAU;

/// Vertical frequency of the snow sway wave
const WIND_WAVE_SCALE: f32 = 0.01;
/// Homing stops steering once the target is closer than this
const HOMING_EPSILON: f32 = 1e-3;

/// Frame inputs shared by every particle
pub struct StepContext<'a> {
    pub dt: f32,
    pub ground_level: f32,
    pub profiles: &'a BTreeMap<EffectType, EmissionProfile>,
}

/// Advance every live particle by one tick
pub fn step_pool(pool: &mut ParticlePool, ctx: &StepContext<'_>) {
    for p in pool.iter_alive_mut() {
        step_particle(p, ctx);
    }
}

/// Advance one particle: environment, animation, behavior, ground, life
pub fn step_particle(p: &mut Particle, ctx: &StepContext<'_>) {
    let dt = ctx.dt;
    let profile = p.effect.and_then(|e| ctx.profiles.get(&e));

    if let Some(profile) = profile {
        if profile.wind_strength > 0.0 {
            p.position.x += (p.position.y * WIND_WAVE_SCALE).sin() * profile.wind_strength * dt;
        }
    }

    if let Some(anim) = p.animation.as_mut() {
        anim.advance(dt);
    }

    p.age += dt;
    match &p.behavior {
        Behavior::Physics | Behavior::Ghost => integrate(p, dt),
        Behavior::Homing { target, strength } => {
            let to_target = target.get() - p.position;
            if to_target.length() > HOMING_EPSILON {
                p.velocity += to_target.normalize() * *strength * dt;
            }
            integrate(p, dt);
        }
        Behavior::Stationary {
            anchor,
            amplitude,
            frequency,
        } => {
            let bob = amplitude * (TAU * frequency * p.age).sin();
            p.position = *anchor + Vec2::new(0.0, bob);
        }
    }
    p.rotation += p.rotation_speed;

    if p.effect.is_some_and(EffectType::is_screen_spanning) {
        let damping = profile.map(|pr| pr.bounce_damping).unwrap_or(0.0);
        bounce_off_ground(p, ctx.ground_level, damping);
    }

    p.remaining_life -= 1;
    let t = p.life_fraction();
    p.scale = lerp_f32(p.scale_start, p.scale_end, t);
    p.color = lerp_rgba(p.color_start, p.color_end, t);
}

fn integrate(p: &mut Particle, dt: f32) {
    p.velocity += p.acceleration * dt;
    p.position += p.velocity * dt;
}

/// Reflect a downward-moving particle that reached the ground
fn bounce_off_ground(p: &mut Particle, ground_level: f32, damping: f32) {
    if p.velocity.y < 0.0 && p.position.y <= ground_level {
        p.position.y = ground_level;
        p.velocity.y = -p.velocity.y * damping;
    }
}
