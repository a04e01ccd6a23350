//! Timer-driven repeaters that re-fire emission for one effect type

use crate::effect::{EffectType, EmitterShape};
use crate::profile::{EmissionProfile, MIN_EMIT_INTERVAL};
use crate::settings::ParticleSettings;
use crate::tracked::TrackedPoint;
use glam::Vec2;
use std::collections::BTreeMap;
use std::str::FromStr;

/// How a continuous emitter picks its spawn position each time it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowMode {
    /// Stay at the position given when the emitter started
    #[default]
    Fixed,
    /// Track a moving point such as the player
    FollowTarget,
    /// A fixed point in world space, updated explicitly by the scene
    WorldPoint,
}

impl FromStr for FollowMode {
    type Err = ember_core::EmberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" | "none" => Ok(FollowMode::Fixed),
            "follow" | "followtarget" => Ok(FollowMode::FollowTarget),
            "world" | "worldpoint" => Ok(FollowMode::WorldPoint),
            _ => Err(ember_core::EmberError::InvalidEnumValue {
                value: s.to_string(),
                allowed: vec!["fixed".into(), "follow".into(), "world".into()],
            }),
        }
    }
}

/// Most bursts one emitter fires in a single update; older backlog is dropped
pub const MAX_EMISSIONS_PER_TICK: u32 = 16;

/// Runtime state for one effect type's repeater
#[derive(Debug, Clone)]
pub struct ContinuousEmitter {
    /// Anchor position (and fallback when following without a target)
    pub position: Vec2,
    pub follow_mode: FollowMode,
    pub follow_target: Option<TrackedPoint>,
    /// Homing target handed to every emitted burst
    pub homing_target: Option<TrackedPoint>,
    /// Seconds accumulated toward the next emission
    pub timer: f32,
    pub active: bool,
}

impl ContinuousEmitter {
    pub fn new(position: Vec2, follow_mode: FollowMode, homing_target: Option<TrackedPoint>) -> Self {
        Self {
            position,
            follow_mode,
            follow_target: None,
            homing_target,
            timer: 0.0,
            active: true,
        }
    }

    /// Where the next burst spawns
    pub fn spawn_position(&self, effect: EffectType, spawn_bias: f32) -> Vec2 {
        match (self.follow_mode, &self.follow_target) {
            (FollowMode::FollowTarget, Some(target)) => {
                let mut pos = target.get();
                if effect.is_screen_spanning() {
                    pos.y += spawn_bias;
                }
                pos
            }
            _ => self.position,
        }
    }

    /// Accumulate `dt` and return how many emissions are due. The interval is
    /// subtracted rather than the timer reset, so long frames fire several
    /// times (up to `MAX_EMISSIONS_PER_TICK`) and the remainder carries over.
    pub fn tick(&mut self, dt: f32, interval: f32) -> u32 {
        if interval <= 0.0 {
            return 0;
        }
        self.timer += dt;
        if self.timer < interval {
            return 0;
        }
        let due = (self.timer / interval).floor();
        if due > MAX_EMISSIONS_PER_TICK as f32 {
            self.timer = self.timer.rem_euclid(interval);
            return MAX_EMISSIONS_PER_TICK;
        }
        self.timer = (self.timer - due * interval).max(0.0);
        due as u32
    }
}

/// One burst requested by a continuous emitter
#[derive(Debug, Clone)]
pub struct EmissionRequest {
    pub effect: EffectType,
    pub position: Vec2,
    pub target: Option<TrackedPoint>,
}

/// Tick every active emitter whose profile is continuous and collect the
/// bursts that are due this frame.
pub fn collect_due_emissions(
    emitters: &mut BTreeMap<EffectType, ContinuousEmitter>,
    profiles: &BTreeMap<EffectType, EmissionProfile>,
    dt: f32,
    spawn_bias: f32,
) -> Vec<EmissionRequest> {
    let mut requests = Vec::new();
    for (&effect, emitter) in emitters.iter_mut() {
        if !emitter.active {
            continue;
        }
        let Some(profile) = profiles.get(&effect) else {
            continue;
        };
        if !profile.continuous {
            continue;
        }
        let fired = emitter.tick(dt, profile.emit_interval);
        for _ in 0..fired {
            requests.push(EmissionRequest {
                effect,
                position: emitter.spawn_position(effect, spawn_bias),
                target: emitter.homing_target.clone(),
            });
        }
    }
    requests
}

/// Force a profile into continuous mode, filling interval and shape for
/// profiles saved before those fields existed.
pub fn apply_environment_defaults(
    effect: EffectType,
    profile: &mut EmissionProfile,
    settings: &ParticleSettings,
) {
    profile.continuous = true;
    if profile.emit_interval > 0.0 {
        profile.emit_interval = profile.emit_interval.max(MIN_EMIT_INTERVAL);
        return;
    }
    let screen = Vec2::new(settings.screen_width, settings.screen_height);
    match effect {
        EffectType::Rain => {
            profile.emit_interval = 0.1;
            profile.emitter_shape = EmitterShape::Line;
            profile.emitter_size = Vec2::new(screen.x, 0.0);
        }
        EffectType::Snow => {
            profile.emit_interval = 0.15;
            profile.emitter_shape = EmitterShape::Line;
            profile.emitter_size = Vec2::new(screen.x, 0.0);
        }
        EffectType::Orb => {
            profile.emit_interval = 0.2;
            profile.emitter_shape = EmitterShape::Rectangle;
            profile.emitter_size = screen;
        }
        _ => profile.emit_interval = 0.1,
    }
}
