//! Particle records and the fixed-capacity ring pool that holds them

use crate::effect::{BlendMode, EffectType};
use crate::texture::TextureHandle;
use crate::tracked::TrackedPoint;
use glam::Vec2;

/// Pool capacity shared by every effect
pub const MAX_PARTICLES: usize = 2048;

/// Per-particle simulation rule, chosen at spawn and never changed
#[derive(Clone, Debug, Default)]
pub enum Behavior {
    /// Integrates velocity and acceleration
    #[default]
    Physics,
    /// Physics plus steering toward a live target
    Homing { target: TrackedPoint, strength: f32 },
    /// Bobs around its spawn anchor; velocity is ignored
    Stationary {
        anchor: Vec2,
        amplitude: f32,
        frequency: f32,
    },
    /// Motionless fading after-image
    Ghost,
}

/// Sprite-sheet playback state for an animated particle
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteAnimation {
    pub div_x: u32,
    pub div_y: u32,
    pub total_frames: u32,
    pub frame_duration: f32,
    pub looping: bool,
    pub frame: u32,
    pub timer: f32,
}

impl SpriteAnimation {
    /// Advance the frame timer, wrapping or holding on the last frame
    pub fn advance(&mut self, dt: f32) {
        let last = self.total_frames.saturating_sub(1);
        if self.frame_duration <= 0.0 || last == 0 {
            return;
        }
        self.timer += dt;
        if self.timer < self.frame_duration {
            return;
        }
        let steps = (self.timer / self.frame_duration).floor() as u64;
        self.timer = self.timer.rem_euclid(self.frame_duration);
        let target = (self.frame as u64).saturating_add(steps);
        if self.looping {
            self.frame = (target % self.total_frames as u64) as u32;
        } else if target > last as u64 {
            self.frame = last;
            self.timer = 0.0;
        } else {
            self.frame = target as u32;
        }
    }
}

/// One pooled visual entity
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Radians
    pub rotation: f32,
    /// Radians per tick
    pub rotation_speed: f32,
    pub remaining_life: i32,
    pub initial_life: i32,
    /// Seconds since spawn
    pub age: f32,
    pub texture: TextureHandle,
    pub animation: Option<SpriteAnimation>,
    /// Base edge length in pixels; 0 draws at the source rectangle width
    pub draw_size: f32,
    pub scale_start: f32,
    pub scale_end: f32,
    pub scale: f32,
    pub color_start: u32,
    pub color_end: u32,
    pub color: u32,
    pub blend_mode: BlendMode,
    pub flip_x: bool,
    pub behavior: Behavior,
    /// Profile that produced the particle; `None` for ad-hoc after-images
    pub effect: Option<EffectType>,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            remaining_life: 0,
            initial_life: 0,
            age: 0.0,
            texture: TextureHandle::INVALID,
            animation: None,
            draw_size: 0.0,
            scale_start: 1.0,
            scale_end: 1.0,
            scale: 1.0,
            color_start: 0xFFFFFFFF,
            color_end: 0xFFFFFF00,
            color: 0xFFFFFFFF,
            blend_mode: BlendMode::Normal,
            flip_x: false,
            behavior: Behavior::Physics,
            effect: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.remaining_life > 0
    }

    pub fn kill(&mut self) {
        self.remaining_life = 0;
    }

    /// Fraction of life consumed, in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.initial_life <= 0 {
            1.0
        } else {
            (1.0 - self.remaining_life as f32 / self.initial_life as f32).clamp(0.0, 1.0)
        }
    }
}

/// Ring buffer of particle records. Acquiring a slot overwrites whatever
/// is there, alive or not, so the oldest effects vanish first when full.
pub struct ParticlePool {
    particles: Vec<Particle>,
    next: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut particles = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            particles.push(Particle::dead());
        }
        Self { particles, next: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Return the slot at the cursor and advance it
    pub fn acquire(&mut self) -> &mut Particle {
        let idx = self.next;
        self.next = (self.next + 1) % self.particles.len();
        &mut self.particles[idx]
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    /// Alive particles in slot order
    pub fn iter_alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn iter_alive_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut().filter(|p| p.is_alive())
    }

    /// Every slot, dead or alive
    pub fn slots(&self) -> &[Particle] {
        &self.particles
    }

    /// Kill every record and rewind the cursor
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            *p = Particle::dead();
        }
        self.next = 0;
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}
