//! Emission profiles: the per-effect recipe, its TOML form and the built-in tuning

use crate::effect::{BlendMode, EffectType, EmitterShape};
use crate::texture::TextureHandle;
use glam::Vec2;
use std::collections::BTreeMap;
use std::fmt;
use toml::value::Table;
use toml::Value;

/// Shortest accepted animation frame, in seconds. Zero keeps a sheet frozen.
pub const MIN_FRAME_DURATION: f32 = 1e-3;

/// Shortest accepted continuous interval, in seconds. Zero means never.
pub const MIN_EMIT_INTERVAL: f32 = 1e-3;

/// Sprite-sheet layout and playback speed
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub div_x: u32,
    pub div_y: u32,
    pub total_frames: u32,
    /// Seconds per frame
    pub frame_duration: f32,
    pub looping: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            div_x: 1,
            div_y: 1,
            total_frames: 1,
            frame_duration: 0.1,
            looping: true,
        }
    }
}

/// Recipe describing how one effect type's particles are generated and drawn.
///
/// Life is measured in ticks (one per `update`), angles in degrees, colors
/// as packed `0xRRGGBBAA`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionProfile {
    pub count: u32,
    pub texture: TextureHandle,
    pub life_min: i32,
    pub life_max: i32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub angle_base: f32,
    pub angle_range: f32,
    pub gravity: Vec2,
    pub acceleration: Vec2,
    /// Jitter extent for `EmitterShape::Point`
    pub emit_range: Vec2,
    pub emitter_shape: EmitterShape,
    /// Extent for `Line` and `Rectangle` shapes
    pub emitter_size: Vec2,
    pub size_min: f32,
    pub size_max: f32,
    pub scale_start: f32,
    pub scale_end: f32,
    pub color_start: u32,
    pub color_end: u32,
    /// Radians per tick
    pub rotation_speed_min: f32,
    pub rotation_speed_max: f32,
    pub animation: AnimationConfig,
    pub blend_mode: BlendMode,
    pub homing: bool,
    pub homing_strength: f32,
    pub continuous: bool,
    /// Seconds between continuous emissions
    pub emit_interval: f32,
    /// 0 absorbs a ground hit, 1 bounces losslessly
    pub bounce_damping: f32,
    pub wind_strength: f32,
    pub float_amplitude: f32,
    /// Hz
    pub float_frequency: f32,
}

impl Default for EmissionProfile {
    fn default() -> Self {
        Self {
            count: 1,
            texture: TextureHandle::INVALID,
            life_min: 30,
            life_max: 60,
            speed_min: 100.0,
            speed_max: 200.0,
            angle_base: 0.0,
            angle_range: 360.0,
            gravity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            emit_range: Vec2::ZERO,
            emitter_shape: EmitterShape::Point,
            emitter_size: Vec2::ZERO,
            size_min: 16.0,
            size_max: 32.0,
            scale_start: 1.0,
            scale_end: 0.0,
            color_start: 0xFFFFFFFF,
            color_end: 0xFFFFFF00,
            rotation_speed_min: 0.0,
            rotation_speed_max: 0.0,
            animation: AnimationConfig::default(),
            blend_mode: BlendMode::Normal,
            homing: false,
            homing_strength: 0.0,
            continuous: false,
            emit_interval: 0.0,
            bounce_damping: 0.3,
            wind_strength: 0.0,
            float_amplitude: 0.0,
            float_frequency: 1.0,
        }
    }
}

/// A range violation fixed while loading a profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRepair {
    pub field: &'static str,
    pub from: f64,
    pub to: f64,
}

impl fmt::Display for ProfileRepair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.from, self.to)
    }
}

struct Repairs(Vec<ProfileRepair>);

impl Repairs {
    fn at_least_f32(&mut self, field: &'static str, value: &mut f32, min: f32) {
        if value.is_nan() || *value < min {
            self.0.push(ProfileRepair {
                field,
                from: *value as f64,
                to: min as f64,
            });
            *value = min;
        }
    }

    fn at_most_f32(&mut self, field: &'static str, value: &mut f32, max: f32) {
        if *value > max {
            self.0.push(ProfileRepair {
                field,
                from: *value as f64,
                to: max as f64,
            });
            *value = max;
        }
    }

    /// Zero stays zero; positive values below `min` are raised to it
    fn zero_or_at_least_f32(&mut self, field: &'static str, value: &mut f32, min: f32) {
        self.at_least_f32(field, value, 0.0);
        if *value > 0.0 && *value < min {
            self.0.push(ProfileRepair {
                field,
                from: *value as f64,
                to: min as f64,
            });
            *value = min;
        }
    }

    fn at_least_i32(&mut self, field: &'static str, value: &mut i32, min: i32) {
        if *value < min {
            self.0.push(ProfileRepair {
                field,
                from: *value as f64,
                to: min as f64,
            });
            *value = min;
        }
    }

    fn at_least_u32(&mut self, field: &'static str, value: &mut u32, min: u32) {
        if *value < min {
            self.0.push(ProfileRepair {
                field,
                from: *value as f64,
                to: min as f64,
            });
            *value = min;
        }
    }
}

impl EmissionProfile {
    /// Clamp every field back into its valid range. Never fails; returns what
    /// was changed.
    pub fn repair(&mut self) -> Vec<ProfileRepair> {
        let mut r = Repairs(Vec::new());

        r.at_least_i32("life_min", &mut self.life_min, 1);
        let life_min = self.life_min;
        r.at_least_i32("life_max", &mut self.life_max, life_min);

        r.at_least_f32("speed_min", &mut self.speed_min, 0.0);
        let speed_min = self.speed_min;
        r.at_least_f32("speed_max", &mut self.speed_max, speed_min);

        r.at_least_f32("size_min", &mut self.size_min, 0.0);
        let size_min = self.size_min;
        r.at_least_f32("size_max", &mut self.size_max, size_min);

        r.at_least_f32("scale_start", &mut self.scale_start, 0.0);
        r.at_least_f32("scale_end", &mut self.scale_end, 0.0);

        let rot_min = self.rotation_speed_min;
        r.at_least_f32("rotation_speed_max", &mut self.rotation_speed_max, rot_min);

        r.at_least_f32("emit_range.x", &mut self.emit_range.x, 0.0);
        r.at_least_f32("emit_range.y", &mut self.emit_range.y, 0.0);
        r.at_least_f32("emitter_size.x", &mut self.emitter_size.x, 0.0);
        r.at_least_f32("emitter_size.y", &mut self.emitter_size.y, 0.0);

        r.at_least_u32("div_x", &mut self.animation.div_x, 1);
        r.at_least_u32("div_y", &mut self.animation.div_y, 1);
        r.at_least_u32("total_frames", &mut self.animation.total_frames, 1);
        r.zero_or_at_least_f32(
            "frame_duration",
            &mut self.animation.frame_duration,
            MIN_FRAME_DURATION,
        );

        r.at_least_f32("homing_strength", &mut self.homing_strength, 0.0);
        r.zero_or_at_least_f32("emit_interval", &mut self.emit_interval, MIN_EMIT_INTERVAL);
        r.at_least_f32("bounce_damping", &mut self.bounce_damping, 0.0);
        r.at_most_f32("bounce_damping", &mut self.bounce_damping, 1.0);
        r.at_least_f32("float_amplitude", &mut self.float_amplitude, 0.0);
        r.at_least_f32("float_frequency", &mut self.float_frequency, 0.0);

        r.0
    }

    /// Read a profile from a TOML table. Missing or malformed fields keep
    /// their defaults; call `repair` afterwards to enforce ranges.
    pub fn from_toml(table: &Table) -> Self {
        let mut p = Self::default();

        if let Some(v) = table.get("count") {
            p.count = toml_u32(v, p.count);
        }
        if let Some(v) = table.get("texture") {
            p.texture = TextureHandle(toml_i32(v, p.texture.0));
        }
        if let Some(v) = table.get("life_min") {
            p.life_min = toml_i32(v, p.life_min);
        }
        if let Some(v) = table.get("life_max") {
            p.life_max = toml_i32(v, p.life_max);
        }
        if let Some(v) = table.get("speed_min") {
            p.speed_min = toml_f32(v, p.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            p.speed_max = toml_f32(v, p.speed_max);
        }
        if let Some(v) = table.get("angle_base") {
            p.angle_base = toml_f32(v, p.angle_base);
        }
        if let Some(v) = table.get("angle_range") {
            p.angle_range = toml_f32(v, p.angle_range);
        }
        if let Some(v) = table.get("gravity") {
            p.gravity = toml_vec2(v, p.gravity);
        }
        if let Some(v) = table.get("acceleration") {
            p.acceleration = toml_vec2(v, p.acceleration);
        }
        if let Some(v) = table.get("emit_range") {
            p.emit_range = toml_vec2(v, p.emit_range);
        }
        if let Some(v) = table.get("emitter_shape") {
            p.emitter_shape = v
                .as_str()
                .and_then(|s| s.parse().ok())
                .unwrap_or(p.emitter_shape);
        }
        if let Some(v) = table.get("emitter_size") {
            p.emitter_size = toml_vec2(v, p.emitter_size);
        }
        if let Some(v) = table.get("size_min") {
            p.size_min = toml_f32(v, p.size_min);
        }
        if let Some(v) = table.get("size_max") {
            p.size_max = toml_f32(v, p.size_max);
        }
        if let Some(v) = table.get("scale_start") {
            p.scale_start = toml_f32(v, p.scale_start);
        }
        if let Some(v) = table.get("scale_end") {
            p.scale_end = toml_f32(v, p.scale_end);
        }
        if let Some(v) = table.get("color_start") {
            p.color_start = toml_color(v, p.color_start);
        }
        if let Some(v) = table.get("color_end") {
            p.color_end = toml_color(v, p.color_end);
        }
        if let Some(v) = table.get("rotation_speed_min") {
            p.rotation_speed_min = toml_f32(v, p.rotation_speed_min);
        }
        if let Some(v) = table.get("rotation_speed_max") {
            p.rotation_speed_max = toml_f32(v, p.rotation_speed_max);
        }

        if let Some(anim) = table.get("animation").and_then(|v| v.as_table()) {
            let a = &mut p.animation;
            if let Some(v) = anim.get("enabled") {
                a.enabled = v.as_bool().unwrap_or(a.enabled);
            }
            if let Some(v) = anim.get("div_x") {
                a.div_x = toml_u32(v, a.div_x);
            }
            if let Some(v) = anim.get("div_y") {
                a.div_y = toml_u32(v, a.div_y);
            }
            if let Some(v) = anim.get("total_frames") {
                a.total_frames = toml_u32(v, a.total_frames);
            }
            if let Some(v) = anim.get("frame_duration") {
                a.frame_duration = toml_f32(v, a.frame_duration);
            }
            if let Some(v) = anim.get("looping") {
                a.looping = v.as_bool().unwrap_or(a.looping);
            }
        }

        if let Some(v) = table.get("blend_mode") {
            p.blend_mode = v
                .as_str()
                .and_then(|s| s.parse().ok())
                .unwrap_or(p.blend_mode);
        }
        if let Some(v) = table.get("homing") {
            p.homing = v.as_bool().unwrap_or(p.homing);
        }
        if let Some(v) = table.get("homing_strength") {
            p.homing_strength = toml_f32(v, p.homing_strength);
        }
        if let Some(v) = table.get("continuous") {
            p.continuous = v.as_bool().unwrap_or(p.continuous);
        }
        if let Some(v) = table.get("emit_interval") {
            p.emit_interval = toml_f32(v, p.emit_interval);
        }
        if let Some(v) = table.get("bounce_damping") {
            p.bounce_damping = toml_f32(v, p.bounce_damping);
        }
        if let Some(v) = table.get("wind_strength") {
            p.wind_strength = toml_f32(v, p.wind_strength);
        }
        if let Some(v) = table.get("float_amplitude") {
            p.float_amplitude = toml_f32(v, p.float_amplitude);
        }
        if let Some(v) = table.get("float_frequency") {
            p.float_frequency = toml_f32(v, p.float_frequency);
        }

        p
    }

    /// Write every field into a TOML table
    pub fn to_toml(&self) -> Table {
        let mut t = Table::new();
        t.insert("count".into(), Value::Integer(self.count as i64));
        t.insert("texture".into(), Value::Integer(self.texture.0 as i64));
        t.insert("life_min".into(), Value::Integer(self.life_min as i64));
        t.insert("life_max".into(), Value::Integer(self.life_max as i64));
        t.insert("speed_min".into(), float(self.speed_min));
        t.insert("speed_max".into(), float(self.speed_max));
        t.insert("angle_base".into(), float(self.angle_base));
        t.insert("angle_range".into(), float(self.angle_range));
        t.insert("gravity".into(), vec2(self.gravity));
        t.insert("acceleration".into(), vec2(self.acceleration));
        t.insert("emit_range".into(), vec2(self.emit_range));
        t.insert(
            "emitter_shape".into(),
            Value::String(self.emitter_shape.name().into()),
        );
        t.insert("emitter_size".into(), vec2(self.emitter_size));
        t.insert("size_min".into(), float(self.size_min));
        t.insert("size_max".into(), float(self.size_max));
        t.insert("scale_start".into(), float(self.scale_start));
        t.insert("scale_end".into(), float(self.scale_end));
        t.insert("color_start".into(), Value::Integer(self.color_start as i64));
        t.insert("color_end".into(), Value::Integer(self.color_end as i64));
        t.insert("rotation_speed_min".into(), float(self.rotation_speed_min));
        t.insert("rotation_speed_max".into(), float(self.rotation_speed_max));
        t.insert(
            "blend_mode".into(),
            Value::String(self.blend_mode.name().into()),
        );
        t.insert("homing".into(), Value::Boolean(self.homing));
        t.insert("homing_strength".into(), float(self.homing_strength));
        t.insert("continuous".into(), Value::Boolean(self.continuous));
        t.insert("emit_interval".into(), float(self.emit_interval));
        t.insert("bounce_damping".into(), float(self.bounce_damping));
        t.insert("wind_strength".into(), float(self.wind_strength));
        t.insert("float_amplitude".into(), float(self.float_amplitude));
        t.insert("float_frequency".into(), float(self.float_frequency));

        let a = &self.animation;
        let mut anim = Table::new();
        anim.insert("enabled".into(), Value::Boolean(a.enabled));
        anim.insert("div_x".into(), Value::Integer(a.div_x as i64));
        anim.insert("div_y".into(), Value::Integer(a.div_y as i64));
        anim.insert("total_frames".into(), Value::Integer(a.total_frames as i64));
        anim.insert("frame_duration".into(), float(a.frame_duration));
        anim.insert("looping".into(), Value::Boolean(a.looping));
        t.insert("animation".into(), Value::Table(anim));

        t
    }
}

/// The game's stock tuning for every effect type
pub fn builtin_profiles() -> BTreeMap<EffectType, EmissionProfile> {
    let mut profiles = BTreeMap::new();

    // Single additive flash playing a 4-frame sheet
    profiles.insert(
        EffectType::Explosion,
        EmissionProfile {
            count: 1,
            life_min: 40,
            life_max: 40,
            speed_min: 0.0,
            speed_max: 0.0,
            angle_range: 0.0,
            size_min: 64.0,
            size_max: 64.0,
            scale_end: 1.0,
            color_end: 0xFFFFFFFF,
            animation: AnimationConfig {
                enabled: true,
                div_x: 4,
                div_y: 1,
                total_frames: 4,
                frame_duration: 0.05,
                looping: false,
            },
            blend_mode: BlendMode::Add,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Debris,
        EmissionProfile {
            count: 10,
            life_min: 40,
            life_max: 60,
            speed_min: 150.0,
            speed_max: 300.0,
            gravity: Vec2::new(0.0, -800.0),
            emit_range: Vec2::new(20.0, 20.0),
            size_min: 12.0,
            size_max: 24.0,
            scale_end: 0.3,
            rotation_speed_min: -0.1,
            rotation_speed_max: 0.1,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Hit,
        EmissionProfile {
            count: 40,
            life_min: 20,
            life_max: 55,
            speed_min: 1225.0,
            speed_max: 1500.0,
            angle_base: 90.0,
            angle_range: 1550.0,
            gravity: Vec2::new(0.0, -300.0),
            emit_range: Vec2::new(10.0, 10.0),
            size_min: 27.0,
            size_max: 43.0,
            scale_start: 0.8,
            scale_end: 0.2,
            blend_mode: BlendMode::Add,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Dust,
        EmissionProfile {
            count: 8,
            life_min: 30,
            life_max: 45,
            speed_min: 50.0,
            speed_max: 100.0,
            angle_base: -90.0,
            angle_range: 60.0,
            gravity: Vec2::new(0.0, -50.0),
            emit_range: Vec2::new(30.0, 10.0),
            size_min: 32.0,
            size_max: 64.0,
            scale_start: 0.5,
            scale_end: 1.5,
            color_start: 0xAAAAAAAA,
            color_end: 0xAAAAAA00,
            rotation_speed_min: -0.05,
            rotation_speed_max: 0.05,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::MuzzleFlash,
        EmissionProfile {
            count: 1,
            life_min: 8,
            life_max: 12,
            speed_min: 0.0,
            speed_max: 0.0,
            angle_range: 0.0,
            size_min: 32.0,
            size_max: 48.0,
            scale_start: 1.2,
            scale_end: 0.3,
            blend_mode: BlendMode::Add,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Rain,
        EmissionProfile {
            count: 30,
            life_min: 120,
            life_max: 180,
            speed_min: 0.0,
            speed_max: 0.0,
            angle_base: -90.0,
            angle_range: 0.0,
            gravity: Vec2::new(0.0, -800.0),
            emitter_shape: EmitterShape::Line,
            emitter_size: Vec2::new(1280.0, 0.0),
            size_min: 2.0,
            size_max: 4.0,
            scale_end: 1.0,
            color_start: 0xAAAAFFFF,
            color_end: 0xAAAAFF00,
            continuous: true,
            emit_interval: 0.1,
            bounce_damping: 0.3,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Snow,
        EmissionProfile {
            count: 50,
            life_min: 180,
            life_max: 240,
            speed_min: 0.0,
            speed_max: 0.0,
            angle_base: -90.0,
            angle_range: 0.0,
            gravity: Vec2::new(0.0, -50.0),
            emitter_shape: EmitterShape::Line,
            emitter_size: Vec2::new(1280.0, 0.0),
            size_min: 4.0,
            size_max: 8.0,
            scale_end: 1.0,
            color_end: 0xFFFFFFFF,
            rotation_speed_min: -0.02,
            rotation_speed_max: 0.02,
            continuous: true,
            emit_interval: 0.15,
            wind_strength: 30.0,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Orb,
        EmissionProfile {
            count: 5,
            life_min: 300,
            life_max: 360,
            speed_min: 0.0,
            speed_max: 0.0,
            angle_range: 0.0,
            emitter_shape: EmitterShape::Rectangle,
            emitter_size: Vec2::new(1280.0, 720.0),
            size_min: 12.0,
            size_max: 24.0,
            scale_start: 0.8,
            scale_end: 1.2,
            color_start: 0xFFFF88FF,
            color_end: 0xFFFF8880,
            rotation_speed_min: -0.05,
            rotation_speed_max: 0.05,
            blend_mode: BlendMode::Add,
            continuous: true,
            emit_interval: 0.2,
            float_amplitude: 30.0,
            float_frequency: 1.0,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Charge,
        EmissionProfile {
            count: 20,
            life_min: 30,
            life_max: 60,
            speed_min: 50.0,
            speed_max: 100.0,
            emit_range: Vec2::new(100.0, 100.0),
            size_min: 8.0,
            size_max: 16.0,
            scale_end: 0.5,
            color_start: 0x00FFFFFF,
            color_end: 0x00FFFF00,
            blend_mode: BlendMode::Add,
            homing: true,
            homing_strength: 500.0,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Glow,
        EmissionProfile {
            count: 1,
            life_min: 20,
            life_max: 40,
            speed_min: 0.0,
            speed_max: 20.0,
            blend_mode: BlendMode::Add,
            ..Default::default()
        },
    );

    // Ring that expands quickly
    profiles.insert(
        EffectType::Shockwave,
        EmissionProfile {
            count: 1,
            life_min: 15,
            life_max: 20,
            speed_min: 0.0,
            speed_max: 0.0,
            scale_start: 0.5,
            scale_end: 2.5,
            color_start: 0xFFFFFFCC,
            blend_mode: BlendMode::Add,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Sparkle,
        EmissionProfile {
            count: 3,
            life_min: 30,
            life_max: 50,
            speed_min: 100.0,
            speed_max: 200.0,
            gravity: Vec2::new(0.0, -400.0),
            scale_start: 0.8,
            color_start: 0xFFFF80FF,
            color_end: 0xFFFF8000,
            blend_mode: BlendMode::Add,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::Slash,
        EmissionProfile {
            count: 1,
            life_min: 10,
            life_max: 15,
            speed_min: 0.0,
            speed_max: 0.0,
            scale_start: 1.5,
            scale_end: 0.5,
            blend_mode: BlendMode::Add,
            ..Default::default()
        },
    );

    // Rises while fading to nothing
    profiles.insert(
        EffectType::SmokeCloud,
        EmissionProfile {
            count: 2,
            life_min: 60,
            life_max: 90,
            speed_min: 20.0,
            speed_max: 50.0,
            gravity: Vec2::new(0.0, 100.0),
            scale_start: 0.5,
            scale_end: 1.5,
            color_start: 0x808080DD,
            color_end: 0x00000000,
            ..Default::default()
        },
    );

    profiles.insert(
        EffectType::DigitalSpark,
        EmissionProfile {
            count: 30,
            life_min: 20,
            life_max: 40,
            speed_min: 200.0,
            speed_max: 500.0,
            size_min: 50.0,
            size_max: 70.0,
            color_start: 0x00FFFFDD,
            color_end: 0x0000FF00,
            ..Default::default()
        },
    );

    profiles
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_i64(v: &Value, default: i64) -> i64 {
    v.as_integer()
        .or_else(|| v.as_float().filter(|f| f.is_finite()).map(|f| f as i64))
        .unwrap_or(default)
}

fn toml_u32(v: &Value, default: u32) -> u32 {
    toml_i64(v, default as i64).clamp(0, u32::MAX as i64) as u32
}

/// Out-of-range integers keep the default rather than wrapping
fn toml_i32(v: &Value, default: i32) -> i32 {
    i32::try_from(toml_i64(v, default as i64)).unwrap_or(default)
}

/// Colors are integers; `"0xRRGGBBAA"` strings are accepted for hand edits
fn toml_color(v: &Value, default: u32) -> u32 {
    if let Some(s) = v.as_str() {
        let hex = s.trim_start_matches("0x").trim_start_matches('#');
        return u32::from_str_radix(hex, 16).unwrap_or(default);
    }
    v.as_integer()
        .and_then(|i| u32::try_from(i).ok())
        .unwrap_or(default)
}

fn toml_vec2(v: &Value, default: Vec2) -> Vec2 {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return Vec2::new(toml_f32(&arr[0], default.x), toml_f32(&arr[1], default.y));
        }
    }
    if let Some(table) = v.as_table() {
        let x = table.get("x").map(|x| toml_f32(x, default.x));
        let y = table.get("y").map(|y| toml_f32(y, default.y));
        return Vec2::new(x.unwrap_or(default.x), y.unwrap_or(default.y));
    }
    default
}

fn float(v: f32) -> Value {
    Value::Float(v as f64)
}

fn vec2(v: Vec2) -> Value {
    Value::Array(vec![float(v.x), float(v.y)])
}
