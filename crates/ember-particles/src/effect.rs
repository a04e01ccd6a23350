//! Effect categories and the small enums shared by profiles and particles

use ember_core::EmberError;
use std::fmt;
use std::str::FromStr;

/// A named category of visual effect. Each maps to one emission profile.
///
/// The declaration order is the render order and the order profiles are
/// written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectType {
    Explosion,
    Debris,
    Hit,
    Dust,
    MuzzleFlash,
    Rain,
    Snow,
    Orb,
    Charge,
    Glow,
    Shockwave,
    Sparkle,
    Slash,
    SmokeCloud,
    DigitalSpark,
}

impl EffectType {
    pub const ALL: [EffectType; 15] = [
        EffectType::Explosion,
        EffectType::Debris,
        EffectType::Hit,
        EffectType::Dust,
        EffectType::MuzzleFlash,
        EffectType::Rain,
        EffectType::Snow,
        EffectType::Orb,
        EffectType::Charge,
        EffectType::Glow,
        EffectType::Shockwave,
        EffectType::Sparkle,
        EffectType::Slash,
        EffectType::SmokeCloud,
        EffectType::DigitalSpark,
    ];

    /// Stable name used in profile files and on the command line
    pub fn name(self) -> &'static str {
        match self {
            EffectType::Explosion => "Explosion",
            EffectType::Debris => "Debris",
            EffectType::Hit => "Hit",
            EffectType::Dust => "Dust",
            EffectType::MuzzleFlash => "MuzzleFlash",
            EffectType::Rain => "Rain",
            EffectType::Snow => "Snow",
            EffectType::Orb => "Orb",
            EffectType::Charge => "Charge",
            EffectType::Glow => "Glow",
            EffectType::Shockwave => "Shockwave",
            EffectType::Sparkle => "Sparkle",
            EffectType::Slash => "Slash",
            EffectType::SmokeCloud => "SmokeCloud",
            EffectType::DigitalSpark => "DigitalSpark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Weather that spans the screen width: spawns above the view and
    /// bounces off the ground.
    pub fn is_screen_spanning(self) -> bool {
        matches!(self, EffectType::Rain | EffectType::Snow)
    }

    /// Ambient particles that bob around their spawn point instead of moving.
    pub fn floats_in_place(self) -> bool {
        matches!(self, EffectType::Orb)
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectType {
    type Err = EmberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .or_else(|| Self::ALL.into_iter().find(|e| e.name().eq_ignore_ascii_case(s)))
            .ok_or_else(|| EmberError::UnknownEffect(s.to_string()))
    }
}

/// Compositing rule used when drawing a group of particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    None,
    #[default]
    Normal,
    Add,
    Subtract,
    Multiply,
    Screen,
    Exclusion,
}

impl BlendMode {
    pub const ALL: [BlendMode; 7] = [
        BlendMode::None,
        BlendMode::Normal,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Exclusion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BlendMode::None => "None",
            BlendMode::Normal => "Normal",
            BlendMode::Add => "Add",
            BlendMode::Subtract => "Subtract",
            BlendMode::Multiply => "Multiply",
            BlendMode::Screen => "Screen",
            BlendMode::Exclusion => "Exclusion",
        }
    }
}

impl FromStr for BlendMode {
    type Err = EmberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| EmberError::InvalidEnumValue {
                value: s.to_string(),
                allowed: Self::ALL.iter().map(|m| m.name().to_string()).collect(),
            })
    }
}

/// Where inside the emitter area new particles appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitterShape {
    /// Jitter on both axes within the profile's `emit_range`
    #[default]
    Point,
    /// Jitter along X only, across `emitter_size.x`
    Line,
    /// Jitter on both axes across `emitter_size`
    Rectangle,
}

impl EmitterShape {
    pub const ALL: [EmitterShape; 3] = [
        EmitterShape::Point,
        EmitterShape::Line,
        EmitterShape::Rectangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EmitterShape::Point => "Point",
            EmitterShape::Line => "Line",
            EmitterShape::Rectangle => "Rectangle",
        }
    }
}

impl FromStr for EmitterShape {
    type Err = EmberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| EmberError::InvalidEnumValue {
                value: s.to_string(),
                allowed: Self::ALL.iter().map(|m| m.name().to_string()).collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_names_round_trip() {
        for effect in EffectType::ALL {
            assert_eq!(EffectType::from_name(effect.name()), Some(effect));
        }
        assert_eq!(EffectType::from_name("Lava"), None);
    }

    #[test]
    fn effect_parse_is_case_insensitive() {
        assert_eq!("smokecloud".parse::<EffectType>().unwrap(), EffectType::SmokeCloud);
        assert!(matches!(
            "nope".parse::<EffectType>(),
            Err(EmberError::UnknownEffect(_))
        ));
    }

    #[test]
    fn all_is_sorted_render_order() {
        let mut sorted = EffectType::ALL;
        sorted.sort();
        assert_eq!(sorted, EffectType::ALL);
    }

    #[test]
    fn blend_mode_parse_rejects_unknown() {
        assert_eq!("Add".parse::<BlendMode>().unwrap(), BlendMode::Add);
        assert!(matches!(
            "Overlay".parse::<BlendMode>(),
            Err(EmberError::InvalidEnumValue { .. })
        ));
    }
}
