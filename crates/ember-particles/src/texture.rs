//! Texture handles and the fixed effect → texture table

use crate::effect::EffectType;
use std::collections::{BTreeMap, HashMap};

/// Integer handle issued by the texture provider. Negative means unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub i32);

impl TextureHandle {
    pub const INVALID: Self = Self(-1);

    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for TextureHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Loads textures on behalf of the engine
pub trait TextureProvider {
    /// Load (or look up) a texture. Returns a negative handle on failure.
    fn load_texture(&mut self, path: &str) -> TextureHandle;
}

/// Image file used by each effect type, relative to the texture root
pub fn texture_file(effect: EffectType) -> &'static str {
    match effect {
        EffectType::Explosion => "explosion.png",
        EffectType::Debris => "debris.png",
        EffectType::Hit | EffectType::Dust | EffectType::MuzzleFlash | EffectType::DigitalSpark => {
            "star.png"
        }
        EffectType::Rain => "rain.png",
        EffectType::Snow => "snow.png",
        EffectType::Orb => "orb.png",
        EffectType::Charge | EffectType::Glow => "particle_output/particle_glow.png",
        EffectType::Shockwave => "particle_output/particle_ring.png",
        EffectType::Sparkle => "particle_output/particle_sparkle.png",
        EffectType::Slash => "particle_output/particle_scratch.png",
        EffectType::SmokeCloud => "particle_output/particle_smoke.png",
    }
}

/// Handles resolved for every effect type. Profiles whose stored handle is
/// invalid fall back to this table, since handles do not survive restarts.
#[derive(Debug, Clone, Default)]
pub struct TextureTable {
    handles: BTreeMap<EffectType, TextureHandle>,
}

impl TextureTable {
    /// Load every effect texture once, sharing handles between effects that
    /// use the same image.
    pub fn load(provider: &mut impl TextureProvider, root: &str) -> Self {
        let mut by_path: HashMap<&'static str, TextureHandle> = HashMap::new();
        let mut handles = BTreeMap::new();
        for effect in EffectType::ALL {
            let file = texture_file(effect);
            let handle = *by_path.entry(file).or_insert_with(|| {
                let path = format!("{}/{}", root.trim_end_matches('/'), file);
                let handle = provider.load_texture(&path);
                if !handle.is_valid() {
                    log::warn!("texture unavailable: {path}");
                }
                handle
            });
            handles.insert(effect, handle);
        }
        Self { handles }
    }

    pub fn get(&self, effect: EffectType) -> TextureHandle {
        self.handles
            .get(&effect)
            .copied()
            .unwrap_or(TextureHandle::INVALID)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingTextures;
    use super::*;

    #[test]
    fn shared_images_load_once() {
        let mut provider = CountingTextures::default();
        let table = TextureTable::load(&mut provider, "res/effect/");
        assert_eq!(provider.loaded.len(), 11);
        assert!(provider.loaded.contains(&"res/effect/star.png".to_string()));
        assert_eq!(table.get(EffectType::Hit), table.get(EffectType::Dust));
        assert_eq!(table.get(EffectType::Charge), table.get(EffectType::Glow));
        assert_ne!(table.get(EffectType::Rain), table.get(EffectType::Snow));
    }

    #[test]
    fn failed_loads_stay_invalid() {
        let mut provider = CountingTextures {
            fail: true,
            ..Default::default()
        };
        let table = TextureTable::load(&mut provider, "res");
        assert!(!table.get(EffectType::Explosion).is_valid());
        assert!(!TextureTable::default().get(EffectType::Orb).is_valid());
    }
}
