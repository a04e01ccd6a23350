//! Engine settings
//!
//! Settings are read from an optional TOML file. Every field has a default,
//! so an empty file (or no file at all) yields a working configuration.

use ember_core::{EmberError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration for a [`ParticleManager`](crate::ParticleManager)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Where emission profiles are persisted
    pub profile_path: PathBuf,
    /// Directory the effect textures are resolved against
    pub texture_root: String,
    /// Initial ground height for rain and snow collisions
    pub ground_level: f32,
    /// Vertical offset added to followed positions for rain and snow
    pub spawn_bias: f32,
    /// Screen extent used to size environment emitters
    pub screen_width: f32,
    pub screen_height: f32,
    /// Fixed RNG seed; time-seeded when absent
    pub seed: Option<u32>,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from("resources/data/particle_params.toml"),
            texture_root: "resources/images/effect".to_string(),
            ground_level: 0.0,
            spawn_bias: 360.0,
            screen_width: 1280.0,
            screen_height: 720.0,
            seed: None,
        }
    }
}

impl ParticleSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: ParticleSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            EmberError::TomlParseError(msg) => {
                EmberError::TomlParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(EmberError::ConfigError(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = ParticleSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ParticleSettings::default());
        assert_eq!(settings.spawn_bias, 360.0);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let settings = ParticleSettings::from_toml_str(
            r#"
profile_path = "data/fx.toml"
ground_level = -120.0
seed = 42
"#,
        )
        .unwrap();
        assert_eq!(settings.profile_path, PathBuf::from("data/fx.toml"));
        assert_eq!(settings.ground_level, -120.0);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.screen_width, 1280.0);
    }

    #[test]
    fn rejects_degenerate_screen() {
        let err = ParticleSettings::from_toml_str("screen_width = 0.0").unwrap_err();
        assert!(matches!(err, EmberError::ConfigError(_)));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ember.toml");
        std::fs::write(&path, "ground_level = [").unwrap();
        let err = ParticleSettings::load(&path).unwrap_err();
        assert!(err.to_string().contains("ember.toml"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParticleSettings::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, EmberError::IoError(_)));
    }
}
