//! Profile persistence: one TOML table per effect type.
//!
//! Reading is tolerant. Unknown effect names are skipped, malformed fields
//! keep their defaults and out-of-range values are repaired. A missing file
//! is regenerated from the built-in tuning; a corrupt one is left alone so a
//! hand-edited file is never clobbered.

use crate::effect::EffectType;
use crate::profile::{builtin_profiles, EmissionProfile, ProfileRepair};
use ember_core::Result;
use std::collections::BTreeMap;
use std::path::Path;
use toml::value::Table;
use toml::Value;

/// Profiles read from a document, plus what was skipped or fixed on the way
#[derive(Debug, Clone, Default)]
pub struct ParsedProfiles {
    pub profiles: BTreeMap<EffectType, EmissionProfile>,
    /// Top-level keys that are not an effect table
    pub unknown_keys: Vec<String>,
    pub repairs: Vec<(EffectType, ProfileRepair)>,
}

/// How `load_profiles` arrived at its profiles
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Read from the file
    Loaded {
        unknown_keys: Vec<String>,
        repairs: Vec<(EffectType, ProfileRepair)>,
    },
    /// The file was missing; defaults were written to it
    CreatedDefaults,
    /// The file was missing and writing defaults failed
    DefaultsUnsaved(String),
    /// The file was unreadable or corrupt; defaults are in use, the file is untouched
    FellBackToDefaults(String),
}

impl LoadOutcome {
    /// True when the active profiles came from the file on disk
    pub fn from_file(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Serialize profiles to a pretty-printed TOML document
pub fn profiles_to_toml_string(profiles: &BTreeMap<EffectType, EmissionProfile>) -> Result<String> {
    let mut doc = Table::new();
    for (effect, profile) in profiles {
        doc.insert(effect.name().to_string(), Value::Table(profile.to_toml()));
    }
    Ok(toml::to_string_pretty(&doc)?)
}

/// Parse a profile document. Fails only when the text is not valid TOML.
pub fn parse_profiles(content: &str) -> Result<ParsedProfiles> {
    let doc: Table = toml::from_str(content)?;
    let mut parsed = ParsedProfiles::default();

    for (key, value) in &doc {
        let effect = key.parse::<EffectType>().ok();
        let (Some(effect), Some(table)) = (effect, value.as_table()) else {
            parsed.unknown_keys.push(key.clone());
            continue;
        };
        let mut profile = EmissionProfile::from_toml(table);
        for repair in profile.repair() {
            parsed.repairs.push((effect, repair));
        }
        parsed.profiles.insert(effect, profile);
    }

    Ok(parsed)
}

/// Write profiles to `path`, creating parent directories as needed
pub fn save_profiles(path: &Path, profiles: &BTreeMap<EffectType, EmissionProfile>) -> Result<()> {
    let content = profiles_to_toml_string(profiles)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Load profiles from `path`, falling back to the built-in tuning.
///
/// Never fails: every problem is logged and reported in the outcome.
pub fn load_profiles(path: &Path) -> (BTreeMap<EffectType, EmissionProfile>, LoadOutcome) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let defaults = builtin_profiles();
            let outcome = match save_profiles(path, &defaults) {
                Ok(()) => {
                    log::info!("wrote default particle profiles to {}", path.display());
                    LoadOutcome::CreatedDefaults
                }
                Err(e) => {
                    log::warn!(
                        "could not write default particle profiles to {}: {e}",
                        path.display()
                    );
                    LoadOutcome::DefaultsUnsaved(e.to_string())
                }
            };
            return (defaults, outcome);
        }
        Err(e) => {
            log::error!("failed to read particle profiles {}: {e}", path.display());
            return (builtin_profiles(), LoadOutcome::FellBackToDefaults(e.to_string()));
        }
    };

    match parse_profiles(&content) {
        Ok(parsed) => {
            for key in &parsed.unknown_keys {
                log::debug!("ignoring unknown key '{key}' in {}", path.display());
            }
            for (effect, repair) in &parsed.repairs {
                log::warn!("{effect}: repaired {repair}");
            }
            log::info!(
                "loaded {} particle profiles from {}",
                parsed.profiles.len(),
                path.display()
            );
            let outcome = LoadOutcome::Loaded {
                unknown_keys: parsed.unknown_keys,
                repairs: parsed.repairs,
            };
            (parsed.profiles, outcome)
        }
        Err(e) => {
            log::error!("failed to parse particle profiles {}: {e}", path.display());
            (builtin_profiles(), LoadOutcome::FellBackToDefaults(e.to_string()))
        }
    }
}
