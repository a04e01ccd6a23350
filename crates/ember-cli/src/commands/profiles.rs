//! Profile file commands

use anyhow::{Context, Result};
use clap::Subcommand;
use ember_particles::persist::{parse_profiles, save_profiles, ParsedProfiles};
use ember_particles::{builtin_profiles, EffectType, EmissionProfile, ParticleSettings};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Write the built-in profiles to a file
    Init {
        /// Profile file (defaults to the settings' profile path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the profiles in a file
    Show {
        #[arg(long)]
        path: Option<PathBuf>,

        /// Only show this effect type
        #[arg(long)]
        effect: Option<String>,
    },

    /// Report unknown keys and out-of-range values
    Check {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(cmd: ProfileCommands, settings: &ParticleSettings) -> Result<()> {
    let resolve = |path: Option<PathBuf>| path.unwrap_or_else(|| settings.profile_path.clone());
    match cmd {
        ProfileCommands::Init { path, force } => init(&resolve(path), force),
        ProfileCommands::Show { path, effect } => show(&resolve(path), effect.as_deref()),
        ProfileCommands::Check { path } => check(&resolve(path)),
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Profile file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    let profiles = builtin_profiles();
    save_profiles(path, &profiles)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} profiles to {}", profiles.len(), path.display());
    Ok(())
}

fn read(path: &Path) -> Result<ParsedProfiles> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_profiles(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn show(path: &Path, effect: Option<&str>) -> Result<()> {
    let parsed = read(path)?;
    let filter = effect.map(str::parse::<EffectType>).transpose()?;

    for (effect, profile) in &parsed.profiles {
        if filter.is_some_and(|f| f != *effect) {
            continue;
        }
        println!("{}", describe(*effect, profile));
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let parsed = read(path)?;
    let report = check_report(&parsed);
    for line in &report {
        println!("{}", line);
    }
    if report.is_empty() {
        println!("{}: {} profiles, no problems", path.display(), parsed.profiles.len());
    }
    Ok(())
}

/// One line per problem found while reading a profile file
pub fn check_report(parsed: &ParsedProfiles) -> Vec<String> {
    let mut lines = Vec::new();
    for key in &parsed.unknown_keys {
        lines.push(format!("unknown key: {}", key));
    }
    for (effect, repair) in &parsed.repairs {
        lines.push(format!("{}: {}", effect, repair));
    }
    for effect in EffectType::ALL {
        if !parsed.profiles.contains_key(&effect) {
            lines.push(format!("missing profile: {} (effect disabled)", effect));
        }
    }
    lines
}

/// Multi-line summary of one profile
pub fn describe(effect: EffectType, p: &EmissionProfile) -> String {
    let mut out = format!("[{}]\n", effect);
    out += &format!(
        "  count {}  life {}..{} ticks  speed {}..{}\n",
        p.count, p.life_min, p.life_max, p.speed_min, p.speed_max
    );
    out += &format!(
        "  angle {} +/- {}  gravity ({}, {})  shape {}\n",
        p.angle_base,
        p.angle_range / 2.0,
        p.gravity.x,
        p.gravity.y,
        p.emitter_shape.name()
    );
    out += &format!(
        "  size {}..{}  scale {} -> {}  color {:08X} -> {:08X}  blend {}",
        p.size_min,
        p.size_max,
        p.scale_start,
        p.scale_end,
        p.color_start,
        p.color_end,
        p.blend_mode.name()
    );
    if p.animation.enabled {
        out += &format!(
            "\n  animation {}x{} {} frames @ {}s{}",
            p.animation.div_x,
            p.animation.div_y,
            p.animation.total_frames,
            p.animation.frame_duration,
            if p.animation.looping { " loop" } else { "" }
        );
    }
    if p.homing {
        out += &format!("\n  homing strength {}", p.homing_strength);
    }
    if p.continuous {
        out += &format!("\n  continuous every {}s", p.emit_interval);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("particle_params.toml");
        init(&path, false).unwrap();
        assert!(init(&path, false).is_err());
        init(&path, true).unwrap();
        assert_eq!(read(&path).unwrap().profiles, builtin_profiles());
    }

    #[test]
    fn check_lists_every_problem() {
        let parsed = parse_profiles("extra = 1\n[Hit]\nlife_min = 9\nlife_max = 3\n").unwrap();
        let report = check_report(&parsed);
        assert!(report.contains(&"unknown key: extra".to_string()));
        assert!(report.iter().any(|l| l.starts_with("Hit: life_max")));
        assert_eq!(
            report.iter().filter(|l| l.starts_with("missing profile")).count(),
            EffectType::ALL.len() - 1
        );
    }

    #[test]
    fn describe_mentions_continuous_weather() {
        let profiles = builtin_profiles();
        let text = describe(EffectType::Rain, &profiles[&EffectType::Rain]);
        assert!(text.starts_with("[Rain]"));
        assert!(text.contains("continuous every 0.1s"));
        assert!(text.contains("shape Line"));
    }
}
