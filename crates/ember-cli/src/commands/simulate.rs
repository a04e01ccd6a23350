//! Headless effect simulation

use anyhow::Result;
use ember_core::Camera2D;
use ember_particles::{
    BlendMode, DrawStats, DrawTarget, EffectType, FollowMode, ParticleManager, ParticleSettings,
    SpriteQuad, TextureHandle, TextureProvider,
};
use glam::Vec2;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Edge length reported for every headless texture
const HEADLESS_TEXTURE_SIZE: u32 = 64;

pub struct SimulateArgs {
    pub effect: String,
    pub frames: u32,
    pub dt: f32,
    pub seed: Option<u32>,
    pub continuous: bool,
    pub ground: Option<f32>,
    pub path: Option<PathBuf>,
}

/// Hands out a handle per distinct path without touching the disk
#[derive(Default)]
pub struct HeadlessTextures {
    paths: Vec<String>,
}

impl TextureProvider for HeadlessTextures {
    fn load_texture(&mut self, path: &str) -> TextureHandle {
        let index = match self.paths.iter().position(|p| p == path) {
            Some(index) => index,
            None => {
                self.paths.push(path.to_string());
                self.paths.len() - 1
            }
        };
        TextureHandle(index as i32)
    }
}

/// Counts draw calls instead of rendering them
#[derive(Default)]
pub struct CountingTarget {
    current: BlendMode,
    pub quads_by_blend: BTreeMap<&'static str, usize>,
}

impl DrawTarget for CountingTarget {
    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        texture
            .is_valid()
            .then_some((HEADLESS_TEXTURE_SIZE, HEADLESS_TEXTURE_SIZE))
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.current = mode;
    }

    fn draw_quad(&mut self, _quad: &SpriteQuad) {
        *self.quads_by_blend.entry(self.current.name()).or_default() += 1;
    }
}

/// Per-frame numbers collected by a run
#[derive(Debug, Default)]
pub struct SimulationReport {
    pub alive: Vec<usize>,
    pub peak_alive: usize,
    pub last_draw: DrawStats,
}

pub fn run(args: SimulateArgs, mut settings: ParticleSettings) -> Result<()> {
    let effect: EffectType = args.effect.parse()?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(ground) = args.ground {
        settings.ground_level = ground;
    }
    if args.dt.is_nan() || args.dt <= 0.0 {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }

    let mut manager = ParticleManager::new(settings);
    manager.load_common_resources(&mut HeadlessTextures::default());
    if let Some(path) = &args.path {
        let outcome = manager.load_profiles_from_file(path);
        if !outcome.from_file() {
            log::warn!("using built-in profiles: {:?}", outcome);
        }
    }

    let report = simulate(&mut manager, effect, &args);

    for (frame, alive) in report.alive.iter().enumerate() {
        if frame % 10 == 0 || frame + 1 == report.alive.len() {
            println!("frame {:>4}: {:>5} alive", frame, alive);
        }
    }
    println!();
    println!("Effect:      {}", effect);
    println!("Peak alive:  {}", report.peak_alive);
    println!(
        "Last draw:   {} quads, {} blend switches",
        report.last_draw.quads, report.last_draw.blend_switches
    );
    Ok(())
}

/// Emit `effect` (once, or continuously) and step the requested frames
pub fn simulate(
    manager: &mut ParticleManager,
    effect: EffectType,
    args: &SimulateArgs,
) -> SimulationReport {
    let camera = Camera2D::new(Vec2::new(
        manager.settings().screen_width,
        manager.settings().screen_height,
    ));
    let origin = Vec2::ZERO;

    if args.continuous {
        manager.start_environment_effect(effect, FollowMode::Fixed, origin);
    } else {
        manager.emit(effect, origin);
    }

    let mut report = SimulationReport::default();
    for _ in 0..args.frames {
        manager.update(args.dt);
        let mut target = CountingTarget::default();
        report.last_draw = manager.draw(&camera, &mut target);
        let alive = manager.alive_count();
        report.peak_alive = report.peak_alive.max(alive);
        report.alive.push(alive);
    }
    log::debug!("simulated {} frames of {}", args.frames, effect);
    report
}
