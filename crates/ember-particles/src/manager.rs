//! The particle manager: one owner for the pool, profiles and emitters

use crate::continuous::{
    apply_environment_defaults, collect_due_emissions, ContinuousEmitter, FollowMode,
};
use crate::effect::EffectType;
use crate::emission::{emit_burst, emit_ghost, GhostParams};
use crate::particle::{Particle, ParticlePool};
use crate::persist::{self, LoadOutcome};
use crate::profile::{builtin_profiles, EmissionProfile};
use crate::rand::{ParticleRng, RandomSource};
use crate::render::{draw_particles, DrawStats, DrawTarget};
use crate::settings::ParticleSettings;
use crate::simulate::{step_pool, StepContext};
use crate::texture::{TextureProvider, TextureTable};
use crate::tracked::TrackedPoint;
use ember_core::{CameraView, Result};
use glam::Vec2;
use std::collections::BTreeMap;
use std::path::Path;

/// Owns every particle, profile and continuous emitter for a scene.
///
/// Effects are cosmetic, so requests for unknown effects or unloaded
/// textures are logged and ignored rather than reported as errors.
pub struct ParticleManager<R: RandomSource = ParticleRng> {
    pool: ParticlePool,
    profiles: BTreeMap<EffectType, EmissionProfile>,
    emitters: BTreeMap<EffectType, ContinuousEmitter>,
    textures: TextureTable,
    ground_level: f32,
    settings: ParticleSettings,
    rng: R,
}

impl ParticleManager<ParticleRng> {
    /// Create a manager seeded from `settings.seed`, or the clock when unset
    pub fn new(settings: ParticleSettings) -> Self {
        let rng = settings
            .seed
            .map(ParticleRng::new)
            .unwrap_or_else(ParticleRng::from_time);
        Self::with_rng(settings, rng)
    }
}

impl<R: RandomSource> ParticleManager<R> {
    /// Create a manager with the built-in profiles and no textures loaded
    pub fn with_rng(settings: ParticleSettings, rng: R) -> Self {
        Self {
            pool: ParticlePool::default(),
            profiles: builtin_profiles(),
            emitters: BTreeMap::new(),
            textures: TextureTable::default(),
            ground_level: settings.ground_level,
            settings,
            rng,
        }
    }

    /// Load textures, then the profile file named in the settings
    pub fn initialize(&mut self, provider: &mut impl TextureProvider) -> LoadOutcome {
        self.load_common_resources(provider);
        let path = self.settings.profile_path.clone();
        self.load_profiles_from_file(&path)
    }

    /// Load every effect texture and assign the handles to the profiles
    pub fn load_common_resources(&mut self, provider: &mut impl TextureProvider) {
        self.textures = TextureTable::load(provider, &self.settings.texture_root);
        for (&effect, profile) in self.profiles.iter_mut() {
            profile.texture = self.textures.get(effect);
        }
        log::debug!("particle textures loaded from {}", self.settings.texture_root);
    }

    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    // --- One-shot emission ---

    /// Emit one burst of `effect` at `position`. Returns the particles written.
    pub fn emit(&mut self, effect: EffectType, position: Vec2) -> usize {
        self.emit_inner(effect, position, None)
    }

    /// Like `emit`, but particles home toward `target` if the profile asks for it
    pub fn emit_with_target(
        &mut self,
        effect: EffectType,
        position: Vec2,
        target: &TrackedPoint,
    ) -> usize {
        self.emit_inner(effect, position, Some(target))
    }

    fn emit_inner(
        &mut self,
        effect: EffectType,
        position: Vec2,
        target: Option<&TrackedPoint>,
    ) -> usize {
        let Some(profile) = self.profiles.get(&effect) else {
            log::debug!("emit {effect}: no profile");
            return 0;
        };
        if !profile.texture.is_valid() {
            log::debug!("emit {effect}: texture not loaded");
            return 0;
        }
        emit_burst(&mut self.pool, effect, profile, position, target, &mut self.rng)
    }

    /// Leave a fading after-image of a sprite, e.g. while dashing
    pub fn emit_dash_ghost(&mut self, params: &GhostParams) -> bool {
        let emitted = emit_ghost(&mut self.pool, params);
        if !emitted {
            log::debug!("dash ghost: invalid texture {:?}", params.texture);
        }
        emitted
    }

    // --- Continuous emission ---

    /// Re-fire `effect` at a fixed position every `emit_interval` seconds
    pub fn start_continuous_emit(&mut self, effect: EffectType, position: Vec2) {
        self.start_continuous(effect, position, None);
    }

    pub fn start_continuous_emit_with_target(
        &mut self,
        effect: EffectType,
        position: Vec2,
        target: &TrackedPoint,
    ) {
        self.start_continuous(effect, position, Some(target.clone()));
    }

    fn start_continuous(
        &mut self,
        effect: EffectType,
        position: Vec2,
        target: Option<TrackedPoint>,
    ) {
        if !self.profiles.contains_key(&effect) {
            log::debug!("start continuous {effect}: no profile");
            return;
        }
        self.emitters.insert(
            effect,
            ContinuousEmitter::new(position, FollowMode::Fixed, target),
        );
    }

    /// Stop re-firing `effect`. Live particles finish their life.
    pub fn stop_continuous_emit(&mut self, effect: EffectType) {
        if let Some(emitter) = self.emitters.get_mut(&effect) {
            emitter.active = false;
        }
    }

    pub fn stop_all_continuous_emit(&mut self) {
        for emitter in self.emitters.values_mut() {
            emitter.active = false;
        }
    }

    /// Start an ambient effect (rain, snow, orbs). Forces the profile into
    /// continuous mode and fills in interval and shape when missing.
    pub fn start_environment_effect(&mut self, effect: EffectType, mode: FollowMode, base: Vec2) {
        let Some(profile) = self.profiles.get_mut(&effect) else {
            log::debug!("start environment {effect}: no profile");
            return;
        };
        apply_environment_defaults(effect, profile, &self.settings);
        log::info!(
            "environment effect {effect} started ({mode:?}, every {:.2}s, {})",
            profile.emit_interval,
            profile.emitter_shape.name()
        );
        self.emitters
            .insert(effect, ContinuousEmitter::new(base, mode, None));
    }

    pub fn stop_environment_effect(&mut self, effect: EffectType) {
        self.stop_continuous_emit(effect);
    }

    /// Replace a profile in place, repairing out-of-range fields; ignored
    /// when `effect` has no profile
    pub fn update_environment_params(&mut self, effect: EffectType, profile: EmissionProfile) {
        self.edit_profile(effect, |existing| *existing = profile);
    }

    /// Make a following emitter track `target`
    pub fn set_follow_target(&mut self, effect: EffectType, target: &TrackedPoint) {
        if let Some(emitter) = self.emitters.get_mut(&effect) {
            emitter.follow_target = Some(target.clone());
        }
    }

    /// Move an emitter's anchor position
    pub fn update_follow_position(&mut self, effect: EffectType, position: Vec2) {
        if let Some(emitter) = self.emitters.get_mut(&effect) {
            emitter.position = position;
        }
    }

    pub fn is_continuous_active(&self, effect: EffectType) -> bool {
        self.emitters.get(&effect).is_some_and(|e| e.active)
    }

    // --- Frame loop ---

    pub fn set_ground_level(&mut self, y: f32) {
        self.ground_level = y;
    }

    pub fn ground_level(&self) -> f32 {
        self.ground_level
    }

    /// Fire due continuous emissions, then advance every live particle
    pub fn update(&mut self, dt: f32) {
        let requests = collect_due_emissions(
            &mut self.emitters,
            &self.profiles,
            dt,
            self.settings.spawn_bias,
        );
        for request in requests {
            self.emit_inner(request.effect, request.position, request.target.as_ref());
        }

        let ctx = StepContext {
            dt,
            ground_level: self.ground_level,
            profiles: &self.profiles,
        };
        step_pool(&mut self.pool, &ctx);
    }

    pub fn draw(&self, camera: &impl CameraView, target: &mut impl DrawTarget) -> DrawStats {
        draw_particles(&self.pool, &self.profiles, camera, target)
    }

    // --- Profiles ---

    pub fn save_profiles_to_file(&self, path: &Path) -> Result<()> {
        persist::save_profiles(path, &self.profiles)?;
        log::info!("saved particle profiles to {}", path.display());
        Ok(())
    }

    /// Replace the profiles from `path`. Never fails; see [`LoadOutcome`].
    pub fn load_profiles_from_file(&mut self, path: &Path) -> LoadOutcome {
        let (profiles, outcome) = persist::load_profiles(path);
        self.profiles = profiles;
        self.resolve_textures();
        outcome
    }

    /// Restore the built-in tuning, keeping the loaded textures
    pub fn reset_to_defaults(&mut self) {
        self.profiles = builtin_profiles();
        self.resolve_textures();
    }

    /// Handles do not survive a restart: invalid stored ones come from the table
    fn resolve_textures(&mut self) {
        for (&effect, profile) in self.profiles.iter_mut() {
            if !profile.texture.is_valid() {
                profile.texture = self.textures.get(effect);
            }
        }
    }

    pub fn profile(&self, effect: EffectType) -> Option<&EmissionProfile> {
        self.profiles.get(&effect)
    }

    /// Change a profile through `edit`, then repair it. Returns false when
    /// `effect` has no profile.
    pub fn edit_profile(
        &mut self,
        effect: EffectType,
        edit: impl FnOnce(&mut EmissionProfile),
    ) -> bool {
        let Some(profile) = self.profiles.get_mut(&effect) else {
            log::debug!("edit {effect}: no profile");
            return false;
        };
        edit(profile);
        for repair in profile.repair() {
            log::warn!("{effect}: repaired {repair}");
        }
        true
    }

    pub fn profiles(&self) -> &BTreeMap<EffectType, EmissionProfile> {
        &self.profiles
    }

    // --- Pool ---

    /// Kill every particle and rewind the pool
    pub fn clear(&mut self) {
        self.pool.clear();
    }

    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    /// Every pool slot, dead ones included
    pub fn particles(&self) -> &[Particle] {
        self.pool.slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuous::MAX_EMISSIONS_PER_TICK;
    use crate::effect::BlendMode;
    use crate::particle::MAX_PARTICLES;
    use crate::render::testing::RecordingTarget;
    use crate::texture::testing::CountingTextures;
    use crate::texture::TextureHandle;
    use ember_core::Camera2D;

    fn manager() -> ParticleManager {
        let settings = ParticleSettings {
            seed: Some(1234),
            ..Default::default()
        };
        let mut m = ParticleManager::new(settings);
        m.load_common_resources(&mut CountingTextures::default());
        m
    }

    #[test]
    fn explosion_emits_one_additive_particle() {
        let mut m = manager();
        assert_eq!(m.emit(EffectType::Explosion, Vec2::new(100.0, 100.0)), 1);
        assert_eq!(m.alive_count(), 1);
        let p = m.particles().iter().find(|p| p.is_alive()).unwrap();
        assert_eq!(p.remaining_life, 40);
        assert_eq!(p.blend_mode, BlendMode::Add);
    }

    #[test]
    fn debris_emits_ten_falling_particles() {
        let mut m = manager();
        m.emit(EffectType::Debris, Vec2::ZERO);
        assert_eq!(m.alive_count(), 10);
        for p in m.particles().iter().filter(|p| p.is_alive()) {
            let speed = p.velocity.length();
            assert!((150.0 - 1e-3..=300.0 + 1e-3).contains(&speed));
            assert_eq!(p.acceleration, Vec2::new(0.0, -800.0));
        }
    }

    #[test]
    fn emit_adds_exactly_count() {
        let mut m = manager();
        let mut expected = 0;
        for effect in [EffectType::Hit, EffectType::Dust, EffectType::Sparkle] {
            let count = m.profile(effect).unwrap().count as usize;
            m.emit(effect, Vec2::ZERO);
            expected += count;
            assert_eq!(m.alive_count(), expected);
        }
    }

    #[test]
    fn pool_never_exceeds_capacity() {
        let mut m = manager();
        for _ in 0..(MAX_PARTICLES / 10 + 20) {
            m.emit(EffectType::Debris, Vec2::ZERO);
        }
        assert_eq!(m.alive_count(), MAX_PARTICLES);
    }

    #[test]
    fn remaining_life_never_increases() {
        let mut m = manager();
        m.emit(EffectType::Dust, Vec2::ZERO);
        let mut previous: Vec<i32> = m.particles().iter().map(|p| p.remaining_life).collect();
        for _ in 0..60 {
            m.update(1.0 / 60.0);
            let current: Vec<i32> = m.particles().iter().map(|p| p.remaining_life).collect();
            for (now, before) in current.iter().zip(&previous) {
                assert!(now <= before);
            }
            previous = current;
        }
        assert_eq!(m.alive_count(), 0);

        let mut target = RecordingTarget::default();
        let stats = m.draw(&Camera2D::default(), &mut target);
        assert_eq!(stats.quads, 0);
    }

    #[test]
    fn negative_texture_emits_nothing() {
        let mut m = manager();
        m.edit_profile(EffectType::Hit, |p| p.texture = TextureHandle(-3));
        assert_eq!(m.emit(EffectType::Hit, Vec2::ZERO), 0);
        assert_eq!(m.alive_count(), 0);
    }

    #[test]
    fn unloaded_textures_emit_nothing() {
        let mut m = ParticleManager::with_rng(ParticleSettings::default(), ParticleRng::new(3));
        assert_eq!(m.emit(EffectType::Explosion, Vec2::ZERO), 0);
        m.start_continuous_emit(EffectType::Explosion, Vec2::ZERO);
        m.update(1.0);
        assert_eq!(m.alive_count(), 0);
    }

    #[test]
    fn continuous_fires_per_elapsed_interval() {
        let mut m = manager();
        m.edit_profile(EffectType::Explosion, |p| {
            p.continuous = true;
            p.emit_interval = 0.1;
        });

        m.start_continuous_emit(EffectType::Explosion, Vec2::new(5.0, 5.0));
        m.update(0.35);
        assert_eq!(m.alive_count(), 3);
        assert!((m.emitters[&EffectType::Explosion].timer - 0.05).abs() < 1e-5);
    }

    #[test]
    fn non_continuous_profile_does_not_repeat() {
        let mut m = manager();
        m.start_continuous_emit(EffectType::Explosion, Vec2::ZERO);
        assert!(m.is_continuous_active(EffectType::Explosion));
        m.update(1.0);
        assert_eq!(m.alive_count(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut m = manager();
        m.start_environment_effect(EffectType::Rain, FollowMode::Fixed, Vec2::ZERO);
        m.stop_continuous_emit(EffectType::Rain);
        assert!(!m.is_continuous_active(EffectType::Rain));
        m.stop_continuous_emit(EffectType::Rain);
        assert!(!m.is_continuous_active(EffectType::Rain));

        // Never started
        m.stop_continuous_emit(EffectType::Glow);
        assert!(!m.is_continuous_active(EffectType::Glow));
    }

    #[test]
    fn stopped_emitter_leaves_live_particles() {
        let mut m = manager();
        m.start_environment_effect(EffectType::Snow, FollowMode::Fixed, Vec2::new(0.0, 400.0));
        m.update(0.2);
        let alive = m.alive_count();
        assert!(alive > 0);
        m.stop_all_continuous_emit();
        m.update(0.2);
        assert_eq!(m.alive_count(), alive);
    }

    #[test]
    fn environment_follows_target_with_bias() {
        let mut m = manager();
        let player = TrackedPoint::new(Vec2::new(200.0, 0.0));
        m.edit_profile(EffectType::Rain, |p| p.emitter_size = Vec2::ZERO);
        m.start_environment_effect(EffectType::Rain, FollowMode::FollowTarget, Vec2::ZERO);
        m.set_follow_target(EffectType::Rain, &player);
        player.set(Vec2::new(-300.0, 50.0));

        m.update(0.1);
        assert!(m.alive_count() > 0);
        // Spawned at the player plus the 360 bias, then moved by one step
        for p in m.particles().iter().filter(|p| p.is_alive()) {
            assert!((p.position.x - -300.0).abs() < 20.0);
            assert!((p.position.y - 410.0).abs() < 20.0);
        }
    }

    #[test]
    fn homing_burst_closes_on_target() {
        let mut m = manager();
        let target = TrackedPoint::new(Vec2::new(400.0, 0.0));
        m.emit_with_target(EffectType::Charge, Vec2::ZERO, &target);
        let start = m.particles()[0].position.distance(target.get());
        for _ in 0..30 {
            m.update(1.0 / 60.0);
        }
        assert!(m.particles()[0].position.distance(target.get()) < start);
    }

    #[test]
    fn start_without_profile_is_ignored() {
        let mut m = manager();
        m.profiles.remove(&EffectType::Orb);
        m.start_environment_effect(EffectType::Orb, FollowMode::WorldPoint, Vec2::ZERO);
        m.start_continuous_emit(EffectType::Orb, Vec2::ZERO);
        assert!(!m.is_continuous_active(EffectType::Orb));
        assert_eq!(m.emit(EffectType::Orb, Vec2::ZERO), 0);
    }

    #[test]
    fn update_environment_params_only_replaces_existing() {
        let mut m = manager();
        let replacement = EmissionProfile {
            count: 99,
            ..Default::default()
        };
        m.update_environment_params(EffectType::Snow, replacement.clone());
        assert_eq!(m.profile(EffectType::Snow).unwrap().count, 99);

        m.profiles.remove(&EffectType::Glow);
        m.update_environment_params(EffectType::Glow, replacement);
        assert!(m.profile(EffectType::Glow).is_none());
    }

    #[test]
    fn replaced_profiles_are_repaired() {
        let mut m = manager();
        let texture = m.profile(EffectType::Debris).unwrap().texture;
        let broken = EmissionProfile {
            count: 10,
            texture,
            life_min: 0,
            life_max: 0,
            emit_interval: 1e-10,
            ..Default::default()
        };
        m.update_environment_params(EffectType::Debris, broken);

        let repaired = m.profile(EffectType::Debris).unwrap();
        assert_eq!((repaired.life_min, repaired.life_max), (1, 1));
        assert_eq!(repaired.emit_interval, crate::profile::MIN_EMIT_INTERVAL);

        let emitted = m.emit(EffectType::Debris, Vec2::ZERO);
        assert_eq!(emitted, 10);
        assert_eq!(m.alive_count(), emitted);
    }

    #[test]
    fn tiny_interval_from_file_does_not_stall_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fx.toml");
        std::fs::write(
            &path,
            "[Dust]\ncount = 1\ncontinuous = true\nemit_interval = 1e-10\n\n\
             [Explosion.animation]\nenabled = true\ntotal_frames = 4\n\
             frame_duration = 1e-10\nlooping = true\n",
        )
        .unwrap();

        let mut m = manager();
        assert!(m.load_profiles_from_file(&path).from_file());
        assert!(m.emit(EffectType::Explosion, Vec2::ZERO) > 0);
        m.start_continuous_emit(EffectType::Dust, Vec2::ZERO);
        m.update(1.0 / 60.0);
        assert_eq!(
            m.profile(EffectType::Explosion).unwrap().animation.frame_duration,
            crate::profile::MIN_FRAME_DURATION
        );
        // One explosion plus a capped run of dust bursts
        assert_eq!(m.alive_count(), 1 + MAX_EMISSIONS_PER_TICK as usize);
    }

    #[test]
    fn update_follow_position_moves_anchor() {
        let mut m = manager();
        m.start_environment_effect(EffectType::Orb, FollowMode::WorldPoint, Vec2::ZERO);
        m.update_follow_position(EffectType::Orb, Vec2::new(10.0, 20.0));
        assert_eq!(m.emitters[&EffectType::Orb].position, Vec2::new(10.0, 20.0));

        // Unregistered: ignored
        m.update_follow_position(EffectType::Slash, Vec2::ONE);
        assert!(!m.emitters.contains_key(&EffectType::Slash));
    }

    #[test]
    fn rain_bounces_off_ground_level() {
        let mut m = manager();
        m.set_ground_level(-100.0);
        assert_eq!(m.ground_level(), -100.0);
        m.emit(EffectType::Rain, Vec2::new(0.0, -90.0));
        for _ in 0..10 {
            m.update(1.0 / 60.0);
        }
        for p in m.particles().iter().filter(|p| p.is_alive()) {
            assert!(p.position.y >= -100.0 - 1e-3);
        }
    }

    #[test]
    fn dash_ghost_draws_after_profile_groups() {
        let mut m = manager();
        let ghost = GhostParams {
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            flip_x: false,
            texture: TextureHandle(0),
        };
        assert!(m.emit_dash_ghost(&ghost));
        m.emit(EffectType::Explosion, Vec2::ZERO);

        let mut target = RecordingTarget::default();
        let stats = m.draw(&Camera2D::default(), &mut target);
        assert_eq!(stats.quads, 2);
        assert_eq!(target.quads[0].0, BlendMode::Add);
        assert_eq!(target.quads[1].0, BlendMode::Normal);
        assert_eq!(target.blend_modes.last(), Some(&BlendMode::Normal));
    }

    #[test]
    fn initialize_creates_profile_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ParticleSettings {
            profile_path: dir.path().join("particle_params.toml"),
            seed: Some(7),
            ..Default::default()
        };
        let mut m = ParticleManager::new(settings);
        let outcome = m.initialize(&mut CountingTextures::default());
        assert!(matches!(outcome, LoadOutcome::CreatedDefaults));
        assert!(dir.path().join("particle_params.toml").exists());
        assert!(m.profile(EffectType::Explosion).unwrap().texture.is_valid());
    }

    #[test]
    fn save_then_load_round_trips_tuning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fx.toml");
        let mut m = manager();
        m.edit_profile(EffectType::Hit, |hit| {
            hit.count = 21;
            hit.speed_max = 1777.5;
            hit.emitter_shape = crate::effect::EmitterShape::Rectangle;
        });
        m.save_profiles_to_file(&path).unwrap();
        let saved = m.profiles().clone();

        m.reset_to_defaults();
        assert_eq!(m.profile(EffectType::Hit).unwrap().count, 40);

        let outcome = m.load_profiles_from_file(&path);
        assert!(outcome.from_file());
        for (effect, profile) in &saved {
            let loaded = m.profile(*effect).unwrap();
            let mut expected = profile.clone();
            expected.texture = loaded.texture;
            assert_eq!(loaded, &expected, "{effect}");
        }
    }

    #[test]
    fn stale_texture_handles_are_re_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fx.toml");
        std::fs::write(&path, "[Debris]\ntexture = -1\ncount = 2\n").unwrap();

        let mut m = manager();
        m.load_profiles_from_file(&path);
        assert!(m.profile(EffectType::Debris).unwrap().texture.is_valid());
        assert!(m.profile(EffectType::Hit).is_none());
        assert_eq!(m.emit(EffectType::Debris, Vec2::ZERO), 2);
    }

    #[test]
    fn clear_kills_everything() {
        let mut m = manager();
        m.emit(EffectType::Debris, Vec2::ZERO);
        m.clear();
        assert_eq!(m.alive_count(), 0);
    }
}
