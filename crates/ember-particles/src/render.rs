//! Blend-mode batched quad generation for live particles

use crate::effect::{BlendMode, EffectType};
use crate::particle::{Particle, ParticlePool};
use crate::profile::EmissionProfile;
use crate::texture::TextureHandle;
use ember_core::CameraView;
use glam::{Mat3, Vec2};
use std::collections::BTreeMap;

/// Rotations smaller than this take the axis-aligned path
const ROTATION_EPSILON: f32 = 1e-4;

/// Pixel rectangle inside a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One textured quad in screen space.
///
/// Corners are ordered left-top, right-top, left-bottom, right-bottom in
/// texture space.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteQuad {
    pub corners: [Vec2; 4],
    pub source: SourceRect,
    pub texture: TextureHandle,
    /// Packed `0xRRGGBBAA`
    pub color: u32,
}

/// Receives the draw calls; wraps whatever renderer the game uses
pub trait DrawTarget {
    /// Pixel size of a loaded texture, `None` when unknown
    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)>;

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn draw_quad(&mut self, quad: &SpriteQuad);
}

/// Counters for one draw pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub quads: usize,
    pub blend_switches: usize,
}

/// Draw every live particle, grouped by effect type in profile order.
///
/// Each group sets its blend mode once; ad-hoc particles without a profile
/// (dash after-images) are drawn last with normal blending. Within a group
/// particles are drawn in pool slot order. Blend mode ends on `Normal`.
pub fn draw_particles(
    pool: &ParticlePool,
    profiles: &BTreeMap<EffectType, EmissionProfile>,
    camera: &impl CameraView,
    target: &mut impl DrawTarget,
) -> DrawStats {
    let matrix = camera.world_to_screen();
    let inv_zoom = 1.0 / camera.zoom();
    let mut stats = DrawStats::default();

    for (&effect, profile) in profiles {
        draw_group(
            pool,
            Some(effect),
            profile.blend_mode,
            matrix,
            inv_zoom,
            target,
            &mut stats,
        );
    }
    draw_group(pool, None, BlendMode::Normal, matrix, inv_zoom, target, &mut stats);

    target.set_blend_mode(BlendMode::Normal);
    stats
}

fn draw_group(
    pool: &ParticlePool,
    effect: Option<EffectType>,
    blend_mode: BlendMode,
    matrix: Mat3,
    inv_zoom: f32,
    target: &mut impl DrawTarget,
    stats: &mut DrawStats,
) {
    let mut blend_set = false;
    for p in pool.iter_alive().filter(|p| p.effect == effect) {
        let Some(texture_size) = target.texture_size(p.texture) else {
            continue;
        };
        if !blend_set {
            target.set_blend_mode(blend_mode);
            stats.blend_switches += 1;
            blend_set = true;
        }
        target.draw_quad(&build_quad(p, texture_size, matrix, inv_zoom));
        stats.quads += 1;
    }
}

/// Source rectangle: the whole texture, or the current animation cell
pub fn source_rect(p: &Particle, (tex_w, tex_h): (u32, u32)) -> SourceRect {
    match &p.animation {
        Some(anim) => {
            let w = tex_w / anim.div_x.max(1);
            let h = tex_h / anim.div_y.max(1);
            let col = anim.frame % anim.div_x.max(1);
            let row = anim.frame / anim.div_x.max(1);
            SourceRect {
                x: col * w,
                y: row * h,
                w,
                h,
            }
        }
        None => SourceRect {
            x: 0,
            y: 0,
            w: tex_w,
            h: tex_h,
        },
    }
}

/// Compute the screen-space quad for one particle.
///
/// The quad is sized in world units as `base * scale / zoom`, so after the
/// camera transform its on-screen size does not change with zoom.
pub fn build_quad(p: &Particle, texture_size: (u32, u32), matrix: Mat3, inv_zoom: f32) -> SpriteQuad {
    let source = source_rect(p, texture_size);
    let base = if p.draw_size > 0.0 {
        p.draw_size
    } else {
        source.w as f32
    };
    let half = Vec2::splat(base * p.scale * inv_zoom * 0.5);

    let mut corners = if p.rotation.abs() > ROTATION_EPSILON || !is_axis_aligned(matrix) {
        let (s, c) = p.rotation.sin_cos();
        // World is Y-up: the texture's top edge sits at +half.y
        [
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
        ]
        .map(|local| {
            let rotated = Vec2::new(local.x * c - local.y * s, local.x * s + local.y * c);
            matrix.transform_point2(p.position + rotated)
        })
    } else {
        let center = matrix.transform_point2(p.position);
        let screen_half = half * Vec2::new(matrix.x_axis.x.abs(), matrix.y_axis.y.abs());
        let lt = center - screen_half;
        let rb = center + screen_half;
        [
            lt,
            Vec2::new(rb.x, lt.y),
            Vec2::new(lt.x, rb.y),
            rb,
        ]
    };

    if p.flip_x {
        corners.swap(0, 1);
        corners.swap(2, 3);
    }

    SpriteQuad {
        corners,
        source,
        texture: p.texture,
        color: p.color,
    }
}

/// True when the camera has no rotation component
fn is_axis_aligned(matrix: Mat3) -> bool {
    matrix.x_axis.y.abs() < ROTATION_EPSILON && matrix.y_axis.x.abs() < ROTATION_EPSILON
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every call for inspection
    #[derive(Default)]
    pub struct RecordingTarget {
        pub blend_modes: Vec<BlendMode>,
        pub quads: Vec<(BlendMode, SpriteQuad)>,
        pub current: BlendMode,
    }

    impl DrawTarget for RecordingTarget {
        fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
            texture.is_valid().then_some((64, 32))
        }

        fn set_blend_mode(&mut self, mode: BlendMode) {
            self.blend_modes.push(mode);
            self.current = mode;
        }

        fn draw_quad(&mut self, quad: &SpriteQuad) {
            self.quads.push((self.current, quad.clone()));
        }
    }
}
