//! Simple value-over-lifetime interpolation (start → end linear)

use ember_core::Color;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two packed `0xRRGGBBAA` colors
pub fn lerp_rgba(a: u32, b: u32, t: f32) -> u32 {
    if a == b {
        return a;
    }
    Color::from_rgba(a).lerp(&Color::from_rgba(b), t).to_rgba()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_rgba_fades_alpha_only() {
        assert_eq!(lerp_rgba(0xFFFFFFFF, 0xFFFFFF00, 0.0), 0xFFFFFFFF);
        assert_eq!(lerp_rgba(0xFFFFFFFF, 0xFFFFFF00, 1.0), 0xFFFFFF00);
        assert_eq!(lerp_rgba(0xFFFFFFFF, 0xFFFFFF00, 0.5), 0xFFFFFF80);
    }
}
