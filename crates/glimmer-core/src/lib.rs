pub mod burst;
pub mod flare;
pub mod noise;
pub mod pattern;
pub mod presets;
pub mod tracking;

use glam::{Vec2, Vec3, Vec4};

// ---------------------------------------------------------------------------
// Per-frame parameter records — built fresh each frame, read-only after
// ---------------------------------------------------------------------------

/// Gradient stop capacity of the burst engine.
pub const MAX_BURST_COLORS: usize = 8;
/// Color stop capacity of the flare engine.
pub const MAX_FLARE_COLORS: usize = 6;

/// How the ray-marched pattern rotates over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    /// 2D rotation of the (x, y) pair by a slowly time-varying angle.
    PlanarRotate,
    /// Full three-axis rotation, Z∘Y∘X, with independent angular rates.
    SpatialRotate3d,
    /// Rotation driven by the smoothed anchor offset from screen center.
    HoverReactive,
}

/// Everything the prismatic-burst engine reads for one frame.
///
/// Counts are clamped and continuous fields saturated by
/// [`BurstParams::sanitized`]; the shading code assumes a sanitized record.
#[derive(Debug, Clone)]
pub struct BurstParams {
    /// Render target size in pixels.
    pub resolution: Vec2,
    /// Animation time in seconds. Monotonic unless the clock is paused.
    pub time: f32,
    pub intensity: f32,
    pub speed: f32,
    pub mode: AnimationMode,
    /// Smoothed anchor position, normalized 0..1. Never the raw sample.
    pub anchor: Vec2,
    /// Bend distortion amount, 0..2.
    pub distortion: f32,
    /// Pattern center offset in pixels.
    pub offset: Vec2,
    /// Step-jitter noise amount, 0..1.
    pub noise_amount: f32,
    /// Angular ray comb count. 0 disables combing.
    pub ray_count: u32,
    /// Gradient stops in insertion order. Slots past `color_count` are unread.
    pub colors: [Vec4; MAX_BURST_COLORS],
    /// 0 selects the built-in spectral gradient.
    pub color_count: u32,
}

impl Default for BurstParams {
    fn default() -> Self {
        Self {
            resolution: Vec2::new(800.0, 600.0),
            time: 0.0,
            intensity: 1.0,
            speed: 1.0,
            mode: AnimationMode::SpatialRotate3d,
            anchor: Vec2::splat(0.5),
            distortion: 1.0,
            offset: Vec2::ZERO,
            noise_amount: 0.5,
            ray_count: 6,
            colors: [Vec4::ZERO; MAX_BURST_COLORS],
            color_count: 0,
        }
    }
}

impl BurstParams {
    /// Clamp count fields to capacity and saturate continuous fields to
    /// their documented ranges. Call at the boundary, before shading.
    pub fn sanitized(mut self) -> Self {
        self.intensity = self.intensity.max(0.0);
        self.distortion = self.distortion.clamp(0.0, 2.0);
        self.noise_amount = self.noise_amount.clamp(0.0, 1.0);
        self.color_count = self.color_count.min(MAX_BURST_COLORS as u32);
        self
    }
}

/// Everything the anamorphic-flare engine reads for one frame.
///
/// The streak/aberration/glow fields are part of the uniform contract but
/// the oval compositor does not consume them; they are carried for a future
/// streak pass.
#[derive(Debug, Clone)]
pub struct FlareParams {
    pub resolution: Vec2,
    /// Anchor light position in pixels, Y-flipped relative to the tracking
    /// source.
    pub light_pos: Vec2,
    pub time: f32,
    pub intensity: f32,
    pub streak_length: f32,
    pub streak_width: f32,
    pub falloff_power: f32,
    pub chromatic_aberration: f32,
    /// Nominal oval count. The compositor always renders exactly
    /// [`flare::PRIMITIVE_COUNT`] primitives.
    pub ray_count: u32,
    pub brightness_threshold: f32,
    pub tint: Vec4,
    pub dispersion: f32,
    pub noise_amount: f32,
    pub rotation: f32,
    pub glow_radius: f32,
    pub edge_fade: f32,
    /// Flare color stops; alpha is ignored by the compositor.
    pub colors: [Vec3; MAX_FLARE_COLORS],
    /// 0 selects the built-in five-stop gradient.
    pub color_count: u32,
}

impl Default for FlareParams {
    fn default() -> Self {
        Self {
            resolution: Vec2::new(800.0, 600.0),
            light_pos: Vec2::new(400.0, 300.0),
            time: 0.0,
            intensity: 1.0,
            streak_length: 0.5,
            streak_width: 0.1,
            falloff_power: 2.0,
            chromatic_aberration: 0.0,
            ray_count: 6,
            brightness_threshold: 0.8,
            tint: Vec4::ONE,
            dispersion: 0.3,
            noise_amount: 0.0,
            rotation: 0.0,
            glow_radius: 0.25,
            edge_fade: 0.1,
            colors: [Vec3::ZERO; MAX_FLARE_COLORS],
            color_count: 0,
        }
    }
}

impl FlareParams {
    /// Clamp count fields to capacity and saturate continuous fields.
    pub fn sanitized(mut self) -> Self {
        self.intensity = self.intensity.max(0.0);
        self.noise_amount = self.noise_amount.clamp(0.0, 1.0);
        self.color_count = self.color_count.min(MAX_FLARE_COLORS as u32);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_sanitized_clamps_counts_and_ranges() {
        let p = BurstParams {
            intensity: -2.0,
            distortion: 9.0,
            noise_amount: 1.5,
            color_count: 250,
            ..BurstParams::default()
        }
        .sanitized();
        assert_eq!(p.intensity, 0.0);
        assert_eq!(p.distortion, 2.0);
        assert_eq!(p.noise_amount, 1.0);
        assert_eq!(p.color_count, MAX_BURST_COLORS as u32);
    }

    #[test]
    fn flare_sanitized_clamps_counts() {
        let p = FlareParams {
            color_count: 99,
            intensity: -1.0,
            ..FlareParams::default()
        }
        .sanitized();
        assert_eq!(p.color_count, MAX_FLARE_COLORS as u32);
        assert_eq!(p.intensity, 0.0);
    }

    #[test]
    fn burst_sanitized_passes_valid_values_through() {
        let p = BurstParams {
            intensity: 1.3,
            distortion: 0.7,
            noise_amount: 0.25,
            color_count: 3,
            ..BurstParams::default()
        }
        .sanitized();
        assert_eq!(p.intensity, 1.3);
        assert_eq!(p.distortion, 0.7);
        assert_eq!(p.noise_amount, 0.25);
        assert_eq!(p.color_count, 3);
    }
}
