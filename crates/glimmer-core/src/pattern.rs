use std::f32::consts::PI;

use glam::{Vec3, Vec4};

use crate::noise::smoothstep;
use crate::MAX_BURST_COLORS;

// ---------------------------------------------------------------------------
// Bend function
// ---------------------------------------------------------------------------

/// Organic distortion angle at a 3D point: three weighted sines over the
/// point's components at distinct frequencies, phase-scrolled by time.
pub fn bend_angle(p: Vec3, time: f32) -> f32 {
    0.8 * (p.x * 1.1 + time * 0.70).sin()
        + 0.7 * (p.y * 1.7 - time * 0.55).sin()
        + 0.6 * (p.z * 2.3 + time * 0.40).sin()
}

// ---------------------------------------------------------------------------
// Ray pattern
// ---------------------------------------------------------------------------

/// Depth frequency of the threshold sinusoids. 0.2π puts the on-axis point
/// (radius-normalized to z = ±10) exactly on a crest.
const DEPTH_FREQ: f32 = 0.2 * PI;

/// Angular comb: subdivides the continuous pattern into `ray_count` radial
/// rays. Identically 1.0 when `ray_count` is 0.
pub fn angular_comb(azimuth: f32, ray_count: u32) -> f32 {
    if ray_count == 0 {
        return 1.0;
    }
    let c = 0.5 + 0.5 * (ray_count as f32 * azimuth).cos();
    smoothstep(0.15, 0.85, c * c * c)
}

/// Scalar pattern mask at a (bent) marched point: the product of two
/// sinusoidal thresholds, each smooth-stepped over the 0.5–0.7 band, times
/// the angular comb.
pub fn ray_pattern(p: Vec3, ray_count: u32) -> f32 {
    let w1 = smoothstep(
        0.5,
        0.7,
        0.5 + 0.5 * (1.7 * p.x + 0.9 * p.y - DEPTH_FREQ * p.z).cos(),
    );
    let w2 = smoothstep(
        0.5,
        0.7,
        0.5 + 0.5 * (1.3 * p.y - 0.8 * p.x + DEPTH_FREQ * p.z).cos(),
    );
    w1 * w2 * angular_comb(p.y.atan2(p.x), ray_count)
}

// ---------------------------------------------------------------------------
// Gradients
// ---------------------------------------------------------------------------

/// Channel phases of the built-in spectral gradient: 0, 2π/3, 4π/3.
const SPECTRAL_PHASE: [f32; 3] = [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0];

/// Built-in spectral gradient: per channel `1 + cos(3t + phase)`.
pub fn default_gradient(t: f32) -> Vec3 {
    Vec3::new(
        1.0 + (3.0 * t + SPECTRAL_PHASE[0]).cos(),
        1.0 + (3.0 * t + SPECTRAL_PHASE[1]).cos(),
        1.0 + (3.0 * t + SPECTRAL_PHASE[2]).cos(),
    )
}

/// Sample the active gradient at `t` in [0, 1]: piecewise-linear across the
/// first `count` stops, or the built-in spectral gradient when `count` is 0.
/// Never reads past `count`.
pub fn sample_gradient(colors: &[Vec4; MAX_BURST_COLORS], count: u32, t: f32) -> Vec3 {
    let count = count.min(MAX_BURST_COLORS as u32) as usize;
    match count {
        0 => default_gradient(t),
        1 => colors[0].truncate(),
        _ => {
            let ft = t.clamp(0.0, 1.0) * (count - 1) as f32;
            let i = (ft as usize).min(count - 2);
            let frac = ft - i as f32;
            colors[i].truncate().lerp(colors[i + 1].truncate(), frac)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
