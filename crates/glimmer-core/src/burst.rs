use glam::{Mat3, Vec2, Vec3, Vec4};

use crate::noise::{layered_noise, smootherstep01, smoothstep};
use crate::pattern::{bend_angle, ray_pattern, sample_gradient};
use crate::{AnimationMode, BurstParams};

/// Fixed march step count. Bounded, input-independent per-frame latency.
pub const MARCH_STEPS: u32 = 44;

/// View-axis pullback keeping the pattern centered in front of the camera.
const CAMERA_PULLBACK: f32 = 2.0;

/// Radius the marched point is normalized toward.
const SHELL_RADIUS: f32 = 10.0;

// ---------------------------------------------------------------------------
// Per-frame precompute
// ---------------------------------------------------------------------------

/// One frame of the prismatic burst: parameters plus everything derived once
/// per frame (speed-scaled time, the mode-resolved rotation matrix), so the
/// per-pixel loop never branches on the animation mode.
pub struct BurstFrame {
    params: BurstParams,
    /// Animation time scaled by the speed multiplier.
    t: f32,
    rotation: Mat3,
}

impl BurstFrame {
    pub fn new(params: BurstParams) -> Self {
        let params = params.sanitized();
        let t = params.time * params.speed;
        let rotation = rotation_for(params.mode, t, params.anchor);
        Self { params, t, rotation }
    }

    pub fn params(&self) -> &BurstParams {
        &self.params
    }

    /// Animation time after the speed multiplier.
    pub fn scaled_time(&self) -> f32 {
        self.t
    }

    /// The mode-resolved rotation matrix for this frame.
    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// Shade one pixel. Total over all inputs; output channels in [0, 1],
    /// alpha always 1.
    pub fn shade(&self, pixel: Vec2) -> Vec4 {
        let p = &self.params;
        let centered = pixel - 0.5 * p.resolution - p.offset;
        let dir = (centered / p.resolution.y).extend(1.0).normalize();

        // One noise sample per pixel, not per step; jitters the march below.
        let jitter = 0.1 * p.noise_amount;
        let grain = layered_noise(pixel * 0.25, self.t);

        let mut color = Vec3::ZERO;
        let mut dist = 0.0_f32;
        for _ in 0..MARCH_STEPS {
            let mut q = dir * dist;
            q.z -= CAMERA_PULLBACK;

            let radius = q.length();
            let mut q = q * (SHELL_RADIUS / radius.max(1e-4));
            q = self.rotation * q;

            // Couples step size to distance-from-origin and per-pixel grain.
            let step = (radius - 0.3).min(grain * jitter) + 0.1;

            // Progressive bend: ramps in between march distances 0.35 and 3.
            let growth = smoothstep(0.35, 3.0, dist);
            let amp = growth * p.distortion * 0.15;
            if amp > 0.0 {
                let a1 = bend_angle(q * 0.6, self.t * 0.8) * amp;
                q = rotate_xy(q, a1);
                let a2 = bend_angle(Vec3::new(q.z, q.x, q.y) * 1.1, self.t * 0.5) * amp;
                q = rotate_yz(q, a2);
            }

            let mask = ray_pattern(q, p.ray_count);

            // Gradient position: cubic-eased sawtooth of the march distance.
            let saw = (dist / 4.0).fract();
            let g = saw * saw * (3.0 - 2.0 * saw);
            let stop = sample_gradient(&p.colors, p.color_count, g);

            let falloff = 1.0 - smoothstep(4.0, 5.0, radius);
            color += (0.05 / (0.4 + step)) * falloff * mask * stop;

            dist += step;
        }

        let shaded = (color * self.edge_fade(pixel)).clamp(Vec3::ZERO, Vec3::ONE);
        let out = (shaded * p.intensity).clamp(Vec3::ZERO, Vec3::ONE);
        out.extend(1.0)
    }

    /// Radial vignette around the offset screen center: quintic-eased,
    /// sharpened, blended with a linear tail, perturbed by coarse noise so
    /// the boundary never reads as a perfect circle.
    pub fn edge_fade(&self, pixel: Vec2) -> f32 {
        let p = &self.params;
        let centered = pixel - 0.5 * p.resolution - p.offset;
        let d = (centered.length() / (0.5 * p.resolution.length())).clamp(0.0, 1.0);

        let primary = smootherstep01(1.0 - d).powf(1.5);
        let tail = 1.0 - d;
        let fade = 0.8 * primary + 0.2 * tail;

        let grain = layered_noise(pixel * 0.01, self.t);
        (fade + (grain - 0.5) * 0.0015).clamp(0.0, 1.0)
    }
}

fn rotation_for(mode: AnimationMode, t: f32, anchor: Vec2) -> Mat3 {
    match mode {
        AnimationMode::PlanarRotate => Mat3::from_rotation_z(t * 0.25),
        AnimationMode::SpatialRotate3d => {
            Mat3::from_rotation_z(t * 0.31)
                * Mat3::from_rotation_y(t * 0.21)
                * Mat3::from_rotation_x(t * 0.17)
        }
        AnimationMode::HoverReactive => {
            let off = (anchor - Vec2::splat(0.5)) * 2.0;
            let ax = off.y.clamp(-1.0, 1.0) * 0.6;
            let ay = off.x.clamp(-1.0, 1.0) * 0.6;
            Mat3::from_rotation_y(ay) * Mat3::from_rotation_x(ax)
        }
    }
}

fn rotate_xy(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * p.x - s * p.y, s * p.x + c * p.y, p.z)
}

fn rotate_yz(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, c * p.y - s * p.z, s * p.y + c * p.z)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
