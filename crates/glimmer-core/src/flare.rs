use glam::{Vec2, Vec3, Vec4};

use crate::noise::smoothstep;
use crate::{FlareParams, MAX_FLARE_COLORS};

/// The compositor always renders exactly six ovals, whatever the nominal
/// ray count in the uniform contract says.
pub const PRIMITIVE_COUNT: usize = 6;

/// Independent per-primitive loop length in seconds.
pub const LIFECYCLE_PERIOD: f32 = 2.5;

/// Maximum outward travel, in units of resolution height.
const TRAVEL_RANGE: f32 = 0.7;

/// Built-in stop colors: blue → cyan → green → yellow → orange.
const BUILTIN_STOPS: [Vec3; 5] = [
    Vec3::new(0.2, 0.4, 1.0),
    Vec3::new(0.2, 0.9, 1.0),
    Vec3::new(0.3, 1.0, 0.4),
    Vec3::new(1.0, 0.9, 0.3),
    Vec3::new(1.0, 0.5, 0.15),
];

/// Gradient breakpoints, shifted earlier as a primitive ages.
const BREAKPOINTS: [f32; 4] = [0.35, 0.50, 0.75, 0.90];

// ---------------------------------------------------------------------------
// Primitive lifecycle — fully derived from (index, time)
// ---------------------------------------------------------------------------

/// Snapshot of one oval's animation state. No per-primitive state persists
/// across frames; everything here is a function of the index and the clock.
#[derive(Debug, Clone, Copy)]
pub struct Primitive {
    /// Travel direction, `index × 60°`.
    pub angle: f32,
    /// Deterministic per-index time offset in [0, 1).
    pub phase: f32,
    /// Deterministic per-index speed multiplier in [0.4, 0.8).
    pub speed: f32,
    /// Position within the 2.5 s loop.
    pub lifecycle: f32,
    /// Normalized lifecycle progress in [0, 1).
    pub progress: f32,
    /// Outward travel distance in resolution-height units, [0, 0.7).
    pub distance: f32,
    /// Unit vector along `angle`.
    pub direction: Vec2,
}

/// Derive primitive `index`'s state at `time`. The phase/speed jitter is
/// plain integer arithmetic: irregular-looking but fully deterministic.
pub fn primitive_at(index: usize, time: f32) -> Primitive {
    let angle = (index as f32 * 60.0).to_radians();
    let phase = ((index * 37 + 11) % 17) as f32 / 17.0;
    let speed = 0.4 + ((index * 23 + 7) % 13) as f32 / 13.0 * 0.4;

    let lifecycle = (time * speed + phase * 2.0).rem_euclid(LIFECYCLE_PERIOD);
    let progress = lifecycle / LIFECYCLE_PERIOD;
    let distance = progress * progress * TRAVEL_RANGE;

    let (s, c) = angle.sin_cos();
    Primitive {
        angle,
        phase,
        speed,
        lifecycle,
        progress,
        distance,
        direction: Vec2::new(c, s),
    }
}

/// Dimming applied as a primitive travels outward. Exactly 1 at distance 0.
pub fn distance_attenuation(distance: f32) -> f32 {
    (1.0 - distance * 0.95).max(0.0)
}

// ---------------------------------------------------------------------------
// Per-frame compositor
// ---------------------------------------------------------------------------

/// One frame of the anamorphic flare: sanitized parameters, the six derived
/// primitives, and the five resolved gradient stops.
pub struct FlareFrame {
    params: FlareParams,
    primitives: [Primitive; PRIMITIVE_COUNT],
    stops: [Vec3; 5],
}

impl FlareFrame {
    pub fn new(params: FlareParams) -> Self {
        let params = params.sanitized();
        let primitives =
            std::array::from_fn(|i| primitive_at(i, params.time));
        let stops = resolve_stops(&params.colors, params.color_count);
        Self { params, primitives, stops }
    }

    pub fn params(&self) -> &FlareParams {
        &self.params
    }

    pub fn primitives(&self) -> &[Primitive; PRIMITIVE_COUNT] {
        &self.primitives
    }

    /// Shade one pixel. Returns premultiplied-style (color, alpha): the
    /// color is the raw additive accumulation scaled by intensity, and the
    /// alpha is derived from its brightness.
    pub fn shade(&self, pixel: Vec2) -> Vec4 {
        let p = &self.params;
        let rel = (pixel - p.light_pos) / p.resolution.y;

        let mut color = Vec3::ZERO;
        for prim in &self.primitives {
            // Into the primitive's local rotated frame.
            let offset = rel - prim.distance * prim.direction;
            let (s, c) = (-prim.angle).sin_cos();
            let local = Vec2::new(
                c * offset.x - s * offset.y,
                s * offset.x + c * offset.y,
            );

            // Anisotropic scale: the oval stretches as it travels outward.
            let width_expansion = 1.0 + 2.0 * prim.distance;
            let scaled = Vec2::new(local.x * 4.0, local.y * 15.0 / width_expansion);

            let mask = 1.0 - smoothstep(0.0, 0.6, scaled.length());
            if mask <= 0.01 {
                continue;
            }

            let g = (scaled.x / 1.2 + 0.5).clamp(0.0, 1.0);
            let stop = self.grade(g, prim.progress);

            let mut intensity = mask * 0.8;
            intensity *= 1.0 + 0.6 * last_breath(prim.progress);
            intensity *= distance_attenuation(prim.distance);

            color += stop * intensity;
        }

        let color = color * (p.intensity * 0.7);
        let alpha = (0.6 * color.length().clamp(0.0, 1.0)).clamp(0.0, 1.0);
        color.extend(alpha)
    }

    /// Five-stop gradient with an age-dependent warmth shift: every
    /// breakpoint moves up to 0.4 earlier as the primitive's lifecycle
    /// progresses.
    fn grade(&self, g: f32, progress: f32) -> Vec3 {
        let shift = progress * 0.4;
        let s = &self.stops;
        let mut c = s[0];
        c = c.lerp(s[1], smoothstep(BREAKPOINTS[0] - shift, BREAKPOINTS[1] - shift, g));
        c = c.lerp(s[2], smoothstep(BREAKPOINTS[1] - shift, BREAKPOINTS[2] - shift, g));
        c = c.lerp(s[3], smoothstep(BREAKPOINTS[2] - shift, BREAKPOINTS[3] - shift, g));
        c.lerp(s[4], smoothstep(BREAKPOINTS[3] - shift, 1.0 - shift, g))
    }
}

/// Bell bump just before a primitive fades: nonzero only for progress in
/// [0.6, 1.0], peaking at 0.8.
fn last_breath(progress: f32) -> f32 {
    smoothstep(0.6, 0.8, progress) * (1.0 - smoothstep(0.8, 1.0, progress))
}

/// Resolve the five gradient stops: built-in ramp when no colors are
/// configured, otherwise the user ramp resampled at 0, ¼, ½, ¾, 1.
fn resolve_stops(colors: &[Vec3; MAX_FLARE_COLORS], count: u32) -> [Vec3; 5] {
    let count = count.min(MAX_FLARE_COLORS as u32) as usize;
    match count {
        0 => BUILTIN_STOPS,
        1 => [colors[0]; 5],
        _ => std::array::from_fn(|k| {
            let ft = k as f32 / 4.0 * (count - 1) as f32;
            let i = (ft as usize).min(count - 2);
            colors[i].lerp(colors[i + 1], ft - i as f32)
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- primitive lifecycle --------------------------------------------------

    #[test]
    fn base_angles_are_sixty_degree_multiples() {
        for i in 0..PRIMITIVE_COUNT {
            let prim = primitive_at(i, 1.7);
            assert_eq!(prim.angle, (i as f32 * 60.0).to_radians());
        }
    }

    #[test]
    fn speeds_stay_in_their_documented_band() {
        for i in 0..PRIMITIVE_COUNT {
            let prim = primitive_at(i, 0.0);
            assert!(
                (0.4..0.8).contains(&prim.speed),
                "primitive {i} speed {}",
                prim.speed
            );
        }
    }

    #[test]
    fn jitter_makes_primitives_distinct() {
        let phases: Vec<f32> = (0..PRIMITIVE_COUNT)
            .map(|i| primitive_at(i, 0.0).phase)
            .collect();
        let distinct = phases
            .iter()
            .enumerate()
            .all(|(i, p)| phases.iter().skip(i + 1).all(|q| p != q));
        assert!(distinct, "phases collide: {phases:?}");
    }

    #[test]
    fn lifecycle_loops_with_its_own_period() {
        // In wall-clock terms each primitive repeats every 2.5 / speed s.
        for i in 0..PRIMITIVE_COUNT {
            let a = primitive_at(i, 1.0);
            let b = primitive_at(i, 1.0 + LIFECYCLE_PERIOD / a.speed);
            assert!(
                (a.lifecycle - b.lifecycle).abs() < 1e-3,
                "primitive {i}: {} vs {}",
                a.lifecycle,
                b.lifecycle
            );
        }
    }

    #[test]
    fn travel_distance_is_a_quadratic_ease() {
        for i in 0..PRIMITIVE_COUNT {
            let prim = primitive_at(i, 0.83);
            let expected = prim.progress * prim.progress * 0.7;
            assert!((prim.distance - expected).abs() < 1e-6);
            assert!((0.0..0.7).contains(&prim.distance));
        }
    }

    #[test]
    fn attenuation_is_unity_for_a_fresh_primitive() {
        assert_eq!(distance_attenuation(0.0), 1.0);
    }

    #[test]
    fn attenuation_dims_with_travel_and_saturates() {
        assert!(distance_attenuation(0.5) < 1.0);
        assert_eq!(distance_attenuation(2.0), 0.0);
    }

    #[test]
    fn last_breath_is_confined_to_late_life() {
        assert_eq!(last_breath(0.0), 0.0);
        assert_eq!(last_breath(0.5), 0.0);
        assert_eq!(last_breath(1.0), 0.0);
        assert!((last_breath(0.8) - 1.0).abs() < 1e-6, "no peak at 0.8");
    }

    // --- gradient -------------------------------------------------------------

    #[test]
    fn builtin_stops_are_used_when_no_colors_configured() {
        let frame = FlareFrame::new(FlareParams::default());
        assert_eq!(frame.stops, BUILTIN_STOPS);
    }

    #[test]
    fn configured_colors_replace_the_builtin_ramp() {
        let mut colors = [Vec3::ZERO; MAX_FLARE_COLORS];
        colors[0] = Vec3::new(1.0, 0.0, 0.0);
        colors[1] = Vec3::new(0.0, 0.0, 1.0);
        let frame = FlareFrame::new(FlareParams {
            colors,
            color_count: 2,
            ..FlareParams::default()
        });
        assert_eq!(frame.stops[0], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(frame.stops[4], Vec3::new(0.0, 0.0, 1.0));
        assert!((frame.stops[2] - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn warmth_shift_pushes_old_primitives_toward_the_hot_end() {
        let frame = FlareFrame::new(FlareParams::default());
        let young = frame.grade(0.6, 0.0);
        let old = frame.grade(0.6, 0.95);
        // The aged primitive's red channel has climbed toward orange.
        assert!(old.x > young.x, "young {young:?} old {old:?}");
    }

    // --- shading --------------------------------------------------------------

    #[test]
    fn alpha_is_derived_from_color_brightness_exactly() {
        let frame = FlareFrame::new(FlareParams::default());
        for &px in &[
            Vec2::new(400.0, 300.0),
            Vec2::new(430.0, 310.0),
            Vec2::new(350.0, 280.0),
            Vec2::new(0.0, 0.0),
        ] {
            let c = frame.shade(px);
            let expected = (0.6 * c.truncate().length().clamp(0.0, 1.0)).clamp(0.0, 1.0);
            assert!(
                (c.w - expected).abs() < 1e-6,
                "alpha {} vs {} at {px:?}",
                c.w,
                expected
            );
        }
    }

    #[test]
    fn pixels_out_of_reach_are_fully_transparent() {
        // At t = 0 every oval's travel is below 0.31 and its long half-extent
        // is 0.15 (resolution-height units); the corner sits 0.83 away.
        let frame = FlareFrame::new(FlareParams::default());
        let c = frame.shade(Vec2::new(0.0, 0.0));
        assert_eq!(c, Vec4::ZERO);
    }

    #[test]
    fn fresh_primitives_light_the_anchor() {
        // At t = 0 the zero-phase primitive sits exactly on the anchor.
        let frame = FlareFrame::new(FlareParams::default());
        let c = frame.shade(Vec2::new(400.0, 300.0));
        assert!(c.truncate().length() > 0.0);
        assert!(c.w > 0.0);
    }

    #[test]
    fn one_primitive_spawns_exactly_on_the_anchor_at_time_zero() {
        let coincident = (0..PRIMITIVE_COUNT)
            .filter(|&i| primitive_at(i, 0.0).distance == 0.0)
            .count();
        assert!(coincident >= 1);
    }

    #[test]
    fn primitives_have_all_separated_by_a_quarter_cycle() {
        // End-to-end scenario: by t = 1.25 every oval has left the anchor.
        for i in 0..PRIMITIVE_COUNT {
            let prim = primitive_at(i, 1.25);
            assert!(prim.distance > 0.0, "primitive {i} still at the anchor");
        }
    }

    #[test]
    fn intensity_scales_output_linearly() {
        let base = FlareFrame::new(FlareParams::default());
        let double = FlareFrame::new(FlareParams {
            intensity: 2.0,
            ..FlareParams::default()
        });
        let px = Vec2::new(400.0, 300.0);
        let a = base.shade(px).truncate();
        let b = double.shade(px).truncate();
        assert!((b - a * 2.0).length() < 1e-5);
    }

    #[test]
    fn unread_contract_fields_do_not_change_output() {
        // Streak geometry and aberration are contract scaffolding only.
        let a = FlareFrame::new(FlareParams::default());
        let b = FlareFrame::new(FlareParams {
            streak_length: 9.0,
            streak_width: 4.0,
            falloff_power: 0.1,
            chromatic_aberration: 5.0,
            glow_radius: 3.0,
            dispersion: 2.0,
            ..FlareParams::default()
        });
        let px = Vec2::new(410.0, 295.0);
        assert_eq!(a.shade(px), b.shade(px));
    }
}
