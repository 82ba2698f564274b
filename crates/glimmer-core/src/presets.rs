use glam::{Vec2, Vec3, Vec4};

use crate::{AnimationMode, BurstParams, FlareParams};

/// Named built-in configurations pairing both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    SpectralBurst,
    HoverGlow,
    PrismRays,
    EmberDrift,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::SpectralBurst,
        Preset::HoverGlow,
        Preset::PrismRays,
        Preset::EmberDrift,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::SpectralBurst => "Spectral Burst",
            Preset::HoverGlow => "Hover Glow",
            Preset::PrismRays => "Prism Rays",
            Preset::EmberDrift => "Ember Drift",
        }
    }

    /// Build the per-engine base configurations. Resolution, time and anchor
    /// are overwritten by the driver every frame.
    pub fn build(self) -> (BurstParams, FlareParams) {
        match self {
            Preset::SpectralBurst => (BurstParams::default(), FlareParams::default()),

            Preset::HoverGlow => (
                BurstParams {
                    mode: AnimationMode::HoverReactive,
                    ray_count: 0,
                    distortion: 0.6,
                    noise_amount: 0.8,
                    ..BurstParams::default()
                },
                FlareParams {
                    intensity: 1.2,
                    ..FlareParams::default()
                },
            ),

            Preset::PrismRays => {
                let mut colors = [Vec4::ZERO; crate::MAX_BURST_COLORS];
                colors[0] = Vec4::new(0.9, 0.2, 1.0, 1.0);
                colors[1] = Vec4::new(0.2, 0.6, 1.0, 1.0);
                colors[2] = Vec4::new(0.1, 1.0, 0.8, 1.0);
                (
                    BurstParams {
                        mode: AnimationMode::PlanarRotate,
                        ray_count: 12,
                        colors,
                        color_count: 3,
                        ..BurstParams::default()
                    },
                    FlareParams::default(),
                )
            }

            Preset::EmberDrift => {
                let mut flare_colors = [Vec3::ZERO; crate::MAX_FLARE_COLORS];
                flare_colors[0] = Vec3::new(1.0, 0.3, 0.05);
                flare_colors[1] = Vec3::new(1.0, 0.6, 0.1);
                flare_colors[2] = Vec3::new(1.0, 0.85, 0.4);
                (
                    BurstParams {
                        speed: 0.6,
                        distortion: 1.4,
                        intensity: 0.9,
                        offset: Vec2::ZERO,
                        ..BurstParams::default()
                    },
                    FlareParams {
                        colors: flare_colors,
                        color_count: 3,
                        ..FlareParams::default()
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_four_presets() {
        assert_eq!(Preset::ALL.len(), 4);
    }

    #[test]
    fn all_names_are_nonempty_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for p in Preset::ALL {
            assert!(!p.name().is_empty(), "{p:?} has empty name");
            assert!(seen.insert(p.name()), "duplicate preset name: {}", p.name());
        }
    }

    #[test]
    fn built_configs_survive_sanitization_unchanged() {
        // Presets must ship in-range values; sanitizing is a no-op.
        for p in Preset::ALL {
            let (burst, flare) = p.build();
            let b2 = burst.clone().sanitized();
            let f2 = flare.clone().sanitized();
            assert_eq!(burst.color_count, b2.color_count, "{p:?}");
            assert_eq!(burst.distortion, b2.distortion, "{p:?}");
            assert_eq!(flare.color_count, f2.color_count, "{p:?}");
            assert_eq!(flare.intensity, f2.intensity, "{p:?}");
        }
    }

    #[test]
    fn hover_glow_disables_the_ray_comb() {
        let (burst, _) = Preset::HoverGlow.build();
        assert_eq!(burst.ray_count, 0);
        assert_eq!(burst.mode, AnimationMode::HoverReactive);
    }

    #[test]
    fn prism_rays_uses_a_configured_gradient() {
        let (burst, _) = Preset::PrismRays.build();
        assert_eq!(burst.color_count, 3);
        assert!(burst.colors[0].w > 0.0);
    }
}
