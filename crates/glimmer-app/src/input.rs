use glimmer_core::presets::Preset;
use glimmer_core::AnimationMode;

// ---------------------------------------------------------------------------
// Key — windowing-library-independent key representation
// ---------------------------------------------------------------------------

/// A keyboard key, independent of any windowing library.
///
/// `main.rs` maps `winit::keyboard::PhysicalKey` → `Key`; everything else
/// in the input pipeline works purely with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Space,
    Equal, // = / + (same physical key; Shift state ignored)
    Minus, // - / _ (same physical key; Shift state ignored)
    M,
    P,
    R,
    Q,
    Escape,
}

// ---------------------------------------------------------------------------
// InputAction — what the app does in response to input
// ---------------------------------------------------------------------------

/// High-level action produced by a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    LoadPreset(Preset),
    CycleNextPreset,
    TogglePause,
    CycleAnimationMode,
    IntensityUp,
    IntensityDown,
    Reset,
    Quit,
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Translate a `Key` press into an `InputAction`, if the key is mapped.
    pub fn on_key(&self, key: Key) -> Option<InputAction> {
        match key {
            Key::Digit1 => Some(InputAction::LoadPreset(Preset::SpectralBurst)),
            Key::Digit2 => Some(InputAction::LoadPreset(Preset::HoverGlow)),
            Key::Digit3 => Some(InputAction::LoadPreset(Preset::PrismRays)),
            Key::Digit4 => Some(InputAction::LoadPreset(Preset::EmberDrift)),
            Key::Space => Some(InputAction::CycleNextPreset),
            Key::P => Some(InputAction::TogglePause),
            Key::M => Some(InputAction::CycleAnimationMode),
            Key::Equal => Some(InputAction::IntensityUp),
            Key::Minus => Some(InputAction::IntensityDown),
            Key::R => Some(InputAction::Reset),
            Key::Q | Key::Escape => Some(InputAction::Quit),
        }
    }
}

// ---------------------------------------------------------------------------
// Pure state-adjustment helpers
// ---------------------------------------------------------------------------

/// Cycle the burst animation mode: Planar → Spatial3d → HoverReactive → …
pub fn next_mode(mode: AnimationMode) -> AnimationMode {
    match mode {
        AnimationMode::PlanarRotate => AnimationMode::SpatialRotate3d,
        AnimationMode::SpatialRotate3d => AnimationMode::HoverReactive,
        AnimationMode::HoverReactive => AnimationMode::PlanarRotate,
    }
}

/// Nudge an intensity value, clamped to \[0, 4\].
pub fn nudge_intensity(value: f32, delta: f32) -> f32 {
    (value + delta).clamp(0.0, 4.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new()
    }

    // --- Digit keys load the correct preset -----------------------------------

    #[test]
    fn digit_1_loads_spectral_burst() {
        assert_eq!(
            input().on_key(Key::Digit1),
            Some(InputAction::LoadPreset(Preset::SpectralBurst))
        );
    }

    #[test]
    fn digit_2_loads_hover_glow() {
        assert_eq!(
            input().on_key(Key::Digit2),
            Some(InputAction::LoadPreset(Preset::HoverGlow))
        );
    }

    #[test]
    fn digit_3_loads_prism_rays() {
        assert_eq!(
            input().on_key(Key::Digit3),
            Some(InputAction::LoadPreset(Preset::PrismRays))
        );
    }

    #[test]
    fn digit_4_loads_ember_drift() {
        assert_eq!(
            input().on_key(Key::Digit4),
            Some(InputAction::LoadPreset(Preset::EmberDrift))
        );
    }

    // --- Other key mappings ---------------------------------------------------

    #[test]
    fn space_cycles_next_preset() {
        assert_eq!(
            input().on_key(Key::Space),
            Some(InputAction::CycleNextPreset)
        );
    }

    #[test]
    fn p_toggles_pause() {
        assert_eq!(input().on_key(Key::P), Some(InputAction::TogglePause));
    }

    #[test]
    fn m_cycles_animation_mode() {
        assert_eq!(
            input().on_key(Key::M),
            Some(InputAction::CycleAnimationMode)
        );
    }

    #[test]
    fn equal_and_minus_nudge_intensity() {
        assert_eq!(input().on_key(Key::Equal), Some(InputAction::IntensityUp));
        assert_eq!(input().on_key(Key::Minus), Some(InputAction::IntensityDown));
    }

    #[test]
    fn r_resets() {
        assert_eq!(input().on_key(Key::R), Some(InputAction::Reset));
    }

    #[test]
    fn q_and_escape_quit() {
        assert_eq!(input().on_key(Key::Q), Some(InputAction::Quit));
        assert_eq!(input().on_key(Key::Escape), Some(InputAction::Quit));
    }

    #[test]
    fn all_digit_keys_map_to_different_presets() {
        let presets: Vec<_> = [Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4]
            .iter()
            .map(|&k| input().on_key(k))
            .collect();

        for i in 0..presets.len() {
            for j in (i + 1)..presets.len() {
                assert_ne!(presets[i], presets[j], "keys {i} and {j} collide");
            }
        }
    }

    // --- Mode cycling ---------------------------------------------------------

    #[test]
    fn mode_cycle_visits_all_modes_and_wraps() {
        let mut mode = AnimationMode::PlanarRotate;
        let mut seen = vec![mode];
        for _ in 0..2 {
            mode = next_mode(mode);
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                AnimationMode::PlanarRotate,
                AnimationMode::SpatialRotate3d,
                AnimationMode::HoverReactive,
            ]
        );
        assert_eq!(next_mode(mode), AnimationMode::PlanarRotate);
    }

    // --- Intensity nudging ----------------------------------------------------

    #[test]
    fn intensity_nudges_are_clamped() {
        assert_eq!(nudge_intensity(0.1, -0.25), 0.0);
        assert_eq!(nudge_intensity(3.9, 0.25), 4.0);
    }

    #[test]
    fn intensity_nudges_accumulate_in_range() {
        let v = nudge_intensity(nudge_intensity(1.0, 0.25), 0.25);
        assert!((v - 1.5).abs() < 1e-6);
    }
}
