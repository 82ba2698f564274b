use glam::Vec2;

// ---------------------------------------------------------------------------
// Anchor smoothing
// ---------------------------------------------------------------------------

/// Exponential smoothing of the anchor/pointer position for the
/// hover-reactive mode. Advance exactly once per frame with the real
/// wall-clock delta; the filter stays stable under variable frame rates.
#[derive(Debug, Clone)]
pub struct AnchorFilter {
    value: Vec2,
    dampness: f32,
}

impl AnchorFilter {
    pub fn new(initial: Vec2, dampness: f32) -> Self {
        Self {
            value: initial,
            dampness: dampness.clamp(0.0, 1.0),
        }
    }

    /// Decay toward `target` over `dt` seconds and return the new value.
    pub fn advance(&mut self, target: Vec2, dt: f32) -> Vec2 {
        let time_constant = 0.02 + self.dampness * 0.5;
        let alpha = 1.0 - (-dt.max(0.0) / time_constant).exp();
        self.value += (target - self.value) * alpha;
        self.value
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }
}

// ---------------------------------------------------------------------------
// Animation clock
// ---------------------------------------------------------------------------

/// Monotonic animation time, frozen while paused.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    elapsed: f32,
    paused: bool,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one frame's wall-clock delta and return the elapsed
    /// animation time. Negative deltas are ignored.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if !self.paused {
            self.elapsed += dt.max(0.0);
        }
        self.elapsed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- AnchorFilter ---------------------------------------------------------

    #[test]
    fn filter_approaches_a_constant_target_monotonically() {
        let target = Vec2::new(1.0, 1.0);
        let mut filter = AnchorFilter::new(Vec2::ZERO, 0.5);
        let mut last_dist = (target - filter.value()).length();
        for _ in 0..200 {
            filter.advance(target, 1.0 / 60.0);
            let dist = (target - filter.value()).length();
            assert!(dist <= last_dist + 1e-7, "distance grew: {dist} > {last_dist}");
            last_dist = dist;
        }
        assert!(last_dist < 0.05, "did not converge: {last_dist}");
    }

    #[test]
    fn filter_never_overshoots() {
        let target = Vec2::new(1.0, 0.0);
        let mut filter = AnchorFilter::new(Vec2::ZERO, 0.0);
        for _ in 0..500 {
            let v = filter.advance(target, 1.0 / 30.0);
            assert!(v.x <= 1.0 + 1e-6, "overshoot: {}", v.x);
        }
    }

    #[test]
    fn zero_dampness_still_has_a_floor_time_constant() {
        // tc = 0.02 even at dampness 0: one 60 Hz step cannot snap fully.
        let mut filter = AnchorFilter::new(Vec2::ZERO, 0.0);
        let v = filter.advance(Vec2::ONE, 1.0 / 60.0);
        assert!(v.x < 1.0);
        assert!(v.x > 0.0);
    }

    #[test]
    fn higher_dampness_tracks_more_slowly() {
        let mut loose = AnchorFilter::new(Vec2::ZERO, 0.1);
        let mut stiff = AnchorFilter::new(Vec2::ZERO, 0.9);
        loose.advance(Vec2::ONE, 0.016);
        stiff.advance(Vec2::ONE, 0.016);
        assert!(loose.value().x > stiff.value().x);
    }

    #[test]
    fn dampness_is_clamped_at_construction() {
        // dampness 99 must behave like dampness 1, not a huge time constant.
        let mut wild = AnchorFilter::new(Vec2::ZERO, 99.0);
        let mut unit = AnchorFilter::new(Vec2::ZERO, 1.0);
        let a = wild.advance(Vec2::ONE, 0.016);
        let b = unit.advance(Vec2::ONE, 0.016);
        assert_eq!(a, b);
    }

    #[test]
    fn negative_delta_leaves_the_filter_in_place() {
        let mut filter = AnchorFilter::new(Vec2::ZERO, 0.5);
        let v = filter.advance(Vec2::ONE, -1.0);
        assert_eq!(v, Vec2::ZERO);
    }

    // --- AnimationClock -------------------------------------------------------

    #[test]
    fn clock_accumulates_deltas() {
        let mut clock = AnimationClock::new();
        clock.tick(0.5);
        clock.tick(0.25);
        assert!((clock.elapsed() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn clock_freezes_while_paused() {
        let mut clock = AnimationClock::new();
        clock.tick(1.0);
        clock.toggle_paused();
        clock.tick(5.0);
        assert!((clock.elapsed() - 1.0).abs() < 1e-6);
        clock.toggle_paused();
        clock.tick(0.5);
        assert!((clock.elapsed() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn clock_ignores_negative_deltas() {
        let mut clock = AnimationClock::new();
        clock.tick(2.0);
        clock.tick(-3.0);
        assert!((clock.elapsed() - 2.0).abs() < 1e-6);
    }
}
