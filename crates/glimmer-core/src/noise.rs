use glam::Vec2;

// ---------------------------------------------------------------------------
// Lattice hash + layered noise
// ---------------------------------------------------------------------------

/// Octave weights for [`layered_noise`]. Chosen for contrast, not energy
/// conservation.
const OCTAVE_WEIGHTS: [f32; 5] = [0.40, 0.25, 0.20, 0.10, 0.05];

/// Fixed rotation applied to the scrolled noise position, in radians.
const LATTICE_ROTATION: f32 = 0.31;

/// Coordinate wrap period; bounds lattice growth over long runtimes.
const WRAP: f32 = 1024.0;

/// Deterministic pseudo-random value for a 2D lattice point, in [0, 1).
pub fn hash(p: Vec2) -> f32 {
    let h = p.dot(Vec2::new(127.1, 311.7));
    (h.sin() * 43758.547).rem_euclid(1.0)
}

/// Five-octave layered noise: a time-scrolled, slightly rotated copy of
/// `position` is hashed at doubling frequencies with decreasing weights.
pub fn layered_noise(position: Vec2, time: f32) -> f32 {
    let scrolled = position + Vec2::new(time * 0.35, time * 0.21);
    let (s, c) = LATTICE_ROTATION.sin_cos();
    let rotated = Vec2::new(
        c * scrolled.x - s * scrolled.y,
        s * scrolled.x + c * scrolled.y,
    );
    let p = Vec2::new(rotated.x.rem_euclid(WRAP), rotated.y.rem_euclid(WRAP));

    let mut sum = 0.0;
    let mut freq = 1.0;
    for w in OCTAVE_WEIGHTS {
        sum += w * hash(p * freq);
        freq *= 2.0;
    }
    sum
}

// ---------------------------------------------------------------------------
// Scalar easing helpers (shared by both engines)
// ---------------------------------------------------------------------------

/// Hermite smoothstep between `edge0` and `edge1`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Quintic ease over [0, 1].
pub fn smootherstep01(x: f32) -> f32 {
    let t = x.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
