//! CPU rendition of the fragment program in [`crate::shaders::FRAGMENT_SRC`].
//!
//! Each function evaluates the same expression as its GLSL counterpart in
//! `f32`, so the behaviour of the effect (where the sea starts, how far a
//! texel moves, whether the noise has seams) can be checked without a GPU.

use glam::{Vec2, Vec4};

/// Fractional height, from the top, where sea meets sky.
pub const HORIZON: f32 = 0.47;
/// Half-width of the soft band around the horizon.
pub const TRANSITION: f32 = 0.03;

/// Below this depth the texture coordinate is left alone.
pub const DISPLACE_THRESHOLD: f32 = 0.001;
/// Below this depth no shimmer is added.
pub const SHIMMER_THRESHOLD: f32 = 0.01;

/// Vertical motion relative to horizontal.
const VERTICAL_DAMPING: f32 = 0.6;

/// Largest horizontal offset before depth scaling: the sum of every `dx` amplitude,
/// noise terms contributing at most half their weight.
pub const MAX_DX: f32 = 0.0035 + 0.002 + 0.002 + 0.0012 + 0.5 * 0.0018 + 0.5 * 0.0008;
/// Largest vertical offset before depth scaling and damping.
pub const MAX_DY: f32 = 0.002 + 0.0015 + 0.0012 + 0.5 * 0.001;

/// GLSL `fract`: `x - floor(x)`, which differs from Rust's `f32::fract` for negatives.
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `mix`.
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// GLSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Pseudo-random value in `[0, 1)` for a lattice point.
pub fn hash(p: Vec2) -> f32 {
    fract((p.dot(Vec2::new(127.1, 311.7))).sin() * 43758.5453)
}

/// Smooth value noise.
pub fn noise(p: Vec2) -> f32 {
    let cell = p.floor();
    noise_in_cell(cell, p - cell)
}

/// Value noise evaluated inside the lattice cell whose lower corner is `cell`,
/// at local `offset` (normally in `[0, 1]²`).
pub fn noise_in_cell(cell: Vec2, offset: Vec2) -> f32 {
    let f = offset * offset * (Vec2::splat(3.0) - 2.0 * offset);
    mix(
        mix(hash(cell), hash(cell + Vec2::X), f.x),
        mix(hash(cell + Vec2::Y), hash(cell + Vec2::ONE), f.x),
        f.y,
    )
}

/// 0 above the horizon band, ramping to 1 below it.
pub fn water_depth(v: f32) -> f32 {
    smoothstep(HORIZON - TRANSITION, HORIZON + TRANSITION, v)
}

/// Factor every wave offset is multiplied by at height `v`.
pub fn depth_weight(v: f32) -> f32 {
    let depth = water_depth(v);
    depth * depth
}

/// Result of displacing one texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    pub depth: f32,
    /// Offset added to the input coordinate, before clamping.
    pub offset: Vec2,
    /// Coordinate the texture is sampled at.
    pub uv: Vec2,
}

/// Moves `uv` by the three wave layers at time `time` (seconds).
///
/// `aspect` is drawable width over height; it keeps wave spacing the same on
/// both axes.
pub fn displace(uv: Vec2, time: f32, aspect: f32) -> WaveSample {
    let depth = water_depth(uv.y);
    if depth <= DISPLACE_THRESHOLD {
        return WaveSample {
            depth,
            offset: Vec2::ZERO,
            uv,
        };
    }

    let t = time;
    let d = depth * depth;
    let px = uv.x * aspect;

    let dx1 = (px * 4.0 + t * 0.4).sin() * 0.0035
        + (px * 2.5 - t * 0.3 + uv.y * 3.0).sin() * 0.002;
    let dy1 = (px * 3.0 + t * 0.35 + 1.0).sin() * 0.002
        + (px * 1.8 - t * 0.25 + uv.y * 2.0).sin() * 0.0015;

    let dx2 = (px * 8.0 + t * 0.6 + uv.y * 5.0).sin() * 0.002
        + (px * 6.0 - t * 0.5 + 2.0).sin() * 0.0012;
    let dy2 = (px * 7.0 + t * 0.5 + uv.y * 4.0).sin() * 0.0012;

    let np = Vec2::new(px * 15.0, uv.y * 12.0);
    let n1 = noise(np + Vec2::new(t * 0.3, t * 0.1));
    let n2 = noise(np * 1.7 + Vec2::new(-t * 0.25, t * 0.15) + Vec2::splat(50.0));
    let dx3 = (n1 - 0.5) * 0.0018 + (n2 - 0.5) * 0.0008;
    let dy3 = (noise(Vec2::new(np.y, np.x) + Vec2::new(t * 0.2, -t * 0.12)) - 0.5) * 0.001;

    let offset = Vec2::new(
        (dx1 + dx2 + dx3) * d,
        (dy1 + dy2 + dy3) * d * VERTICAL_DAMPING,
    );

    WaveSample {
        depth,
        offset,
        uv: (uv + offset).clamp(Vec2::ZERO, Vec2::ONE),
    }
}

/// Brightness added to every colour channel at the displaced coordinate `uv`.
pub fn shimmer(uv: Vec2, time: f32, aspect: f32, depth: f32) -> f32 {
    if depth <= SHIMMER_THRESHOLD {
        return 0.0;
    }
    let px = uv.x * aspect;
    (px * 12.0 + time * 0.7).sin() * (uv.y * 8.0 - time * 0.4).sin() * 0.02 * depth
}

/// Full fragment evaluation: `sample` stands in for `texture2D(u_tex, ·)`.
pub fn shade<S>(sample: S, uv: Vec2, time: f32, resolution: Vec2) -> Vec4
where
    S: Fn(Vec2) -> Vec4,
{
    let aspect = resolution.x / resolution.y;
    let wave = displace(uv, time, aspect);
    let color = sample(wave.uv);
    let glint = shimmer(wave.uv, time, aspect, wave.depth);
    color + Vec4::new(glint, glint, glint, 0.0)
}
