//! Target formations for the particle set.
//!
//! Each [`ShapeKind`] has one independent law that maps a particle index to a
//! point. The laws are stateless; all randomness comes from the caller's RNG so
//! a seeded RNG reproduces a formation exactly.

use crate::error::FormationError;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Heart,
    Flower,
    Star,
    Tree,
    Zen,
    Fireworks,
}

impl ShapeKind {
    /// All kinds in menu order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Star,
        ShapeKind::Tree,
        ShapeKind::Zen,
        ShapeKind::Fireworks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Heart => "Heart",
            ShapeKind::Flower => "Flower",
            ShapeKind::Star => "Star",
            ShapeKind::Tree => "Christmas Tree",
            ShapeKind::Zen => "Sphere (Zen)",
            ShapeKind::Fireworks => "Fireworks",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            ShapeKind::Heart => "heart",
            ShapeKind::Flower => "flower",
            ShapeKind::Star => "star",
            ShapeKind::Tree => "tree",
            ShapeKind::Zen => "zen",
            ShapeKind::Fireworks => "fireworks",
        }
    }

    /// Upper bound on the distance from the origin of any point the law produces.
    pub fn max_radius(self) -> f32 {
        match self {
            ShapeKind::Heart => 13.5,
            ShapeKind::Flower => 8.5,
            ShapeKind::Star => 11.5,
            ShapeKind::Tree => 13.0,
            ShapeKind::Zen => 23.0,
            ShapeKind::Fireworks => 15.0,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShapeKind {
    type Err = FormationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ShapeKind::ALL
            .into_iter()
            .find(|k| {
                trimmed.eq_ignore_ascii_case(k.short_name()) || trimmed.eq_ignore_ascii_case(k.label())
            })
            .ok_or_else(|| FormationError::UnknownShape(s.to_string()))
    }
}

/// Sample `count` target points for `kind`. `count == 0` yields an empty vector.
pub fn generate_shape<R: Rng + ?Sized>(kind: ShapeKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|i| match kind {
            ShapeKind::Heart => heart_point(rng),
            ShapeKind::Flower => flower_point(rng),
            ShapeKind::Star => star_point(i, rng),
            ShapeKind::Tree => tree_point(rng),
            ShapeKind::Zen => zen_point(i, count, rng),
            ShapeKind::Fireworks => fireworks_point(rng),
        })
        .collect()
}

/// Symmetric jitter in `[-half, half)`.
#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * half
}

fn heart_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const SCALE: f32 = 0.5;
    let t = rng.gen_range(0.0..TAU);
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let z = jitter(rng, 2.5);
    Vec3::new(x, y, z) * SCALE
}

// Even indices sit on the outer radius, odd ones on the inner radius.
fn star_point<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Vec3 {
    let t = rng.gen_range(0.0..TAU);
    let base = if index % 2 == 0 { 10.0 } else { 4.0 };
    let r = base + jitter(rng, 1.0);
    Vec3::new(t.cos() * r, t.sin() * r, jitter(rng, 2.0))
}

fn tree_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const HEIGHT: f32 = 20.0;
    const GROUND_CUTOFF: f32 = 0.6;
    let mut h = rng.gen_range(0.0..HEIGHT);
    if h < GROUND_CUTOFF {
        h = 0.0;
    }
    let angle = rng.gen_range(0.0..TAU);
    let r = (HEIGHT - h) * 0.4;
    // No jitter on the ground disc so the base stays crisp.
    let jitter_scale = (h / 2.0).min(1.0);
    Vec3::new(
        angle.cos() * r + jitter(rng, 0.75) * jitter_scale,
        h - HEIGHT / 2.0,
        angle.sin() * r + jitter(rng, 0.75) * jitter_scale,
    )
}

fn zen_point<R: Rng + ?Sized>(index: usize, count: usize, rng: &mut R) -> Vec3 {
    let n = count as f32;
    let phi = (-1.0 + 2.0 * index as f32 / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    let noise = (phi * 4.0).sin() * (theta * 3.0).cos() * 0.4
        + (phi * 2.5).sin() * (theta * 5.0).sin() * 0.3
        + (phi * 6.0).cos() * 0.2;
    let radius = 10.0 * (1.0 + noise) * rng.gen_range(0.8..1.2);
    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    )
}

fn flower_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const PETALS: f32 = 5.0;
    let t = rng.gen_range(0.0..TAU);
    let r = 8.0 * (PETALS * t).cos();
    Vec3::new(r * t.cos(), r * t.sin(), jitter(rng, 1.5))
}

fn fireworks_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let radius = rng.gen_range(0.0..15.0);
    let theta = rng.gen_range(0.0..TAU);
    let phi = rng.gen_range(0.0..PI);
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}
