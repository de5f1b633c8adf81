use rand::Rng;
use serde::{Deserialize, Serialize};

/// a vertex at working resolution. coordinates stay inside [0, work_size]
/// once the mutation operator has clamped them; freshly generated genes use
/// integer-valued coordinates in [0, work_size) like the reference.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// RGB channels in [0, 255] stored as f32 so fractional mutation deltas
/// accumulate instead of rounding away. alpha is floored at `ALPHA_FLOOR`
/// so a gene can never mutate itself invisible.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// lowest alpha a gene may reach
pub const ALPHA_FLOOR: f32 = 0.1;

/// one triangle: three vertices plus an RGBA fill. mutation always produces
/// a new value, never an in-place edit visible to other holders.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangleGene {
    pub points: [Point; 3],
    pub color: Color,
}

impl TriangleGene {
    /// fully randomized triangle: integer coordinates in [0, size),
    /// integer RGB in [0, 255), alpha fixed at 0.5 (reference behavior)
    pub fn random<R: Rng>(rng: &mut R, size: u32) -> Self {
        let point = |rng: &mut R| Point {
            x: rng.random_range(0..size) as f32,
            y: rng.random_range(0..size) as f32,
        };
        let points = [point(rng), point(rng), point(rng)];
        let color = Color {
            r: rng.random_range(0..255) as f32,
            g: rng.random_range(0..255) as f32,
            b: rng.random_range(0..255) as f32,
            a: 0.5,
        };
        TriangleGene { points, color }
    }
}

/// ordered, fixed-length sequence of triangle genes. order is draw order:
/// later genes occlude earlier ones where they overlap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub genes: Vec<TriangleGene>,
}

impl Genome {
    /// fresh random genome of `len` triangles constrained to a square
    /// canvas of `size` pixels
    pub fn random<R: Rng>(rng: &mut R, len: usize, size: u32) -> Self {
        profiling::scope!("Genome::random");
        let genes = (0..len).map(|_| TriangleGene::random(rng, size)).collect();
        Genome { genes }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
