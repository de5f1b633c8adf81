use rand::Rng;

use crate::dna::{Genome, TriangleGene, ALPHA_FLOOR};

/// Tunable mutation constants. The defaults reproduce the reference
/// implementation exactly; they are empirically chosen, with no derivation
/// behind them, so they are configuration rather than law.
#[derive(Clone, Debug)]
pub struct MutateConfig {
    /// square canvas edge at working resolution
    pub work_size: u32,
    /// max vertex offset per mutation, uniform in [-point_drift, point_drift)
    pub point_drift: f32,
    /// max RGB channel offset per mutation, uniform in [-color_drift, color_drift)
    pub color_drift: f32,
    /// max alpha offset per mutation, uniform in [-alpha_drift, alpha_drift)
    pub alpha_drift: f32,
    /// probability the mutation touches geometry; otherwise it touches color
    pub geometry_rate: f32,
    /// probability the chosen gene is replaced wholesale by a fresh random
    /// triangle, applied after (and overriding) the small perturbation
    pub replace_rate: f32,
}

impl Default for MutateConfig {
    fn default() -> Self {
        Self {
            work_size: 75,
            point_drift: 20.0,
            color_drift: 20.0,
            alpha_drift: 0.1,
            geometry_rate: 0.5,
            replace_rate: 0.01,
        }
    }
}

/// Produce a neighboring genome by perturbing exactly one gene.
///
/// Pure with respect to `genome`: the input is cloned, never edited in
/// place. Touching a single gene per call keeps each iteration's visual
/// delta small, which is what lets hill climbing converge instead of
/// thrashing.
pub fn mutate<R: Rng>(genome: &Genome, cfg: &MutateConfig, rng: &mut R) -> Genome {
    profiling::scope!("mutate");
    let mut next = genome.clone();
    if next.is_empty() {
        return next;
    }

    let index = rng.random_range(0..next.len());
    let gene = &mut next.genes[index];

    if rng.random::<f32>() < cfg.geometry_rate {
        perturb_point(gene, cfg, rng);
    } else {
        perturb_color(gene, cfg, rng);
    }

    // rare total randomization keeps the search from stagnating on genes
    // that drifted into a useless corner of the space
    if rng.random::<f32>() < cfg.replace_rate {
        *gene = TriangleGene::random(rng, cfg.work_size);
    }

    next
}

/// jitter one vertex; both coordinates move independently and are clamped
/// into [0, work_size]
pub(crate) fn perturb_point<R: Rng>(gene: &mut TriangleGene, cfg: &MutateConfig, rng: &mut R) {
    let p = &mut gene.points[rng.random_range(0..3)];
    let max = cfg.work_size as f32;
    p.x = (p.x + rng.random_range(-cfg.point_drift..cfg.point_drift)).clamp(0.0, max);
    p.y = (p.y + rng.random_range(-cfg.point_drift..cfg.point_drift)).clamp(0.0, max);
}

/// jitter all four color channels; RGB clamp to [0, 255], alpha to
/// [ALPHA_FLOOR, 1.0] so the gene keeps a visible contribution
pub(crate) fn perturb_color<R: Rng>(gene: &mut TriangleGene, cfg: &MutateConfig, rng: &mut R) {
    let c = &mut gene.color;
    c.r = (c.r + rng.random_range(-cfg.color_drift..cfg.color_drift)).clamp(0.0, 255.0);
    c.g = (c.g + rng.random_range(-cfg.color_drift..cfg.color_drift)).clamp(0.0, 255.0);
    c.b = (c.b + rng.random_range(-cfg.color_drift..cfg.color_drift)).clamp(0.0, 255.0);
    c.a = (c.a + rng.random_range(-cfg.alpha_drift..cfg.alpha_drift)).clamp(ALPHA_FLOOR, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::{Color, Point};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn differing_genes(a: &Genome, b: &Genome) -> usize {
        a.genes
            .iter()
            .zip(&b.genes)
            .filter(|(ga, gb)| ga != gb)
            .count()
    }

    #[test]
    fn mutation_leaves_input_untouched() {
        let mut rng = Pcg32::seed_from_u64(11);
        let cfg = MutateConfig::default();
        let genome = Genome::random(&mut rng, 150, cfg.work_size);
        let copy = genome.clone();
        let _ = mutate(&genome, &cfg, &mut rng);
        assert_eq!(genome, copy);
    }

    #[test]
    fn mutation_touches_at_most_one_gene() {
        let mut rng = Pcg32::seed_from_u64(12);
        let cfg = MutateConfig::default();
        let genome = Genome::random(&mut rng, 150, cfg.work_size);

        let mut exactly_one = 0;
        for _ in 0..200 {
            let next = mutate(&genome, &cfg, &mut rng);
            let diff = differing_genes(&genome, &next);
            assert!(diff <= 1, "mutation changed {diff} genes");
            if diff == 1 {
                exactly_one += 1;
            }
        }
        // a no-op mutation needs every perturbed value to clamp back to
        // itself; that should essentially never happen
        assert!(exactly_one >= 195);
    }

    #[test]
    fn chained_mutations_stay_bounded() {
        let mut rng = Pcg32::seed_from_u64(13);
        let cfg = MutateConfig::default();
        let mut genome = Genome::random(&mut rng, 150, cfg.work_size);

        for _ in 0..1000 {
            genome = mutate(&genome, &cfg, &mut rng);
        }
        let max = cfg.work_size as f32;
        for gene in &genome.genes {
            for p in &gene.points {
                assert!(p.x >= 0.0 && p.x <= max);
                assert!(p.y >= 0.0 && p.y <= max);
            }
            let c = gene.color;
            for ch in [c.r, c.g, c.b] {
                assert!((0.0..=255.0).contains(&ch));
            }
            assert!(c.a >= ALPHA_FLOOR && c.a <= 1.0);
        }
    }

    #[test]
    fn alpha_clamps_to_floor_never_below() {
        let mut rng = Pcg32::seed_from_u64(14);
        let cfg = MutateConfig::default();
        let mut gene = TriangleGene {
            points: [Point { x: 0.0, y: 0.0 }, Point { x: 10.0, y: 0.0 }, Point { x: 0.0, y: 10.0 }],
            color: Color { r: 0.0, g: 0.0, b: 0.0, a: ALPHA_FLOOR },
        };
        // enough draws to hit negative alpha deltas many times
        for _ in 0..500 {
            perturb_color(&mut gene, &cfg, &mut rng);
            assert!(gene.color.a >= ALPHA_FLOOR);
        }
    }

    #[test]
    fn same_seed_same_mutation() {
        let cfg = MutateConfig::default();
        let mut seed_rng = Pcg32::seed_from_u64(15);
        let genome = Genome::random(&mut seed_rng, 150, cfg.work_size);

        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        let a = mutate(&genome, &cfg, &mut rng_a);
        let b = mutate(&genome, &cfg, &mut rng_b);
        assert_eq!(a, b);
    }
}
