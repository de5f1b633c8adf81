use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::dna::Genome;
use crate::error::EngineError;
use crate::fitness::{probe_pixel, sse_rgb, PixelProbe};
use crate::mutate::{mutate, MutateConfig};
use crate::render::CpuRenderer;
use crate::settings::EvolverSettings;

/// Driver lifecycle. `Uninitialized` until a target buffer arrives; loading
/// one (re)randomizes the genome and moves straight to `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Uninitialized,
    Running,
    Paused,
}

/// What one driver step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// candidate scored strictly better and replaced the current genome
    Accepted,
    /// candidate scored equal or worse and was discarded
    Rejected,
    /// engine was uninitialized or paused; nothing happened
    Idle,
}

/// Point-in-time view of the run, for display collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub fitness: f64,
    pub genome: Genome,
}

/// (1+1) hill-climbing session: one genome, one writer, no ambient state.
///
/// Every observable moment between steps upholds the invariant that
/// `current_fitness == sse_rgb(render(genome), target)` — the genome and its
/// score are never out of sync.
pub struct Engine {
    cfg: MutateConfig,
    dna_size: usize,
    seed: u64,
    rng: Pcg32,
    renderer: CpuRenderer,
    /// immutable for the lifetime of a run, un-premultiplied RGBA
    target_rgba: Option<Vec<u8>>,
    genome: Genome,
    current_rgba: Vec<u8>,
    current_fitness: f64,
    /// scratch for candidate renders, reused across steps
    candidate_rgba: Vec<u8>,
    generation: u64,
    state: RunState,
}

impl Engine {
    pub fn new(settings: &EvolverSettings) -> Self {
        let cfg = settings.to_mutate_config();
        Engine {
            renderer: CpuRenderer::new(cfg.work_size),
            cfg,
            dna_size: settings.dna_size,
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            target_rgba: None,
            genome: Genome { genes: Vec::new() },
            current_rgba: Vec::new(),
            current_fitness: f64::INFINITY,
            candidate_rgba: Vec::new(),
            generation: 0,
            state: RunState::Uninitialized,
        }
    }

    /// Load a new target buffer and (re)start the run: generation back to 0,
    /// fresh random genome, initial fitness computed, state `Running`.
    ///
    /// The buffer must already be resampled to the working resolution by the
    /// image-loading collaborator.
    pub fn load_target(&mut self, rgba: Vec<u8>) -> Result<(), EngineError> {
        profiling::scope!("load_target");
        let size = self.cfg.work_size;
        let expected = (size as usize) * (size as usize) * 4;
        if rgba.len() != expected {
            return Err(EngineError::TargetSizeMismatch {
                size,
                expected,
                actual: rgba.len(),
            });
        }

        // reseed so a run is replayable from (seed, target) alone
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.genome = Genome::random(&mut self.rng, self.dna_size, size);
        self.renderer.render_into(&self.genome, &mut self.current_rgba);
        self.current_fitness = sse_rgb(&self.current_rgba, &rgba);
        self.target_rgba = Some(rgba);
        self.generation = 0;
        self.state = RunState::Running;

        tracing::info!(
            work_size = size,
            dna_size = self.dna_size,
            fitness = self.current_fitness,
            "target loaded, run reset"
        );
        Ok(())
    }

    /// One mutate/render/score/accept-or-reject iteration.
    ///
    /// Ties are rejected: only a strictly better candidate replaces the
    /// current genome. The generation counter advances on accept and reject
    /// alike. No-op unless `Running`.
    pub fn step(&mut self) -> StepOutcome {
        profiling::scope!("step");
        if self.state != RunState::Running {
            return StepOutcome::Idle;
        }
        // Running implies a target is present
        let target = self.target_rgba.as_ref().expect("running without target");

        let candidate = mutate(&self.genome, &self.cfg, &mut self.rng);
        self.renderer.render_into(&candidate, &mut self.candidate_rgba);
        let candidate_fitness = sse_rgb(&self.candidate_rgba, target);

        let outcome = if candidate_fitness < self.current_fitness {
            self.genome = candidate;
            std::mem::swap(&mut self.current_rgba, &mut self.candidate_rgba);
            self.current_fitness = candidate_fitness;
            StepOutcome::Accepted
        } else {
            StepOutcome::Rejected
        };

        self.generation += 1;
        outcome
    }

    /// Freeze the run exactly where it stands. No-op unless `Running`.
    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            tracing::debug!(generation = self.generation, "paused");
        }
    }

    /// Continue from the frozen state, with no re-randomization.
    /// No-op unless `Paused`.
    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
            tracing::debug!(generation = self.generation, "resumed");
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fitness(&self) -> f64 {
        self.current_fitness
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Current {generation, fitness, genome} for external consumers.
    pub fn snapshot(&self) -> Result<Snapshot, EngineError> {
        if self.state == RunState::Uninitialized {
            return Err(EngineError::NotReady);
        }
        Ok(Snapshot {
            generation: self.generation,
            fitness: self.current_fitness,
            genome: self.genome.clone(),
        })
    }

    /// Diagnostic query backing the pixel-diff inspector panel: target vs.
    /// rendered channels at (x, y) plus that pixel's squared-error score.
    /// Read-only; never perturbs the run.
    pub fn inspect_pixel(&self, x: u32, y: u32) -> Result<PixelProbe, EngineError> {
        let target = self.target_rgba.as_ref().ok_or(EngineError::NotReady)?;
        let size = self.cfg.work_size;
        if x >= size || y >= size {
            return Err(EngineError::PixelOutOfBounds { x, y, size });
        }
        Ok(probe_pixel(target, &self.current_rgba, x, y, size))
    }
}
