//! trivolve approximates a target raster image by hill-climbing a fixed
//! population of 150 overlapping, semi-transparent triangles.
//!
//! The engine is (1+1) local search, not a population GA: each generation
//! mutates exactly one gene of the single current genome, renders the
//! candidate at the 75×75 working resolution, scores it with a
//! sum-of-squared-RGB-errors metric against the target, and keeps it only on
//! strict improvement. Image loading, display rendering, and saving are
//! collaborators at the boundary — the core consumes a flat RGBA buffer and
//! produces a drawable genome.
//!
//! ```no_run
//! use trivolve::{Engine, EvolverSettings};
//!
//! let settings = EvolverSettings::default();
//! let mut engine = Engine::new(&settings);
//! engine.load_target(vec![0; 75 * 75 * 4])?;
//! for _ in 0..10_000 {
//!     engine.step();
//! }
//! let snapshot = engine.snapshot()?;
//! println!("gen {} fitness {}", snapshot.generation, snapshot.fitness);
//! # Ok::<(), trivolve::EngineError>(())
//! ```

pub mod dna;
pub mod engine;
pub mod engine_thread;
pub mod error;
pub mod fitness;
pub mod loader;
pub mod mutate;
pub mod render;
pub mod settings;

pub use dna::{Color, Genome, Point, TriangleGene, ALPHA_FLOOR};
pub use engine::{Engine, RunState, Snapshot, StepOutcome};
pub use engine_thread::{EngineCommand, EngineHandle, EngineUpdate};
pub use error::EngineError;
pub use fitness::PixelProbe;
pub use mutate::MutateConfig;
pub use settings::EvolverSettings;
