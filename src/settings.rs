//! Run configuration. Serde-capable so hosts can persist or ship presets;
//! the defaults reproduce the reference implementation.

use serde::{Deserialize, Serialize};

use crate::mutate::MutateConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolverSettings {
    /// square working resolution rendering and scoring happen at
    pub work_size: u32,
    /// number of triangle genes in the genome
    pub dna_size: usize,
    /// RNG seed; a run is a pure function of seed + target
    pub seed: u64,
    /// worker thread emits a state update every this many generations
    pub update_every: u64,

    // mutation constants, see MutateConfig
    pub point_drift: f32,
    pub color_drift: f32,
    pub alpha_drift: f32,
    pub geometry_rate: f32,
    pub replace_rate: f32,
}

impl Default for EvolverSettings {
    fn default() -> Self {
        Self {
            work_size: 75,
            dna_size: 150,
            seed: 0xDEAD_BEEF,
            update_every: 30,
            point_drift: 20.0,
            color_drift: 20.0,
            alpha_drift: 0.1,
            geometry_rate: 0.5,
            replace_rate: 0.01,
        }
    }
}

impl EvolverSettings {
    pub fn to_mutate_config(&self) -> MutateConfig {
        MutateConfig {
            work_size: self.work_size,
            point_drift: self.point_drift,
            color_drift: self.color_drift,
            alpha_drift: self.alpha_drift,
            geometry_rate: self.geometry_rate,
            replace_rate: self.replace_rate,
        }
    }
}
