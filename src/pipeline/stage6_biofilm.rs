use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::model::grid::{Phenotype, PhenotypeGrid, Snapshot};
use crate::model::risk::RiskTier;

#[derive(Debug)]
pub enum BiofilmError {
    InvalidParams(String),
}

impl std::fmt::Display for BiofilmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiofilmError::InvalidParams(msg) => write!(f, "invalid biofilm parameters: {msg}"),
        }
    }
}

impl std::error::Error for BiofilmError {}

#[derive(Debug, Clone)]
pub struct BiofilmParams {
    pub grid_size: usize,
    pub generations: usize,
    pub smooth_init_prob: f64,
    // Fixed invasion constant; intentionally not derived from the metabolic
    // cost used by the equilibrium phases.
    pub invasion_prob: f64,
    pub checkpoints: Vec<usize>,
    pub rng_seed: Option<u64>,
}

impl BiofilmParams {
    pub fn clinical_v1() -> Self {
        Self {
            grid_size: 100,
            generations: 100,
            smooth_init_prob: 0.95,
            invasion_prob: 0.15,
            checkpoints: vec![0, 10, 30, 99],
            rng_seed: None,
        }
    }

    pub fn validate(&self) -> Result<(), BiofilmError> {
        if self.grid_size < 2 {
            return Err(BiofilmError::InvalidParams(format!(
                "grid size {} is below the 2x2 minimum",
                self.grid_size
            )));
        }
        if self.generations == 0 {
            return Err(BiofilmError::InvalidParams(
                "generation count must be positive".to_string(),
            ));
        }
        for (name, p) in [
            ("smooth_init_prob", self.smooth_init_prob),
            ("invasion_prob", self.invasion_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(BiofilmError::InvalidParams(format!(
                    "{name} {p} is outside [0, 1]"
                )));
            }
        }
        let last = self.generations - 1;
        if !self.checkpoints.contains(&0) || !self.checkpoints.contains(&last) {
            return Err(BiofilmError::InvalidParams(format!(
                "checkpoints must include generation 0 and the final generation {last}"
            )));
        }
        if let Some(&bad) = self.checkpoints.iter().find(|&&c| c > last) {
            return Err(BiofilmError::InvalidParams(format!(
                "checkpoint {bad} is past the final generation {last}"
            )));
        }
        Ok(())
    }

    fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                crate::info!("biofilm simulation seed: {seed}");
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BiofilmRun {
    pub snapshots: Vec<Snapshot>,
    pub final_smooth_fraction: f64,
    pub generations: usize,
}

pub fn run_stage6(params: &BiofilmParams) -> Result<BiofilmRun, BiofilmError> {
    let mut rng = params.seeded_rng();
    run_with_rng(params, &mut rng)
}

// Entry point with an injected generator so runs are reproducible.
pub fn run_with_rng<R: Rng>(params: &BiofilmParams, rng: &mut R) -> Result<BiofilmRun, BiofilmError> {
    params.validate()?;

    let mut grid = init_grid(params.grid_size, params.smooth_init_prob, rng);
    let mut snapshots = Vec::with_capacity(params.checkpoints.len());

    for generation in 0..params.generations {
        // Checkpoints capture the grid before this generation's update.
        if params.checkpoints.contains(&generation) {
            snapshots.push(capture(&grid, generation));
        }
        grid = step(&grid, params.invasion_prob, rng);
    }

    Ok(BiofilmRun {
        snapshots,
        final_smooth_fraction: grid.smooth_fraction(),
        generations: params.generations,
    })
}

pub fn init_grid<R: Rng>(size: usize, smooth_prob: f64, rng: &mut R) -> PhenotypeGrid {
    let cells = (0..size * size)
        .map(|_| {
            if rng.random::<f64>() < smooth_prob {
                Phenotype::Smooth
            } else {
                Phenotype::Rough
            }
        })
        .collect();
    PhenotypeGrid::from_cells(size, cells)
}

// One synchronous generation. Neighbor counts come from the pre-update
// grid; a Smooth cell with at least one Rough neighbor flips with the
// invasion probability, and no cell ever flips back to Smooth.
pub fn step<R: Rng>(grid: &PhenotypeGrid, invasion_prob: f64, rng: &mut R) -> PhenotypeGrid {
    let n = grid.size();
    let mut next = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let cell = grid.get(row, col);
            let updated = if cell.is_smooth() {
                let rough_neighbors = 8 - grid.smooth_neighbors(row, col);
                if rough_neighbors > 0 && rng.random::<f64>() < invasion_prob {
                    Phenotype::Rough
                } else {
                    Phenotype::Smooth
                }
            } else {
                Phenotype::Rough
            };
            next.push(updated);
        }
    }
    PhenotypeGrid::from_cells(n, next)
}

fn capture(grid: &PhenotypeGrid, generation: usize) -> Snapshot {
    Snapshot {
        generation,
        risk: RiskTier::from_generation(generation),
        smooth_fraction: grid.smooth_fraction(),
        grid: grid.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_biofilm.rs"]
mod tests;
