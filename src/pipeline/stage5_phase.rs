use ndarray::Array2;

use crate::model::game::equilibrium;
use crate::pipeline::stage4_tipping::linspace;

#[derive(Debug, Clone)]
pub struct SweepAxis {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl SweepAxis {
    pub fn values(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.steps)
    }
}

#[derive(Debug, Clone)]
pub struct PhaseSpace {
    pub b_axis: SweepAxis,
    pub c_axis: SweepAxis,
    // Indexed [c_index, b_index].
    pub values: Array2<f64>,
}

pub fn default_b_axis() -> SweepAxis {
    SweepAxis {
        min: 0.1,
        max: 6.0,
        steps: 100,
    }
}

pub fn default_c_axis() -> SweepAxis {
    SweepAxis {
        min: 0.1,
        max: 3.0,
        steps: 100,
    }
}

pub fn run_stage5(b_axis: SweepAxis, c_axis: SweepAxis) -> PhaseSpace {
    let b_values = b_axis.values();
    let c_values = c_axis.values();

    let mut values = Array2::<f64>::zeros((c_values.len(), b_values.len()));
    for (i, &c) in c_values.iter().enumerate() {
        for (j, &b) in b_values.iter().enumerate() {
            values[[i, j]] = equilibrium(b, c);
        }
    }

    PhaseSpace {
        b_axis,
        c_axis,
        values,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_phase.rs"]
mod tests;
