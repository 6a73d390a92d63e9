use crate::model::game::equilibrium;

pub const BENEFIT_MIN: f64 = 0.1;
pub const BENEFIT_MAX: f64 = 5.0;
pub const BENEFIT_STEPS: usize = 100;

#[derive(Debug, Clone)]
pub struct TippingCurve {
    pub cost: f64,
    pub benefits: Vec<f64>,
    pub frequencies: Vec<f64>,
}

impl TippingCurve {
    // First benefit value past the collapse threshold, if the range
    // crosses it.
    pub fn first_coexistence_benefit(&self) -> Option<f64> {
        self.benefits
            .iter()
            .zip(&self.frequencies)
            .find(|&(_, &f)| f > 0.0)
            .map(|(&b, _)| b)
    }
}

pub fn run_stage4(cost: f64) -> TippingCurve {
    let benefits = linspace(BENEFIT_MIN, BENEFIT_MAX, BENEFIT_STEPS);
    let frequencies = benefits.iter().map(|&b| equilibrium(b, cost)).collect();
    TippingCurve {
        cost,
        benefits,
        frequencies,
    }
}

pub fn linspace(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let mut values: Vec<f64> = (0..steps)
                .map(|i| min + (max - min) * i as f64 / (steps - 1) as f64)
                .collect();
            // Pin the endpoint; accumulated round-off must not move it.
            values[steps - 1] = max;
            values
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_tipping.rs"]
mod tests;
