use ndarray::Array2;

use crate::topology::{
    PersistenceInterval, TopologyError, TopologyParams, compute_persistence, rips_filtration,
    validate_distance_matrix,
};

#[derive(Debug, Clone)]
pub struct RobustnessScore {
    // Maximum finite lifetime among retained degree-1 intervals, or 0.
    pub score: f64,
    pub finite_loops: usize,
    pub essential_loops: usize,
    pub intervals: Vec<PersistenceInterval>,
}

pub fn run_stage3(
    distances: &Array2<f64>,
    params: &TopologyParams,
) -> Result<RobustnessScore, TopologyError> {
    validate_distance_matrix(distances)?;

    let filtration = rips_filtration(distances, params.max_edge_length, params.max_dimension)?;
    let diagram = compute_persistence(&filtration, params.min_persistence);

    let score = diagram.max_finite_lifetime(1);
    Ok(RobustnessScore {
        score,
        finite_loops: diagram.finite_count(1),
        essential_loops: diagram.essential_count(1),
        intervals: diagram.intervals,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_topology.rs"]
mod tests;
