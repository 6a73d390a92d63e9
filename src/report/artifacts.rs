use serde::Serialize;

use crate::model::grid::Snapshot;
use crate::pipeline::stage4_tipping::TippingCurve;
use crate::pipeline::stage5_phase::PhaseSpace;
use crate::pipeline::stage6_biofilm::{BiofilmParams, BiofilmRun};

// Data behind the tipping-point line plot.
#[derive(Debug, Serialize)]
pub struct TippingPointArtifact {
    pub cost: f64,
    pub benefit: Vec<f64>,
    pub smooth_frequency: Vec<f64>,
}

impl TippingPointArtifact {
    pub fn from_curve(curve: &TippingCurve) -> Self {
        Self {
            cost: curve.cost,
            benefit: curve.benefits.clone(),
            smooth_frequency: curve.frequencies.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

// Data behind the phase-space heatmap; rows follow the cost axis.
#[derive(Debug, Serialize)]
pub struct PhaseSpaceArtifact {
    pub b_axis: AxisSpec,
    pub c_axis: AxisSpec,
    pub equilibrium: Vec<Vec<f64>>,
}

impl PhaseSpaceArtifact {
    pub fn from_phase_space(phase: &PhaseSpace) -> Self {
        let equilibrium = phase
            .values
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();
        Self {
            b_axis: AxisSpec {
                min: phase.b_axis.min,
                max: phase.b_axis.max,
                steps: phase.b_axis.steps,
            },
            c_axis: AxisSpec {
                min: phase.c_axis.min,
                max: phase.c_axis.max,
                steps: phase.c_axis.steps,
            },
            equilibrium,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotArtifact {
    pub generation: usize,
    pub risk: &'static str,
    pub caption: &'static str,
    pub smooth_fraction: f64,
    // Row-major binary grid: 1 = Smooth, 0 = Rough.
    pub grid: Vec<Vec<u8>>,
}

impl SnapshotArtifact {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            generation: snapshot.generation,
            risk: snapshot.risk.name(),
            caption: snapshot.risk.caption(),
            smooth_fraction: snapshot.smooth_fraction,
            grid: snapshot.grid.to_bit_rows(),
        }
    }
}

// Data behind the 4-panel clinical risk dashboard.
#[derive(Debug, Serialize)]
pub struct RiskTimelineArtifact {
    pub grid_size: usize,
    pub generations: usize,
    pub smooth_init_prob: f64,
    pub invasion_prob: f64,
    pub final_smooth_fraction: f64,
    pub snapshots: Vec<SnapshotArtifact>,
}

impl RiskTimelineArtifact {
    pub fn from_run(params: &BiofilmParams, run: &BiofilmRun) -> Self {
        Self {
            grid_size: params.grid_size,
            generations: run.generations,
            smooth_init_prob: params.smooth_init_prob,
            invasion_prob: params.invasion_prob,
            final_smooth_fraction: run.final_smooth_fraction,
            snapshots: run
                .snapshots
                .iter()
                .map(SnapshotArtifact::from_snapshot)
                .collect(),
        }
    }
}
