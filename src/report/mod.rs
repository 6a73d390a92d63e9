pub mod artifacts;
pub mod json;
pub mod text;

#[derive(Debug, Clone)]
pub struct CohortSummary {
    pub label: &'static str,
    pub n_samples: usize,
    pub score: Option<f64>,
    pub finite_loops: usize,
    pub essential_loops: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    RoughMoreRobust,
    SmoothMoreRobust,
    NoStructuralDifference,
    SmoothOnly,
    RoughOnly,
}

impl Verdict {
    pub fn from_scores(smooth: Option<f64>, rough: Option<f64>) -> Option<Verdict> {
        match (smooth, rough) {
            (Some(s), Some(r)) => {
                if r > s {
                    Some(Verdict::RoughMoreRobust)
                } else if r < s {
                    Some(Verdict::SmoothMoreRobust)
                } else {
                    Some(Verdict::NoStructuralDifference)
                }
            }
            (Some(_), None) => Some(Verdict::SmoothOnly),
            (None, Some(_)) => Some(Verdict::RoughOnly),
            (None, None) => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Verdict::RoughMoreRobust => "rough_more_robust",
            Verdict::SmoothMoreRobust => "smooth_more_robust",
            Verdict::NoStructuralDifference => "no_structural_difference",
            Verdict::SmoothOnly => "partial_smooth_only",
            Verdict::RoughOnly => "partial_rough_only",
        }
    }

    pub fn statement(&self) -> &'static str {
        match self {
            Verdict::RoughMoreRobust => {
                "Rough variant carries the stronger loop structure; the topological fortress hypothesis holds."
            }
            Verdict::SmoothMoreRobust => {
                "Smooth variant is stronger in this dataset; environmental factors may favor the smooth state."
            }
            Verdict::NoStructuralDifference => "No structural difference detected between cohorts.",
            Verdict::SmoothOnly => {
                "Rough cohort failed topological analysis; partial verdict from the Smooth cohort only."
            }
            Verdict::RoughOnly => {
                "Smooth cohort failed topological analysis; partial verdict from the Rough cohort only."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotLine {
    pub generation: usize,
    pub risk: &'static str,
    pub caption: &'static str,
    pub smooth_fraction: f64,
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub smooth: CohortSummary,
    pub rough: CohortSummary,
    pub fallback_split: bool,
    pub unassigned_count: usize,
    pub verdict: Verdict,
    pub total_atp: f64,
    pub derived_cost: f64,
    pub first_coexistence_benefit: Option<f64>,
    pub invasion_prob: f64,
    pub generations: usize,
    pub snapshots: Vec<SnapshotLine>,
    pub final_smooth_fraction: f64,
}

#[derive(Debug, Clone)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,

    pub input_path: String,
    pub n_genes: usize,
    pub n_samples: usize,
    pub top_genes_used: usize,

    pub fallback_split: bool,
    pub unassigned: Vec<String>,
    pub smooth: CohortSummary,
    pub rough: CohortSummary,
    pub verdict: Verdict,

    pub total_atp: f64,
    pub cost_scaling: f64,
    pub derived_cost: f64,

    pub benefit_min: f64,
    pub benefit_max: f64,
    pub benefit_steps: usize,
    pub phase_b: (f64, f64, usize),
    pub phase_c: (f64, f64, usize),

    pub grid_size: usize,
    pub generations: usize,
    pub smooth_init_prob: f64,
    pub invasion_prob: f64,
    pub rng_seed: Option<u64>,
    pub final_smooth_fraction: f64,
    pub snapshot_generations: Vec<usize>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}
