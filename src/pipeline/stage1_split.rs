use crate::model::cohort::{Cohort, CohortLabel, ROUGH_KEYWORDS, SMOOTH_KEYWORDS};

#[derive(Debug)]
pub enum SplitError {
    DegenerateCohort(String),
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::DegenerateCohort(msg) => write!(f, "degenerate cohort: {msg}"),
        }
    }
}

impl std::error::Error for SplitError {}

#[derive(Debug, Clone)]
pub struct CohortSplit {
    pub smooth: Cohort,
    pub rough: Cohort,
    pub unassigned: Vec<String>,
    pub fallback_used: bool,
}

pub fn run_stage1(samples: &[String]) -> Result<CohortSplit, SplitError> {
    let mut smooth_cols: Vec<usize> = Vec::new();
    let mut rough_cols: Vec<usize> = Vec::new();
    let mut unassigned_cols: Vec<usize> = Vec::new();

    for (idx, label) in samples.iter().enumerate() {
        let upper = label.to_ascii_uppercase();
        // Smooth keywords first: a label matching both sets goes Smooth.
        if SMOOTH_KEYWORDS.iter().any(|k| upper.contains(k)) {
            smooth_cols.push(idx);
        } else if ROUGH_KEYWORDS.iter().any(|k| upper.contains(k)) {
            rough_cols.push(idx);
        } else {
            unassigned_cols.push(idx);
        }
    }

    let fallback_used = smooth_cols.is_empty() || rough_cols.is_empty();
    if fallback_used {
        crate::warn!(
            "no morphotype keywords detected in sample labels; splitting {} columns at the midpoint",
            samples.len()
        );
        let mid = samples.len().div_ceil(2);
        smooth_cols = (0..mid).collect();
        rough_cols = (mid..samples.len()).collect();
        unassigned_cols.clear();
    }

    if smooth_cols.is_empty() || rough_cols.is_empty() {
        return Err(SplitError::DegenerateCohort(format!(
            "cannot form two cohorts from {} sample column(s)",
            samples.len()
        )));
    }

    let split = CohortSplit {
        smooth: build_cohort(CohortLabel::Smooth, samples, smooth_cols),
        rough: build_cohort(CohortLabel::Rough, samples, rough_cols),
        unassigned: unassigned_cols
            .into_iter()
            .map(|i| samples[i].clone())
            .collect(),
        fallback_used,
    };

    crate::info!(
        "cohorts assigned: Smooth={}, Rough={}, unassigned={}{}",
        split.smooth.len(),
        split.rough.len(),
        split.unassigned.len(),
        if split.fallback_used {
            " (positional fallback)"
        } else {
            ""
        }
    );

    Ok(split)
}

fn build_cohort(label: CohortLabel, samples: &[String], columns: Vec<usize>) -> Cohort {
    Cohort {
        label,
        samples: columns.iter().map(|&i| samples[i].clone()).collect(),
        columns,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_split.rs"]
mod tests;
