use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::cohort::Cohort;
use crate::model::game::CostModel;
use crate::pipeline::stage1_split::CohortSplit;
use crate::pipeline::stage3_topology::RobustnessScore;
use crate::pipeline::stage4_tipping::TippingCurve;
use crate::pipeline::stage5_phase::PhaseSpace;
use crate::pipeline::stage6_biofilm::{BiofilmParams, BiofilmRun};
use crate::report::artifacts::{PhaseSpaceArtifact, RiskTimelineArtifact, TippingPointArtifact};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    CohortSummary, ReportContext, SnapshotLine, SummaryData, Verdict, format_f64_6,
};

#[derive(Debug)]
pub struct Stage7Input<'a> {
    pub input_path: String,
    pub n_genes: usize,
    pub n_samples: usize,
    pub top_genes_used: usize,

    pub split: &'a CohortSplit,
    pub smooth_score: Option<&'a RobustnessScore>,
    pub smooth_error: Option<String>,
    pub rough_score: Option<&'a RobustnessScore>,
    pub rough_error: Option<String>,

    pub cost_model: &'a CostModel,
    pub tipping: &'a TippingCurve,
    pub phase: &'a PhaseSpace,
    pub biofilm_params: &'a BiofilmParams,
    pub biofilm: &'a BiofilmRun,

    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
}

pub fn write_reports(input: &Stage7Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_cohorts_tsv(input, &out_dir.join("cohorts.tsv"))?;
    write_intervals_tsv(input, &out_dir.join("persistence_intervals.tsv"))?;

    let tipping = TippingPointArtifact::from_curve(input.tipping);
    write_json_artifact(&out_dir.join("tipping_point.json"), &tipping)?;

    let phase = PhaseSpaceArtifact::from_phase_space(input.phase);
    write_json_artifact(&out_dir.join("phase_space.json"), &phase)?;

    let timeline = RiskTimelineArtifact::from_run(input.biofilm_params, input.biofilm);
    write_json_artifact(&out_dir.join("risk_timeline.json"), &timeline)?;

    let summary = build_summary(input)?;
    write_text(&out_dir.join("summary.json"), &render_summary_json(&summary))?;

    let report_ctx = build_report_context(input, summary.verdict);
    write_text(&out_dir.join("report.txt"), &render_report_text(&report_ctx))?;

    Ok(())
}

fn write_cohorts_tsv(input: &Stage7Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "sample\tcohort")?;
    for sample in &input.split.smooth.samples {
        writeln!(w, "{}\t{}", sample, input.split.smooth.label.name())?;
    }
    for sample in &input.split.rough.samples {
        writeln!(w, "{}\t{}", sample, input.split.rough.label.name())?;
    }
    for sample in &input.split.unassigned {
        writeln!(w, "{}\tunassigned", sample)?;
    }
    w.flush()
}

fn write_intervals_tsv(input: &Stage7Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "cohort\tdimension\tbirth\tdeath")?;
    for (cohort, score) in [
        (&input.split.smooth, input.smooth_score),
        (&input.split.rough, input.rough_score),
    ] {
        let Some(score) = score else { continue };
        for interval in &score.intervals {
            let death = if interval.is_essential() {
                "inf".to_string()
            } else {
                format_f64_6(interval.death)
            };
            writeln!(
                w,
                "{}\t{}\t{}\t{}",
                cohort.label.name(),
                interval.dimension,
                format_f64_6(interval.birth),
                death
            )?;
        }
    }
    w.flush()
}

fn write_json_artifact<T: serde::Serialize>(path: &Path, artifact: &T) -> std::io::Result<()> {
    let json = serde_json::to_string(artifact).map_err(std::io::Error::other)?;
    write_text(path, &json)
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

fn build_summary(input: &Stage7Input<'_>) -> std::io::Result<SummaryData> {
    let smooth = cohort_summary(&input.split.smooth, input.smooth_score, &input.smooth_error);
    let rough = cohort_summary(&input.split.rough, input.rough_score, &input.rough_error);

    let verdict = Verdict::from_scores(smooth.score, rough.score).ok_or_else(|| {
        std::io::Error::other("no cohort produced a topology score; nothing to report")
    })?;

    Ok(SummaryData {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        git_hash: input.git_hash.clone(),

        input_path: input.input_path.clone(),
        n_genes: input.n_genes,
        n_samples: input.n_samples,
        top_genes_used: input.top_genes_used,

        fallback_split: input.split.fallback_used,
        unassigned: input.split.unassigned.clone(),
        smooth,
        rough,
        verdict,

        total_atp: input.cost_model.total_atp(),
        cost_scaling: input.cost_model.scaling,
        derived_cost: input.cost_model.derived_cost(),

        benefit_min: input.tipping.benefits.first().copied().unwrap_or(0.0),
        benefit_max: input.tipping.benefits.last().copied().unwrap_or(0.0),
        benefit_steps: input.tipping.benefits.len(),
        phase_b: (
            input.phase.b_axis.min,
            input.phase.b_axis.max,
            input.phase.b_axis.steps,
        ),
        phase_c: (
            input.phase.c_axis.min,
            input.phase.c_axis.max,
            input.phase.c_axis.steps,
        ),

        grid_size: input.biofilm_params.grid_size,
        generations: input.biofilm.generations,
        smooth_init_prob: input.biofilm_params.smooth_init_prob,
        invasion_prob: input.biofilm_params.invasion_prob,
        rng_seed: input.biofilm_params.rng_seed,
        final_smooth_fraction: input.biofilm.final_smooth_fraction,
        snapshot_generations: input.biofilm.snapshots.iter().map(|s| s.generation).collect(),
    })
}

fn cohort_summary(
    cohort: &Cohort,
    score: Option<&RobustnessScore>,
    error: &Option<String>,
) -> CohortSummary {
    CohortSummary {
        label: cohort.label.name(),
        n_samples: cohort.len(),
        score: score.map(|s| s.score),
        finite_loops: score.map(|s| s.finite_loops).unwrap_or(0),
        essential_loops: score.map(|s| s.essential_loops).unwrap_or(0),
        error: error.clone(),
    }
}

fn build_report_context(input: &Stage7Input<'_>, verdict: Verdict) -> ReportContext {
    ReportContext {
        smooth: cohort_summary(&input.split.smooth, input.smooth_score, &input.smooth_error),
        rough: cohort_summary(&input.split.rough, input.rough_score, &input.rough_error),
        fallback_split: input.split.fallback_used,
        unassigned_count: input.split.unassigned.len(),
        verdict,
        total_atp: input.cost_model.total_atp(),
        derived_cost: input.cost_model.derived_cost(),
        first_coexistence_benefit: input.tipping.first_coexistence_benefit(),
        invasion_prob: input.biofilm_params.invasion_prob,
        generations: input.biofilm.generations,
        snapshots: input
            .biofilm
            .snapshots
            .iter()
            .map(|s| SnapshotLine {
                generation: s.generation,
                risk: s.risk.name(),
                caption: s.risk.caption(),
                smooth_fraction: s.smooth_fraction,
            })
            .collect(),
        final_smooth_fraction: input.biofilm.final_smooth_fraction,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
