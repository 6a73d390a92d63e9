mod input;
mod model;
mod pipeline;
mod report;
mod topology;
mod tracing;

use std::path::{Path, PathBuf};

use crate::input::{ExpressionMatrix, load_matrix};
use crate::model::cohort::Cohort;
use crate::model::game::CostModel;
use crate::pipeline::stage1_split::run_stage1;
use crate::pipeline::stage2_distance::{DEFAULT_TOP_GENES, run_stage2, top_variance_genes};
use crate::pipeline::stage3_topology::{RobustnessScore, run_stage3};
use crate::pipeline::stage4_tipping::run_stage4;
use crate::pipeline::stage5_phase::{default_b_axis, default_c_axis, run_stage5};
use crate::pipeline::stage6_biofilm::{BiofilmParams, run_stage6};
use crate::pipeline::stage7_report::{Stage7Input, write_reports};
use crate::report::Verdict;
use crate::topology::TopologyParams;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = parse_args(&args)?;

    crate::banner!("PHASE 1: EXPRESSION MATRIX & COHORTS");
    let matrix = load_matrix(&config.input_path).map_err(|e| e.to_string())?;
    let split = run_stage1(&matrix.samples).map_err(|e| e.to_string())?;

    crate::banner!("PHASE 2: TOPOLOGICAL ROBUSTNESS");
    let top_genes = config.top_genes.min(matrix.n_genes());
    let gene_rows = top_variance_genes(&matrix, top_genes);
    crate::info!(
        "variance filter: scoring {} of {} genes",
        gene_rows.len(),
        matrix.n_genes()
    );

    let topo_params = TopologyParams::default_v1();
    let (smooth_score, smooth_error) =
        score_cohort(&matrix, &gene_rows, &split.smooth, &topo_params);
    let (rough_score, rough_error) = score_cohort(&matrix, &gene_rows, &split.rough, &topo_params);

    if smooth_score.is_none() && rough_score.is_none() {
        return Err("topological analysis failed for both cohorts".to_string());
    }

    let verdict = Verdict::from_scores(
        smooth_score.as_ref().map(|s| s.score),
        rough_score.as_ref().map(|s| s.score),
    )
    .ok_or_else(|| "no cohort produced a topology score".to_string())?;

    crate::banner!("VALIDATION VERDICT");
    crate::info!("{}", verdict.statement());

    crate::banner!("PHASE 3: METABOLIC COST");
    let cost_model = CostModel::gpl_v1();
    let cost = cost_model.derived_cost();
    crate::info!("total ATP per virulence unit: {}", cost_model.total_atp());
    crate::info!("derived evolutionary cost c = {cost:.4}");

    crate::banner!("PHASE 4-5: TIPPING POINT & PHASE SPACE");
    let tipping = run_stage4(cost);
    let phase = run_stage5(default_b_axis(), default_c_axis());
    crate::info!(
        "tipping curve: {} points; phase space: {}x{} cells",
        tipping.benefits.len(),
        phase.c_axis.steps,
        phase.b_axis.steps
    );

    crate::banner!("PHASE 6: BIOFILM INVASION SIMULATION");
    let mut biofilm_params = BiofilmParams::clinical_v1();
    biofilm_params.rng_seed = config.seed;
    let biofilm = run_stage6(&biofilm_params).map_err(|e| e.to_string())?;
    crate::info!(
        "simulation complete: final smooth fraction {:.4} after {} generations",
        biofilm.final_smooth_fraction,
        biofilm.generations
    );

    let stage7 = Stage7Input {
        input_path: config.input_path.display().to_string(),
        n_genes: matrix.n_genes(),
        n_samples: matrix.n_samples(),
        top_genes_used: gene_rows.len(),

        split: &split,
        smooth_score: smooth_score.as_ref(),
        smooth_error,
        rough_score: rough_score.as_ref(),
        rough_error,

        cost_model: &cost_model,
        tipping: &tipping,
        phase: &phase,
        biofilm_params: &biofilm_params,
        biofilm: &biofilm,

        tool_name: "morphoscape".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(&PathBuf::from(".")),
    };
    write_reports(&stage7, &config.out_dir).map_err(|e| e.to_string())?;
    crate::info!("reports written to {}", config.out_dir.display());

    Ok(())
}

fn score_cohort(
    matrix: &ExpressionMatrix,
    gene_rows: &[usize],
    cohort: &Cohort,
    params: &TopologyParams,
) -> (Option<RobustnessScore>, Option<String>) {
    crate::info!(
        "analyzing {} cohort ({} samples)",
        cohort.label.name(),
        cohort.len()
    );
    let distances = run_stage2(matrix, gene_rows, cohort);
    match run_stage3(&distances, params) {
        Ok(score) => {
            crate::info!(
                "{} robustness (H1): {:.4}",
                cohort.label.name(),
                score.score
            );
            (Some(score), None)
        }
        Err(err) => {
            crate::error!(
                "topological analysis failed for {} cohort: {err}",
                cohort.label.name()
            );
            (None, Some(err.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
struct RunConfig {
    input_path: PathBuf,
    out_dir: PathBuf,
    seed: Option<u64>,
    top_genes: usize,
}

fn parse_args(args: &[String]) -> Result<RunConfig, String> {
    if args.is_empty() {
        return Err("missing command".to_string());
    }
    let mut args = args.to_vec();
    let cmd = args.remove(0);
    if cmd != "run" {
        return Err("unsupported command".to_string());
    }

    let mut input_path: Option<PathBuf> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut top_genes = DEFAULT_TOP_GENES;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                if i >= args.len() {
                    return Err("missing value for --input".to_string());
                }
                input_path = Some(PathBuf::from(&args[i]));
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    return Err("missing value for --out".to_string());
                }
                out_dir = Some(PathBuf::from(&args[i]));
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("missing value for --seed".to_string());
                }
                let parsed: u64 = args[i]
                    .parse()
                    .map_err(|_| "invalid --seed (expected unsigned integer)".to_string())?;
                seed = Some(parsed);
            }
            "--top-genes" => {
                i += 1;
                if i >= args.len() {
                    return Err("missing value for --top-genes".to_string());
                }
                let parsed: usize = args[i]
                    .parse()
                    .map_err(|_| "invalid --top-genes (expected positive integer)".to_string())?;
                if parsed == 0 {
                    return Err("--top-genes must be positive".to_string());
                }
                top_genes = parsed;
            }
            other => {
                return Err(format!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(RunConfig {
        input_path: input_path.ok_or_else(|| "missing --input".to_string())?,
        out_dir: out_dir.ok_or_else(|| "missing --out".to_string())?,
        seed,
        top_genes,
    })
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}
