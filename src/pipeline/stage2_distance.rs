use ndarray::Array2;

use crate::input::ExpressionMatrix;
use crate::model::cohort::Cohort;

pub const DEFAULT_TOP_GENES: usize = 500;

// Maximum correlation distance: sqrt(2 * (1 - r)) at r = -1.
pub const MAX_DISTANCE: f64 = 2.0;

// Indices of the K highest-variance gene rows across ALL samples, highest
// first; ties resolve toward the earlier row. Rows with undefined variance
// (fewer than two samples) rank as zero.
pub fn top_variance_genes(matrix: &ExpressionMatrix, k: usize) -> Vec<usize> {
    let variances: Vec<f64> = (0..matrix.n_genes())
        .map(|g| sample_variance(matrix.values.row(g)))
        .collect();

    let mut order: Vec<usize> = (0..matrix.n_genes()).collect();
    order.sort_by(|a, b| {
        variances[*b]
            .partial_cmp(&variances[*a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(b))
    });
    order.truncate(k);
    order
}

// Sample-by-sample Pearson correlation over the selected gene rows, mapped
// to the distance sqrt(2 * (1 - r)). Undefined correlations become r = 0;
// any distance that still fails to evaluate becomes the 2.0 sentinel.
pub fn run_stage2(matrix: &ExpressionMatrix, gene_rows: &[usize], cohort: &Cohort) -> Array2<f64> {
    let n = cohort.columns.len();
    let profiles: Vec<Vec<f64>> = cohort
        .columns
        .iter()
        .map(|&col| gene_rows.iter().map(|&g| matrix.values[[g, col]]).collect())
        .collect();

    let mut distances = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in i + 1..n {
            let r = pearson(&profiles[i], &profiles[j]).unwrap_or(0.0);
            let mut d = (2.0 * (1.0 - r)).sqrt();
            if !d.is_finite() {
                d = MAX_DISTANCE;
            }
            distances[[i, j]] = d;
            distances[[j, i]] = d;
        }
    }
    distances
}

fn sample_variance(values: ndarray::ArrayView1<'_, f64>) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.sum() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    ss / (n - 1) as f64
}

// None when either vector is constant. The result is clamped to [-1, 1] so
// the distance transform stays real under floating-point round-off.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }
    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_distance.rs"]
mod tests;
