use ndarray::Array2;

use crate::topology::TopologyError;

#[derive(Debug, Clone)]
pub struct FilteredSimplex {
    // Sorted vertex indices; length 1..=3.
    pub vertices: Vec<usize>,
    pub birth: f64,
}

impl FilteredSimplex {
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }
}

// Builds the Vietoris-Rips filtration of a validated distance matrix:
// vertices at 0, edges at their length, triangles at their longest edge.
// Simplices above `max_edge_length` never enter the complex. The returned
// filtration is sorted by (birth, dimension, vertices), the order the
// reduction in `persistence` relies on.
pub fn rips_filtration(
    distances: &Array2<f64>,
    max_edge_length: f64,
    max_dimension: usize,
) -> Result<Vec<FilteredSimplex>, TopologyError> {
    if max_dimension > 2 {
        return Err(TopologyError::UnsupportedDimension(max_dimension));
    }
    let n = distances.nrows();
    let mut simplices = Vec::new();

    for i in 0..n {
        simplices.push(FilteredSimplex {
            vertices: vec![i],
            birth: 0.0,
        });
    }

    if max_dimension >= 1 {
        for i in 0..n {
            for j in i + 1..n {
                let d = distances[[i, j]];
                if d <= max_edge_length {
                    simplices.push(FilteredSimplex {
                        vertices: vec![i, j],
                        birth: d,
                    });
                }
            }
        }
    }

    if max_dimension >= 2 {
        for i in 0..n {
            for j in i + 1..n {
                let dij = distances[[i, j]];
                if dij > max_edge_length {
                    continue;
                }
                for k in j + 1..n {
                    let dik = distances[[i, k]];
                    let djk = distances[[j, k]];
                    if dik <= max_edge_length && djk <= max_edge_length {
                        simplices.push(FilteredSimplex {
                            vertices: vec![i, j, k],
                            birth: dij.max(dik).max(djk),
                        });
                    }
                }
            }
        }
    }

    simplices.sort_by(|a, b| {
        a.birth
            .partial_cmp(&b.birth)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.dimension().cmp(&b.dimension()))
            .then_with(|| a.vertices.cmp(&b.vertices))
    });

    Ok(simplices)
}

#[cfg(test)]
#[path = "../../tests/src_inline/topology/complex.rs"]
mod tests;
