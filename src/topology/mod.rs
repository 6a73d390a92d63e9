//! Vietoris-Rips persistent homology over Z/2.
//!
//! The pipeline treats this module as an opaque capability: build a
//! filtration from a distance matrix and a maximum edge length, reduce it,
//! and read persistence intervals back. Inputs are validated here so that a
//! malformed matrix surfaces as a `TopologyError` instead of a bad diagram.

pub mod complex;
pub mod persistence;

use ndarray::Array2;
use thiserror::Error;

pub use complex::{FilteredSimplex, rips_filtration};
pub use persistence::{PersistenceDiagram, PersistenceInterval, compute_persistence};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("distance matrix is empty")]
    Empty,
    #[error("distance matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("non-finite distance at ({row}, {col})")]
    NonFinite { row: usize, col: usize },
    #[error("asymmetric distance at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },
    #[error("nonzero diagonal entry at index {0}")]
    NonzeroDiagonal(usize),
    #[error("unsupported complex dimension {0}; simplices are capped at dimension 2")]
    UnsupportedDimension(usize),
}

#[derive(Debug, Clone)]
pub struct TopologyParams {
    pub max_edge_length: f64,
    pub max_dimension: usize,
    pub min_persistence: f64,
}

impl TopologyParams {
    pub fn default_v1() -> Self {
        Self {
            max_edge_length: 1.5,
            max_dimension: 2,
            min_persistence: 0.01,
        }
    }
}

pub fn validate_distance_matrix(distances: &Array2<f64>) -> Result<(), TopologyError> {
    let (rows, cols) = distances.dim();
    if rows == 0 || cols == 0 {
        return Err(TopologyError::Empty);
    }
    if rows != cols {
        return Err(TopologyError::NotSquare { rows, cols });
    }
    for i in 0..rows {
        if distances[[i, i]].abs() > SYMMETRY_TOLERANCE {
            return Err(TopologyError::NonzeroDiagonal(i));
        }
        for j in 0..cols {
            let d = distances[[i, j]];
            if !d.is_finite() {
                return Err(TopologyError::NonFinite { row: i, col: j });
            }
            if j > i && (d - distances[[j, i]]).abs() > SYMMETRY_TOLERANCE {
                return Err(TopologyError::Asymmetric { row: i, col: j });
            }
        }
    }
    Ok(())
}
