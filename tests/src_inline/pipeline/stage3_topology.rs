use super::*;

use ndarray::{Array2, array};

use crate::topology::TopologyParams;

#[test]
fn test_identical_samples_score_zero() {
    let distances = Array2::<f64>::zeros((5, 5));
    let score = run_stage3(&distances, &TopologyParams::default_v1()).unwrap();
    assert_eq!(score.score, 0.0);
    assert_eq!(score.finite_loops, 0);
}

#[test]
fn test_square_cycle_scores_its_lifetime() {
    let s2 = 2.0_f64.sqrt();
    let distances = array![
        [0.0, 1.0, s2, 1.0],
        [1.0, 0.0, 1.0, s2],
        [s2, 1.0, 0.0, 1.0],
        [1.0, s2, 1.0, 0.0]
    ];
    let score = run_stage3(&distances, &TopologyParams::default_v1()).unwrap();
    assert_eq!(score.finite_loops, 1);
    assert!((score.score - (s2 - 1.0)).abs() < 1e-12);
}

#[test]
fn test_loop_wider_than_edge_cap_stays_open() {
    // Distances above max_edge_length never form simplices, so the loop
    // never closes and never dies
    let s2 = 2.0_f64.sqrt();
    let params = TopologyParams {
        max_edge_length: 1.2,
        ..TopologyParams::default_v1()
    };
    let distances = array![
        [0.0, 1.0, s2, 1.0],
        [1.0, 0.0, 1.0, s2],
        [s2, 1.0, 0.0, 1.0],
        [1.0, s2, 1.0, 0.0]
    ];
    let score = run_stage3(&distances, &params).unwrap();
    assert_eq!(score.finite_loops, 0);
    assert_eq!(score.essential_loops, 1);
    assert_eq!(score.score, 0.0);
}

#[test]
fn test_non_square_matrix_rejected() {
    let distances = Array2::<f64>::zeros((2, 3));
    let err = run_stage3(&distances, &TopologyParams::default_v1()).unwrap_err();
    assert!(matches!(err, TopologyError::NotSquare { rows: 2, cols: 3 }));
}

#[test]
fn test_nan_entry_rejected() {
    let mut distances = Array2::<f64>::zeros((3, 3));
    distances[[0, 1]] = f64::NAN;
    distances[[1, 0]] = f64::NAN;
    let err = run_stage3(&distances, &TopologyParams::default_v1()).unwrap_err();
    assert!(matches!(err, TopologyError::NonFinite { .. }));
}

#[test]
fn test_asymmetric_matrix_rejected() {
    let mut distances = Array2::<f64>::zeros((3, 3));
    distances[[0, 1]] = 0.5;
    distances[[1, 0]] = 0.7;
    let err = run_stage3(&distances, &TopologyParams::default_v1()).unwrap_err();
    assert!(matches!(err, TopologyError::Asymmetric { .. }));
}

#[test]
fn test_nonzero_diagonal_rejected() {
    let mut distances = Array2::<f64>::zeros((3, 3));
    distances[[1, 1]] = 0.2;
    let err = run_stage3(&distances, &TopologyParams::default_v1()).unwrap_err();
    assert!(matches!(err, TopologyError::NonzeroDiagonal(1)));
}

#[test]
fn test_empty_matrix_rejected() {
    let distances = Array2::<f64>::zeros((0, 0));
    let err = run_stage3(&distances, &TopologyParams::default_v1()).unwrap_err();
    assert!(matches!(err, TopologyError::Empty));
}
