use super::*;

use rand::{SeedableRng, rngs::SmallRng};

use crate::model::risk::RiskTier;

fn small_params() -> BiofilmParams {
    BiofilmParams {
        grid_size: 8,
        generations: 6,
        smooth_init_prob: 0.95,
        invasion_prob: 0.15,
        checkpoints: vec![0, 3, 5],
        rng_seed: Some(11),
    }
}

#[test]
fn test_all_smooth_grid_never_flips() {
    // Without a single Rough neighbor the flip condition is never true,
    // whatever the invasion probability
    let params = BiofilmParams {
        smooth_init_prob: 1.0,
        ..small_params()
    };
    let run = run_stage6(&params).unwrap();
    assert_eq!(run.final_smooth_fraction, 1.0);
    for snapshot in &run.snapshots {
        assert_eq!(snapshot.smooth_fraction, 1.0);
        assert!(snapshot.grid.cells().iter().all(|p| p.is_smooth()));
    }
}

#[test]
fn test_all_rough_grid_stays_rough() {
    let params = BiofilmParams {
        smooth_init_prob: 0.0,
        ..small_params()
    };
    let run = run_stage6(&params).unwrap();
    assert_eq!(run.final_smooth_fraction, 0.0);
    for snapshot in &run.snapshots {
        assert_eq!(snapshot.smooth_fraction, 0.0);
    }
}

#[test]
fn test_same_seed_reproduces_the_run() {
    let params = small_params();
    let a = run_stage6(&params).unwrap();
    let b = run_stage6(&params).unwrap();
    assert_eq!(a.final_smooth_fraction, b.final_smooth_fraction);
    assert_eq!(a.snapshots.len(), b.snapshots.len());
    for (x, y) in a.snapshots.iter().zip(&b.snapshots) {
        assert_eq!(x.generation, y.generation);
        assert_eq!(x.grid, y.grid);
    }
}

#[test]
fn test_smooth_population_is_monotone_decreasing() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut grid = init_grid(12, 0.6, &mut rng);
    let mut prev = grid.smooth_count();
    for _ in 0..10 {
        grid = step(&grid, 0.3, &mut rng);
        let count = grid.smooth_count();
        assert!(count <= prev);
        prev = count;
    }
}

#[test]
fn test_zero_invasion_probability_preserves_the_grid() {
    let mut rng = SmallRng::seed_from_u64(5);
    let grid = init_grid(10, 0.5, &mut rng);
    let next = step(&grid, 0.0, &mut rng);
    assert_eq!(grid, next);
}

#[test]
fn test_snapshots_follow_checkpoints() {
    let run = run_stage6(&small_params()).unwrap();
    let generations: Vec<usize> = run.snapshots.iter().map(|s| s.generation).collect();
    assert_eq!(generations, vec![0, 3, 5]);
    for snapshot in &run.snapshots {
        assert_eq!(snapshot.risk, RiskTier::from_generation(snapshot.generation));
    }
}

#[test]
fn test_checkpoints_must_cover_run_boundaries() {
    let missing_start = BiofilmParams {
        checkpoints: vec![3, 5],
        ..small_params()
    };
    assert!(matches!(
        run_stage6(&missing_start).unwrap_err(),
        BiofilmError::InvalidParams(_)
    ));

    let missing_end = BiofilmParams {
        checkpoints: vec![0, 3],
        ..small_params()
    };
    assert!(run_stage6(&missing_end).is_err());

    let past_end = BiofilmParams {
        checkpoints: vec![0, 5, 9],
        ..small_params()
    };
    assert!(run_stage6(&past_end).is_err());
}

#[test]
fn test_parameter_bounds_are_validated() {
    let tiny = BiofilmParams {
        grid_size: 1,
        ..small_params()
    };
    assert!(run_stage6(&tiny).is_err());

    let bad_prob = BiofilmParams {
        invasion_prob: 1.5,
        ..small_params()
    };
    assert!(run_stage6(&bad_prob).is_err());

    let no_generations = BiofilmParams {
        generations: 0,
        ..small_params()
    };
    assert!(run_stage6(&no_generations).is_err());
}

#[test]
fn test_clinical_profile_checkpoints() {
    let params = BiofilmParams::clinical_v1();
    assert_eq!(params.grid_size, 100);
    assert_eq!(params.generations, 100);
    assert_eq!(params.checkpoints, vec![0, 10, 30, 99]);
    assert!(params.validate().is_ok());
}
