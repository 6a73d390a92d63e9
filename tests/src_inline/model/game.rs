use super::*;

#[test]
fn test_equilibrium_above_cost() {
    assert_eq!(equilibrium(2.0, 1.0), 0.5);
    assert_eq!(equilibrium(4.0, 1.0), 0.75);

    for b in [1.8, 2.5, 4.0, 100.0] {
        let x = equilibrium(b, 1.7);
        assert!(x > 0.0 && x < 1.0, "equilibrium({b}, 1.7) = {x}");
    }
}

#[test]
fn test_equilibrium_collapse_at_and_below_cost() {
    assert_eq!(equilibrium(1.7, 1.7), 0.0);
    assert_eq!(equilibrium(0.5, 1.7), 0.0);
    assert_eq!(equilibrium(0.0, 0.0), 0.0);
}

#[test]
fn test_equilibrium_monotone_in_benefit() {
    let cost = 1.7;
    let mut prev = equilibrium(0.1, cost);
    for i in 1..200 {
        let b = 0.1 + i as f64 * 0.05;
        let x = equilibrium(b, cost);
        assert!(x >= prev, "not monotone at b = {b}");
        prev = x;
    }
}

#[test]
fn test_equilibrium_monotone_in_cost() {
    let benefit = 4.0;
    let mut prev = equilibrium(benefit, 0.1);
    for i in 1..200 {
        let c = 0.1 + i as f64 * 0.05;
        let x = equilibrium(benefit, c);
        assert!(x <= prev, "not antitone at c = {c}");
        prev = x;
    }
}

#[test]
fn test_gpl_cost_derivation() {
    let model = CostModel::gpl_v1();
    assert_eq!(model.total_atp(), 34.0);
    assert!((model.derived_cost() - 1.7).abs() < 1e-12);
}
