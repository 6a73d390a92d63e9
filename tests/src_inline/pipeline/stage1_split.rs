use super::*;

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_keyword_split_wt_vs_mut() {
    let split = run_stage1(&labels(&["WT1", "WT2", "Mut1", "Mut2"])).unwrap();
    assert!(!split.fallback_used);
    assert_eq!(split.smooth.samples, vec!["WT1", "WT2"]);
    assert_eq!(split.rough.samples, vec!["Mut1", "Mut2"]);
    assert_eq!(split.smooth.columns, vec![0, 1]);
    assert_eq!(split.rough.columns, vec![2, 3]);
    assert!(split.unassigned.is_empty());
}

#[test]
fn test_label_matching_both_sets_goes_smooth() {
    // "RS1" contains both R and S; the Smooth set wins
    let split = run_stage1(&labels(&["RS1", "Mut1"])).unwrap();
    assert!(!split.fallback_used);
    assert_eq!(split.smooth.samples, vec!["RS1"]);
    assert_eq!(split.rough.samples, vec!["Mut1"]);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let split = run_stage1(&labels(&["parental_1", "evolved_1"])).unwrap();
    assert!(!split.fallback_used);
    assert_eq!(split.smooth.samples, vec!["parental_1"]);
    assert_eq!(split.rough.samples, vec!["evolved_1"]);
}

#[test]
fn test_fallback_when_no_keywords_match() {
    let split = run_stage1(&labels(&["A", "B", "C", "D"])).unwrap();
    assert!(split.fallback_used);
    assert_eq!(split.smooth.samples, vec!["A", "B"]);
    assert_eq!(split.rough.samples, vec!["C", "D"]);
    assert!(split.unassigned.is_empty());
}

#[test]
fn test_fallback_when_one_side_is_empty() {
    // Both labels hit the Smooth set only, so keywords are discarded
    let split = run_stage1(&labels(&["WT1", "WT2"])).unwrap();
    assert!(split.fallback_used);
    assert_eq!(split.smooth.samples, vec!["WT1"]);
    assert_eq!(split.rough.samples, vec!["WT2"]);
}

#[test]
fn test_fallback_odd_count_extra_to_smooth() {
    let split = run_stage1(&labels(&["A", "B", "C", "D", "E"])).unwrap();
    assert!(split.fallback_used);
    assert_eq!(split.smooth.samples, vec!["A", "B", "C"]);
    assert_eq!(split.rough.samples, vec!["D", "E"]);
}

#[test]
fn test_unassigned_labels_are_reported() {
    let split = run_stage1(&labels(&["WT1", "Mut1", "XYZ"])).unwrap();
    assert!(!split.fallback_used);
    assert_eq!(split.unassigned, vec!["XYZ"]);
}

#[test]
fn test_zero_columns_is_degenerate() {
    let err = run_stage1(&[]).unwrap_err();
    assert!(matches!(err, SplitError::DegenerateCohort(_)));
}

#[test]
fn test_single_column_is_degenerate() {
    let err = run_stage1(&labels(&["A"])).unwrap_err();
    assert!(matches!(err, SplitError::DegenerateCohort(_)));
}
