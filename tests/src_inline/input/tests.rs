use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::{InputError, load_matrix};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("morphoscape_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let file = File::create(path).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

#[test]
fn test_load_csv_matrix() {
    let dir = make_temp_dir();
    let path = dir.join("expr.csv");
    write_file(
        &path,
        "gene,WT1,WT2,Mut1\ngeneA,1.0,2.0,3.0\ngeneB,4.5,5.5,6.5\n",
    );

    let matrix = load_matrix(&path).unwrap();
    assert_eq!(matrix.genes, vec!["geneA", "geneB"]);
    assert_eq!(matrix.samples, vec!["WT1", "WT2", "Mut1"]);
    assert_eq!(matrix.values[[0, 0]], 1.0);
    assert_eq!(matrix.values[[1, 2]], 6.5);
    assert_eq!(matrix.n_genes(), 2);
    assert_eq!(matrix.n_samples(), 3);
}

#[test]
fn test_load_tsv_gz_matrix() {
    let dir = make_temp_dir();
    let path = dir.join("expr.tsv.gz");
    write_gz(&path, "gene\tS1\tR1\ngeneA\t1.25\t0.75\n");

    let matrix = load_matrix(&path).unwrap();
    assert_eq!(matrix.samples, vec!["S1", "R1"]);
    assert_eq!(matrix.values[[0, 1]], 0.75);
}

#[test]
fn test_missing_file() {
    let dir = make_temp_dir();
    let err = load_matrix(&dir.join("absent.csv")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_spreadsheet_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("expr.xlsx");
    write_file(&path, "not really a spreadsheet");
    let err = load_matrix(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_non_numeric_cell() {
    let dir = make_temp_dir();
    let path = dir.join("expr.csv");
    write_file(&path, "gene,S1,R1\ngeneA,1.0,abc\n");
    let err = load_matrix(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_ragged_row() {
    let dir = make_temp_dir();
    let path = dir.join("expr.csv");
    write_file(&path, "gene,S1,R1\ngeneA,1.0\n");
    let err = load_matrix(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_duplicate_sample_label() {
    let dir = make_temp_dir();
    let path = dir.join("expr.csv");
    write_file(&path, "gene,S1,S1\ngeneA,1.0,2.0\n");
    let err = load_matrix(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_empty_file() {
    let dir = make_temp_dir();
    let path = dir.join("expr.csv");
    write_file(&path, "");
    let err = load_matrix(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_header_without_gene_rows() {
    let dir = make_temp_dir();
    let path = dir.join("expr.csv");
    write_file(&path, "gene,S1,R1\n");
    let err = load_matrix(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_blank_lines_skipped() {
    let dir = make_temp_dir();
    let path = dir.join("expr.csv");
    write_file(&path, "gene,S1,R1\n\ngeneA,1.0,2.0\n\n");
    let matrix = load_matrix(&path).unwrap();
    assert_eq!(matrix.n_genes(), 1);
}
