use std::path::Path;

pub mod table;

use ndarray::Array2;

use table::parse_expression_table;

#[derive(Debug)]
pub enum InputError {
    Io(std::io::Error),
    MissingInput(String),
    InvalidInput(String),
    Parse(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(e) => write!(f, "IO error: {e}"),
            InputError::MissingInput(msg) => write!(f, "missing input: {msg}"),
            InputError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            InputError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<std::io::Error> for InputError {
    fn from(value: std::io::Error) -> Self {
        InputError::Io(value)
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionMatrix {
    pub genes: Vec<String>,
    pub samples: Vec<String>,
    pub values: Array2<f64>,
}

impl ExpressionMatrix {
    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }
}

pub fn load_matrix(path: &Path) -> Result<ExpressionMatrix, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "expression table {} does not exist",
            path.display()
        )));
    }
    if has_extension(path, "xlsx") || has_extension(path, "xls") {
        return Err(InputError::InvalidInput(format!(
            "spreadsheet input {} is not supported; export it as CSV or TSV first",
            path.display()
        )));
    }

    let delimiter = detect_delimiter(path);
    crate::info!(
        "loading expression table: path={}, delimiter={}",
        path.display(),
        if delimiter == '\t' { "tab" } else { "comma" }
    );

    let matrix = parse_expression_table(path, delimiter)?;

    validate_sample_labels(&matrix.samples)?;
    warn_duplicate_genes(&matrix.genes);

    crate::info!(
        "expression matrix loaded: {} genes x {} samples",
        matrix.n_genes(),
        matrix.n_samples()
    );

    Ok(matrix)
}

fn validate_sample_labels(samples: &[String]) -> Result<(), InputError> {
    let mut seen = std::collections::HashSet::new();
    for label in samples {
        if label.is_empty() {
            return Err(InputError::InvalidInput(
                "empty sample label in header".to_string(),
            ));
        }
        if !seen.insert(label.as_str()) {
            return Err(InputError::InvalidInput(format!(
                "duplicate sample label in header: {}",
                label
            )));
        }
    }
    Ok(())
}

fn warn_duplicate_genes(genes: &[String]) {
    let mut seen = std::collections::HashSet::new();
    for gene in genes {
        if !seen.insert(gene.as_str()) {
            crate::warn!("duplicate gene identifier; keeping both rows: {}", gene);
        }
    }
}

fn detect_delimiter(path: &Path) -> char {
    if has_extension(path, "tsv") {
        return '\t';
    }
    // name.tsv.gz reports extension "gz"; look one level deeper
    if has_extension(path, "gz") {
        if let Some(stem) = path.file_stem() {
            if Path::new(stem).extension().is_some_and(|e| e == "tsv") {
                return '\t';
            }
        }
    }
    ','
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
