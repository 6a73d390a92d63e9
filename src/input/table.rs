use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use ndarray::Array2;

use crate::input::{ExpressionMatrix, InputError};

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn parse_expression_table(
    path: &Path,
    delimiter: char,
) -> Result<ExpressionMatrix, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();

    // Header: index column name, then sample labels
    buf.clear();
    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(InputError::Parse("expression table is empty".to_string()));
    }
    let header = buf.trim_end();
    let header_cols: Vec<&str> = header.split(delimiter).collect();
    if header_cols.len() < 2 {
        return Err(InputError::InvalidInput(
            "expression table header has no sample columns".to_string(),
        ));
    }
    let samples: Vec<String> = header_cols[1..]
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    let n_samples = samples.len();

    let mut genes = Vec::new();
    let mut values = Vec::new();
    let mut line_no = 1usize;

    loop {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != n_samples + 1 {
            return Err(InputError::Parse(format!(
                "line {} has {} columns, expected {}",
                line_no,
                fields.len(),
                n_samples + 1
            )));
        }
        let gene = fields[0].trim();
        if gene.is_empty() {
            return Err(InputError::Parse(format!(
                "line {} has an empty gene identifier",
                line_no
            )));
        }
        genes.push(gene.to_string());
        for field in &fields[1..] {
            let value: f64 = field.trim().parse().map_err(|_| {
                InputError::Parse(format!(
                    "non-numeric expression value {:?} at line {}",
                    field, line_no
                ))
            })?;
            if !value.is_finite() {
                return Err(InputError::Parse(format!(
                    "non-finite expression value at line {}",
                    line_no
                )));
            }
            values.push(value);
        }
    }

    if genes.is_empty() {
        return Err(InputError::Parse(
            "expression table has no gene rows".to_string(),
        ));
    }

    let n_genes = genes.len();
    let values = Array2::from_shape_vec((n_genes, n_samples), values)
        .map_err(|e| InputError::Parse(format!("matrix shape mismatch: {e}")))?;

    Ok(ExpressionMatrix {
        genes,
        samples,
        values,
    })
}
