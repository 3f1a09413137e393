use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod columns;
pub mod reader;

use columns::{ColumnKind, DEFAULT_INTENSITY_MARKER, classify_column, is_missing_token};
use reader::{Delimiter, detect_delimiter, open_maybe_gz};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported input format: {0} (use .txt, .tsv or .csv, optionally .gz)")]
    UnsupportedFormat(String),
    #[error("missing input: {0}")]
    MissingColumn(String),
    #[error("parse error at line {line}, column '{column}': cannot read '{value}' as a number")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("input table is empty: {0}")]
    Empty(String),
}

/// Wide protein table restricted to identifier and intensity columns.
///
/// Intensities are stored column-major, one vector per intensity column,
/// with `NaN` marking a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinTable {
    pub source: Option<PathBuf>,
    pub intensity_marker: String,
    pub gene_names: Option<Vec<Option<String>>>,
    pub protein_ids: Option<Vec<Option<String>>>,
    pub protein_names: Option<Vec<Option<String>>>,
    pub intensity_columns: Vec<String>,
    pub intensities: Vec<Vec<f64>>,
    pub n_rows: usize,
    pub n_columns_dropped: usize,
}

impl ProteinTable {
    pub fn n_intensity_columns(&self) -> usize {
        self.intensity_columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.intensity_columns.is_empty()
    }

    pub fn intensity_index(&self, name: &str) -> Option<usize> {
        self.intensity_columns.iter().position(|c| c == name)
    }

    pub fn column(&self, idx: usize) -> &[f64] {
        &self.intensities[idx]
    }

    pub fn gene_name(&self, row: usize) -> Option<&str> {
        cell(&self.gene_names, row)
    }

    pub fn protein_id(&self, row: usize) -> Option<&str> {
        cell(&self.protein_ids, row)
    }

    pub fn protein_name(&self, row: usize) -> Option<&str> {
        cell(&self.protein_names, row)
    }
}

fn cell(column: &Option<Vec<Option<String>>>, row: usize) -> Option<&str> {
    column
        .as_ref()
        .and_then(|v| v.get(row))
        .and_then(|c| c.as_deref())
}

pub fn load_table(path: &Path) -> Result<ProteinTable, InputError> {
    load_table_with_marker(path, DEFAULT_INTENSITY_MARKER)
}

pub fn load_table_with_marker(path: &Path, marker: &str) -> Result<ProteinTable, InputError> {
    let delimiter = detect_delimiter(path)?;
    crate::info!(
        "reading protein table: path={}, delimiter={}",
        path.display(),
        delimiter.name()
    );
    let reader = open_maybe_gz(path)?;
    let mut table = read_table(reader, delimiter, marker)?;
    table.source = Some(path.to_path_buf());
    Ok(table)
}

pub fn read_table<R: Read>(
    reader: R,
    delimiter: Delimiter,
    marker: &str,
) -> Result<ProteinTable, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(InputError::Empty("header row is empty".to_string()));
    }

    let mut kept: Vec<(usize, ColumnKind, String)> = Vec::new();
    for (idx, raw) in headers.iter().enumerate() {
        let name = if idx == 0 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw
        };
        if let Some(kind) = classify_column(name, marker) {
            kept.push((idx, kind, name.to_string()));
        }
    }
    let n_columns_dropped = headers.len() - kept.len();

    let has_kind = |kind: ColumnKind| kept.iter().any(|(_, k, _)| *k == kind);
    let mut gene_names = has_kind(ColumnKind::GeneNames).then(Vec::new);
    let mut protein_ids = has_kind(ColumnKind::ProteinIds).then(Vec::new);
    let mut protein_names = has_kind(ColumnKind::ProteinNames).then(Vec::new);

    let intensity_columns: Vec<String> = kept
        .iter()
        .filter(|(_, k, _)| *k == ColumnKind::Intensity)
        .map(|(_, _, name)| name.clone())
        .collect();
    let mut intensities: Vec<Vec<f64>> = vec![Vec::new(); intensity_columns.len()];

    let mut n_rows = 0usize;
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let mut intensity_idx = 0usize;
        for (idx, kind, name) in &kept {
            let value = record.get(*idx).unwrap_or("");
            match kind {
                ColumnKind::GeneNames => push_identifier(&mut gene_names, value),
                ColumnKind::ProteinIds => push_identifier(&mut protein_ids, value),
                ColumnKind::ProteinNames => push_identifier(&mut protein_names, value),
                ColumnKind::Intensity => {
                    intensities[intensity_idx].push(parse_intensity(value, line, name)?);
                    intensity_idx += 1;
                }
            }
        }
        n_rows += 1;
    }

    crate::info!(
        "loaded protein table: rows={}, intensity_columns={}, dropped_columns={}",
        n_rows,
        intensity_columns.len(),
        n_columns_dropped
    );
    if gene_names.is_none() {
        crate::warn!(
            "column '{}' not found; identifier-dependent steps will fail",
            columns::GENE_NAMES
        );
    }

    Ok(ProteinTable {
        source: None,
        intensity_marker: marker.to_string(),
        gene_names,
        protein_ids,
        protein_names,
        intensity_columns,
        intensities,
        n_rows,
        n_columns_dropped,
    })
}

fn push_identifier(column: &mut Option<Vec<Option<String>>>, value: &str) {
    if let Some(col) = column.as_mut() {
        let trimmed = value.trim();
        if is_missing_token(trimmed) {
            col.push(None);
        } else {
            col.push(Some(trimmed.to_string()));
        }
    }
}

fn parse_intensity(value: &str, line: u64, column: &str) -> Result<f64, InputError> {
    let trimmed = value.trim();
    if is_missing_token(trimmed) {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| InputError::Parse {
        line,
        column: column.to_string(),
        value: trimmed.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
