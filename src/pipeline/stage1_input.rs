use std::path::Path;

use crate::input::columns::{GENE_NAMES, PROTEIN_IDS, PROTEIN_NAMES};
use crate::input::{InputError, ProteinTable, load_table_with_marker};
use crate::model::thresholds::QcThresholds;
use crate::pipeline::PipelineError;

pub fn run_stage1(path: &Path, thresholds: &QcThresholds) -> Result<ProteinTable, PipelineError> {
    let table = load_table_with_marker(path, &thresholds.intensity_marker)?;
    validate_table(&table)?;
    Ok(table)
}

/// Rejects tables that cannot go through the statistics stages.
///
/// Only `Gene names` is required downstream; the other identifier columns
/// are reported but tolerated.
pub fn validate_table(table: &ProteinTable) -> Result<(), PipelineError> {
    if table.intensity_columns.is_empty() {
        return Err(InputError::MissingColumn(format!(
            "no column contains the intensity marker '{}'",
            table.intensity_marker
        ))
        .into());
    }
    if table.gene_names.is_none() {
        return Err(InputError::MissingColumn(format!("column '{GENE_NAMES}'")).into());
    }
    if table.protein_ids.is_none() {
        crate::warn!("column '{}' not found", PROTEIN_IDS);
    }
    if table.protein_names.is_none() {
        crate::warn!("column '{}' not found", PROTEIN_NAMES);
    }
    if table.n_rows == 0 {
        return Err(PipelineError::EmptyTable);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_input.rs"]
mod tests;
