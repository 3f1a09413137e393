use crate::input::columns::GENE_NAMES;
use crate::input::{InputError, ProteinTable};
use crate::math::describe::{count_present, nan_mean};
use crate::math::ttest::{neg_log10, student_t_test};
use crate::model::differential::{DifferentialRow, DifferentialTable, log10_fold_change};
use crate::model::groups::{ColumnGroup, GroupRole};
use crate::model::thresholds::QcThresholds;
use crate::pipeline::PipelineError;

/// Per-row control vs samples comparison.
///
/// Rows without a gene name are dropped, then rows with fewer present
/// intensities than `thresholds.min_valid_values` over all intensity columns.
/// Retained rows keep their input order.
pub fn run_differential(
    table: &ProteinTable,
    control: &ColumnGroup,
    samples: &ColumnGroup,
    thresholds: &QcThresholds,
) -> Result<DifferentialTable, PipelineError> {
    if table.is_empty() {
        return Err(PipelineError::EmptyTable);
    }
    if control.is_empty() {
        return Err(PipelineError::EmptyGroup(GroupRole::Control));
    }
    if samples.is_empty() {
        return Err(PipelineError::EmptyGroup(GroupRole::Samples));
    }
    if table.gene_names.is_none() {
        return Err(InputError::MissingColumn(format!("column '{GENE_NAMES}'")).into());
    }

    let n_columns = table.n_intensity_columns();
    let min_valid = thresholds.min_valid_values(n_columns);

    let mut rows = Vec::new();
    let mut n_dropped_no_gene = 0usize;
    let mut n_dropped_valid_values = 0usize;
    let mut control_values = Vec::with_capacity(control.len());
    let mut sample_values = Vec::with_capacity(samples.len());

    for row in 0..table.n_rows {
        let Some(gene) = table.gene_name(row) else {
            n_dropped_no_gene += 1;
            continue;
        };
        let intensities: Vec<f64> = table.intensities.iter().map(|col| col[row]).collect();
        if count_present(&intensities) < min_valid {
            n_dropped_valid_values += 1;
            continue;
        }

        control_values.clear();
        control_values.extend(control.indices.iter().map(|&i| intensities[i]));
        sample_values.clear();
        sample_values.extend(samples.indices.iter().map(|&i| intensities[i]));

        let test = student_t_test(&control_values, &sample_values);
        let control_mean = nan_mean(&control_values);
        let sample_mean = nan_mean(&sample_values);

        rows.push(DifferentialRow {
            source_row: row,
            gene_names: gene.to_string(),
            protein_ids: table.protein_id(row).map(str::to_string),
            protein_names: table.protein_name(row).map(str::to_string),
            p_value: test.map(|t| t.p_value),
            neg_log10_p: test.map(|t| neg_log10(t.p_value)),
            control_mean,
            sample_mean,
            log10_fold_change: log10_fold_change(control_mean, sample_mean),
            intensities,
        });
    }

    crate::info!(
        "differential: input_rows={}, kept={}, dropped_no_gene={}, dropped_valid_values={} (min {} of {})",
        table.n_rows,
        rows.len(),
        n_dropped_no_gene,
        n_dropped_valid_values,
        min_valid,
        n_columns
    );

    Ok(DifferentialTable {
        intensity_marker: table.intensity_marker.clone(),
        intensity_columns: table.intensity_columns.clone(),
        control: control.clone(),
        samples: samples.clone(),
        rows,
        n_input_rows: table.n_rows,
        n_dropped_no_gene,
        n_dropped_valid_values,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_differential.rs"]
mod tests;
