use serde::Serialize;

use crate::model::groups::ColumnGroup;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferentialRow {
    pub source_row: usize,
    pub gene_names: String,
    pub protein_ids: Option<String>,
    pub protein_names: Option<String>,
    pub p_value: Option<f64>,
    pub neg_log10_p: Option<f64>,
    pub control_mean: Option<f64>,
    pub sample_mean: Option<f64>,
    pub log10_fold_change: Option<f64>,
    #[serde(skip)]
    pub intensities: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialTable {
    pub intensity_marker: String,
    pub intensity_columns: Vec<String>,
    pub control: ColumnGroup,
    pub samples: ColumnGroup,
    pub rows: Vec<DifferentialRow>,
    pub n_input_rows: usize,
    pub n_dropped_no_gene: usize,
    pub n_dropped_valid_values: usize,
}

impl DifferentialTable {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Intensities of one column over the retained rows.
    pub fn column_values(&self, idx: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r.intensities[idx]).collect()
    }

    pub fn display_names(&self) -> Vec<String> {
        self.intensity_columns
            .iter()
            .map(|c| crate::input::columns::display_name(c, &self.intensity_marker))
            .collect()
    }
}

/// `log10(sample_mean / control_mean)`; absent when either mean is missing or
/// zero, when the ratio is exactly 1, or when the logarithm is not finite.
pub fn log10_fold_change(control_mean: Option<f64>, sample_mean: Option<f64>) -> Option<f64> {
    let (control, sample) = (control_mean?, sample_mean?);
    if control == 0.0 || sample == 0.0 {
        return None;
    }
    let ratio = sample / control;
    if ratio == 1.0 {
        return None;
    }
    let lfc = ratio.log10();
    lfc.is_finite().then_some(lfc)
}
