pub mod json;
pub mod text;
pub mod tsv;

use serde::Serialize;
use thiserror::Error;

use crate::model::correlation::{CorrelationAxis, LabelCoordinate};
use crate::model::groups::ColumnGroup;
use crate::panels::PanelAudit;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("panel {panel}: {got} values for {expected} sample columns")]
    LengthMismatch {
        panel: String,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub path: Option<String>,
    pub intensity_marker: String,
    pub n_rows: usize,
    pub n_intensity_columns: usize,
    pub n_columns_dropped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentialSummary {
    pub n_input_rows: usize,
    pub n_kept: usize,
    pub n_dropped_no_gene: usize,
    pub n_dropped_valid_values: usize,
    pub min_valid_values: usize,
    pub n_tested: usize,
    pub n_with_fold_change: usize,
    pub n_significant: usize,
    pub significance_line: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleRatio {
    pub sample: String,
    pub ratio: f64,
    pub high: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelSummary {
    pub id: String,
    pub label: String,
    pub caption: String,
    pub reverse: bool,
    pub sd_multiplier: u8,
    pub status: String,
    pub error: Option<String>,
    pub matched_rows: Option<usize>,
    pub harmonic_mean: Option<f64>,
    pub population_std: Option<f64>,
    pub threshold: Option<f64>,
    pub ratios: Vec<SampleRatio>,
    pub high_samples: Vec<String>,
    pub volcano_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationSummary {
    pub axis: CorrelationAxis,
    pub size: usize,
    pub order: Vec<String>,
    pub positions: Vec<LabelCoordinate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopHit {
    pub gene_names: String,
    pub p_value: f64,
    pub log10_fold_change: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub tool: String,
    pub version: String,
    pub input: InputSummary,
    pub control: ColumnGroup,
    pub samples: ColumnGroup,
    pub differential: DifferentialSummary,
    pub panels: Vec<PanelSummary>,
    pub panel_audit: Vec<PanelAudit>,
    pub correlation: CorrelationSummary,
    pub top_hits: Vec<TopHit>,
}

/// Decimal text as Python prints floats: integral values keep a trailing `.0`.
pub fn format_decimal(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{v}");
    if s.contains('.') || s.contains('e') {
        s
    } else {
        format!("{s}.0")
    }
}

/// Empty for absent values, otherwise `format_decimal`.
pub fn format_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if !x.is_nan() => format_decimal(x),
        _ => String::new(),
    }
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
