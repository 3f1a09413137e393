//! Staged QC pipeline: ingestion, group resolution, differential statistics,
//! contamination ratios, correlation, volcano data and report export.
//!
//! Every stage is a pure function of its inputs. `run_pipeline` chains them
//! for one invocation; the marker panels are passed in and never mutated.

pub mod stage1_input;
pub mod stage2_groups;
pub mod stage3_differential;
pub mod stage4_ratios;
pub mod stage5_correlation;
pub mod stage6_volcano;
pub mod stage7_report;

use std::path::PathBuf;

use thiserror::Error;

use crate::input::{InputError, ProteinTable, load_table_with_marker};
use crate::math::StatsError;
use crate::model::correlation::{CorrelationAxis, CorrelationMatrix};
use crate::model::differential::DifferentialTable;
use crate::model::groups::GroupRole;
use crate::model::thresholds::{PanelSdMultipliers, QcThresholds};
use crate::panels::loader::audit_panels;
use crate::panels::{MarkerPanels, PanelAudit, PanelError};
use crate::report::ReportError;

use stage2_groups::{ValidationError, resolve_groups};
use stage4_ratios::PanelResult;
use stage6_volcano::VolcanoData;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("protein table has no rows")]
    EmptyTable,
    #[error("{0} group is empty")]
    EmptyGroup(GroupRole),
}

impl PipelineError {
    /// Errors the user fixes by changing an identifier rather than the file.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}

#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub input: PathBuf,
    pub control: String,
    pub samples: Option<String>,
    pub sd_multipliers: PanelSdMultipliers,
    pub heatmap_axis: CorrelationAxis,
    pub thresholds: QcThresholds,
}

impl PipelineParams {
    pub fn new(input: impl Into<PathBuf>, control: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            control: control.into(),
            samples: None,
            sd_multipliers: PanelSdMultipliers::default(),
            heatmap_axis: CorrelationAxis::default(),
            thresholds: QcThresholds::default_v1(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub params: PipelineParams,
    pub table: ProteinTable,
    pub differential: DifferentialTable,
    pub panel_results: Vec<PanelResult>,
    pub correlation: CorrelationMatrix,
    pub volcano: VolcanoData,
    pub panel_audit: Vec<PanelAudit>,
}

pub fn run_pipeline(
    params: &PipelineParams,
    panels: &MarkerPanels,
) -> Result<PipelineOutput, PipelineError> {
    let table = load_table_with_marker(&params.input, &params.thresholds.intensity_marker)?;
    run_pipeline_on_table(table, params, panels)
}

/// Validates an already loaded table and runs stages 2 to 6 on it.
pub fn run_pipeline_on_table(
    table: ProteinTable,
    params: &PipelineParams,
    panels: &MarkerPanels,
) -> Result<PipelineOutput, PipelineError> {
    stage1_input::validate_table(&table)?;
    let (control, samples) = resolve_groups(&table, &params.control, params.samples.as_deref())?;

    let differential =
        stage3_differential::run_differential(&table, &control, &samples, &params.thresholds)?;
    if differential.rows.is_empty() {
        crate::warn!("no rows passed the gene-name and valid-value filters");
    }

    let panel_results = stage4_ratios::compute_panels(
        &differential,
        panels,
        &params.sd_multipliers,
        &params.thresholds,
    );

    let mut correlation =
        stage5_correlation::compute_correlation(&differential, params.heatmap_axis);
    if params.heatmap_axis == CorrelationAxis::Proteins {
        correlation.positions = stage5_correlation::locate_key_markers(&correlation, panels);
    }

    let volcano = stage6_volcano::build_volcano(&differential, panels, &params.thresholds);

    let gene_names: Vec<&str> = differential
        .rows
        .iter()
        .map(|r| r.gene_names.as_str())
        .collect();
    let panel_audit = audit_panels(panels, &gene_names);

    Ok(PipelineOutput {
        params: params.clone(),
        table,
        differential,
        panel_results,
        correlation,
        volcano,
        panel_audit,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
