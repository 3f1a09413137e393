use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::differential::DifferentialTable;
use crate::model::flags::ContaminationFlag;
use crate::model::thresholds::SdMultiplier;
use crate::panels::PanelKind;
use crate::pipeline::PipelineOutput;
use crate::pipeline::stage4_ratios::PanelResult;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::tsv::{
    write_correlation_tsv, write_differential_tsv, write_panels_tsv, write_text,
    write_volcano_tsv,
};
use crate::report::{
    CorrelationSummary, DifferentialSummary, InputSummary, PanelSummary, ReportError,
    SampleRatio, Summary, TopHit, format_decimal,
};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum ReportValues {
    Ratios(Vec<f64>),
    Flags(Vec<ContaminationFlag>),
}

impl ReportValues {
    pub fn len(&self) -> usize {
        match self {
            ReportValues::Ratios(v) => v.len(),
            ReportValues::Flags(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cells(&self) -> Vec<String> {
        match self {
            ReportValues::Ratios(v) => v.iter().map(|&r| format_decimal(r)).collect(),
            ReportValues::Flags(v) => v.iter().map(|f| f.report_value().to_string()).collect(),
        }
    }
}

/// One exported row: a panel's ratios or its flags at a given threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    pub category: PanelKind,
    pub sd_multiplier: SdMultiplier,
    pub threshold: f64,
    pub values: ReportValues,
}

impl ReportRecord {
    /// `plat_contamination_ratio_SD3=0.1234`, with a `_high` suffix for flags.
    pub fn label(&self) -> String {
        let base = format!(
            "{}_contamination_ratio_SD{}={}",
            self.category.id(),
            self.sd_multiplier,
            format_decimal(self.threshold)
        );
        match self.values {
            ReportValues::Ratios(_) => base,
            ReportValues::Flags(_) => format!("{base}_high"),
        }
    }
}

/// Ratio record then flag record for every panel that computed.
pub fn report_records(results: &[PanelResult]) -> Vec<ReportRecord> {
    let mut records = Vec::with_capacity(results.len() * 2);
    for series in results.iter().filter_map(PanelResult::series) {
        records.push(ReportRecord {
            category: series.panel,
            sd_multiplier: series.sd_multiplier,
            threshold: series.threshold,
            values: ReportValues::Ratios(series.values.clone()),
        });
        records.push(ReportRecord {
            category: series.panel,
            sd_multiplier: series.sd_multiplier,
            threshold: series.threshold,
            values: ReportValues::Flags(series.flags()),
        });
    }
    records
}

/// CSV bytes with a UTF-8 BOM: an empty corner cell and the sample columns
/// as header, then one labelled row per record.
pub fn export_report(
    table: &DifferentialTable,
    results: &[PanelResult],
) -> Result<Vec<u8>, ReportError> {
    let records = report_records(results);
    let n_samples = table.intensity_columns.len();

    let mut buf = Vec::new();
    buf.extend_from_slice(UTF8_BOM);
    {
        let mut w = csv::WriterBuilder::new().from_writer(&mut buf);
        let mut header = Vec::with_capacity(n_samples + 1);
        header.push("");
        header.extend(table.intensity_columns.iter().map(String::as_str));
        w.write_record(&header)?;

        for record in &records {
            if record.values.len() != n_samples {
                return Err(ReportError::LengthMismatch {
                    panel: record.category.id().to_string(),
                    expected: n_samples,
                    got: record.values.len(),
                });
            }
            let mut row = Vec::with_capacity(n_samples + 1);
            row.push(record.label());
            row.extend(record.values.cells());
            w.write_record(&row)?;
        }
        w.flush()?;
    }
    Ok(buf)
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub differential: PathBuf,
    pub contamination_report: PathBuf,
    pub correlation: PathBuf,
    pub volcano: PathBuf,
    pub panels: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(out_dir: &Path) -> Self {
        Self {
            differential: out_dir.join("differential.tsv"),
            contamination_report: out_dir.join("contamination_report.csv"),
            correlation: out_dir.join("correlation.tsv"),
            volcano: out_dir.join("volcano.tsv"),
            panels: out_dir.join("panels_report.tsv"),
            summary: out_dir.join("summary.json"),
            report: out_dir.join("report.txt"),
        }
    }
}

pub fn write_outputs(output: &PipelineOutput, out_dir: &Path) -> Result<OutputPaths, ReportError> {
    fs::create_dir_all(out_dir)?;
    let paths = OutputPaths::in_dir(out_dir);

    write_differential_tsv(&output.differential, &paths.differential)?;

    let csv_bytes = export_report(&output.differential, &output.panel_results)?;
    let mut file = fs::File::create(&paths.contamination_report)?;
    file.write_all(&csv_bytes)?;

    write_correlation_tsv(&output.correlation, &paths.correlation)?;
    write_volcano_tsv(&output.volcano, &paths.volcano)?;
    write_panels_tsv(&output.panel_audit, &paths.panels)?;

    let summary = build_summary(output);
    write_text(&paths.summary, &render_summary_json(&summary)?)?;
    write_text(&paths.report, &render_report_text(&summary))?;

    crate::info!("reports written to {}", out_dir.display());
    Ok(paths)
}

pub fn build_summary(output: &PipelineOutput) -> Summary {
    let table = &output.table;
    let diff = &output.differential;
    let thresholds = &output.params.thresholds;

    let n_tested = diff.rows.iter().filter(|r| r.p_value.is_some()).count();
    let n_with_fold_change = diff
        .rows
        .iter()
        .filter(|r| r.log10_fold_change.is_some())
        .count();

    let panels = output
        .panel_results
        .iter()
        .map(|result| panel_summary(result, output))
        .collect();

    Summary {
        tool: "kira-plasmaqc".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        input: InputSummary {
            path: table.source.as_ref().map(|p| p.display().to_string()),
            intensity_marker: table.intensity_marker.clone(),
            n_rows: table.n_rows,
            n_intensity_columns: table.n_intensity_columns(),
            n_columns_dropped: table.n_columns_dropped,
        },
        control: diff.control.clone(),
        samples: diff.samples.clone(),
        differential: DifferentialSummary {
            n_input_rows: diff.n_input_rows,
            n_kept: diff.n_rows(),
            n_dropped_no_gene: diff.n_dropped_no_gene,
            n_dropped_valid_values: diff.n_dropped_valid_values,
            min_valid_values: thresholds.min_valid_values(diff.intensity_columns.len()),
            n_tested,
            n_with_fold_change,
            n_significant: output.volcano.n_significant(),
            significance_line: output.volcano.significance_line,
        },
        panels,
        panel_audit: output.panel_audit.clone(),
        correlation: CorrelationSummary {
            axis: output.correlation.axis,
            size: output.correlation.len(),
            order: output.correlation.labels.clone(),
            positions: output.correlation.positions.clone(),
        },
        top_hits: top_hits(diff, thresholds.top_hits),
    }
}

fn panel_summary(result: &PanelResult, output: &PipelineOutput) -> PanelSummary {
    let kind = result.kind;
    let mut summary = PanelSummary {
        id: kind.id().to_string(),
        label: kind.label().to_string(),
        caption: kind.ratio_caption().to_string(),
        reverse: kind.reverse(),
        sd_multiplier: result.sd_multiplier.get(),
        status: "ok".to_string(),
        error: None,
        matched_rows: None,
        harmonic_mean: None,
        population_std: None,
        threshold: None,
        ratios: Vec::new(),
        high_samples: Vec::new(),
        volcano_rows: output.volcano.n_in_panel(kind),
    };
    match &result.outcome {
        Ok(series) => {
            let flags = series.flags();
            summary.matched_rows = Some(series.matched_rows);
            summary.harmonic_mean = Some(series.harmonic_mean);
            summary.population_std = Some(series.population_std);
            summary.threshold = Some(series.threshold);
            summary.ratios = series
                .display_names
                .iter()
                .zip(series.values.iter())
                .zip(flags.iter())
                .map(|((name, &ratio), flag)| SampleRatio {
                    sample: name.clone(),
                    ratio,
                    high: flag.is_high(),
                })
                .collect();
            summary.high_samples = series
                .annotations()
                .into_iter()
                .map(|a| a.display_name)
                .collect();
        }
        Err(err) => {
            summary.status = "failed".to_string();
            summary.error = Some(err.to_string());
        }
    }
    summary
}

/// Rows with the smallest p-values, ties in table order.
pub fn top_hits(table: &DifferentialTable, n: usize) -> Vec<TopHit> {
    let mut tested: Vec<(usize, f64)> = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.p_value.map(|p| (i, p)))
        .collect();
    tested.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    tested
        .into_iter()
        .take(n)
        .map(|(i, p_value)| TopHit {
            gene_names: table.rows[i].gene_names.clone(),
            p_value,
            log10_fold_change: table.rows[i].log10_fold_change,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
