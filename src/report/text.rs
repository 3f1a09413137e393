use crate::model::groups::{ColumnGroup, GroupSource};
use crate::report::{PanelSummary, Summary, format_decimal, format_f64_6};

pub fn render_report_text(summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("Plasma Proteome QC Report\n");
    out.push_str("=========================\n\n");

    out.push_str("1. Input\n");
    if let Some(path) = &summary.input.path {
        out.push_str(&format!("File: {}\n", path));
    }
    out.push_str(&format!(
        "Proteins: {}\nIntensity columns ({}): {}\n",
        summary.input.n_rows, summary.input.intensity_marker, summary.input.n_intensity_columns
    ));
    out.push_str(&format!("Control group: {}\n", group_line(&summary.control)));
    out.push_str(&format!("Sample group: {}\n\n", group_line(&summary.samples)));

    let d = &summary.differential;
    out.push_str("2. Differential statistics\n");
    out.push_str(&format!(
        "Rows kept: {} of {}\nDropped without gene name: {}\nDropped by valid-value filter (< {} present): {}\n",
        d.n_kept, d.n_input_rows, d.n_dropped_no_gene, d.min_valid_values, d.n_dropped_valid_values
    ));
    out.push_str(&format!(
        "Tested rows: {}\nRows with fold change: {}\nSignificant rows (-log10 p >= {}): {}\n\n",
        d.n_tested,
        d.n_with_fold_change,
        format_f64_6(d.significance_line),
        d.n_significant
    ));

    out.push_str("3. Contamination panels\n");
    for panel in &summary.panels {
        push_panel(&mut out, panel);
    }
    out.push('\n');

    out.push_str("4. Correlation\n");
    out.push_str(&format!(
        "Axis: {}\nEntries: {}\n",
        summary.correlation.axis, summary.correlation.size
    ));
    if !summary.correlation.order.is_empty() && summary.correlation.size <= 50 {
        out.push_str(&format!(
            "Cluster order: {}\n",
            summary.correlation.order.join(", ")
        ));
    }
    out.push('\n');

    out.push_str("5. Top hits\n");
    if summary.top_hits.is_empty() {
        out.push_str("No testable rows.\n");
    }
    for (rank, hit) in summary.top_hits.iter().enumerate() {
        let lfc = hit
            .log10_fold_change
            .map(format_f64_6)
            .unwrap_or_else(|| "NA".to_string());
        out.push_str(&format!(
            "{}. {}  p={:.3e}  log10FC={}\n",
            rank + 1,
            hit.gene_names,
            hit.p_value,
            lfc
        ));
    }

    out
}

fn group_line(group: &ColumnGroup) -> String {
    let origin = match &group.source {
        GroupSource::Identifier { text, .. } => format!("'{}'", text),
        GroupSource::Complement => "complement of control".to_string(),
    };
    let mut line = format!("{} columns from {}", group.len(), origin);
    let duplicates = group.n_duplicates();
    if duplicates > 0 {
        line.push_str(&format!(" ({} matched more than once)", duplicates));
    }
    line
}

fn push_panel(out: &mut String, panel: &PanelSummary) {
    out.push_str(&format!(
        "- {} ({}), SD multiplier {}: ",
        panel.label, panel.caption, panel.sd_multiplier
    ));
    match (&panel.error, panel.threshold) {
        (Some(err), _) => out.push_str(&format!("not computed ({})\n", err)),
        (None, Some(threshold)) => {
            out.push_str(&format!(
                "threshold {}, matched rows {}\n",
                format_decimal(threshold),
                panel.matched_rows.unwrap_or(0)
            ));
            if panel.high_samples.is_empty() {
                out.push_str("  No samples above threshold.\n");
            } else {
                out.push_str(&format!(
                    "  Above threshold: {}\n",
                    panel.high_samples.join(", ")
                ));
            }
        }
        (None, None) => out.push_str("not computed\n"),
    }
}
