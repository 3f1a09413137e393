use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::correlation::CorrelationMatrix;
use crate::model::differential::DifferentialTable;
use crate::panels::PanelAudit;
use crate::pipeline::stage6_volcano::VolcanoData;
use crate::report::format_opt;

pub fn write_differential_tsv(table: &DifferentialTable, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let mut header = vec![
        "Gene names".to_string(),
        "Protein IDs".to_string(),
        "Protein names".to_string(),
        "p_value".to_string(),
        "neg_log10_p".to_string(),
        "control_mean".to_string(),
        "sample_mean".to_string(),
        "log10_fold_change".to_string(),
    ];
    header.extend(table.intensity_columns.iter().cloned());
    writeln!(w, "{}", header.join("\t"))?;

    for row in &table.rows {
        let mut fields = vec![
            row.gene_names.clone(),
            row.protein_ids.clone().unwrap_or_default(),
            row.protein_names.clone().unwrap_or_default(),
            format_opt(row.p_value),
            format_opt(row.neg_log10_p),
            format_opt(row.control_mean),
            format_opt(row.sample_mean),
            format_opt(row.log10_fold_change),
        ];
        fields.extend(row.intensities.iter().map(|&v| format_opt(Some(v))));
        writeln!(w, "{}", fields.join("\t"))?;
    }
    w.flush()
}

pub fn write_correlation_tsv(matrix: &CorrelationMatrix, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write!(w, "label")?;
    for label in &matrix.labels {
        write!(w, "\t{}", label)?;
    }
    writeln!(w)?;
    for (label, row) in matrix.labels.iter().zip(matrix.values.iter()) {
        write!(w, "{}", label)?;
        for &v in row {
            write!(w, "\t{}", format_opt(Some(v)))?;
        }
        writeln!(w)?;
    }
    w.flush()
}

pub fn write_volcano_tsv(volcano: &VolcanoData, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "gene_names\tlog10_fold_change\tneg_log10_p\tcategory\tpanels\tsignificant"
    )?;
    for p in &volcano.points {
        let panels: Vec<&str> = p.panels.iter().map(|k| k.id()).collect();
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            p.gene_names,
            format_opt(p.log10_fold_change),
            format_opt(p.neg_log10_p),
            p.category(),
            panels.join(";"),
            if p.significant { "yes" } else { "no" }
        )?;
    }
    w.flush()
}

pub fn write_panels_tsv(audits: &[PanelAudit], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "panel_id\torigin\tentries_defined\taliases_defined\tratio_aliases\trows_matched\tratio_rows_matched"
    )?;
    for a in audits {
        let origin = match a.origin {
            crate::panels::PanelOrigin::Builtin => "builtin",
            crate::panels::PanelOrigin::Reference => "reference",
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            a.panel_id,
            origin,
            a.entries_defined,
            a.aliases_defined,
            a.ratio_aliases,
            a.rows_matched,
            a.ratio_rows_matched
        )?;
    }
    w.flush()
}

pub fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    w.flush()
}

