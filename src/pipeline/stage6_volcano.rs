use serde::Serialize;

use crate::model::differential::DifferentialTable;
use crate::model::thresholds::QcThresholds;
use crate::panels::mapping::row_matches;
use crate::panels::{MarkerPanels, PanelKind};

pub const OTHER_CATEGORY: &str = "other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolcanoPoint {
    pub gene_names: String,
    pub log10_fold_change: Option<f64>,
    pub neg_log10_p: Option<f64>,
    pub panels: Vec<PanelKind>,
    pub significant: bool,
}

impl VolcanoPoint {
    /// Label of the first matching panel, `other` when none matches.
    pub fn category(&self) -> &'static str {
        self.panels.first().map_or(OTHER_CATEGORY, |k| k.label())
    }

    pub fn is_plotted(&self) -> bool {
        self.log10_fold_change.is_some() && self.neg_log10_p.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolcanoData {
    pub significance_line: f64,
    pub points: Vec<VolcanoPoint>,
}

impl VolcanoData {
    pub fn n_in_panel(&self, kind: PanelKind) -> usize {
        self.points.iter().filter(|p| p.panels.contains(&kind)).count()
    }

    pub fn n_significant(&self) -> usize {
        self.points.iter().filter(|p| p.significant).count()
    }
}

/// Volcano points coloured by full panel membership, one per differential row.
pub fn build_volcano(
    table: &DifferentialTable,
    panels: &MarkerPanels,
    thresholds: &QcThresholds,
) -> VolcanoData {
    let line = thresholds.significance_line();
    let points = table
        .rows
        .iter()
        .map(|row| VolcanoPoint {
            gene_names: row.gene_names.clone(),
            log10_fold_change: row.log10_fold_change,
            neg_log10_p: row.neg_log10_p,
            panels: panels
                .iter()
                .filter(|p| row_matches(&row.gene_names, &p.aliases))
                .map(|p| p.kind)
                .collect(),
            significant: row.neg_log10_p.is_some_and(|v| v >= line),
        })
        .collect();

    VolcanoData {
        significance_line: line,
        points,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_volcano.rs"]
mod tests;
