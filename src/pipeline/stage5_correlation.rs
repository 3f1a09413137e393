use crate::math::corr::correlation_matrix;
use crate::math::ward::{leaf_order, ward_linkage};
use crate::model::correlation::{CorrelationAxis, CorrelationMatrix, LabelCoordinate};
use crate::model::differential::DifferentialTable;
use crate::panels::MarkerPanels;
use crate::panels::mapping::locate_marker;

/// `log10(v)` for positive `v`, `NaN` otherwise.
pub fn log10_intensity(v: f64) -> f64 {
    if v > 0.0 { v.log10() } else { f64::NAN }
}

/// Pearson correlation over log10 intensities, reordered by Ward leaf order.
///
/// The same permutation is applied to rows and columns. Sample matrices
/// carry a coordinate for every sample; protein matrices carry none until
/// `locate_key_markers` fills them.
pub fn compute_correlation(table: &DifferentialTable, axis: CorrelationAxis) -> CorrelationMatrix {
    let (vectors, labels) = match axis {
        CorrelationAxis::Samples => {
            let vectors: Vec<Vec<f64>> = (0..table.intensity_columns.len())
                .map(|col| {
                    table
                        .rows
                        .iter()
                        .map(|r| log10_intensity(r.intensities[col]))
                        .collect()
                })
                .collect();
            (vectors, table.display_names())
        }
        CorrelationAxis::Proteins => {
            let vectors: Vec<Vec<f64>> = table
                .rows
                .iter()
                .map(|r| r.intensities.iter().map(|&v| log10_intensity(v)).collect())
                .collect();
            let labels: Vec<String> = table.rows.iter().map(|r| r.gene_names.clone()).collect();
            (vectors, labels)
        }
    };

    let raw = correlation_matrix(&vectors);
    let merges = ward_linkage(&raw);
    let order = leaf_order(&merges, raw.len());
    let values = reorder_symmetric(&raw, &order);
    let labels: Vec<String> = order.iter().map(|&i| labels[i].clone()).collect();

    let positions = match axis {
        CorrelationAxis::Samples => labels
            .iter()
            .enumerate()
            .map(|(coordinate, label)| LabelCoordinate {
                label: label.clone(),
                coordinate,
                marker: None,
            })
            .collect(),
        CorrelationAxis::Proteins => Vec::new(),
    };

    crate::info!(
        "correlation: axis={}, size={}, merges={}",
        axis,
        labels.len(),
        merges.len()
    );

    CorrelationMatrix {
        axis,
        labels,
        leaf_order: order,
        values,
        positions,
    }
}

/// `out[i][j] = matrix[order[i]][order[j]]`.
pub fn reorder_symmetric(matrix: &[Vec<f64>], order: &[usize]) -> Vec<Vec<f64>> {
    order
        .iter()
        .map(|&i| order.iter().map(|&j| matrix[i][j]).collect())
        .collect()
}

/// Coordinates of each panel's key markers in the reordered labels.
pub fn locate_key_markers(matrix: &CorrelationMatrix, panels: &MarkerPanels) -> Vec<LabelCoordinate> {
    let mut out = Vec::new();
    for panel in panels.iter() {
        for marker in &panel.key_markers {
            match locate_marker(&matrix.labels, marker) {
                Some(coordinate) => out.push(LabelCoordinate {
                    label: matrix.labels[coordinate].clone(),
                    coordinate,
                    marker: Some(marker.clone()),
                }),
                None => crate::debug!("key marker {} not present in heatmap labels", marker),
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_correlation.rs"]
mod tests;
