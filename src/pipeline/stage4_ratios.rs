use crate::math::StatsError;
use crate::math::describe::{harmonic_mean, nan_sum, population_std, round_to};
use crate::model::differential::DifferentialTable;
use crate::model::ratios::RatioSeries;
use crate::model::thresholds::{PanelSdMultipliers, QcThresholds, SdMultiplier};
use crate::panels::mapping::select_rows;
use crate::panels::{MarkerPanel, MarkerPanels, PanelKind};

pub const RATIO_DECIMALS: u32 = 4;

/// Ratio computation of one panel; a failure only affects that panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelResult {
    pub kind: PanelKind,
    pub sd_multiplier: SdMultiplier,
    pub outcome: Result<RatioSeries, StatsError>,
}

impl PanelResult {
    pub fn series(&self) -> Option<&RatioSeries> {
        self.outcome.as_ref().ok()
    }
}

/// Marker sum over total sum, per intensity column, with the outlier
/// threshold `round(harmonic_mean + k * population_std, 4)`.
pub fn compute_ratio(
    table: &DifferentialTable,
    panel: &MarkerPanel,
    k: SdMultiplier,
    reverse: bool,
) -> Result<RatioSeries, StatsError> {
    compute_ratio_rounded(table, panel, k, reverse, RATIO_DECIMALS)
}

pub fn compute_ratio_rounded(
    table: &DifferentialTable,
    panel: &MarkerPanel,
    k: SdMultiplier,
    reverse: bool,
    decimals: u32,
) -> Result<RatioSeries, StatsError> {
    let matched = select_rows(
        table.rows.iter().map(|r| r.gene_names.as_str()),
        &panel.ratio_aliases,
    );

    let n_columns = table.intensity_columns.len();
    let mut values = Vec::with_capacity(n_columns);
    let mut marker_column = Vec::with_capacity(matched.len());
    for col in 0..n_columns {
        let total = table.column_values(col);
        marker_column.clear();
        marker_column.extend(matched.iter().map(|&row| total[row]));

        let ratio = ratio_from_sums(nan_sum(&marker_column), nan_sum(&total), decimals);
        if reverse {
            values.push(reciprocal(ratio, col)?);
        } else {
            values.push(ratio);
        }
    }

    let (hm, std, threshold) = outlier_threshold(&values, k, decimals)?;

    Ok(RatioSeries {
        panel: panel.kind,
        sd_multiplier: k,
        reverse,
        samples: table.intensity_columns.clone(),
        display_names: table.display_names(),
        values,
        harmonic_mean: hm,
        population_std: std,
        threshold,
        matched_rows: matched.len(),
    })
}

/// Rounded `marker / total`; zero when the total is zero.
pub fn ratio_from_sums(marker: f64, total: f64, decimals: u32) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    let ratio = marker / total;
    if ratio.is_finite() {
        round_to(ratio, decimals)
    } else {
        0.0
    }
}

/// Inverse of the already rounded ratio; not rounded again.
fn reciprocal(ratio: f64, index: usize) -> Result<f64, StatsError> {
    if ratio.is_nan() || ratio <= 0.0 {
        return Err(StatsError::NonPositive {
            index,
            value: ratio,
        });
    }
    Ok(1.0 / ratio)
}

/// Returns `(harmonic_mean, population_std, threshold)`.
pub fn outlier_threshold(
    values: &[f64],
    k: SdMultiplier,
    decimals: u32,
) -> Result<(f64, f64, f64), StatsError> {
    let hm = harmonic_mean(values)?;
    let std = population_std(values)?;
    Ok((hm, std, round_to(hm + k.as_f64() * std, decimals)))
}

pub fn compute_panels(
    table: &DifferentialTable,
    panels: &MarkerPanels,
    multipliers: &PanelSdMultipliers,
    thresholds: &QcThresholds,
) -> Vec<PanelResult> {
    panels
        .iter()
        .map(|panel| {
            let k = multipliers.get(panel.kind);
            let outcome =
                compute_ratio_rounded(table, panel, k, panel.reverse(), thresholds.ratio_decimals);
            match &outcome {
                Ok(series) => crate::info!(
                    "panel {}: matched_rows={}, SD{} threshold={}, high={}",
                    panel.kind.id(),
                    series.matched_rows,
                    k,
                    series.threshold,
                    series.n_high()
                ),
                Err(err) => crate::warn!("panel {}: ratio not computed: {}", panel.kind.id(), err),
            }
            PanelResult {
                kind: panel.kind,
                sd_multiplier: k,
                outcome,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_ratios.rs"]
mod tests;
