use serde::Serialize;

use crate::model::flags::{ContaminationFlag, classify_all};
use crate::model::thresholds::SdMultiplier;
use crate::panels::PanelKind;

/// Per-sample contamination ratio of one marker panel with its outlier threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioSeries {
    pub panel: PanelKind,
    pub sd_multiplier: SdMultiplier,
    pub reverse: bool,
    /// Raw intensity column names, in table order.
    pub samples: Vec<String>,
    pub display_names: Vec<String>,
    pub values: Vec<f64>,
    pub harmonic_mean: f64,
    pub population_std: f64,
    pub threshold: f64,
    pub matched_rows: usize,
}

/// Presentation label for a sample above the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioAnnotation {
    pub display_name: String,
    pub ratio: f64,
    pub index: usize,
}

impl RatioSeries {
    pub fn flags(&self) -> Vec<ContaminationFlag> {
        classify_all(&self.values, self.threshold)
    }

    pub fn n_high(&self) -> usize {
        self.flags().iter().filter(|f| f.is_high()).count()
    }

    pub fn annotations(&self) -> Vec<RatioAnnotation> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, ratio)| ContaminationFlag::classify(**ratio, self.threshold).is_high())
            .map(|(index, &ratio)| RatioAnnotation {
                display_name: self.display_names[index].clone(),
                ratio,
                index,
            })
            .collect()
    }
}
