use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationAxis {
    #[default]
    Samples,
    Proteins,
}

impl fmt::Display for CorrelationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationAxis::Samples => write!(f, "samples"),
            CorrelationAxis::Proteins => write!(f, "proteins"),
        }
    }
}

/// Plotted position of a labelled entry in the reordered matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCoordinate {
    pub label: String,
    pub coordinate: usize,
    /// Panel key marker that located this entry, for protein heatmaps.
    pub marker: Option<String>,
}

/// Correlation matrix already permuted into dendrogram leaf order.
///
/// `labels[i]` names row and column `i`; `leaf_order[i]` is the original
/// index of that entry. Undefined correlations are `NaN` and serialize as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub axis: CorrelationAxis,
    pub labels: Vec<String>,
    pub leaf_order: Vec<usize>,
    #[serde(serialize_with = "serialize_nan_matrix")]
    pub values: Vec<Vec<f64>>,
    pub positions: Vec<LabelCoordinate>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn coordinate_of(&self, label: &str) -> Option<usize> {
        self.positions
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.coordinate)
    }
}

fn serialize_nan_matrix<S: Serializer>(values: &[Vec<f64>], s: S) -> Result<S::Ok, S::Error> {
    let rows: Vec<Vec<Option<f64>>> = values
        .iter()
        .map(|row| row.iter().map(|v| v.is_finite().then_some(*v)).collect())
        .collect();
    rows.serialize(s)
}
