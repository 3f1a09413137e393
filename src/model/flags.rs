use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContaminationFlag {
    High,
    Normal,
}

impl ContaminationFlag {
    /// High only when the ratio strictly exceeds the threshold.
    pub fn classify(ratio: f64, threshold: f64) -> Self {
        if ratio > threshold {
            ContaminationFlag::High
        } else {
            ContaminationFlag::Normal
        }
    }

    pub fn is_high(self) -> bool {
        self == ContaminationFlag::High
    }

    pub fn report_value(self) -> &'static str {
        match self {
            ContaminationFlag::High => "yes",
            ContaminationFlag::Normal => "no",
        }
    }
}

pub fn classify_all(ratios: &[f64], threshold: f64) -> Vec<ContaminationFlag> {
    ratios
        .iter()
        .map(|&r| ContaminationFlag::classify(r, threshold))
        .collect()
}
