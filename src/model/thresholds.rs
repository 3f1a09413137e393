use std::fmt;

use serde::Serialize;

use crate::input::columns::DEFAULT_INTENSITY_MARKER;
use crate::panels::PanelKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcThresholds {
    pub intensity_marker: String,
    pub valid_value_fraction: f64,
    pub significance_alpha: f64,
    pub ratio_decimals: u32,
    pub top_hits: usize,
}

impl QcThresholds {
    pub fn default_v1() -> Self {
        Self {
            intensity_marker: DEFAULT_INTENSITY_MARKER.to_string(),
            valid_value_fraction: 0.5,
            significance_alpha: 0.05,
            ratio_decimals: 4,
            top_hits: 10,
        }
    }

    /// Minimum number of present intensities a row needs to be kept.
    pub fn min_valid_values(&self, n_columns: usize) -> usize {
        let exact = n_columns as f64 * self.valid_value_fraction;
        (exact - 1e-9).ceil().max(0.0) as usize
    }

    pub fn significance_line(&self) -> f64 {
        -self.significance_alpha.log10()
    }
}

impl Default for QcThresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}

/// Standard-deviation multiplier `k` of the outlier threshold, 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SdMultiplier(u8);

impl SdMultiplier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Default for SdMultiplier {
    fn default() -> Self {
        SdMultiplier(3)
    }
}

impl TryFrom<u8> for SdMultiplier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(SdMultiplier(value))
        } else {
            Err(format!(
                "SD multiplier must be between {} and {} (got {})",
                Self::MIN,
                Self::MAX,
                value
            ))
        }
    }
}

impl fmt::Display for SdMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `SdMultiplier` per marker panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PanelSdMultipliers {
    pub platelets: SdMultiplier,
    pub erythrocytes: SdMultiplier,
    pub coagulation: SdMultiplier,
}

impl PanelSdMultipliers {
    pub fn get(&self, kind: PanelKind) -> SdMultiplier {
        match kind {
            PanelKind::Platelets => self.platelets,
            PanelKind::Erythrocytes => self.erythrocytes,
            PanelKind::Coagulation => self.coagulation,
        }
    }
}
