pub mod defs;
pub mod loader;
pub mod mapping;

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub use defs::PanelKind;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("marker workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("marker reference {path}: missing column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("marker reference {path}, line {line}: unknown category '{category}'")]
    UnknownCategory {
        path: PathBuf,
        line: u64,
        category: String,
    },
    #[error("marker reference {path}: unsupported format")]
    UnsupportedFormat { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelOrigin {
    Builtin,
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPanel {
    pub kind: PanelKind,
    pub origin: PanelOrigin,
    pub entries: Vec<String>,
    /// Every alias of every entry; used for volcano categories.
    pub aliases: BTreeSet<String>,
    /// Aliases that drive the contamination ratio.
    pub ratio_aliases: BTreeSet<String>,
    pub key_markers: Vec<String>,
}

impl MarkerPanel {
    pub fn reverse(&self) -> bool {
        self.kind.reverse()
    }

    pub fn has_ratio_subset(&self) -> bool {
        self.ratio_aliases != self.aliases
    }
}

/// Immutable marker reference shared by every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPanels {
    pub source: Option<PathBuf>,
    pub panels: Vec<MarkerPanel>,
}

impl MarkerPanels {
    pub fn get(&self, kind: PanelKind) -> Option<&MarkerPanel> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerPanel> {
        self.panels.iter()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelAudit {
    pub panel_id: String,
    pub origin: PanelOrigin,
    pub entries_defined: usize,
    pub aliases_defined: usize,
    pub ratio_aliases: usize,
    pub rows_matched: usize,
    pub ratio_rows_matched: usize,
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/tests.rs"]
mod tests;
