pub const GENE_NAMES: &str = "Gene names";
pub const PROTEIN_IDS: &str = "Protein IDs";
pub const PROTEIN_NAMES: &str = "Protein names";

pub const IDENTIFIER_COLUMNS: [&str; 3] = [GENE_NAMES, PROTEIN_IDS, PROTEIN_NAMES];

pub const DEFAULT_INTENSITY_MARKER: &str = "LFQ";

const DESCRIPTIVE_SUFFIX: &str = " intensity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    GeneNames,
    ProteinIds,
    ProteinNames,
    Intensity,
}

/// Decides at load time whether a header is kept. The marker match is a
/// case-sensitive literal substring.
pub fn classify_column(name: &str, marker: &str) -> Option<ColumnKind> {
    match name {
        GENE_NAMES => Some(ColumnKind::GeneNames),
        PROTEIN_IDS => Some(ColumnKind::ProteinIds),
        PROTEIN_NAMES => Some(ColumnKind::ProteinNames),
        _ if !marker.is_empty() && name.contains(marker) => Some(ColumnKind::Intensity),
        _ => None,
    }
}

pub fn is_identifier_column(name: &str) -> bool {
    IDENTIFIER_COLUMNS.contains(&name)
}

/// `"LFQ intensity TP1_A"` -> `"TP1_A"`.
pub fn display_name(column: &str, marker: &str) -> String {
    let stripped = if marker.is_empty() {
        column.to_string()
    } else {
        column.replace(marker, "")
    };
    stripped.replace(DESCRIPTIVE_SUFFIX, "").trim().to_string()
}

pub fn is_missing_token(cell: &str) -> bool {
    matches!(
        cell,
        "" | "NaN" | "nan" | "NA" | "N/A" | "#N/A" | "null" | "NULL"
    )
}
