use std::collections::BTreeMap;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::input::InputError;
use crate::input::reader::{detect_delimiter, open_maybe_gz};
use crate::panels::defs::{PanelDef, PanelKind, builtin_defs};
use crate::panels::mapping::{alias_set, normalize_alias, select_rows};
use crate::panels::{MarkerPanel, MarkerPanels, PanelAudit, PanelError, PanelOrigin};

pub const CATEGORY_COLUMN: &str = "Category";
pub const GENE_NAMES_COLUMN: &str = "Gene names";

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn builtin_panels() -> MarkerPanels {
    MarkerPanels {
        source: None,
        panels: builtin_defs().iter().map(panel_from_def).collect(),
    }
}

/// Built-in panels, with the panels named in `reference` replaced by its entries.
pub fn load_panels(reference: Option<&Path>) -> Result<MarkerPanels, PanelError> {
    let Some(path) = reference else {
        return Ok(builtin_panels());
    };
    let overrides = read_reference(path)?;

    let mut panels = Vec::with_capacity(builtin_defs().len());
    for def in builtin_defs() {
        match overrides.get(&def.kind) {
            Some(entries) => {
                crate::info!(
                    "marker panel {} loaded from reference: entries={}",
                    def.kind.id(),
                    entries.len()
                );
                panels.push(panel_from_entries(def, entries.clone(), PanelOrigin::Reference));
            }
            None => {
                crate::warn!(
                    "marker reference {} has no '{}' entries; using built-in panel",
                    path.display(),
                    def.kind.label()
                );
                panels.push(panel_from_def(def));
            }
        }
    }

    Ok(MarkerPanels {
        source: Some(path.to_path_buf()),
        panels,
    })
}

fn read_reference(path: &Path) -> Result<BTreeMap<PanelKind, Vec<String>>, PanelError> {
    if is_workbook(path) {
        read_workbook(path)
    } else {
        read_delimited(path)
    }
}

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| WORKBOOK_EXTENSIONS.contains(&e.as_str()))
}

/// One sheet per panel, named by panel label or id, each with a
/// `Gene names` column in its first row. Other sheets are ignored.
fn read_workbook(path: &Path) -> Result<BTreeMap<PanelKind, Vec<String>>, PanelError> {
    let mut workbook = open_workbook_auto(path)?;
    let mut out: BTreeMap<PanelKind, Vec<String>> = BTreeMap::new();

    for sheet in workbook.sheet_names() {
        let Some(kind) = PanelKind::parse(&sheet) else {
            crate::debug!("marker workbook {}: skipping sheet '{}'", path.display(), sheet);
            continue;
        };
        let range = workbook.worksheet_range(&sheet)?;
        let mut rows = range.rows();
        let genes_idx = rows
            .next()
            .and_then(|header| {
                header
                    .iter()
                    .position(|cell| cell_text(cell) == GENE_NAMES_COLUMN)
            })
            .ok_or_else(|| PanelError::MissingColumn {
                path: path.to_path_buf(),
                column: format!("{GENE_NAMES_COLUMN} (sheet '{sheet}')"),
            })?;

        let entries = out.entry(kind).or_default();
        for row in rows {
            let genes = row.get(genes_idx).map(cell_text).unwrap_or_default();
            if !genes.is_empty() {
                entries.push(genes);
            }
        }
    }
    Ok(out)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn read_delimited(path: &Path) -> Result<BTreeMap<PanelKind, Vec<String>>, PanelError> {
    let delimiter = detect_delimiter(path).map_err(|err| match err {
        InputError::Io(e) => PanelError::Io(e),
        _ => PanelError::UnsupportedFormat {
            path: path.to_path_buf(),
        },
    })?;
    let reader = open_maybe_gz(path).map_err(|err| match err {
        InputError::Io(e) => PanelError::Io(e),
        _ => PanelError::UnsupportedFormat {
            path: path.to_path_buf(),
        },
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
            .ok_or_else(|| PanelError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let category_idx = find(CATEGORY_COLUMN)?;
    let genes_idx = find(GENE_NAMES_COLUMN)?;

    let mut out: BTreeMap<PanelKind, Vec<String>> = BTreeMap::new();
    for record in rdr.records() {
        let record = record?;
        let category = record.get(category_idx).unwrap_or("").trim();
        let genes = record.get(genes_idx).unwrap_or("").trim();
        if genes.is_empty() {
            continue;
        }
        let kind = PanelKind::parse(category).ok_or_else(|| PanelError::UnknownCategory {
            path: path.to_path_buf(),
            line: record.position().map(|p| p.line()).unwrap_or(0),
            category: category.to_string(),
        })?;
        out.entry(kind).or_default().push(genes.to_string());
    }
    Ok(out)
}

fn panel_from_def(def: &PanelDef) -> MarkerPanel {
    let entries = def.entries.iter().map(|e| e.to_string()).collect();
    panel_from_entries(def, entries, PanelOrigin::Builtin)
}

fn panel_from_entries(def: &PanelDef, entries: Vec<String>, origin: PanelOrigin) -> MarkerPanel {
    let aliases = alias_set(entries.iter().map(String::as_str));
    let ratio_aliases = match def.ratio_subset {
        Some(subset) => {
            let wanted: Vec<String> = subset.iter().map(|s| normalize_alias(s)).collect();
            alias_set(
                entries
                    .iter()
                    .map(String::as_str)
                    .filter(|entry| wanted.contains(&normalize_alias(entry))),
            )
        }
        None => aliases.clone(),
    };
    MarkerPanel {
        kind: def.kind,
        origin,
        entries,
        aliases,
        ratio_aliases,
        key_markers: def.key_markers.iter().map(|m| m.to_string()).collect(),
    }
}

/// Counts, per panel, the aliases defined and the rows of `gene_names` they match.
pub fn audit_panels(panels: &MarkerPanels, gene_names: &[&str]) -> Vec<PanelAudit> {
    panels
        .iter()
        .map(|panel| PanelAudit {
            panel_id: panel.kind.id().to_string(),
            origin: panel.origin,
            entries_defined: panel.entries.len(),
            aliases_defined: panel.aliases.len(),
            ratio_aliases: panel.ratio_aliases.len(),
            rows_matched: select_rows(gene_names.iter().copied(), &panel.aliases).len(),
            ratio_rows_matched: select_rows(gene_names.iter().copied(), &panel.ratio_aliases)
                .len(),
        })
        .collect()
}
