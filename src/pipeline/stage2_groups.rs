use thiserror::Error;

use crate::input::ProteinTable;
use crate::model::groups::{ColumnGroup, GroupRole, GroupSource};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{role} identifier is empty")]
    EmptyIdentifier { role: GroupRole },
    #[error("{role} identifier '{identifier}' matches no intensity column")]
    EmptySelection { role: GroupRole, identifier: String },
    #[error("no intensity columns remain for the {role} group after removing the control columns")]
    EmptyComplement { role: GroupRole },
}

/// Word tokens of a free-text identifier: runs of alphanumerics, `_` and `'`, lower-cased.
pub fn tokenize(identifier: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in identifier.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '\'' {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Columns whose lower-cased name contains any token of `identifier`.
///
/// A column matched by several tokens is listed once per token.
pub fn resolve_columns(table: &ProteinTable, identifier: &str) -> ColumnGroup {
    resolve_group(table, identifier, GroupRole::Control)
}

pub fn resolve_group(table: &ProteinTable, identifier: &str, role: GroupRole) -> ColumnGroup {
    let tokens = tokenize(identifier);
    let lowered: Vec<String> = table
        .intensity_columns
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut indices = Vec::new();
    for token in &tokens {
        for (idx, name) in lowered.iter().enumerate() {
            if name.contains(token.as_str()) {
                indices.push(idx);
            }
        }
    }

    let group = ColumnGroup {
        role,
        source: GroupSource::Identifier {
            text: identifier.to_string(),
            tokens,
        },
        columns: indices
            .iter()
            .map(|&i| table.intensity_columns[i].clone())
            .collect(),
        indices,
    };
    let duplicates = group.n_duplicates();
    if duplicates > 0 {
        crate::warn!(
            "{} identifier '{}' matched {} column(s) more than once; they are weighted once per match",
            role,
            identifier,
            duplicates
        );
    }
    group
}

/// Intensity columns not used by `control`, in table order.
pub fn complement(table: &ProteinTable, control: &ColumnGroup) -> ColumnGroup {
    let indices: Vec<usize> = (0..table.n_intensity_columns())
        .filter(|i| !control.indices.contains(i))
        .collect();
    ColumnGroup {
        role: GroupRole::Samples,
        source: GroupSource::Complement,
        columns: indices
            .iter()
            .map(|&i| table.intensity_columns[i].clone())
            .collect(),
        indices,
    }
}

/// Resolves both comparison groups, falling back to the complement of the
/// control group when no sample identifier is given.
pub fn resolve_groups(
    table: &ProteinTable,
    control: &str,
    samples: Option<&str>,
) -> Result<(ColumnGroup, ColumnGroup), ValidationError> {
    let control_group = checked_group(table, control, GroupRole::Control)?;

    let samples_group = match samples.filter(|s| !s.trim().is_empty()) {
        Some(text) => checked_group(table, text, GroupRole::Samples)?,
        None => {
            let group = complement(table, &control_group);
            if group.is_empty() {
                return Err(ValidationError::EmptyComplement {
                    role: GroupRole::Samples,
                });
            }
            group
        }
    };

    crate::info!(
        "resolved groups: control={} columns, samples={} columns ({})",
        control_group.len(),
        samples_group.len(),
        match samples_group.source {
            GroupSource::Complement => "complement",
            GroupSource::Identifier { .. } => "identifier",
        }
    );
    Ok((control_group, samples_group))
}

fn checked_group(
    table: &ProteinTable,
    identifier: &str,
    role: GroupRole,
) -> Result<ColumnGroup, ValidationError> {
    if tokenize(identifier).is_empty() {
        return Err(ValidationError::EmptyIdentifier { role });
    }
    let group = resolve_group(table, identifier, role);
    if group.is_empty() {
        return Err(ValidationError::EmptySelection {
            role,
            identifier: identifier.to_string(),
        });
    }
    Ok(group)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_groups.rs"]
mod tests;
