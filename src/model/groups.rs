use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Control,
    Samples,
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRole::Control => write!(f, "control"),
            GroupRole::Samples => write!(f, "samples"),
        }
    }
}

/// How a group was obtained: from identifier tokens or as the complement of the control group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GroupSource {
    Identifier { text: String, tokens: Vec<String> },
    Complement,
}

/// Ordered intensity columns of one comparison group. May hold the same
/// column more than once when several identifier tokens match it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnGroup {
    pub role: GroupRole,
    pub source: GroupSource,
    pub columns: Vec<String>,
    #[serde(skip)]
    pub indices: Vec<usize>,
}

impl ColumnGroup {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn n_duplicates(&self) -> usize {
        let mut seen = std::collections::BTreeSet::new();
        self.indices.iter().filter(|&&i| !seen.insert(i)).count()
    }
}
