use std::collections::BTreeSet;

/// Surrounding whitespace is dropped; case is kept, matching is exact.
pub fn normalize_alias(s: &str) -> String {
    s.trim().to_string()
}

/// Splits a semicolon-delimited identifier list into normalized aliases.
pub fn split_aliases(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(';')
        .map(normalize_alias)
        .filter(|alias| !alias.is_empty())
}

pub fn alias_set<'a, I>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    entries.into_iter().flat_map(split_aliases).collect()
}

/// A row belongs to a panel when any of its aliases is in the panel set.
pub fn row_matches(gene_names: &str, aliases: &BTreeSet<String>) -> bool {
    split_aliases(gene_names).any(|alias| aliases.contains(&alias))
}

pub fn select_rows<'a, I>(gene_names: I, aliases: &BTreeSet<String>) -> Vec<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    gene_names
        .into_iter()
        .enumerate()
        .filter(|(_, names)| row_matches(names, aliases))
        .map(|(idx, _)| idx)
        .collect()
}

/// First label containing `marker` as a substring.
pub fn locate_marker(labels: &[String], marker: &str) -> Option<usize> {
    let needle = normalize_alias(marker);
    if needle.is_empty() {
        return None;
    }
    labels.iter().position(|label| label.contains(needle.as_str()))
}
