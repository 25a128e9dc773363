//! Text normalization shared by parsing and filtering

/// Lowercase, trim, and collapse internal whitespace runs to one space.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical spelling of a company name: trimmed and upper-cased.
#[must_use]
pub fn normalize_company(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Split a comma-separated field, trimming entries and dropping empties.
#[must_use]
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Push `item` unless an equal entry is already present. Returns whether it was added.
pub fn push_unique(items: &mut Vec<String>, item: String) -> bool {
    if items.contains(&item) {
        false
    } else {
        items.push(item);
        true
    }
}
