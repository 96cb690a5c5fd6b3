//! Tag input autocomplete

use crate::models::Tag;

/// Tags not yet selected whose name contains `input`, case-insensitively.
///
/// Blank input suggests nothing. Order follows `available`.
pub fn suggest_tags<'a>(available: &'a [Tag], selected: &[i64], input: &str) -> Vec<&'a Tag> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    available
        .iter()
        .filter(|tag| !selected.contains(&tag.id))
        .filter(|tag| tag.name.to_lowercase().contains(&needle))
        .collect()
}
