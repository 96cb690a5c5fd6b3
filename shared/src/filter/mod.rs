//! List filtering and search engine
//!
//! Pure, in-memory narrowing of admin list views. A page declares its
//! filter controls ([`FilterDeclaration`]), keeps the user's current
//! choices in a [`FilterState`], and calls [`apply_filters`] (or
//! [`filter_and_sort`] for the table projection) on every change.
//!
//! ```
//! use serde_json::json;
//! use shared::filter::{FilterDeclaration, FilterState, apply_filters, DEFAULT_SEARCH_FIELDS};
//!
//! let items = vec![
//!     json!({"name": "Blue Keychain", "sku": "K1", "status": "active"}),
//!     json!({"name": "Red Coaster", "sku": "C2", "status": "draft"}),
//! ];
//! let state = FilterState::new().with_search("blue");
//! let found = apply_filters(&items, &state, DEFAULT_SEARCH_FIELDS, &[]);
//! assert_eq!(found, vec![items[0].clone()]);
//! ```

mod declaration;
mod field;
mod sort;
mod state;
mod suggest;

pub use declaration::{ComparisonMode, FilterDeclaration, FilterOption, product_filters, tag_filters};
pub use field::{FieldSource, FieldValue};
pub use sort::{SortDirection, SortState, apply_sort};
pub use state::{FilterState, SEARCH_KEY};
pub use suggest::suggest_tags;

use serde::Serialize;

/// Fields searched when a page does not name its own
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["name", "title", "email", "sku", "username"];

/// Narrow `items` by the search text and every declared filter.
///
/// All predicates are AND-ed. Empty values never narrow; keys present in
/// `state` without a declaration are ignored. The input is left untouched.
pub fn apply_filters<T, S>(
    items: &[T],
    state: &FilterState,
    search_fields: &[S],
    declarations: &[FilterDeclaration],
) -> Vec<T>
where
    T: FieldSource + Clone,
    S: AsRef<str>,
{
    let needle = state.search().to_lowercase();
    let active: Vec<(&FilterDeclaration, &str)> = declarations
        .iter()
        .map(|d| (d, state.get(&d.key)))
        .filter(|(_, value)| !value.is_empty())
        .collect();

    items
        .iter()
        .filter(|item| needle.is_empty() || matches_search(*item, &needle, search_fields))
        .filter(|item| active.iter().all(|(decl, value)| decl.matches(*item, value)))
        .cloned()
        .collect()
}

fn matches_search<T: FieldSource, S: AsRef<str>>(item: &T, needle: &str, fields: &[S]) -> bool {
    fields.iter().any(|field| {
        item.field(field.as_ref())
            .is_some_and(|value| value.contains_lowercase(needle))
    })
}

/// Filtered and sorted view of a list, with the counters a table header shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredList<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub active_filters: usize,
}

impl<T> FilteredList<T> {
    /// Whether filtering hid every item of a non-empty list
    pub fn is_filtered_empty(&self) -> bool {
        self.total_count > 0 && self.filtered_count == 0
    }
}

/// Filter, then sort, reporting counts for the table header
pub fn filter_and_sort<T, S>(
    items: &[T],
    state: &FilterState,
    search_fields: &[S],
    declarations: &[FilterDeclaration],
    sort: &SortState,
) -> FilteredList<T>
where
    T: FieldSource + Clone,
    S: AsRef<str>,
{
    let mut filtered = apply_filters(items, state, search_fields, declarations);
    sort.apply(&mut filtered);

    FilteredList {
        total_count: items.len(),
        filtered_count: filtered.len(),
        active_filters: state.active_count(),
        items: filtered,
    }
}
