//! Column sorting for list views

use super::field::{FieldSource, FieldValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Current sort column of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Clicking the current column flips direction, another column starts ascending
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// Sort `items` in place; no key leaves the order untouched
    pub fn apply<T: FieldSource>(&self, items: &mut [T]) {
        if let Some(key) = &self.key {
            apply_sort(items, key, self.direction);
        }
    }
}

/// Stable sort by one field.
///
/// Numeric values come before text and compare by value; text compares by
/// string order. Items missing the field go last in both directions.
pub fn apply_sort<T: FieldSource>(items: &mut [T], key: &str, direction: SortDirection) {
    items.sort_by(|a, b| match (a.field(key), b.field(key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = compare_values(&x, &y);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    });
}

/// Total order over field values: every number ranks below every text.
fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.as_text().cmp(&b.as_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn names(items: &[Value]) -> Vec<&str> {
        items.iter().map(|v| v["name"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_toggle() {
        let mut sort = SortState::default();
        sort.toggle("name");
        assert_eq!(sort, SortState::by("name", SortDirection::Asc));
        sort.toggle("name");
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.toggle("price");
        assert_eq!(sort, SortState::by("price", SortDirection::Asc));
    }

    #[test]
    fn test_numeric_order() {
        let mut items = vec![
            json!({"name": "a", "price": "10"}),
            json!({"name": "b", "price": 9}),
            json!({"name": "c", "price": 100}),
        ];
        apply_sort(&mut items, "price", SortDirection::Asc);
        assert_eq!(names(&items), vec!["b", "a", "c"]);
        apply_sort(&mut items, "price", SortDirection::Desc);
        assert_eq!(names(&items), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_numbers_rank_before_text() {
        let mut items = vec![
            json!({"name": "x", "sku": "1a"}),
            json!({"name": "y", "sku": 10}),
            json!({"name": "z", "sku": 9}),
        ];
        apply_sort(&mut items, "sku", SortDirection::Asc);
        assert_eq!(names(&items), vec!["z", "y", "x"]);
        apply_sort(&mut items, "sku", SortDirection::Desc);
        assert_eq!(names(&items), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_mixed_sku_column_sorts_consistently() {
        // Numeric and alphanumeric SKUs shuffled by a fixed LCG
        let mut seed: u64 = 0x5eed;
        let mut items: Vec<Value> = (0..64u64)
            .map(|n| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let x = seed >> 33;
                let sku = if n % 3 == 0 { json!(format!("{}a", x % 50)) } else { json!(x % 50) };
                json!({"name": format!("item-{n}"), "sku": sku})
            })
            .collect();
        items.push(json!({"name": "no-sku"}));

        apply_sort(&mut items, "sku", SortDirection::Asc);

        let skus: Vec<FieldValue<'_>> = items[..64].iter().map(|v| v.field("sku").unwrap()).collect();
        let first_text = skus.iter().position(|v| v.as_f64().is_none()).unwrap_or(skus.len());
        assert!(skus[first_text..].iter().all(|v| v.as_f64().is_none()));
        for pair in skus.windows(2) {
            assert_ne!(compare_values(&pair[0], &pair[1]), Ordering::Greater);
        }
        assert_eq!(items[64]["name"], "no-sku");

        apply_sort(&mut items, "sku", SortDirection::Desc);
        assert!(items[0]["sku"].is_string());
        assert_eq!(items[64]["name"], "no-sku");
    }

    #[test]
    fn test_absent_values_last_both_directions() {
        let mut items = vec![
            json!({"name": "none"}),
            json!({"name": "b", "sku": "B"}),
            json!({"name": "null", "sku": null}),
            json!({"name": "a", "sku": "A"}),
        ];
        apply_sort(&mut items, "sku", SortDirection::Asc);
        assert_eq!(names(&items), vec!["a", "b", "none", "null"]);
        apply_sort(&mut items, "sku", SortDirection::Desc);
        assert_eq!(names(&items), vec!["b", "a", "none", "null"]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut items = vec![
            json!({"name": "first", "status": "active"}),
            json!({"name": "second", "status": "active"}),
            json!({"name": "third", "status": "draft"}),
        ];
        apply_sort(&mut items, "status", SortDirection::Desc);
        assert_eq!(names(&items), vec!["third", "first", "second"]);
    }

    #[test]
    fn test_no_key_keeps_order() {
        let mut items = vec![json!({"name": "z"}), json!({"name": "a"})];
        SortState::default().apply(&mut items);
        assert_eq!(names(&items), vec!["z", "a"]);
    }
}
