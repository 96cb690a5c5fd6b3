//! Filter declarations: static metadata describing one filter control

use super::field::FieldSource;
use crate::models::ProductStatus;
use serde::{Deserialize, Serialize};

/// How a filter value is compared against the item's field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Case-insensitive string equality
    #[default]
    Exact,
    /// Both sides parsed as integers (identifier references)
    NumericEquals,
}

/// One selectable value of a filter control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option pointing at a numeric identifier
    pub fn id(id: i64, label: impl Into<String>) -> Self {
        Self::new(id.to_string(), label)
    }
}

/// Filter control metadata supplied by a list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDeclaration {
    /// Filter key, also the item field it inspects
    pub key: String,
    pub label: String,
    pub placeholder: String,
    /// Display hint only
    pub color: String,
    pub options: Vec<FilterOption>,
    #[serde(default)]
    pub comparison: ComparisonMode,
}

impl FilterDeclaration {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            key: key.into(),
            placeholder: label.clone(),
            label,
            color: "gray".to_string(),
            options: Vec::new(),
            comparison: ComparisonMode::Exact,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(FilterOption::new(value, label));
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = FilterOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Compare values as integers
    pub fn numeric(mut self) -> Self {
        self.comparison = ComparisonMode::NumericEquals;
        self
    }

    /// Whether `item` passes this filter with the given non-empty value.
    ///
    /// An absent field never matches; an unparsable value in numeric mode
    /// matches nothing.
    pub fn matches<T: FieldSource + ?Sized>(&self, item: &T, value: &str) -> bool {
        let Some(field) = item.field(&self.key) else {
            return false;
        };

        match self.comparison {
            ComparisonMode::Exact => field.eq_ignore_case(value),
            ComparisonMode::NumericEquals => match (value.trim().parse::<i64>(), field.as_i64()) {
                (Ok(expected), Some(actual)) => expected == actual,
                _ => false,
            },
        }
    }
}

/// Filters of the admin product list
pub fn product_filters(
    categories: impl IntoIterator<Item = FilterOption>,
    artists: impl IntoIterator<Item = FilterOption>,
) -> Vec<FilterDeclaration> {
    vec![
        FilterDeclaration::new("category_id", "Category")
            .placeholder("Categories")
            .color("green")
            .options(categories)
            .numeric(),
        FilterDeclaration::new("artist_id", "Vendor")
            .placeholder("Vendors")
            .color("purple")
            .options(artists)
            .numeric(),
        FilterDeclaration::new("status", "Status")
            .color("yellow")
            .options(
                ProductStatus::ALL
                    .iter()
                    .map(|s| FilterOption::new(s.as_str(), s.label())),
            ),
    ]
}

/// Filters of the admin tag list
pub fn tag_filters() -> Vec<FilterDeclaration> {
    vec![
        FilterDeclaration::new("status", "Status")
            .color("blue")
            .option("active", "Active")
            .option("inactive", "Inactive"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_is_case_insensitive() {
        let decl = FilterDeclaration::new("status", "Status");
        assert!(decl.matches(&json!({"status": "Active"}), "active"));
        assert!(!decl.matches(&json!({"status": "draft"}), "active"));
        assert!(!decl.matches(&json!({"status": null}), "active"));
        assert!(!decl.matches(&json!({}), "active"));
    }

    #[test]
    fn test_numeric_equals() {
        let decl = FilterDeclaration::new("category_id", "Category").numeric();
        assert!(decl.matches(&json!({"category_id": 3}), "3"));
        assert!(decl.matches(&json!({"category_id": "3"}), " 3"));
        assert!(!decl.matches(&json!({"category_id": 30}), "3"));
        assert!(!decl.matches(&json!({"category_id": 3}), "three"));
    }

    #[test]
    fn test_product_filters_shape() {
        let decls = product_filters(
            [FilterOption::id(1, "Jewelry"), FilterOption::id(2, "Decor")],
            [FilterOption::id(9, "Asha")],
        );
        assert_eq!(decls.len(), 3);
        assert_eq!(decls[0].comparison, ComparisonMode::NumericEquals);
        assert_eq!(decls[0].options[1], FilterOption::new("2", "Decor"));
        assert_eq!(decls[1].label, "Vendor");
        assert_eq!(decls[2].comparison, ComparisonMode::Exact);
        assert_eq!(decls[2].options.len(), 4);
    }

    #[test]
    fn test_declaration_defaults() {
        let decl = FilterDeclaration::new("status", "Status");
        assert_eq!(decl.placeholder, "Status");
        assert_eq!(decl.comparison, ComparisonMode::Exact);

        let parsed: FilterDeclaration = serde_json::from_value(json!({
            "key": "status",
            "label": "Status",
            "placeholder": "Status",
            "color": "yellow",
            "options": []
        }))
        .unwrap();
        assert_eq!(parsed.comparison, ComparisonMode::Exact);
    }
}
