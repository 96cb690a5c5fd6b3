//! Field access for filtering and sorting
//!
//! Items expose named fields through [`FieldSource`]. A missing field, a
//! JSON `null` or a non-scalar value all resolve to `None`, which the engine
//! treats as "no match" (filters) or "sort last" (sorting).

use crate::models::{Product, Tag};
use serde_json::Value;
use std::borrow::Cow;

/// A scalar field value read from an item
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl<'a> FieldValue<'a> {
    pub fn text(s: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(s))
    }

    /// String form used for text comparison
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Int(n) => Cow::Owned(n.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    /// Integer form, for identifier comparison
    ///
    /// Floats count only when whole and inside the `i64` range
    /// (`i64::MAX as f64` rounds up to 2^63, hence the open upper bound).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            FieldValue::Float(f)
                if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f) =>
            {
                Some(*f as i64)
            }
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Numeric form, for natural ordering
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            FieldValue::Bool(_) => None,
        }
    }

    /// Case-insensitive substring test; `needle` must already be lower-cased
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.as_text().to_lowercase().contains(needle)
    }

    /// Case-insensitive equality on the string form
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.as_text().to_lowercase() == other.to_lowercase()
    }
}

/// Anything the list engine can read named fields from
pub trait FieldSource {
    fn field(&self, path: &str) -> Option<FieldValue<'_>>;
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, path: &str) -> Option<FieldValue<'_>> {
        (**self).field(path)
    }
}

/// Dotted paths walk nested objects (`category.name`); numeric segments
/// index into arrays.
impl FieldSource for Value {
    fn field(&self, path: &str) -> Option<FieldValue<'_>> {
        let mut current = self;
        for key in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(key)?,
                Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        match current {
            Value::String(s) => Some(FieldValue::text(s)),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float)),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FieldSource for Tag {
    fn field(&self, path: &str) -> Option<FieldValue<'_>> {
        Some(match path {
            "id" => FieldValue::Int(self.id),
            "name" => FieldValue::text(&self.name),
            "slug" => FieldValue::text(&self.slug),
            "color" => FieldValue::text(&self.color),
            "description" => FieldValue::text(self.description.as_deref()?),
            "usage_count" => FieldValue::Int(self.usage_count),
            "is_active" => FieldValue::Bool(self.is_active),
            "status" => FieldValue::text(if self.is_active { "active" } else { "inactive" }),
            "created_at" => FieldValue::Int(self.created_at),
            "updated_at" => FieldValue::Int(self.updated_at),
            _ => return None,
        })
    }
}

impl FieldSource for Product {
    fn field(&self, path: &str) -> Option<FieldValue<'_>> {
        Some(match path {
            "id" => FieldValue::Int(self.id),
            "name" => FieldValue::text(&self.name),
            "slug" => FieldValue::text(&self.slug),
            "sku" => FieldValue::text(self.sku.as_deref()?),
            "status" => FieldValue::text(self.status.as_str()),
            "category_id" => FieldValue::Int(self.category_id?),
            "artist_id" => FieldValue::Int(self.artist_id?),
            "created_at" => FieldValue::Int(self.created_at),
            "updated_at" => FieldValue::Int(self.updated_at),
            _ => return None,
        })
    }
}
