//! Product Model
//!
//! Only the fields the tag catalog and the admin list views need.

use serde::{Deserialize, Serialize};

/// Publication status of a product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Inactive,
    OutOfStock,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OutOfStock => "out_of_stock",
        }
    }

    /// Human label used by filter controls
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OutOfStock => "Out of Stock",
        }
    }

    pub const ALL: [ProductStatus; 4] = [
        ProductStatus::Draft,
        ProductStatus::Active,
        ProductStatus::Inactive,
        ProductStatus::OutOfStock,
    ];
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub sku: Option<String>,
    pub status: ProductStatus,
    pub category_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --

    /// Assigned tag IDs (junction table), ascending
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    /// Explicit slug; derived from `name` when absent
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub status: Option<ProductStatus>,
    pub category_id: Option<i64>,
    pub artist_id: Option<i64>,
    /// Tags to assign in the same transaction
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn tags(mut self, tag_ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::OutOfStock).unwrap(),
            "\"out_of_stock\""
        );
        let status: ProductStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, ProductStatus::Active);
        assert_eq!(ProductStatus::default(), ProductStatus::Draft);
    }

    #[test]
    fn test_status_str_matches_serde() {
        for status in ProductStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_product_tag_ids_default_on_deserialize() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Blue Keychain",
            "slug": "blue-keychain",
            "sku": "K1",
            "status": "active",
            "category_id": 3,
            "artist_id": null,
            "created_at": 0,
            "updated_at": 0
        }))
        .unwrap();
        assert!(product.tag_ids.is_empty());
        assert_eq!(product.category_id, Some(3));
    }
}
