//! Tag Model

use serde::{Deserialize, Serialize};

/// Default display color for new tags
pub const DEFAULT_TAG_COLOR: &str = "#3B82F6";

/// Tag entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    /// Unique display name (case-sensitive)
    pub name: String,
    /// URL-safe unique identifier, derived from the name unless customized
    pub slug: String,
    pub color: String,
    pub description: Option<String>,
    /// Cached number of product assignments, refreshed on every sync
    pub usage_count: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create tag payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
    /// Explicit slug; derived from `name` when absent
    pub slug: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl TagCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Update tag payload
///
/// Only supplied fields change. An empty `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Result of replacing a product's tag set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSyncOutcome {
    /// Tags newly assigned
    pub added: Vec<i64>,
    /// Tags no longer assigned
    pub removed: Vec<i64>,
    /// Tags kept as they were
    pub unchanged: Vec<i64>,
}

impl TagSyncOutcome {
    /// Whether the sync touched any assignment row
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Every tag whose usage count may have moved
    pub fn affected(&self) -> impl Iterator<Item = i64> + '_ {
        self.added.iter().chain(self.removed.iter()).copied()
    }
}

/// Summary figures shown on the tag index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagStats {
    pub total: i64,
    pub active: i64,
    /// Tags with no assignment
    pub unused: i64,
    pub total_usage: i64,
    /// `total_usage / total`, rounded to one decimal; 0 when there are no tags
    pub average_usage: f64,
}

impl TagStats {
    /// Compute stats from an already loaded tag list
    pub fn from_tags(tags: &[Tag]) -> Self {
        let total = tags.len() as i64;
        let total_usage: i64 = tags.iter().map(|t| t.usage_count).sum();
        let average_usage = if total > 0 {
            (total_usage as f64 / total as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            total,
            active: tags.iter().filter(|t| t.is_active).count() as i64,
            unused: tags.iter().filter(|t| t.usage_count == 0).count() as i64,
            total_usage,
            average_usage,
        }
    }
}
