//! Catalog Service - tag catalog and product tag assignment
//!
//! Every write runs in one SQLite transaction and holds the service's write
//! lock, so deleting a tag and syncing a product's tags never interleave: a
//! sync sees a tag either fully valid or fully gone.

use super::tag_seed::{DEFAULT_TAGS, SeedReport, TagSeed};
use crate::db::DbService;
use crate::db::repository::{RepoError, RepoResult, product, product_tag, tag};
use shared::models::{Product, ProductCreate, Tag, TagCreate, TagStats, TagSyncOutcome, TagUpdate};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct CatalogService {
    db: DbService,
    write_lock: Arc<Mutex<()>>,
}

impl CatalogService {
    pub fn new(db: DbService) -> Self {
        Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    // =========================================================================
    // Tags
    // =========================================================================

    pub async fn create_tag(&self, data: TagCreate) -> RepoResult<Tag> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;
        let created = tag::create(&mut tx, data).await?;
        tx.commit().await?;

        tracing::info!(tag_id = created.id, name = %created.name, slug = %created.slug, "Tag created");
        Ok(created)
    }

    pub async fn update_tag(&self, id: i64, data: TagUpdate) -> RepoResult<Tag> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;
        let updated = tag::update(&mut tx, id, data).await?;
        tx.commit().await?;

        tracing::info!(tag_id = id, name = %updated.name, slug = %updated.slug, "Tag updated");
        Ok(updated)
    }

    /// Delete a tag, removing it from every product first
    pub async fn delete_tag(&self, id: i64) -> RepoResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;
        let deleted = tag::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(
            tag_id = id,
            name = %deleted.name,
            detached = deleted.usage_count,
            "Tag deleted"
        );
        Ok(())
    }

    pub async fn get_tag(&self, id: i64) -> RepoResult<Tag> {
        tag::find_by_id(&self.db.pool, id)
            .await?
            .ok_or_else(|| RepoError::tag_not_found(id))
    }

    pub async fn find_tag_by_slug(&self, slug: &str) -> RepoResult<Tag> {
        tag::find_by_slug(&self.db.pool, slug)
            .await?
            .ok_or_else(|| RepoError::tag_slug_not_found(slug))
    }

    /// Every tag, inactive included, ordered by name
    pub async fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        tag::find_all(&self.db.pool).await
    }

    /// Active tags ordered by name, for tag pickers
    pub async fn list_active_tags(&self) -> RepoResult<Vec<Tag>> {
        tag::find_active(&self.db.pool).await
    }

    /// Tags by usage, most used first
    pub async fn list_popular_tags(&self, limit: usize) -> RepoResult<Vec<Tag>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        tag::find_popular(&self.db.pool, limit).await
    }

    pub async fn tag_stats(&self) -> RepoResult<TagStats> {
        let tags = tag::find_all(&self.db.pool).await?;
        Ok(TagStats::from_tags(&tags))
    }

    /// Products carrying a tag, newest first
    pub async fn products_for_tag(&self, tag_id: i64) -> RepoResult<Vec<Product>> {
        let mut conn = self.db.pool.acquire().await?;
        if tag::find_by_id(&mut *conn, tag_id).await?.is_none() {
            return Err(RepoError::tag_not_found(tag_id));
        }

        product::find_by_tag(&mut conn, tag_id).await
    }

    /// Create tags from `seeds` whose names are not taken yet
    pub async fn seed_tags(&self, seeds: &[TagSeed]) -> RepoResult<SeedReport> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;

        let mut report = SeedReport::default();
        for seed in seeds {
            if tag::find_by_name(&mut *tx, seed.name).await?.is_some() {
                tracing::debug!(name = seed.name, "Tag already exists");
                report.existing += 1;
                continue;
            }
            tag::create(&mut tx, seed.to_create()).await?;
            tracing::debug!(name = seed.name, "Created tag");
            report.created += 1;
        }

        tx.commit().await?;
        tracing::info!(
            created = report.created,
            existing = report.existing,
            "Tag seeding finished"
        );
        Ok(report)
    }

    pub async fn seed_default_tags(&self) -> RepoResult<SeedReport> {
        self.seed_tags(DEFAULT_TAGS).await
    }

    /// Recompute every tag's `usage_count` from assignments
    pub async fn recount_usage(&self) -> RepoResult<u64> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;
        let corrected = tag::recount_all(&mut tx).await?;
        tx.commit().await?;

        if corrected > 0 {
            tracing::warn!(corrected, "Tag usage counts had drifted and were recomputed");
        }
        Ok(corrected)
    }

    // =========================================================================
    // Product tag assignment
    // =========================================================================

    /// Replace a product's tag set with exactly `tag_ids`
    pub async fn sync_product_tags(
        &self,
        product_id: i64,
        tag_ids: &[i64],
    ) -> RepoResult<TagSyncOutcome> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;
        let outcome = match product_tag::sync(&mut tx, product_id, tag_ids).await {
            Ok(outcome) => outcome,
            Err(RepoError::InvalidTagReference(ids)) => {
                tracing::warn!(product_id, ?ids, "Rejected tag sync with invalid tags");
                return Err(RepoError::InvalidTagReference(ids));
            }
            Err(e) => return Err(e),
        };
        tx.commit().await?;

        tracing::info!(
            product_id,
            added = ?outcome.added,
            removed = ?outcome.removed,
            unchanged = outcome.unchanged.len(),
            "Product tags synced"
        );
        Ok(outcome)
    }

    /// Tags assigned to a product, ordered by name
    pub async fn tags_for_product(&self, product_id: i64) -> RepoResult<Vec<Tag>> {
        let mut conn = self.db.pool.acquire().await?;
        let exists = product::find_by_id(&mut conn, product_id).await?.is_some();
        if !exists {
            return Err(RepoError::product_not_found(product_id));
        }
        product_tag::tags_for_product(&mut *conn, product_id).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product together with its initial tag set
    pub async fn create_product(&self, data: ProductCreate) -> RepoResult<Product> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;
        let created = product::create(&mut tx, data).await?;
        tx.commit().await?;

        tracing::info!(
            product_id = created.id,
            slug = %created.slug,
            tags = ?created.tag_ids,
            "Product created"
        );
        Ok(created)
    }

    pub async fn get_product(&self, id: i64) -> RepoResult<Product> {
        let mut conn = self.db.pool.acquire().await?;
        product::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| RepoError::product_not_found(id))
    }

    pub async fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut conn = self.db.pool.acquire().await?;
        product::find_all(&mut conn).await
    }

    /// Delete a product and recount the tags it carried
    pub async fn delete_product(&self, id: i64) -> RepoResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool.begin().await?;
        let recounted = product::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(product_id = id, recounted = ?recounted, "Product deleted");
        Ok(())
    }
}
