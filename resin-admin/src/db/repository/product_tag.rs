//! Product ↔ Tag junction
//!
//! Assignment rows are only written by [`sync`], which replaces a product's
//! tag set wholesale and keeps the cached `usage_count` of every touched tag
//! in step with the junction.

use super::{RepoError, RepoResult, tag};
use shared::models::{Tag, TagSyncOutcome};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqliteExecutor};
use std::collections::BTreeSet;

/// Tag ids assigned to a product, ascending
pub async fn tag_ids_for_product<'e>(
    executor: impl SqliteExecutor<'e>,
    product_id: i64,
) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT tag_id FROM product_tag WHERE product_id = ? ORDER BY tag_id",
    )
    .bind(product_id)
    .fetch_all(executor)
    .await?;
    Ok(ids)
}

/// Assignment pairs `(product_id, tag_id)` of every product carrying `tag_id`
pub async fn pairs_for_tagged_products<'e>(
    executor: impl SqliteExecutor<'e>,
    tag_id: i64,
) -> RepoResult<Vec<(i64, i64)>> {
    let rows = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT product_id, tag_id FROM product_tag
        WHERE product_id IN (SELECT product_id FROM product_tag WHERE tag_id = ?)
        ORDER BY product_id, tag_id
        "#,
    )
    .bind(tag_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Full tags assigned to a product, ordered by name
pub async fn tags_for_product<'e>(
    executor: impl SqliteExecutor<'e>,
    product_id: i64,
) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.* FROM tag t
        JOIN product_tag pt ON pt.tag_id = t.id
        WHERE pt.product_id = ?
        ORDER BY t.name, t.id
        "#,
    )
    .bind(product_id)
    .fetch_all(executor)
    .await?;
    Ok(tags)
}

/// All assignment pairs as `(product_id, tag_id)`
pub async fn find_all_pairs<'e>(executor: impl SqliteExecutor<'e>) -> RepoResult<Vec<(i64, i64)>> {
    let rows = sqlx::query_as::<_, (i64, i64)>(
        "SELECT product_id, tag_id FROM product_tag ORDER BY product_id, tag_id",
    )
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Replace the tag set of a product with exactly `tag_ids`.
///
/// Duplicates in the input collapse. Every id must reference an existing
/// active tag; otherwise nothing is written and the offending ids are
/// returned in [`RepoError::InvalidTagReference`]. Run inside a transaction.
pub async fn sync(
    conn: &mut SqliteConnection,
    product_id: i64,
    tag_ids: &[i64],
) -> RepoResult<TagSyncOutcome> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM product WHERE id = ?")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;
    if exists.is_none() {
        return Err(RepoError::product_not_found(product_id));
    }

    let wanted: BTreeSet<i64> = tag_ids.iter().copied().collect();
    let wanted_ids: Vec<i64> = wanted.iter().copied().collect();

    let usable: BTreeSet<i64> = tag::find_active_ids(&mut *conn, &wanted_ids)
        .await?
        .into_iter()
        .collect();
    let invalid: Vec<i64> = wanted.difference(&usable).copied().collect();
    if !invalid.is_empty() {
        return Err(RepoError::InvalidTagReference(invalid));
    }

    let current: BTreeSet<i64> = tag_ids_for_product(&mut *conn, product_id)
        .await?
        .into_iter()
        .collect();

    let outcome = TagSyncOutcome {
        added: wanted.difference(&current).copied().collect(),
        removed: current.difference(&wanted).copied().collect(),
        unchanged: wanted.intersection(&current).copied().collect(),
    };
    if outcome.is_noop() {
        return Ok(outcome);
    }

    for tag_id in &outcome.removed {
        sqlx::query("DELETE FROM product_tag WHERE product_id = ? AND tag_id = ?")
            .bind(product_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }

    let now = now_millis();
    for tag_id in &outcome.added {
        sqlx::query("INSERT INTO product_tag (product_id, tag_id, created_at) VALUES (?, ?, ?)")
            .bind(product_id)
            .bind(tag_id)
            .bind(now)
            .execute(&mut *conn)
            .await?;
    }

    let affected: Vec<i64> = outcome.affected().collect();
    tag::refresh_usage(&mut *conn, &affected).await?;

    Ok(outcome)
}
