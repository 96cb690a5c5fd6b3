//! Product Repository
//!
//! Minimal product store: enough for products to carry tags.

use super::{RepoError, RepoResult, product_tag, tag};
use shared::error::ErrorCode;
use shared::models::{Product, ProductCreate};
use shared::util::{is_valid_slug, now_millis, slugify};
use sqlx::{SqliteConnection, SqliteExecutor};
use std::collections::HashMap;

/// Find all products with their tag ids, newest first
pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>("SELECT * FROM product ORDER BY created_at DESC, id DESC")
        .fetch_all(&mut *conn)
        .await?;

    let mut tag_map: HashMap<i64, Vec<i64>> = HashMap::new();
    for (product_id, tag_id) in product_tag::find_all_pairs(&mut *conn).await? {
        tag_map.entry(product_id).or_default().push(tag_id);
    }

    Ok(rows
        .into_iter()
        .map(|mut p| {
            p.tag_ids = tag_map.remove(&p.id).unwrap_or_default();
            p
        })
        .collect())
}

/// Products carrying a tag, with their tag ids, newest first
pub async fn find_by_tag(conn: &mut SqliteConnection, tag_id: i64) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(
        r#"
        SELECT p.* FROM product p
        JOIN product_tag pt ON pt.product_id = p.id
        WHERE pt.tag_id = ?
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .bind(tag_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut tag_map: HashMap<i64, Vec<i64>> = HashMap::new();
    for (product_id, assigned) in product_tag::pairs_for_tagged_products(&mut *conn, tag_id).await? {
        tag_map.entry(product_id).or_default().push(assigned);
    }

    Ok(rows
        .into_iter()
        .map(|mut p| {
            p.tag_ids = tag_map.remove(&p.id).unwrap_or_default();
            p
        })
        .collect())
}

/// Find a product with its tag ids
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Product>> {
    let Some(mut product) = find_row(&mut *conn, id).await? else {
        return Ok(None);
    };
    product.tag_ids = product_tag::tag_ids_for_product(&mut *conn, id).await?;
    Ok(Some(product))
}

async fn find_row<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM product WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

/// Create a product and assign its tags. Run inside a transaction.
pub async fn create(conn: &mut SqliteConnection, data: ProductCreate) -> RepoResult<Product> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err(RepoError::validation(
            ErrorCode::RequiredField,
            "name",
            "Product name is required",
        ));
    }

    let slug = match data.slug.as_deref().map(str::trim) {
        Some(explicit) if is_valid_slug(explicit) => explicit.to_string(),
        Some(explicit) => {
            return Err(RepoError::validation(
                ErrorCode::ValidationFailed,
                "slug",
                format!(
                    "Slug '{}' must contain only lowercase letters, digits and single hyphens",
                    explicit
                ),
            ));
        }
        None => slugify(name),
    };
    if slug.is_empty() {
        return Err(RepoError::validation(
            ErrorCode::ValidationFailed,
            "slug",
            format!("Cannot derive a slug from '{}'; supply one explicitly", name),
        ));
    }

    let slug_taken: Option<i64> = sqlx::query_scalar("SELECT id FROM product WHERE slug = ?")
        .bind(&slug)
        .fetch_optional(&mut *conn)
        .await?;
    if slug_taken.is_some() {
        return Err(RepoError::duplicate(
            ErrorCode::ProductSlugExists,
            "slug",
            format!("Product slug '{}' already exists", slug),
        ));
    }

    let sku = data
        .sku
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if let Some(sku) = sku {
        let sku_taken: Option<i64> = sqlx::query_scalar("SELECT id FROM product WHERE sku = ?")
            .bind(sku)
            .fetch_optional(&mut *conn)
            .await?;
        if sku_taken.is_some() {
            return Err(RepoError::duplicate(
                ErrorCode::ProductSkuExists,
                "sku",
                format!("Product SKU '{}' already exists", sku),
            ));
        }
    }

    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO product (name, slug, sku, status, category_id, artist_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(&slug)
    .bind(sku)
    .bind(data.status.unwrap_or_default())
    .bind(data.category_id)
    .bind(data.artist_id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    product_tag::sync(&mut *conn, id, &data.tag_ids).await?;

    find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Product {} vanished after insert", id)))
}

/// Delete a product; its assignments cascade and the tags it carried are
/// recounted. Returns those tag ids.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<Vec<i64>> {
    if find_row(&mut *conn, id).await?.is_none() {
        return Err(RepoError::product_not_found(id));
    }

    let tag_ids = product_tag::tag_ids_for_product(&mut *conn, id).await?;

    sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    tag::refresh_usage(&mut *conn, &tag_ids).await?;
    Ok(tag_ids)
}
