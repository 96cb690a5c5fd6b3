//! Tag Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{DEFAULT_TAG_COLOR, Tag, TagCreate, TagUpdate};
use shared::util::{is_valid_slug, now_millis, slugify};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor};

/// Longest accepted tag name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// Find all tags (including inactive) ordered by name
pub async fn find_all<'e>(executor: impl SqliteExecutor<'e>) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tag ORDER BY name, id")
        .fetch_all(executor)
        .await?;
    Ok(tags)
}

/// Find active tags ordered by name
pub async fn find_active<'e>(executor: impl SqliteExecutor<'e>) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tag WHERE is_active = 1 ORDER BY name, id")
        .fetch_all(executor)
        .await?;
    Ok(tags)
}

/// Most used tags first; ties keep the older tag first
pub async fn find_popular<'e>(executor: impl SqliteExecutor<'e>, limit: i64) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT * FROM tag ORDER BY usage_count DESC, id ASC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(tags)
}

pub async fn find_by_id<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tag WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(tag)
}

/// Exact, case-sensitive name lookup
pub async fn find_by_name<'e>(
    executor: impl SqliteExecutor<'e>,
    name: &str,
) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tag WHERE name = ? LIMIT 1")
        .bind(name)
        .fetch_optional(executor)
        .await?;
    Ok(tag)
}

pub async fn find_by_slug<'e>(
    executor: impl SqliteExecutor<'e>,
    slug: &str,
) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tag WHERE slug = ? LIMIT 1")
        .bind(slug)
        .fetch_optional(executor)
        .await?;
    Ok(tag)
}

/// Ids among `ids` that reference an existing active tag
pub async fn find_active_ids<'e>(
    executor: impl SqliteExecutor<'e>,
    ids: &[i64],
) -> RepoResult<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id FROM tag WHERE is_active = 1 AND id IN (");
    let mut list = qb.separated(", ");
    for id in ids {
        list.push_bind(*id);
    }
    list.push_unseparated(")");

    let found = qb.build_query_scalar::<i64>().fetch_all(executor).await?;
    Ok(found)
}

/// Create a new tag
pub async fn create(conn: &mut SqliteConnection, data: TagCreate) -> RepoResult<Tag> {
    let name = validate_name(&data.name)?;

    // Check duplicate name
    if find_by_name(&mut *conn, name).await?.is_some() {
        return Err(RepoError::duplicate(
            ErrorCode::TagNameExists,
            "name",
            format!("Tag '{}' already exists", name),
        ));
    }

    let slug = match data.slug.as_deref() {
        Some(explicit) => validate_slug(explicit)?,
        None => derive_slug(name)?,
    };
    if find_by_slug(&mut *conn, &slug).await?.is_some() {
        return Err(RepoError::duplicate(
            ErrorCode::TagSlugExists,
            "slug",
            format!("Tag slug '{}' already exists", slug),
        ));
    }

    let now = now_millis();
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tag (name, slug, color, description, usage_count, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(&slug)
    .bind(data.color.as_deref().unwrap_or(DEFAULT_TAG_COLOR))
    .bind(non_empty(data.description.as_deref()))
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    Ok(tag)
}

/// Update a tag
///
/// A name change re-derives the slug unless a slug is supplied in the same
/// update.
pub async fn update(conn: &mut SqliteConnection, id: i64, data: TagUpdate) -> RepoResult<Tag> {
    let existing = find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::tag_not_found(id))?;

    let name = match data.name.as_deref() {
        Some(new_name) => validate_name(new_name)?.to_string(),
        None => existing.name.clone(),
    };
    let name_changed = name != existing.name;

    // Check duplicate name if changing
    if name_changed && find_by_name(&mut *conn, &name).await?.is_some() {
        return Err(RepoError::duplicate(
            ErrorCode::TagNameExists,
            "name",
            format!("Tag '{}' already exists", name),
        ));
    }

    let slug = match data.slug.as_deref() {
        Some(explicit) => validate_slug(explicit)?,
        None if name_changed => derive_slug(&name)?,
        None => existing.slug.clone(),
    };
    if slug != existing.slug
        && let Some(other) = find_by_slug(&mut *conn, &slug).await?
        && other.id != id
    {
        return Err(RepoError::duplicate(
            ErrorCode::TagSlugExists,
            "slug",
            format!("Tag slug '{}' already exists", slug),
        ));
    }

    let description = match data.description.as_deref() {
        Some(d) => non_empty(Some(d)),
        None => existing.description.clone(),
    };

    let tag = sqlx::query_as::<_, Tag>(
        r#"
        UPDATE tag
        SET name = ?, slug = ?, color = ?, description = ?, is_active = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&name)
    .bind(&slug)
    .bind(data.color.unwrap_or(existing.color))
    .bind(description)
    .bind(data.is_active.unwrap_or(existing.is_active))
    .bind(now_millis())
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(tag)
}

/// Hard delete a tag, detaching it from every product first
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<Tag> {
    let existing = find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::tag_not_found(id))?;

    sqlx::query("DELETE FROM product_tag WHERE tag_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM tag WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(existing)
}

/// Recompute `usage_count` of the given tags from assignment rows
pub async fn refresh_usage(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "UPDATE tag SET usage_count = (SELECT COUNT(*) FROM product_tag WHERE product_tag.tag_id = tag.id) WHERE id IN (",
    );
    let mut list = qb.separated(", ");
    for id in ids {
        list.push_bind(*id);
    }
    list.push_unseparated(")");

    qb.build().execute(&mut *conn).await?;
    Ok(())
}

/// Recompute every drifted `usage_count`, returning the number of corrected tags
pub async fn recount_all(conn: &mut SqliteConnection) -> RepoResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE tag
        SET usage_count = (SELECT COUNT(*) FROM product_tag WHERE product_tag.tag_id = tag.id)
        WHERE usage_count != (SELECT COUNT(*) FROM product_tag WHERE product_tag.tag_id = tag.id)
        "#,
    )
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

fn validate_name(raw: &str) -> RepoResult<&str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RepoError::validation(
            ErrorCode::RequiredField,
            "name",
            "Tag name is required",
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(RepoError::validation(
            ErrorCode::ValueOutOfRange,
            "name",
            format!("Tag name must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(name)
}

fn validate_slug(raw: &str) -> RepoResult<String> {
    let slug = raw.trim();
    if !is_valid_slug(slug) {
        return Err(RepoError::validation(
            ErrorCode::TagSlugInvalid,
            "slug",
            format!(
                "Slug '{}' must contain only lowercase letters, digits and single hyphens",
                raw
            ),
        ));
    }
    Ok(slug.to_string())
}

fn derive_slug(name: &str) -> RepoResult<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(RepoError::validation(
            ErrorCode::TagSlugInvalid,
            "slug",
            format!("Cannot derive a slug from '{}'; supply one explicitly", name),
        ));
    }
    Ok(slug)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
