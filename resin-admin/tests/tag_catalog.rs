//! Tag catalog and product tag assignment, end to end against SQLite

use resin_admin::services::DEFAULT_TAGS;
use resin_admin::{AppError, CatalogService, DbService, ErrorCode, RepoError};
use shared::models::{ProductCreate, Tag, TagCreate, TagUpdate};

async fn catalog() -> CatalogService {
    CatalogService::new(DbService::in_memory().await.expect("in-memory db"))
}

async fn tags(catalog: &CatalogService, names: &[&str]) -> Vec<Tag> {
    let mut out = Vec::new();
    for name in names {
        out.push(catalog.create_tag(TagCreate::new(*name)).await.unwrap());
    }
    out
}

async fn product(catalog: &CatalogService, name: &str) -> i64 {
    catalog
        .create_product(ProductCreate::new(name))
        .await
        .unwrap()
        .id
}

async fn assignment_rows(catalog: &CatalogService, product_id: i64) -> Vec<(i64, i64)> {
    sqlx::query_as("SELECT product_id, tag_id FROM product_tag WHERE product_id = ? ORDER BY tag_id")
        .bind(product_id)
        .fetch_all(catalog.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_duplicate_name_leaves_first_tag_untouched() {
    let catalog = catalog().await;
    let first = catalog
        .create_tag(TagCreate::new("Wedding").color("#FF6B9D").description("Ceremonies"))
        .await
        .unwrap();

    let err = catalog
        .create_tag(TagCreate::new("Wedding").color("#000000"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { code: ErrorCode::TagNameExists, .. }));
    assert_eq!(err.field(), Some("name"));

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::TagNameExists);
    assert_eq!(app.details.unwrap()["field"], "name");

    let again = catalog.get_tag(first.id).await.unwrap();
    assert_eq!(again, first);

    // Names are case-sensitive
    catalog.create_tag(TagCreate::new("wedding").slug("wedding-lower")).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_name_includes_inactive_tags() {
    let catalog = catalog().await;
    let tag = catalog.create_tag(TagCreate::new("Geode")).await.unwrap();
    catalog
        .update_tag(
            tag.id,
            TagUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = catalog.create_tag(TagCreate::new("Geode")).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { .. }));
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Ocean", "Glitter"]).await;
    let p = product(&catalog, "Wave Tray").await;

    let first = catalog.sync_product_tags(p, &[t[0].id, t[1].id]).await.unwrap();
    assert_eq!(first.added, vec![t[0].id, t[1].id]);

    let second = catalog.sync_product_tags(p, &[t[1].id, t[0].id]).await.unwrap();
    assert!(second.is_noop());
    assert_eq!(second.unchanged, vec![t[0].id, t[1].id]);

    assert_eq!(assignment_rows(&catalog, p).await.len(), 2);
    assert_eq!(catalog.get_tag(t[0].id).await.unwrap().usage_count, 1);
}

#[tokio::test]
async fn test_sync_replaces_set() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["One", "Two", "Three"]).await;
    let (t1, t2, t3) = (t[0].id, t[1].id, t[2].id);
    let p = product(&catalog, "Resin Clock").await;

    catalog.sync_product_tags(p, &[t1, t2]).await.unwrap();
    let before: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT tag_id, created_at FROM product_tag WHERE product_id = ? AND tag_id = ?",
    )
    .bind(p)
    .bind(t2)
    .fetch_all(catalog.pool())
    .await
    .unwrap();

    let outcome = catalog.sync_product_tags(p, &[t2, t3, t3]).await.unwrap();
    assert_eq!(outcome.added, vec![t3]);
    assert_eq!(outcome.removed, vec![t1]);
    assert_eq!(outcome.unchanged, vec![t2]);

    assert_eq!(catalog.get_product(p).await.unwrap().tag_ids, vec![t2, t3]);

    // The kept assignment row was not rewritten
    let after: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT tag_id, created_at FROM product_tag WHERE product_id = ? AND tag_id = ?",
    )
    .bind(p)
    .bind(t2)
    .fetch_all(catalog.pool())
    .await
    .unwrap();
    assert_eq!(before, after);

    assert_eq!(catalog.get_tag(t1).await.unwrap().usage_count, 0);
    assert_eq!(catalog.get_tag(t2).await.unwrap().usage_count, 1);
    assert_eq!(catalog.get_tag(t3).await.unwrap().usage_count, 1);
}

#[tokio::test]
async fn test_sync_with_unknown_tag_is_atomic() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Rings", "Sets"]).await;
    let p = product(&catalog, "Stacking Rings").await;
    catalog.sync_product_tags(p, &[t[0].id]).await.unwrap();

    let err = catalog
        .sync_product_tags(p, &[t[1].id, 999, 999])
        .await
        .unwrap_err();
    match err {
        RepoError::InvalidTagReference(ids) => assert_eq!(ids, vec![999]),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(catalog.get_product(p).await.unwrap().tag_ids, vec![t[0].id]);
    assert_eq!(catalog.get_tag(t[1].id).await.unwrap().usage_count, 0);
}

#[tokio::test]
async fn test_sync_rejects_inactive_tag() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Vintage Style"]).await;
    catalog
        .update_tag(
            t[0].id,
            TagUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let p = product(&catalog, "Cameo").await;

    let err = catalog.sync_product_tags(p, &[t[0].id]).await.unwrap_err();
    assert!(matches!(err, RepoError::InvalidTagReference(_)));
}

#[tokio::test]
async fn test_sync_unknown_product() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Desk"]).await;

    let err = catalog.sync_product_tags(404, &[t[0].id]).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_tag_detaches_from_products() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Photo", "Name"]).await;
    let p1 = product(&catalog, "Photo Frame").await;
    let p2 = product(&catalog, "Name Plate").await;
    catalog.sync_product_tags(p1, &[t[0].id, t[1].id]).await.unwrap();
    catalog.sync_product_tags(p2, &[t[0].id]).await.unwrap();

    catalog.delete_tag(t[0].id).await.unwrap();

    assert_eq!(catalog.get_product(p1).await.unwrap().tag_ids, vec![t[1].id]);
    assert!(catalog.get_product(p2).await.unwrap().tag_ids.is_empty());
    assert!(matches!(catalog.get_tag(t[0].id).await, Err(RepoError::NotFound { .. })));

    let active: Vec<i64> = catalog
        .list_active_tags()
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(active, vec![t[1].id]);

    assert!(matches!(
        catalog.delete_tag(t[0].id).await,
        Err(RepoError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_tag_slug_rules() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Sea Glass", "Forest"]).await;

    // Name change re-derives the slug
    let renamed = catalog
        .update_tag(
            t[0].id,
            TagUpdate {
                name: Some("Beach Glass".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.slug, "beach-glass");

    // Explicit slug in the same call wins
    let custom = catalog
        .update_tag(
            t[0].id,
            TagUpdate {
                name: Some("Shore Glass".into()),
                slug: Some("glass".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(custom.name, "Shore Glass");
    assert_eq!(custom.slug, "glass");

    // Color-only change leaves name and slug alone
    let recolored = catalog
        .update_tag(
            t[0].id,
            TagUpdate {
                color: Some("#1ABC9C".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(recolored.slug, "glass");

    let err = catalog
        .update_tag(
            t[1].id,
            TagUpdate {
                name: Some("Shore Glass".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { .. }));

    let err = catalog
        .update_tag(
            t[1].id,
            TagUpdate {
                slug: Some("glass".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { code: ErrorCode::TagSlugExists, .. }));

    let err = catalog.update_tag(999, TagUpdate::default()).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { code: ErrorCode::TagNotFound, .. }));
}

#[tokio::test]
async fn test_list_active_tags_ordered_by_name() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Wall", "Bangles", "Modern"]).await;
    catalog
        .update_tag(
            t[2].id,
            TagUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let names: Vec<String> = catalog
        .list_active_tags()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Bangles", "Wall"]);
    assert_eq!(catalog.list_tags().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_popular_tags_tie_break_on_id() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["A", "B", "C", "D"]).await;
    let p1 = product(&catalog, "First").await;
    let p2 = product(&catalog, "Second").await;
    catalog.sync_product_tags(p1, &[t[2].id, t[1].id, t[3].id]).await.unwrap();
    catalog.sync_product_tags(p2, &[t[3].id]).await.unwrap();

    let popular: Vec<i64> = catalog
        .list_popular_tags(3)
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(popular, vec![t[3].id, t[1].id, t[2].id]);
}

#[tokio::test]
async fn test_seed_default_tags_twice() {
    let catalog = catalog().await;
    catalog.create_tag(TagCreate::new("Ocean").color("#000000")).await.unwrap();

    let first = catalog.seed_default_tags().await.unwrap();
    assert_eq!(first.created, DEFAULT_TAGS.len() - 1);
    assert_eq!(first.existing, 1);

    let second = catalog.seed_default_tags().await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.existing, DEFAULT_TAGS.len());

    // Existing tags are left as they were
    let ocean = catalog.find_tag_by_slug("ocean").await.unwrap();
    assert_eq!(ocean.color, "#000000");

    let flower = catalog.find_tag_by_slug("pressed-flower").await.unwrap();
    assert_eq!(flower.description.as_deref(), Some("Real pressed flowers preserved in resin"));
}

#[tokio::test]
async fn test_product_create_and_delete_recounts() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Earrings", "Gift"]).await;

    let created = catalog
        .create_product(
            ProductCreate::new("Dried Flower Studs")
                .sku("EAR-01")
                .tags([t[1].id, t[0].id, t[1].id]),
        )
        .await
        .unwrap();
    assert_eq!(created.slug, "dried-flower-studs");
    assert_eq!(created.tag_ids, vec![t[0].id, t[1].id]);
    assert_eq!(catalog.get_tag(t[0].id).await.unwrap().usage_count, 1);

    let on_tag = catalog.products_for_tag(t[1].id).await.unwrap();
    assert_eq!(on_tag.len(), 1);
    let names: Vec<String> = catalog
        .tags_for_product(created.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Earrings", "Gift"]);

    let err = catalog
        .create_product(ProductCreate::new("Other Studs").sku("EAR-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { code: ErrorCode::ProductSkuExists, .. }));
    assert_eq!(err.field(), Some("sku"));

    catalog.delete_product(created.id).await.unwrap();
    assert_eq!(catalog.get_tag(t[0].id).await.unwrap().usage_count, 0);
    assert_eq!(catalog.get_tag(t[1].id).await.unwrap().usage_count, 0);
    assert!(catalog.list_products().await.unwrap().is_empty());
    assert!(matches!(
        catalog.get_product(created.id).await,
        Err(RepoError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_product_create_with_invalid_tag_rolls_back() {
    let catalog = catalog().await;

    let err = catalog
        .create_product(ProductCreate::new("Ghost").tags([77]))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidTagReference(_)));
    assert!(catalog.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_stats() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Popular", "Custom", "Theme"]).await;
    let p = product(&catalog, "Coaster Set").await;
    catalog.sync_product_tags(p, &[t[0].id, t[1].id]).await.unwrap();

    let stats = catalog.tag_stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.active, 3);
    assert_eq!(stats.unused, 1);
    assert_eq!(stats.total_usage, 2);
    assert_eq!(stats.average_usage, 0.7);
}

#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let path = path.to_str().unwrap();

    {
        let catalog = CatalogService::new(DbService::new(path, 2).await.unwrap());
        catalog.create_tag(TagCreate::new("Festivals")).await.unwrap();
        catalog.pool().close().await;
    }

    let catalog = CatalogService::new(DbService::new(path, 2).await.unwrap());
    let tag = catalog.find_tag_by_slug("festivals").await.unwrap();
    assert_eq!(tag.name, "Festivals");
}

#[tokio::test]
async fn test_concurrent_sync_and_delete() {
    let catalog = catalog().await;
    let t = tags(&catalog, &["Romantic", "Birthday"]).await;
    let p = product(&catalog, "Heart Pendant").await;

    let sync = {
        let catalog = catalog.clone();
        let ids = [t[0].id, t[1].id];
        tokio::spawn(async move { catalog.sync_product_tags(p, &ids).await })
    };
    let delete = {
        let catalog = catalog.clone();
        let id = t[0].id;
        tokio::spawn(async move { catalog.delete_tag(id).await })
    };

    let sync_result = sync.await.unwrap();
    delete.await.unwrap().unwrap();

    // Either order leaves no assignment to the deleted tag
    let tag_ids = catalog.get_product(p).await.unwrap().tag_ids;
    assert!(!tag_ids.contains(&t[0].id));
    match sync_result {
        Ok(_) => assert_eq!(tag_ids, vec![t[1].id]),
        Err(RepoError::InvalidTagReference(ids)) => {
            assert_eq!(ids, vec![t[0].id]);
            assert!(tag_ids.is_empty());
        }
        Err(other) => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(catalog.get_tag(t[1].id).await.unwrap().usage_count, tag_ids.len() as i64);
}
