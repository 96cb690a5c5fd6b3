use resin_admin::{CatalogService, DbService, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 工作目录, 日志)
    let config = setup_environment()?;

    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "Resin admin catalog starting..."
    );

    // 2. 打开数据库并应用迁移
    let db = DbService::new(&config.database_path, config.db_max_connections).await?;
    let catalog = CatalogService::new(db);

    // 3. 默认标签 (幂等)
    if config.seed_default_tags {
        catalog.seed_default_tags().await?;
    }

    // 4. 修正漂移的使用计数
    catalog.recount_usage().await?;

    let stats = catalog.tag_stats().await?;
    tracing::info!(
        total = stats.total,
        active = stats.active,
        unused = stats.unused,
        average_usage = stats.average_usage,
        "Tag catalog ready"
    );

    for tag in catalog.list_popular_tags(config.popular_tags_limit).await? {
        tracing::info!(name = %tag.name, slug = %tag.slug, usage = tag.usage_count, "Popular tag");
    }

    Ok(())
}
