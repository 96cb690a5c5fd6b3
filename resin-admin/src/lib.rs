//! Resin Admin - 树脂工艺品商店的后台目录服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx)，内嵌迁移
//! - **服务** (`services`): 标签目录、商品标签同步、默认标签
//! - **配置** (`core`): 环境变量配置
//!
//! 列表筛选引擎是纯函数，位于 `shared::filter`。
//!
//! # 模块结构
//!
//! ```text
//! resin-admin/src/
//! ├── core/          # 配置
//! ├── db/            # 连接池与仓储
//! ├── services/      # CatalogService, 默认标签
//! └── utils/         # 日志、错误类型
//! ```

pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::Config;
pub use db::DbService;
pub use db::repository::{RepoError, RepoResult};
pub use services::CatalogService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 加载 .env, 创建工作目录, 初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    if let Some(parent) = std::path::Path::new(&config.database_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        config.log_dir.as_deref(),
    );

    Ok(config)
}
