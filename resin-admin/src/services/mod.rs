//! 服务层 - 目录核心服务
//!
//! # 服务列表
//!
//! - [`CatalogService`] - 标签目录与商品标签分配
//! - [`tag_seed`] - 默认标签目录

pub mod catalog_service;
pub mod tag_seed;

pub use catalog_service::CatalogService;
pub use tag_seed::{DEFAULT_TAGS, SeedReport, TagSeed};
