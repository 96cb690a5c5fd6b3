//! 核心模块 - 服务配置
//!
//! - [`Config`] - 环境变量配置

pub mod config;

pub use config::Config;
