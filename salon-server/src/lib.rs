//! Salon Server - 沙龙预约与商品目录后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SurrealDB (ws:// 远程或 mem:// 内存)
//! - **图床** (`media`): Cloudinary 签名上传/删除
//! - **HTTP API** (`api`): 预约与商品 REST 接口
//!
//! # 模块结构
//!
//! ```text
//! salon-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── media/         # 图床客户端
//! └── utils/         # 日志、校验、时间
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod media;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerError, ServerState, build_app};
pub use crate::media::{CloudinaryClient, ImageUpload, MediaStore, StoredImage};
pub use crate::utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// 加载 `.env` 和配置，并按配置初始化日志
///
/// 日志级别、目录和格式来自 [`Config`]，生产环境 (`ENVIRONMENT=production`)
/// 输出 JSON。配置无效时按默认设置初始化日志，以便记录启动失败。
pub fn setup_environment() -> Result<Config, ServerError> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();
    match &config {
        Ok(config) => init_logger_with_file(
            Some(&config.log_level),
            config.is_production(),
            config.log_dir.as_deref(),
        ),
        Err(_) => init_logger(),
    }

    if !dotenv_loaded {
        tracing::debug!("No .env file found, using process environment");
    }
    config
}

pub fn print_banner() {
    println!(
        r#"
   _____       __
  / ___/____ _/ /___  ____
  \__ \/ __ `/ / __ \/ __ \
 ___/ / /_/ / / /_/ / / / /
/____/\__,_/_/\____/_/ /_/
    "#
    );
}
