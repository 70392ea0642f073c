use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::media::{CloudinaryClient, MediaStore};

/// 服务器状态 - 路由处理器共享的句柄
///
/// 所有字段都可廉价克隆：
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Any> | 数据库连接句柄 |
/// | media | Arc<dyn MediaStore> | 图床客户端 |
///
/// 没有全局单例：数据库在 [`ServerState::initialize`] 中打开，
/// 由 [`crate::core::Server`] 在关闭时通过 [`DbService::close`] 释放。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接句柄
    pub db: Surreal<Any>,
    /// 图床客户端
    pub media: Arc<dyn MediaStore>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 测试中用于注入内存数据库和替身图床
    pub fn new(config: Config, db: Surreal<Any>, media: Arc<dyn MediaStore>) -> Self {
        Self { config, db, media }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (连接、登录、选择 ns/db、定义表和索引)
    /// 2. 图床客户端 (凭据缺失时仅告警)
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db_service = DbService::connect(&config.database).await?;

        if !config.media.is_configured() {
            tracing::warn!("Cloudinary credentials are missing, image uploads will fail");
        }
        let media: Arc<dyn MediaStore> = Arc::new(CloudinaryClient::new(config.media.clone()));

        Ok(Self::new(config.clone(), db_service.db, media))
    }

    /// 获取数据库句柄
    pub fn get_db(&self) -> Surreal<Any> {
        self.db.clone()
    }
}
