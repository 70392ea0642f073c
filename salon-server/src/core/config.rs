use super::error::ServerError;

/// Default upload folder at the media provider
pub const DEFAULT_MEDIA_FOLDER: &str = "product-images";

/// 服务器配置 - 所有配置项均来自环境变量
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (必填) | SurrealDB 地址: ws://, mem:// |
/// | DATABASE_NS | salon | 命名空间 |
/// | DATABASE_DB | salon | 数据库 |
/// | DATABASE_USER / DATABASE_PASS | - | Root 登录 (两者都设置时) |
/// | CLOUDINARY_CLOUD_NAME | - | 图床账户名 |
/// | CLOUDINARY_API_KEY | - | 图床 API key |
/// | CLOUDINARY_API_SECRET | - | 图床 API secret |
/// | CLOUDINARY_FOLDER | product-images | 上传目录 |
/// | CLOUDINARY_API_BASE | https://api.cloudinary.com | 图床 API 地址 |
/// | PORT | 3000 | HTTP 服务端口 |
/// | STATIC_DIR | public | 静态文件目录 |
/// | MAX_BODY_BYTES | 8388608 | 请求体上限 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (存在时写文件) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=ws://localhost:8000 PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据库连接配置
    pub database: DatabaseConfig,
    /// 图床配置
    pub media: MediaConfig,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 静态文件目录
    pub static_dir: String,
    /// 请求体上限 (字节)，需大于单张图片上限
    pub max_body_bytes: usize,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

/// 数据库连接配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DatabaseConfig {
    /// In-memory database, used by tests
    pub fn in_memory() -> Self {
        Self {
            url: "mem://".into(),
            namespace: "salon".into(),
            database: "salon".into(),
            username: None,
            password: None,
        }
    }
}

/// 图床 (Cloudinary) 配置
#[derive(Clone, Default)]
pub struct MediaConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub folder: String,
    pub api_base: String,
}

// api_secret must never reach the logs
impl std::fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .field("folder", &self.folder)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl MediaConfig {
    /// 三项凭据是否齐全
    pub fn is_configured(&self) -> bool {
        self.cloud_name.is_some() && self.api_key.is_some() && self.api_secret.is_some()
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// DATABASE_URL 缺失时返回错误，其余项使用默认值
    pub fn from_env() -> Result<Self, ServerError> {
        let url = env_opt("DATABASE_URL")
            .ok_or_else(|| ServerError::Config("DATABASE_URL is not defined".into()))?;

        Ok(Self {
            database: DatabaseConfig {
                url,
                namespace: env_or("DATABASE_NS", "salon"),
                database: env_or("DATABASE_DB", "salon"),
                username: env_opt("DATABASE_USER"),
                password: env_opt("DATABASE_PASS"),
            },
            media: MediaConfig {
                cloud_name: env_opt("CLOUDINARY_CLOUD_NAME"),
                api_key: env_opt("CLOUDINARY_API_KEY"),
                api_secret: env_opt("CLOUDINARY_API_SECRET"),
                folder: env_or("CLOUDINARY_FOLDER", DEFAULT_MEDIA_FOLDER),
                api_base: env_or("CLOUDINARY_API_BASE", "https://api.cloudinary.com"),
            },
            http_port: env_parse("PORT", 3000),
            static_dir: env_or("STATIC_DIR", "public"),
            max_body_bytes: env_parse("MAX_BODY_BYTES", 8 * 1024 * 1024),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: env_opt("LOG_DIR"),
            environment: env_or("ENVIRONMENT", "development"),
        })
    }

    /// 测试用配置: 内存数据库，无图床凭据
    pub fn for_tests() -> Self {
        Self {
            database: DatabaseConfig::in_memory(),
            media: MediaConfig {
                folder: DEFAULT_MEDIA_FOLDER.into(),
                api_base: "http://127.0.0.1:9".into(),
                ..MediaConfig::default()
            },
            http_port: 0,
            static_dir: "public".into(),
            max_body_bytes: 8 * 1024 * 1024,
            shutdown_timeout_ms: 1000,
            log_level: "debug".into(),
            log_dir: None,
            environment: "test".into(),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
