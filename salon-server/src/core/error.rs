use thiserror::Error;

/// 进程级错误 - 启动、连接与服务运行失败
///
/// 请求级错误使用 [`crate::utils::AppError`]
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库连接失败: {0}")]
    Database(String),

    #[error("服务器运行失败: {0}")]
    Serve(#[from] std::io::Error),
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
