use salon_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 配置, 日志); DATABASE_URL 缺失则退出
    let config = setup_environment().inspect_err(|e| {
        tracing::error!("Startup failed: {}", e);
    })?;

    print_banner();
    tracing::info!(environment = %config.environment, "💇 Salon server starting...");

    // 2. 初始化服务器状态 (连接数据库)
    let state = ServerState::initialize(&config).await.inspect_err(|e| {
        tracing::error!("Startup failed: {}", e);
    })?;

    // 3. 启动 HTTP 服务器
    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
