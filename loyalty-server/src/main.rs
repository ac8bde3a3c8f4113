use loyalty_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境设置 (dotenv, 工作目录, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.log_dir();
    if config.is_production() {
        init_logger_with_file(Some("info"), log_dir.to_str());
    } else {
        init_logger_with_file(Some("debug"), None);
    }

    print_banner();
    tracing::info!("Loyalty server starting...");

    // 2. 初始化服务器状态 (数据库 + 消息总线)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
