use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use dosebank_core::AppConfig;
use dosebank_infrastructure::database::DatabaseManager;
use dosebank_worker::ProcessIngestionDispatcher;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let matches = Command::new("dosebank")
        .version(env!("CARGO_PKG_VERSION"))
        .about("疫苗剂量预约服务")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径")
                .default_value("config/dosebank.toml"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .default_value("info"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式")
                .value_parser(["json", "pretty"])
                .default_value("pretty"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let log_level = matches.get_one::<String>("log-level").unwrap();
    let log_format = matches.get_one::<String>("log-format").unwrap();

    // 初始化日志系统
    init_logging(log_level, log_format)?;

    info!("启动疫苗剂量预约服务");
    info!("配置文件: {config_path}");

    // 加载配置，文件不存在时退回默认值 + 环境变量
    let config_file = std::path::Path::new(config_path)
        .exists()
        .then_some(config_path.as_str());
    if config_file.is_none() {
        info!("配置文件不存在，使用默认配置: {config_path}");
    }
    let config =
        AppConfig::load(config_file).with_context(|| format!("加载配置失败: {config_path}"))?;

    // 初始化数据库连接池并准备表结构
    let database = DatabaseManager::new(&config.database)
        .await
        .context("初始化数据库失败")?;
    database.ensure_schema().await.context("初始化表结构失败")?;

    if let Some(initial_stock) = config.reservation.initial_stock {
        let seeded = database
            .seed_initial_stock(&config.reservation.item_name, initial_stock)
            .await
            .context("初始化库存失败")?;
        if seeded {
            info!(
                "已写入初始库存: {} x {}",
                config.reservation.item_name, initial_stock
            );
        }
    }

    let reservations = database.reservation_coordinator(&config.reservation);
    let ingestion = Arc::new(ProcessIngestionDispatcher::new(config.worker.clone()));

    let app = dosebank_api::create_app(reservations, ingestion);

    let listener = tokio::net::TcpListener::bind(&config.api.bind_address)
        .await
        .with_context(|| format!("绑定地址失败: {}", config.api.bind_address))?;
    info!("HTTP服务监听于 {}", config.api.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("HTTP服务运行失败")?;

    info!("开始优雅关闭...");
    database.close().await;
    info!("疫苗剂量预约服务已退出");
    Ok(())
}

/// 初始化日志系统
fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("初始化JSON日志格式失败")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("初始化Pretty日志格式失败")?;
        }
        _ => {
            return Err(anyhow::anyhow!("不支持的日志格式: {log_format}"));
        }
    }

    Ok(())
}

/// 等待关闭信号
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("安装Ctrl+C信号处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("安装SIGTERM信号处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("收到Ctrl+C信号");
        },
        _ = terminate => {
            info!("收到SIGTERM信号");
        },
    }
}
