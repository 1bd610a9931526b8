//! Server mode
//!
//! 启动 HTTP 服务：所有路径、所有方法都交给 lookup handler。

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{error, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::lookup_routes;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// worker 数量上限
const MAX_WORKERS: usize = 32;

/// Run the HTTP server
///
/// 1. 打开 GeoIP 数据库并准备共享组件
/// 2. 绑定地址并启动 worker
/// 3. 收到关闭信号后优雅退出
///
/// **Note**: 调用前必须已经初始化日志系统
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        error!("Server startup failed: {:#}", e);
        e
    })?;

    let resolver = web::Data::new(startup.resolver);
    let settings = web::Data::new(startup.settings);

    let workers = config.server.cpu_count.clamp(1, MAX_WORKERS);
    warn!(
        "Using {} worker(s), GeoIP provider: {}",
        workers,
        resolver.provider().provider_name()
    );

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .app_data(resolver.clone())
            .app_data(settings.clone())
            .service(lookup_routes())
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .disable_signals()
    .workers(workers)
    .bind(&bind_address)
    .map_err(|e| crate::errors::IpEchoError::server_bind(format!("{}: {}", bind_address, e)))
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{}", bind_address);

    let handle = server.handle();
    tokio::select! {
        res = server => {
            res.context("HTTP server terminated unexpectedly")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            warn!("Graceful shutdown: server stopped");
        }
    }

    Ok(())
}
