//! CLI mode
//!
//! 不启动 HTTP 服务的一次性命令：离线查询与生成配置文件。

use actix_web::http::header::HeaderMap;
use std::net::IpAddr;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::errors::{IpEchoError, Result};
use crate::payload::{DEFAULT_CALLBACK, OutputFormat, ResponsePayload};
use crate::services::{GeoIpProvider, GeoMergeResolver};

/// 执行一个 CLI 命令，`Serve` 不在这里处理
pub async fn run_cli(command: Commands, config: &StaticConfig) -> Result<()> {
    match command {
        Commands::Lookup {
            ip,
            format,
            callback,
        } => {
            let provider = GeoIpProvider::open(&config.geoip)?;
            let resolver = GeoMergeResolver::new(provider);
            let body = lookup(&resolver, ip, format.as_deref(), callback.as_deref()).await?;
            print!("{}", body);
            Ok(())
        }
        Commands::GenerateConfig { output } => generate_config(output.as_deref()),
        Commands::Serve => Err(IpEchoError::config(
            "serve is not a one-shot command and must run in server mode",
        )),
    }
}

/// 离线查询并渲染结果
///
/// 没有请求头可用，只使用数据库结果。
pub async fn lookup(
    resolver: &GeoMergeResolver,
    ip: IpAddr,
    format: Option<&str>,
    callback: Option<&str>,
) -> Result<String> {
    let ip = ip.to_string();
    let geo = resolver.resolve(&ip, true, &HeaderMap::new()).await;
    let payload = ResponsePayload::with_geo(ip, geo);

    let format = OutputFormat::select(format, None, "");
    let callback = callback.filter(|cb| !cb.is_empty()).unwrap_or(DEFAULT_CALLBACK);
    format.render(&payload, callback)
}

fn generate_config(output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            StaticConfig::default().save_to_file(path)?;
            println!("Sample configuration written to {}", path);
        }
        None => print!("{}", StaticConfig::generate_sample_config()?),
    }
    Ok(())
}
