use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::services::ResponseSettings;
use crate::config::StaticConfig;
use crate::services::{GeoIpProvider, GeoMergeResolver};

/// 服务器启动所需的共享组件，所有 worker 共用同一份
pub struct StartupContext {
    pub resolver: GeoMergeResolver,
    pub settings: ResponseSettings,
}

/// 准备服务器启动的上下文
///
/// GeoIP 数据库打不开时直接失败，不会以降级模式启动。
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let provider = GeoIpProvider::open(&config.geoip).with_context(|| {
        format!(
            "Failed to open GeoIP databases in {}",
            config.geoip.database_dir
        )
    })?;
    let resolver = GeoMergeResolver::new(provider);

    let settings = ResponseSettings::from(config);
    debug!(
        "Response settings: powered_by={}, unknown_ip={}, log_requests={}",
        settings.powered_by, settings.unknown_ip, settings.log_requests
    );

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { resolver, settings })
}
