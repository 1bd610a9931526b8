use std::sync::{Arc, OnceLock};

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Initialize the global configuration
///
/// Loads configuration from `path` (or "config.toml" in the current directory)
/// and `IPECHO__*` environment variables. A second call is a no-op and returns
/// the configuration loaded first.
///
/// # Examples
/// ```no_run
/// use ipecho::config::init_config;
/// init_config(None).expect("invalid configuration");
/// ```
pub fn init_config(path: Option<&str>) -> Result<Arc<StaticConfig>> {
    if let Some(config) = CONFIG.get() {
        return Ok(config.clone());
    }
    let loaded = Arc::new(StaticConfig::load(path)?);
    Ok(CONFIG.get_or_init(|| loaded).clone())
}
