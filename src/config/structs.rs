use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀（IPECHO__SERVER__PORT=9999）
pub const ENV_PREFIX: &str = "IPECHO";

/// 静态配置（从 TOML + 环境变量加载，启动时读取一次）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - geoip: MaxMind 数据库目录与文件名
/// - logging: 日志配置
/// - response: 响应头与兜底值
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub geoip: GeoIpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub response: ResponseConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：IPECHO，分隔符：__
    /// 示例：IPECHO__SERVER__PORT=9999
    ///
    /// 显式指定的配置文件必须存在，默认的 config.toml 可以缺省。
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let required = path.is_some();
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            // 1. 从 TOML 文件加载
            .add_source(File::with_name(path).required(required))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config = settings.try_deserialize::<StaticConfig>()?;
        if Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// GeoIP 数据库配置
///
/// 两个数据集都放在同一个目录下，由外部定期刷新，进程只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    #[serde(default = "default_database_dir")]
    pub database_dir: String,
    #[serde(default = "default_asn_file")]
    pub asn_file: String,
    #[serde(default = "default_city_file")]
    pub city_file: String,
}

impl GeoIpConfig {
    pub fn asn_path(&self) -> PathBuf {
        Path::new(&self.database_dir).join(&self.asn_file)
    }

    pub fn city_path(&self) -> PathBuf {
        Path::new(&self.database_dir).join(&self.city_file)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_true")]
    pub enable_rotation: bool,
    /// 每个请求打印一行访问日志
    #[serde(default = "default_true")]
    pub log_requests: bool,
}

/// 响应配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// X-Powered-By 响应头
    #[serde(default = "default_powered_by")]
    pub powered_by: String,
    /// 无法确定客户端 IP 时返回的占位值
    #[serde(default = "default_unknown_ip")]
    pub unknown_ip: String,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_dir() -> String {
    "./data".to_string()
}

fn default_asn_file() -> String {
    "GeoLite2-ASN.mmdb".to_string()
}

fn default_city_file() -> String {
    "GeoLite2-City.mmdb".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_powered_by() -> String {
    "ipecho".to_string()
}

fn default_unknown_ip() -> String {
    "unknown".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            database_dir: default_database_dir(),
            asn_file: default_asn_file(),
            city_file: default_city_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: true,
            log_requests: true,
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            powered_by: default_powered_by(),
            unknown_ip: default_unknown_ip(),
        }
    }
}
