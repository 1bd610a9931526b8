//! Configuration loading tests

use std::io::Write;

use ipecho::api::services::ResponseSettings;
use ipecho::config::StaticConfig;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("ipecho.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_defaults() {
    let config = StaticConfig::default();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert!(config.server.cpu_count >= 1);
    assert_eq!(config.geoip.database_dir, "./data");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "text");
    assert!(config.logging.file.is_none());
    assert!(config.logging.log_requests);
    assert_eq!(config.response.unknown_ip, "unknown");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
port = 8080

[geoip]
database_dir = "/var/lib/GeoIP"

[logging]
log_requests = false
"#,
    );

    let config = StaticConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.geoip.database_dir, "/var/lib/GeoIP");
    assert_eq!(config.geoip.asn_file, "GeoLite2-ASN.mmdb");
    assert!(!config.logging.log_requests);

    let settings = ResponseSettings::from(&config);
    assert!(!settings.log_requests);
    assert_eq!(settings.unknown_ip, "unknown");
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(StaticConfig::load(Some(missing.to_str().unwrap())).is_err());
}

#[test]
fn test_invalid_value_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[server]\nport = \"not a port\"\n");
    let err = StaticConfig::load(Some(&path)).unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[response]\npowered_by = \"from-file\"\n");

    // 本文件中只有这个测试读取 response.powered_by
    unsafe {
        std::env::set_var("IPECHO__RESPONSE__POWERED_BY", "from-env");
    }
    let config = StaticConfig::load(Some(&path)).unwrap();
    unsafe {
        std::env::remove_var("IPECHO__RESPONSE__POWERED_BY");
    }

    assert_eq!(config.response.powered_by, "from-env");
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = StaticConfig::default();
    config.server.port = 4321;
    config.response.powered_by = "saved".to_string();
    config.save_to_file(&path).unwrap();

    let reloaded = StaticConfig::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(reloaded.server.port, 4321);
}

#[test]
fn test_init_config_loads_once() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[server]\nport = 4001\n");

    // 本文件中只有这个测试初始化全局配置
    let first = ipecho::config::init_config(Some(&path)).unwrap();
    assert_eq!(first.server.port, 4001);

    let second = ipecho::config::init_config(None).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
