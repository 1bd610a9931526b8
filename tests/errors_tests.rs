//! Error type tests

use ipecho::errors::IpEchoError;

#[test]
fn test_codes_and_types() {
    let cases = [
        (IpEchoError::config("x"), "E001", "Configuration Error"),
        (IpEchoError::geo_database_open("x"), "E002", "GeoIP Database Open Error"),
        (IpEchoError::file_operation("x"), "E003", "File Operation Error"),
        (IpEchoError::serialization("x"), "E004", "Serialization Error"),
        (IpEchoError::server_bind("x"), "E005", "Server Bind Error"),
    ];
    for (err, code, error_type) in cases {
        assert_eq!(err.code(), code);
        assert_eq!(err.error_type(), error_type);
        assert_eq!(err.message(), "x");
    }
}

#[test]
fn test_display_uses_simple_format() {
    let err = IpEchoError::geo_database_open("./data/GeoLite2-ASN.mmdb: No such file");
    assert_eq!(
        err.to_string(),
        "GeoIP Database Open Error: ./data/GeoLite2-ASN.mmdb: No such file"
    );
    assert_eq!(err.to_string(), err.format_simple());
}

#[test]
fn test_colored_format_contains_code_and_message() {
    colored::control::set_override(false);
    let err = IpEchoError::server_bind("0.0.0.0:3000: address in use");
    let out = err.format_colored();
    assert!(out.contains("[ERROR]"));
    assert!(out.contains("E005"));
    assert!(out.contains("address in use"));
}

#[test]
fn test_from_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(IpEchoError::from(io), IpEchoError::FileOperation(_)));

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(IpEchoError::from(json), IpEchoError::Serialization(_)));

    let cfg = config::ConfigError::Message("bad".to_string());
    assert!(matches!(IpEchoError::from(cfg), IpEchoError::Config(_)));
}

#[test]
fn test_codes_are_unique() {
    let errors = [
        IpEchoError::config("x"),
        IpEchoError::geo_database_open("x"),
        IpEchoError::file_operation("x"),
        IpEchoError::serialization("x"),
        IpEchoError::server_bind("x"),
    ];
    let codes: std::collections::HashSet<_> = errors.iter().map(IpEchoError::code).collect();
    assert_eq!(codes.len(), errors.len());
}
