//! Client IP resolution tests

use std::net::IpAddr;

use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use ipecho::utils::{UNKNOWN_IP, is_private_or_local, resolve_client_ip};

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in pairs {
        map.insert(HeaderName::from_static(k), HeaderValue::from_static(v));
    }
    map
}

fn peer() -> Option<IpAddr> {
    Some("198.51.100.20".parse().unwrap())
}

#[test]
fn test_cf_connecting_ip_beats_forwarded_for() {
    let map = headers(&[
        ("cf-connecting-ip", "1.1.1.1"),
        ("x-forwarded-for", "9.9.9.9, 8.8.8.8"),
    ]);
    assert_eq!(resolve_client_ip(&map, peer(), UNKNOWN_IP), "1.1.1.1");
}

#[test]
fn test_forwarded_for_uses_first_entry() {
    let map = headers(&[("x-forwarded-for", "9.9.9.9, 8.8.8.8")]);
    assert_eq!(resolve_client_ip(&map, peer(), UNKNOWN_IP), "9.9.9.9");
}

#[test]
fn test_ipv6_header_has_top_priority() {
    let map = headers(&[
        ("cf-connecting-ipv6", "2606:4700::1111"),
        ("cf-connecting-ip", "1.1.1.1"),
    ]);
    assert_eq!(
        resolve_client_ip(&map, peer(), UNKNOWN_IP),
        "2606:4700::1111"
    );
}

#[test]
fn test_real_ip_before_peer() {
    let map = headers(&[("x-real-ip", " 203.0.113.5 ")]);
    assert_eq!(resolve_client_ip(&map, peer(), UNKNOWN_IP), "203.0.113.5");
}

#[test]
fn test_empty_headers_are_skipped() {
    let map = headers(&[("cf-connecting-ip", "   "), ("x-forwarded-for", ", 8.8.8.8")]);
    assert_eq!(resolve_client_ip(&map, peer(), UNKNOWN_IP), "198.51.100.20");
}

#[test]
fn test_peer_then_sentinel() {
    let map = HeaderMap::new();
    assert_eq!(resolve_client_ip(&map, peer(), UNKNOWN_IP), "198.51.100.20");
    assert_eq!(resolve_client_ip(&map, None, UNKNOWN_IP), "unknown");
    assert_eq!(resolve_client_ip(&map, None, "localhost"), "localhost");
}

#[test]
fn test_private_ranges() {
    for ip in ["10.0.0.1", "172.16.5.4", "192.168.1.1", "127.0.0.1", "169.254.1.1", "::1", "fd00::1", "fe80::1"] {
        assert!(is_private_or_local(&ip.parse().unwrap()), "{} should be private", ip);
    }
    for ip in ["8.8.8.8", "1.1.1.1", "2606:4700::1111"] {
        assert!(!is_private_or_local(&ip.parse().unwrap()), "{} should be public", ip);
    }
}
