//! IP 地址处理工具
//!
//! 提供统一的客户端 IP 提取功能：
//! - Cloudflare / 通用反向代理请求头优先级链
//! - 传输层 peer 地址兜底
//! - 私有 IP 检测

use std::net::IpAddr;

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::trace;

use super::headers::{ProxyHeader, ProxyHeaders};

/// 无法确定客户端 IP 时的默认占位值
pub const UNKNOWN_IP: &str = "unknown";

/// 检查 IP 是否为私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            // IPv6 私有地址：
            // - fc00::/7 (ULA, RFC 4193): fc00::/8 + fd00::/8
            // - fe80::/10 (Link-local)
            // - ::1 (Loopback)
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7 (包含 fc00 和 fd00)
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10 (link-local)
        }
    }
}

/// 从请求头和 peer 地址推导客户端 IP（核心逻辑）
///
/// 策略（按优先级，取第一个非空值，去掉首尾空白）：
/// 1. CF-Connecting-IPv6
/// 2. CF-Connecting-IP
/// 3. X-Forwarded-For（只取第一个，即原始客户端 IP）
/// 4. X-Real-IP
/// 5. 传输层 peer 地址
/// 6. `fallback` 占位值
///
/// 不校验结果是否为合法 IP，格式错误的值原样透传，由 GeoIP 查询自行失败。
pub fn resolve_client_ip(headers: &HeaderMap, peer_ip: Option<IpAddr>, fallback: &str) -> String {
    let h = ProxyHeaders::new(headers);

    if let Some(ip) = h
        .get(ProxyHeader::CfConnectingIpv6)
        .or_else(|| h.get(ProxyHeader::CfConnectingIp))
        .or_else(|| h.first_in_list(ProxyHeader::XForwardedFor))
        .or_else(|| h.get(ProxyHeader::XRealIp))
    {
        trace!("Client IP from proxy headers: {}", ip);
        return ip.to_string();
    }

    match peer_ip {
        Some(ip) => {
            trace!("Client IP from peer address: {}", ip);
            ip.to_string()
        }
        None => {
            trace!("No client IP signal available, using \"{}\"", fallback);
            fallback.to_string()
        }
    }
}

/// 从 HttpRequest 提取客户端 IP
pub fn extract_client_ip(req: &HttpRequest, fallback: &str) -> String {
    resolve_client_ip(req.headers(), req.peer_addr().map(|addr| addr.ip()), fallback)
}
