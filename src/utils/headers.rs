//! 代理请求头的类型化访问
//!
//! 所有用到的 header 名都集中在 [`ProxyHeader`] 里，业务代码不直接写字符串字面量。
//! actix 的 `HeaderMap` 本身大小写不敏感。

use actix_web::http::header::HeaderMap;

/// 客户端 IP 链与地理信息回退链用到的请求头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyHeader {
    CfConnectingIpv6,
    CfConnectingIp,
    XForwardedFor,
    XRealIp,
    CfIpCountry,
    CfIpContinent,
    CfRegion,
    CfRegionCode,
    CfIpCity,
    CfPostalCode,
    CfIpLatitude,
    CfIpLongitude,
    CfTimezone,
    XAsn,
    CfAsOrganization,
    CfRay,
    UserAgent,
    Host,
}

impl ProxyHeader {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CfConnectingIpv6 => "cf-connecting-ipv6",
            Self::CfConnectingIp => "cf-connecting-ip",
            Self::XForwardedFor => "x-forwarded-for",
            Self::XRealIp => "x-real-ip",
            Self::CfIpCountry => "cf-ipcountry",
            Self::CfIpContinent => "cf-ipcontinent",
            Self::CfRegion => "cf-region",
            Self::CfRegionCode => "cf-region-code",
            Self::CfIpCity => "cf-ipcity",
            Self::CfPostalCode => "cf-postal-code",
            Self::CfIpLatitude => "cf-iplatitude",
            Self::CfIpLongitude => "cf-iplongitude",
            Self::CfTimezone => "cf-timezone",
            Self::XAsn => "x-asn",
            Self::CfAsOrganization => "cf-asorganization",
            Self::CfRay => "cf-ray",
            Self::UserAgent => "user-agent",
            Self::Host => "host",
        }
    }
}

/// `HeaderMap` 之上的只读视图
///
/// 取值时去掉首尾空白，空值视为不存在。值按 UTF-8 解码，
/// 非法 UTF-8 的值视为不存在。
#[derive(Clone, Copy)]
pub struct ProxyHeaders<'a> {
    headers: &'a HeaderMap,
}

impl<'a> ProxyHeaders<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }

    pub fn get(&self, header: ProxyHeader) -> Option<&'a str> {
        self.headers
            .get(header.name())
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// 逗号分隔列表的第一项（X-Forwarded-For 最左侧为原始客户端）
    pub fn first_in_list(&self, header: ProxyHeader) -> Option<&'a str> {
        self.get(header)?
            .split(',')
            .next()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// `-` 分隔的第 `index` 段（CF-Ray: `8a1b2c3d4e5f6789-NRT`）
    pub fn segment(&self, header: ProxyHeader, index: usize) -> Option<&'a str> {
        self.get(header)?
            .split('-')
            .nth(index)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(HeaderName::from_static(k), HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn test_get_trims_and_drops_empty() {
        let map = headers(&[("cf-ipcity", "  Tokyo "), ("cf-region", "   ")]);
        let h = ProxyHeaders::new(&map);
        assert_eq!(h.get(ProxyHeader::CfIpCity), Some("Tokyo"));
        assert_eq!(h.get(ProxyHeader::CfRegion), None);
        assert_eq!(h.get(ProxyHeader::CfTimezone), None);
    }

    #[test]
    fn test_get_accepts_utf8_values() {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("cf-ipcity"),
            HeaderValue::from_bytes("Zürich".as_bytes()).unwrap(),
        );
        map.insert(
            HeaderName::from_static("cf-region"),
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );
        let h = ProxyHeaders::new(&map);
        assert_eq!(h.get(ProxyHeader::CfIpCity), Some("Zürich"));
        assert_eq!(h.get(ProxyHeader::CfRegion), None);
    }

    #[test]
    fn test_first_in_list() {
        let map = headers(&[("x-forwarded-for", " 9.9.9.9 , 8.8.8.8")]);
        let h = ProxyHeaders::new(&map);
        assert_eq!(h.first_in_list(ProxyHeader::XForwardedFor), Some("9.9.9.9"));

        let map = headers(&[("x-forwarded-for", ", 8.8.8.8")]);
        let h = ProxyHeaders::new(&map);
        assert_eq!(h.first_in_list(ProxyHeader::XForwardedFor), None);
    }

    #[test]
    fn test_segment() {
        let map = headers(&[("cf-ray", "8a1b2c3d4e5f6789-NRT")]);
        let h = ProxyHeaders::new(&map);
        assert_eq!(h.segment(ProxyHeader::CfRay, 1), Some("NRT"));
        assert_eq!(h.segment(ProxyHeader::CfRay, 2), None);

        let map = headers(&[("cf-ray", "8a1b2c3d4e5f6789")]);
        let h = ProxyHeaders::new(&map);
        assert_eq!(h.segment(ProxyHeader::CfRay, 1), None);
    }
}
