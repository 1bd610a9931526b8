//! 数据库结果与代理请求头的合并
//!
//! 优先级：本地数据库 > 代理请求头。每个字段至多来自其中一个来源。
//! 查询任意第三方 IP（searching）时不读取任何请求头：
//! 请求头描述的是当前连接，套到别的 IP 上就是错误信息。

use std::str::FromStr;

use actix_web::http::header::HeaderMap;
use tracing::trace;

use super::provider::{AsnInfo, CityInfo, GeoIpProvider};
use crate::payload::GeoRecord;
use crate::utils::{ProxyHeader, ProxyHeaders, get_flag};

/// Geo 合并解析器
#[derive(Clone)]
pub struct GeoMergeResolver {
    provider: GeoIpProvider,
}

impl GeoMergeResolver {
    pub fn new(provider: GeoIpProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &GeoIpProvider {
        &self.provider
    }

    /// 解析 `ip` 的地理信息
    ///
    /// 两个数据集都未命中且没有可用的请求头时返回 `None`。
    pub async fn resolve(
        &self,
        ip: &str,
        is_searching: bool,
        headers: &HeaderMap,
    ) -> Option<GeoRecord> {
        let (asn, city) = tokio::join!(
            self.provider.lookup_asn(ip),
            self.provider.lookup_city(ip)
        );
        trace!(
            "GeoIP lookup for {}: asn_hit={}, city_hit={}, searching={}",
            ip,
            asn.is_some(),
            city.is_some(),
            is_searching
        );

        let fallback = (!is_searching).then(|| ProxyHeaders::new(headers));
        let record = merge_record(asn.unwrap_or_default(), city.unwrap_or_default(), fallback);

        (!record.is_empty()).then_some(record)
    }
}

/// 合并两个数据集的结果，缺失字段按需回退到请求头
///
/// `headers` 为 `None` 时完全不使用请求头。
pub fn merge_record(asn: AsnInfo, city: CityInfo, headers: Option<ProxyHeaders<'_>>) -> GeoRecord {
    let header = |name: ProxyHeader| headers.and_then(|h| h.get(name));
    let text = |name: ProxyHeader| header(name).map(String::from);

    let country_code = city.country_code.or_else(|| text(ProxyHeader::CfIpCountry));

    GeoRecord {
        flag: get_flag(country_code.as_deref()),
        continent_code: city
            .continent_code
            .or_else(|| text(ProxyHeader::CfIpContinent)),
        continent: city.continent,
        country_code,
        country: city.country,
        region_code: city.region_code.or_else(|| text(ProxyHeader::CfRegionCode)),
        region: city.region.or_else(|| text(ProxyHeader::CfRegion)),
        city: city.city.or_else(|| text(ProxyHeader::CfIpCity)),
        postal_code: city.postal_code.or_else(|| text(ProxyHeader::CfPostalCode)),
        latitude: city
            .latitude
            .or_else(|| header(ProxyHeader::CfIpLatitude).and_then(parse_coordinate)),
        longitude: city
            .longitude
            .or_else(|| header(ProxyHeader::CfIpLongitude).and_then(parse_coordinate)),
        timezone: city.timezone.or_else(|| text(ProxyHeader::CfTimezone)),
        asn: asn
            .number
            .or_else(|| header(ProxyHeader::XAsn).and_then(parse_asn)),
        as_region: headers
            .and_then(|h| h.segment(ProxyHeader::CfRay, 1))
            .map(String::from),
        as_organization: asn
            .organization
            .or_else(|| text(ProxyHeader::CfAsOrganization)),
        user_agent: text(ProxyHeader::UserAgent),
    }
}

/// 解析坐标，拒绝 NaN / inf
fn parse_coordinate(value: &str) -> Option<f64> {
    f64::from_str(value).ok().filter(|v| v.is_finite())
}

/// 解析 ASN，接受 `13335` 与 `AS13335`
fn parse_asn(value: &str) -> Option<u32> {
    let digits = value
        .strip_prefix("AS")
        .or_else(|| value.strip_prefix("as"))
        .unwrap_or(value);
    digits.parse().ok()
}
