//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 GeoLite2-ASN.mmdb 与 GeoLite2-City.mmdb 进行查询。
//! 记录解码使用 `maxminddb::geoip2` 的类型化模型，名称取英文。

use std::net::IpAddr;
use std::path::Path;

use async_trait::async_trait;
use maxminddb::{Reader, geoip2};
use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use super::provider::{AsnInfo, CityInfo, GeoIpLookup};
use crate::errors::{IpEchoError, Result};

/// MaxMind GeoIP Provider
pub struct MaxMindProvider {
    asn: Reader<Vec<u8>>,
    city: Reader<Vec<u8>>,
}

impl MaxMindProvider {
    /// 从文件路径打开两个数据集
    pub fn open(asn_path: impl AsRef<Path>, city_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            asn: open_reader(asn_path.as_ref(), "ASN")?,
            city: open_reader(city_path.as_ref(), "City")?,
        })
    }
}

fn open_reader(path: &Path, expected_type: &str) -> Result<Reader<Vec<u8>>> {
    let reader = Reader::open_readfile(path).map_err(|e| {
        IpEchoError::geo_database_open(format!("{}: {}", path.display(), e))
    })?;

    let database_type = &reader.metadata.database_type;
    if !database_type.contains(expected_type) {
        warn!(
            "GeoIP: {} reports database type \"{}\", expected a {} database",
            path.display(),
            database_type,
            expected_type
        );
    }
    info!(
        "GeoIP: Loaded {} from {} (build epoch {})",
        database_type,
        path.display(),
        reader.metadata.build_epoch
    );
    Ok(reader)
}

/// 查询并解码，未命中和解码失败都返回 None
fn decode<'de, T: Deserialize<'de>>(reader: &'de Reader<Vec<u8>>, ip: IpAddr) -> Option<T> {
    let result = match reader.lookup(ip) {
        Ok(result) => result,
        Err(e) => {
            debug!("MaxMind lookup for {} failed: {}", ip, e);
            return None;
        }
    };

    match result.decode::<T>() {
        Ok(record) => record,
        Err(e) => {
            debug!("MaxMind record for {} could not be decoded: {}", ip, e);
            None
        }
    }
}

#[async_trait]
impl GeoIpLookup for MaxMindProvider {
    async fn lookup_asn(&self, ip: IpAddr) -> Option<AsnInfo> {
        let record: geoip2::Asn = decode(&self.asn, ip)?;
        let info = asn_info(&record);
        trace!(
            "MaxMind ASN lookup for {}: asn={:?}, org={:?}",
            ip, info.number, info.organization
        );
        Some(info)
    }

    async fn lookup_city(&self, ip: IpAddr) -> Option<CityInfo> {
        let record: geoip2::City = decode(&self.city, ip)?;
        let info = city_info(&record);
        trace!(
            "MaxMind City lookup for {}: country={:?}, city={:?}",
            ip, info.country_code, info.city
        );
        Some(info)
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

fn asn_info(record: &geoip2::Asn<'_>) -> AsnInfo {
    AsnInfo {
        number: record.autonomous_system_number,
        organization: record.autonomous_system_organization.map(String::from),
    }
}

// 区域取最大的一级行政区
fn city_info(record: &geoip2::City<'_>) -> CityInfo {
    let subdivision = record.subdivisions.first();

    CityInfo {
        continent_code: record.continent.code.map(String::from),
        continent: record.continent.names.english.map(String::from),
        country_code: record.country.iso_code.map(String::from),
        country: record.country.names.english.map(String::from),
        region_code: subdivision.and_then(|s| s.iso_code).map(String::from),
        region: subdivision.and_then(|s| s.names.english).map(String::from),
        city: record.city.names.english.map(String::from),
        postal_code: record.postal.code.map(String::from),
        latitude: record.location.latitude,
        longitude: record.location.longitude,
        timezone: record.location.time_zone.map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_database_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let asn = dir.path().join("asn.mmdb");
        let city = dir.path().join("city.mmdb");

        let err = MaxMindProvider::open(&asn, &city).err().unwrap();
        assert!(matches!(err, IpEchoError::GeoDatabaseOpen(_)));
        assert!(err.message().contains("asn.mmdb"));
    }

    #[test]
    fn test_city_record_mapping() {
        let mut record = geoip2::City::default();
        record.continent.code = Some("AS");
        record.continent.names.english = Some("Asia");
        record.country.iso_code = Some("JP");
        record.country.names.english = Some("Japan");
        record.city.names.english = Some("Tokyo");
        record.postal.code = Some("100-0001");
        record.location.latitude = Some(35.6895);
        record.location.longitude = Some(139.0);
        record.location.time_zone = Some("Asia/Tokyo");

        let info = city_info(&record);
        assert_eq!(info.continent_code.as_deref(), Some("AS"));
        assert_eq!(info.continent.as_deref(), Some("Asia"));
        assert_eq!(info.country_code.as_deref(), Some("JP"));
        assert_eq!(info.country.as_deref(), Some("Japan"));
        assert_eq!(info.city.as_deref(), Some("Tokyo"));
        assert_eq!(info.postal_code.as_deref(), Some("100-0001"));
        assert_eq!(info.latitude, Some(35.6895));
        assert_eq!(info.longitude, Some(139.0));
        assert_eq!(info.timezone.as_deref(), Some("Asia/Tokyo"));
        assert!(info.region_code.is_none());
        assert!(info.region.is_none());
    }

    #[test]
    fn test_empty_records_map_to_empty_info() {
        assert_eq!(city_info(&geoip2::City::default()), CityInfo::default());

        let asn = asn_info(&geoip2::Asn { autonomous_system_number: None, autonomous_system_organization: None });
        assert!(asn.number.is_none());
        assert!(asn.organization.is_none());
    }

    #[test]
    fn test_asn_record_mapping() {
        let mut record = geoip2::Asn { autonomous_system_number: None, autonomous_system_organization: None };
        record.autonomous_system_number = Some(15169);
        record.autonomous_system_organization = Some("GOOGLE");

        let info = asn_info(&record);
        assert_eq!(info.number, Some(15169));
        assert_eq!(info.organization.as_deref(), Some("GOOGLE"));
    }
}
