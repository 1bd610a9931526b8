//! GeoIP Provider 抽象层
//!
//! 统一的 GeoIP 查询接口：
//! - ASN 数据集：自治系统编号与运营方
//! - City 数据集：大洲 / 国家 / 地区 / 城市 / 坐标 / 时区
//!
//! 启动时打开一次，之后在所有 worker 间只读共享，查询不加锁。

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, trace};

use super::maxmind::MaxMindProvider;
use crate::config::GeoIpConfig;
use crate::errors::Result;
use crate::utils::is_private_or_local;

/// 网络归属信息（ASN 数据集）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsnInfo {
    pub number: Option<u32>,
    pub organization: Option<String>,
}

/// 地理位置信息（City 数据集）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityInfo {
    pub continent_code: Option<String>,
    pub continent: Option<String>,
    /// ISO 3166-1 alpha-2 国家代码 (e.g., "CN", "US")
    pub country_code: Option<String>,
    pub country: Option<String>,
    pub region_code: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
}

/// GeoIP 查询 trait
///
/// 未命中（保留地址段、数据库中没有记录）返回 `None`，不是错误。
#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    async fn lookup_asn(&self, ip: IpAddr) -> Option<AsnInfo>;

    async fn lookup_city(&self, ip: IpAddr) -> Option<CityInfo>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 统一 GeoIP Provider
///
/// 接受任意字符串形式的 IP，无法解析或属于私有地址段时直接视为未命中。
pub struct GeoIpProvider {
    inner: Arc<dyn GeoIpLookup>,
}

impl GeoIpProvider {
    /// 根据配置打开 MaxMind 数据库
    ///
    /// 任一数据集打不开都返回错误，由启动流程决定是否中止进程。
    pub fn open(config: &GeoIpConfig) -> Result<Self> {
        let provider = MaxMindProvider::open(config.asn_path(), config.city_path())?;
        let inner: Arc<dyn GeoIpLookup> = Arc::new(provider);
        info!("GeoIP: Initialized with {} provider", inner.name());
        Ok(Self { inner })
    }

    /// 使用自定义实现（测试、其他数据源）
    pub fn from_lookup(inner: Arc<dyn GeoIpLookup>) -> Self {
        Self { inner }
    }

    pub async fn lookup_asn(&self, ip: &str) -> Option<AsnInfo> {
        let addr = Self::lookup_target(ip)?;
        self.inner.lookup_asn(addr).await
    }

    pub async fn lookup_city(&self, ip: &str) -> Option<CityInfo> {
        let addr = Self::lookup_target(ip)?;
        self.inner.lookup_city(addr).await
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }

    fn lookup_target(ip: &str) -> Option<IpAddr> {
        let Ok(addr) = ip.trim().parse::<IpAddr>() else {
            trace!("GeoIP: \"{}\" is not an IP address, skipping lookup", ip);
            return None;
        };
        if is_private_or_local(&addr) {
            trace!("GeoIP: {} is private or local, skipping lookup", addr);
            return None;
        }
        Some(addr)
    }
}

impl Clone for GeoIpProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GeoIpLookup for CountingLookup {
        async fn lookup_asn(&self, _ip: IpAddr) -> Option<AsnInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some(AsnInfo {
                number: Some(13335),
                organization: Some("Cloudflare, Inc.".to_string()),
            })
        }

        async fn lookup_city(&self, _ip: IpAddr) -> Option<CityInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }

        fn name(&self) -> &'static str {
            "Counting"
        }
    }

    #[tokio::test]
    async fn test_invalid_and_private_ips_skip_lookup() {
        let lookup = Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
        });
        let provider = GeoIpProvider::from_lookup(lookup.clone());

        assert!(provider.lookup_asn("unknown").await.is_none());
        assert!(provider.lookup_asn("192.168.1.1").await.is_none());
        assert!(provider.lookup_city("::1").await.is_none());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);

        let asn = provider.lookup_asn(" 1.1.1.1 ").await.unwrap();
        assert_eq!(asn.number, Some(13335));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.provider_name(), "Counting");
    }
}
