//! GeoIP 服务模块
//!
//! 提供 IP 地址地理位置与网络归属查询：
//! - MaxMind GeoLite2 ASN / City 本地数据库
//! - 数据库结果与代理请求头的合并

mod maxmind;
mod merge;
mod provider;

pub use maxmind::MaxMindProvider;
pub use merge::{GeoMergeResolver, merge_record};
pub use provider::{AsnInfo, CityInfo, GeoIpLookup, GeoIpProvider};
