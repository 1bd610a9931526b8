use serde::Serialize;

use super::json::FieldMap;
use super::{Field, FieldValue};

/// 合并后的地理 / 网络归属信息
///
/// 每个字段都是 `Option`，`None` 在所有输出格式中都直接省略，
/// 不会输出空串、0 或 null。字段声明顺序即输出顺序。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoRecord {
    pub flag: Option<String>,
    pub continent_code: Option<String>,
    pub continent: Option<String>,
    pub country_code: Option<String>,
    pub country: Option<String>,
    pub region_code: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub asn: Option<u32>,
    pub as_region: Option<String>,
    pub as_organization: Option<String>,
    pub user_agent: Option<String>,
}

impl GeoRecord {
    /// 按固定顺序列出已存在的字段
    pub fn fields(&self) -> Vec<Field<'_>> {
        fn text<'a>(key: &'a str, value: &'a Option<String>) -> Option<Field<'a>> {
            value.as_deref().map(|v| (key, FieldValue::Str(v)))
        }
        fn float(key: &str, value: Option<f64>) -> Option<Field<'_>> {
            value.map(|v| (key, FieldValue::Float(v)))
        }

        [
            text("flag", &self.flag),
            text("continentCode", &self.continent_code),
            text("continent", &self.continent),
            text("countryCode", &self.country_code),
            text("country", &self.country),
            text("regionCode", &self.region_code),
            text("region", &self.region),
            text("city", &self.city),
            text("postalCode", &self.postal_code),
            float("latitude", self.latitude),
            float("longitude", self.longitude),
            text("timezone", &self.timezone),
            self.asn.map(|v| ("asn", FieldValue::UInt(u64::from(v)))),
            text("asRegion", &self.as_region),
            text("asOrganization", &self.as_organization),
            text("userAgent", &self.user_agent),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 单次请求的响应载荷：`{ ip } ∪ GeoRecord`
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsePayload {
    pub ip: String,
    pub geo: Option<GeoRecord>,
}

impl ResponsePayload {
    pub fn ip_only(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            geo: None,
        }
    }

    pub fn with_geo(ip: impl Into<String>, geo: Option<GeoRecord>) -> Self {
        Self {
            ip: ip.into(),
            geo,
        }
    }

    /// `ip` 永远是第一个字段
    pub fn fields(&self) -> Vec<Field<'_>> {
        let mut fields = vec![("ip", FieldValue::Str(self.ip.as_str()))];
        if let Some(geo) = &self.geo {
            fields.extend(geo.fields());
        }
        fields
    }
}

impl Serialize for ResponsePayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        FieldMap(&self.fields()).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        let geo = GeoRecord::default();
        assert!(geo.is_empty());
        assert!(geo.fields().is_empty());
    }

    #[test]
    fn test_fields_follow_declaration_order() {
        let geo = GeoRecord {
            user_agent: Some("curl/8.5.0".to_string()),
            country_code: Some("JP".to_string()),
            flag: Some("🇯🇵".to_string()),
            asn: Some(2497),
            latitude: Some(35.69),
            ..Default::default()
        };
        let keys: Vec<&str> = geo.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["flag", "countryCode", "latitude", "asn", "userAgent"]
        );
        assert!(!geo.is_empty());
    }

    #[test]
    fn test_payload_puts_ip_first() {
        let payload = ResponsePayload::with_geo(
            "1.2.3.4",
            Some(GeoRecord {
                city: Some("Osaka".to_string()),
                ..Default::default()
            }),
        );
        let fields = payload.fields();
        assert_eq!(fields[0], ("ip", FieldValue::Str("1.2.3.4")));
        assert_eq!(fields[1], ("city", FieldValue::Str("Osaka")));
    }

    #[test]
    fn test_payload_serializes_with_serde_json() {
        let payload = ResponsePayload::ip_only("::1");
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"ip":"::1"}"#);
    }
}
