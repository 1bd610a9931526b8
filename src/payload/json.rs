use serde::Serialize;
use serde::ser::SerializeMap;

use super::Field;
use crate::errors::Result;

/// JSONP 未指定回调名时使用的默认值
pub const DEFAULT_CALLBACK: &str = "callback";

/// 按字段顺序序列化为 JSON 对象
pub(super) struct FieldMap<'a, 'b>(pub(super) &'b [Field<'a>]);

impl Serialize for FieldMap<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// JSON 输出，末尾带换行
pub fn to_json(fields: &[Field<'_>]) -> Result<String> {
    let mut body = serde_json::to_string(&FieldMap(fields))?;
    body.push('\n');
    Ok(body)
}

/// JSONP 输出：`<callback>(<json>);\n`
///
/// 回调名原样拼接，不做过滤。
pub fn to_jsonp(fields: &[Field<'_>], callback: &str) -> Result<String> {
    let json = serde_json::to_string(&FieldMap(fields))?;
    Ok(format!("{}({});\n", callback, json))
}
