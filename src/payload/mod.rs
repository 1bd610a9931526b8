//! 响应载荷与序列化
//!
//! 载荷统一表示为有序字段列表 `&[Field]`，四种输出格式都是它之上的纯函数：
//! - text: 单字段只输出值，多字段输出 `key: value`，`ip` 固定在第一行
//! - json / jsonp: serde_json 编码，缺省字段不输出
//! - xml: `<response>` 根节点，每个字段一个子元素

mod format;
mod json;
mod record;
mod text;
mod xml;

use std::fmt;

use serde::Serialize;

pub use format::OutputFormat;
pub use json::{DEFAULT_CALLBACK, to_json, to_jsonp};
pub use record::{GeoRecord, ResponsePayload};
pub use text::to_text;
pub use xml::{escape_xml, to_xml};

/// 有序字段：(字段名, 值)
pub type Field<'a> = (&'a str, FieldValue<'a>);

/// 字段值，借用载荷中的数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    UInt(u64),
    Float(f64),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::UInt(n) => write!(f, "{}", n),
            FieldValue::Float(n) => match whole_number(*n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
        }
    }
}

/// 没有小数部分的坐标按整数输出（`139.0` 写作 `139`），各格式保持一致
fn whole_number(n: f64) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT).then_some(n as i64)
}

impl Serialize for FieldValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::UInt(n) => serializer.serialize_u64(*n),
            FieldValue::Float(n) => match whole_number(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
        }
    }
}
