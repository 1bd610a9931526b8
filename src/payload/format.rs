use std::str::FromStr;

use strum::EnumString;

use super::{ResponsePayload, to_json, to_jsonp, to_text, to_xml};
use crate::errors::Result;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    #[strum(serialize = "text", serialize = "txt", serialize = "plain")]
    Text,
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "jsonp", serialize = "js")]
    Jsonp,
    #[strum(serialize = "xml")]
    Xml,
}

impl OutputFormat {
    /// 选择输出格式
    ///
    /// 优先级：`format` 参数 → `fmt` 参数 → 路径扩展名 → text。
    /// 第一个存在的来源决定结果，无法识别的值按 text 处理。
    pub fn select(format: Option<&str>, fmt: Option<&str>, path: &str) -> Self {
        format
            .filter(|v| !v.is_empty())
            .or_else(|| fmt.filter(|v| !v.is_empty()))
            .or_else(|| path_extension(path))
            .and_then(|v| Self::from_str(v.trim()).ok())
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Jsonp => "jsonp",
            Self::Xml => "xml",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Json => "application/json",
            Self::Jsonp => "application/javascript",
            Self::Xml => "application/xml",
        }
    }

    /// 把载荷渲染成该格式的响应体
    pub fn render(self, payload: &ResponsePayload, callback: &str) -> Result<String> {
        let fields = payload.fields();
        match self {
            Self::Text => Ok(to_text(&fields)),
            Self::Json => to_json(&fields),
            Self::Jsonp => to_jsonp(&fields, callback),
            Self::Xml => Ok(to_xml(&fields)),
        }
    }
}

/// 取路径最后一段的扩展名（`/geo.json` → `json`）
fn path_extension(path: &str) -> Option<&str> {
    let last_segment = path.rsplit('/').next()?;
    let (_, ext) = last_segment.rsplit_once('.')?;
    Some(ext).filter(|e| !e.is_empty())
}
