use std::borrow::Cow;
use std::fmt::Write;

use super::Field;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// XML 输出：`<response>` 根节点，每个字段一个子元素，缩进两个空格
pub fn to_xml(fields: &[Field<'_>]) -> String {
    let mut out = String::with_capacity(64 + fields.len() * 32);
    out.push_str(XML_DECLARATION);
    out.push_str("\n<response>\n");
    for (key, value) in fields {
        let value = value.to_string();
        let _ = writeln!(out, "  <{key}>{}</{key}>", escape_xml(&value));
    }
    out.push_str("</response>\n");
    out
}

/// 转义 XML 特殊字符，无需转义时零分配
pub fn escape_xml(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
