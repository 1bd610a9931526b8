use std::fmt::Write;

use super::Field;

/// 纯文本输出
///
/// 只有一个字段时只输出值本身（典型场景：只请求 ip）；
/// 多个字段时每行一个 `key: value`，`ip` 稳定排序到第一行，其余保持原顺序。
pub fn to_text(fields: &[Field<'_>]) -> String {
    if let [(_, value)] = fields {
        return format!("{}\n", value);
    }

    let mut ordered: Vec<&Field<'_>> = fields.iter().collect();
    ordered.sort_by_key(|(key, _)| *key != "ip");

    let mut out = String::new();
    for (key, value) in ordered {
        let _ = writeln!(out, "{}: {}", key, value);
    }
    out
}
