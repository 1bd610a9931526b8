//! 国家代码 → 国旗 emoji
//!
//! 把 ISO 3166-1 alpha-2 的两个大写字母映射到 Unicode Regional Indicator
//! Symbol 区段（U+1F1E6..U+1F1FF），两个符号相邻即渲染为国旗。

/// 'A' (U+0041) → 🇦 (U+1F1E6) 的偏移量
const REGIONAL_INDICATOR_OFFSET: u32 = 127397;

/// 根据国家代码生成国旗 emoji
///
/// 只接受恰好两个 ASCII 大写字母，其他输入（小写、长度不对、数字、空串）
/// 一律返回 `None`，不会生成残缺的国旗。
pub fn get_flag(country_code: Option<&str>) -> Option<String> {
    let code = country_code?;
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    code.chars()
        .map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}
