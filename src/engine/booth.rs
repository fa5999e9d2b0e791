// ==========================================
// 个别指导排课系统 - ブース番号编解码
// ==========================================
// 职责: 丸付き数字（①〜⑳）⇄ ブース ID（B1〜B20）
// 红线: 两个方向都是全函数；范围外或格式不符原样返回
// ==========================================

/// ① 的码位
const CIRCLED_FIRST: u32 = 0x2460;
/// 丸付き数字的个数（①〜⑳）
pub const CIRCLED_COUNT: u32 = 20;

pub struct BoothCodec;

impl BoothCodec {
    /// 丸付き数字 → ブース ID
    ///
    /// 输入须恰好为一个字符；否则原样返回
    pub fn to_booth_id(glyph: &str) -> String {
        let mut chars = glyph.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => match Self::ordinal_of(c) {
                Some(ordinal) => format!("B{}", ordinal),
                None => glyph.to_string(),
            },
            _ => glyph.to_string(),
        }
    }

    /// ブース ID → 丸付き数字
    ///
    /// 仅接受 "B" + 数字 且数值在 [1, 20]；否则原样返回
    pub fn to_glyph(booth_id: &str) -> String {
        let Some(digits) = booth_id.strip_prefix('B') else {
            return booth_id.to_string();
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return booth_id.to_string();
        }
        match digits.parse::<u32>() {
            Ok(n) if (1..=CIRCLED_COUNT).contains(&n) => Self::glyph_of(n)
                .map(String::from)
                .unwrap_or_else(|| booth_id.to_string()),
            _ => booth_id.to_string(),
        }
    }

    /// 丸付き数字的序号（1 起）
    pub fn ordinal_of(c: char) -> Option<u32> {
        let code = c as u32;
        (CIRCLED_FIRST..CIRCLED_FIRST + CIRCLED_COUNT)
            .contains(&code)
            .then(|| code - CIRCLED_FIRST + 1)
    }

    fn glyph_of(ordinal: u32) -> Option<char> {
        char::from_u32(CIRCLED_FIRST + ordinal - 1)
    }
}
