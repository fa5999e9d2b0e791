// ==========================================
// 个别指导排课系统 - 科目名规范化
// ==========================================
// 职责: 科目缩写 → 统一科目名
// 红线: 表外输入原样返回（恒等回退），永不失败
// ==========================================

use phf::phf_map;

// 科目缩写映射（缩写 -> 规范科目名）
static SUBJECT_ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "国" => "国語",
    "算" => "算数",
    "数" => "数学",
    "英" => "英語",
    "理" => "理科",
    "社" => "社会",
    "古" => "古文",
    "物" => "物理",
    "化" => "化学",
    "生" => "生物",
    "地" => "地理",
    "政" => "政治経済",
    "世" => "世界史",
    "日" => "日本史",
    "現" => "現代文",
    "倫" => "倫理",
    "ⅠA" => "数学ⅠA",
    "ⅡB" => "数学ⅡB",
    "Ⅲ" => "数学Ⅲ",
    "C" => "数学C",
};

pub struct SubjectNormalizer;

impl SubjectNormalizer {
    /// 规范化科目名
    ///
    /// # 规则
    /// - 命中缩写表 → 规范科目名
    /// - 否则 → 原样返回
    ///
    /// # 示例
    /// ```
    /// use booth_scheduler::engine::SubjectNormalizer;
    /// assert_eq!(SubjectNormalizer::normalize("数"), "数学");
    /// assert_eq!(SubjectNormalizer::normalize("英検"), "英検");
    /// ```
    pub fn normalize(raw: &str) -> &str {
        SUBJECT_ABBREVIATIONS.get(raw).copied().unwrap_or(raw)
    }

    /// 是否为缩写表中的缩写
    pub fn is_abbreviation(raw: &str) -> bool {
        SUBJECT_ABBREVIATIONS.contains_key(raw)
    }

    /// 是否为已知科目（缩写或规范名）
    pub fn is_known(raw: &str) -> bool {
        Self::is_abbreviation(raw) || SUBJECT_ABBREVIATIONS.values().any(|full| *full == raw)
    }
}
