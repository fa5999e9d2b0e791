// ==========================================
// 个别指导排课系统 - 讲师科目适格判定
// ==========================================
// 职责: 判定讲师能否指导指定科目
// 红线: 「能力表为空」与「能力表中无该讲师」语义不同，必须分别处理
// ==========================================

use crate::domain::teacher::CapabilityTable;
use crate::engine::subject::SubjectNormalizer;

pub struct CapabilityMatcher;

impl CapabilityMatcher {
    /// 判定讲师是否可指导该科目
    ///
    /// # 规则（按顺序）
    /// 1. 科目为空 → 可（无科目约束）
    /// 2. 能力表缺失或为空 → 可（未收集能力数据，向后兼容）
    /// 3. 能力表中无该讲师 → 不可（已知不能指导）
    /// 4. 规范化科目名后判断是否属于该讲师的科目集合
    ///
    /// # 参数
    /// - teacher_id: 讲师 ID
    /// - subject: 科目（缩写或规范名）
    /// - table: 讲师能力表（None 表示未提供）
    pub fn can_teach(teacher_id: &str, subject: Option<&str>, table: Option<&CapabilityTable>) -> bool {
        // 规则 1: 无科目约束
        let subject = match subject.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return true,
        };

        // 规则 2: 无能力数据
        let table = match table {
            Some(t) if !t.is_empty() => t,
            _ => return true,
        };

        // 规则 3: 能力表已填充但无该讲师
        let Some(subjects) = table.subjects_of(teacher_id) else {
            return false;
        };

        // 规则 4: 规范化后成员判定
        subjects.contains(SubjectNormalizer::normalize(subject))
    }

    /// 从候选讲师中筛选可指导该科目的讲师（保持输入顺序）
    pub fn eligible_teachers<'a, S>(
        subject: Option<&str>,
        candidates: &'a [S],
        table: Option<&CapabilityTable>,
    ) -> Vec<&'a str>
    where
        S: AsRef<str>,
    {
        candidates
            .iter()
            .map(AsRef::as_ref)
            .filter(|teacher_id| Self::can_teach(teacher_id, subject, table))
            .collect()
    }
}
