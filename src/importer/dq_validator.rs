// ==========================================
// 个别指导排课系统 - 数据质量校验器实现
// ==========================================
// 职责: 需求行 DQ 校验（ERROR 阻断该行 / WARNING 允许导入 / INFO 仅记录）
// ==========================================

use crate::domain::import::{CountCell, DqLevel, DqViolation, RawDemandRow};
use crate::engine::subject::SubjectNormalizer;
use crate::importer::importer_trait::DqValidator as DqValidatorTrait;
use std::collections::HashMap;

/// 缩写表之外、需求表中常见的科目列
const EXTRA_SUBJECTS: [&str; 2] = ["英検", "作"];

pub struct DqValidatorImpl;

impl DqValidatorImpl {
    fn violation(row: &RawDemandRow, level: DqLevel, field: &str, message: String) -> DqViolation {
        DqViolation {
            row_number: row.row_number,
            student_name: row.student_name.clone(),
            level,
            field: field.to_string(),
            message,
        }
    }

    fn is_recognized_subject(subject: &str) -> bool {
        SubjectNormalizer::is_known(subject) || EXTRA_SUBJECTS.contains(&subject)
    }

    /// 是否存在 ERROR 级违规（该行整体不导入）
    pub fn is_blocked(row_number: usize, violations: &[DqViolation]) -> bool {
        violations
            .iter()
            .any(|v| v.row_number == row_number && v.level == DqLevel::Error)
    }
}

impl DqValidatorTrait for DqValidatorImpl {
    fn validate_row(&self, row: &RawDemandRow) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        // ERROR: 生徒名缺失
        if row.student_name.is_none() {
            violations.push(Self::violation(
                row,
                DqLevel::Error,
                "生徒名",
                "生徒名缺失".to_string(),
            ));
        }

        // コマ数
        let mut positive = 0;
        for (subject, cell) in &row.subject_counts {
            match cell {
                CountCell::Invalid(raw) => violations.push(Self::violation(
                    row,
                    DqLevel::Error,
                    subject,
                    format!("コマ数不是整数: {}", raw),
                )),
                CountCell::Count(n) if *n <= 0 => violations.push(Self::violation(
                    row,
                    DqLevel::Info,
                    subject,
                    format!("コマ数 {} <= 0，已忽略", n),
                )),
                CountCell::Count(_) => positive += 1,
                CountCell::Empty => {}
            }
        }
        let has_invalid = row
            .subject_counts
            .iter()
            .any(|(_, cell)| matches!(cell, CountCell::Invalid(_)));
        if positive == 0 && !has_invalid {
            violations.push(Self::violation(
                row,
                DqLevel::Warning,
                "コマ数",
                "没有任何科目的コマ数 > 0".to_string(),
            ));
        }

        // INFO: 未知科目（按原文保留）
        for (subject, cell) in &row.subject_counts {
            if matches!(cell, CountCell::Count(n) if *n > 0) && !Self::is_recognized_subject(subject) {
                violations.push(Self::violation(
                    row,
                    DqLevel::Info,
                    "科目",
                    format!("未知科目缩写: {}", subject),
                ));
            }
        }

        // WARNING: 同一讲师同时出现在希望与 NG
        for teacher in row
            .preferred_teachers
            .iter()
            .filter(|t| row.ng_teachers.contains(t))
        {
            violations.push(Self::violation(
                row,
                DqLevel::Warning,
                "希望講師",
                format!("讲师同时为希望与 NG: {}", teacher),
            ));
        }

        // WARNING: 自己列为 NG 生徒
        if let Some(name) = &row.student_name {
            if row.ng_students.contains(name) {
                violations.push(Self::violation(
                    row,
                    DqLevel::Warning,
                    "NG生徒",
                    "NG 生徒包含本人".to_string(),
                ));
            }
        }

        for token in &row.invalid_preferred_times {
            violations.push(Self::violation(
                row,
                DqLevel::Warning,
                "希望時間",
                format!("希望时间区间无效，未展开: {}", token),
            ));
        }

        for token in &row.unknown_ng_days {
            violations.push(Self::violation(
                row,
                DqLevel::Warning,
                "NG曜日",
                format!("无法识别的曜日: {}", token),
            ));
        }

        for token in &row.invalid_ng_dates {
            violations.push(Self::violation(
                row,
                DqLevel::Warning,
                "NG日程",
                format!("无法解析的日程: {}", token),
            ));
        }

        if let Some(raw) = &row.invalid_priority {
            violations.push(Self::violation(
                row,
                DqLevel::Warning,
                "優先度",
                format!("优先度不是整数，按缺省处理: {}", raw),
            ));
        }

        violations
    }

    fn validate_batch(&self, rows: &[RawDemandRow]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut first_seen: HashMap<(&str, &str), usize> = HashMap::new();

        for row in rows {
            let Some(name) = row.student_name.as_deref() else {
                continue;
            };
            for (subject, cell) in &row.subject_counts {
                if !matches!(cell, CountCell::Count(n) if *n > 0) {
                    continue;
                }
                match first_seen.get(&(name, subject.as_str())) {
                    Some(first_row) => violations.push(Self::violation(
                        row,
                        DqLevel::Warning,
                        subject,
                        format!("生徒×科目重复（首次出现于行 {}）", first_row),
                    )),
                    None => {
                        first_seen.insert((name, subject.as_str()), row.row_number);
                    }
                }
            }
        }

        violations
    }
}
