// ==========================================
// 个别指导排课系统 - 导入批次与数据质量
// ==========================================
// 职责: DQ 违规记录、批次汇总、导入结果
// ==========================================

use crate::domain::demand::StudentDemand;
use crate::domain::types::DayOfWeek;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// CountCell - コマ数单元格
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountCell {
    Empty,           // 未填写
    Count(i64),      // 数值（可能 <= 0）
    Invalid(String), // 非数值
}

// ==========================================
// RawDemandRow - 映射后的生徒行（清洗完成，尚未校验）
// ==========================================
// 一行可含多个科目（宽表）或一个科目（长表）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDemandRow {
    pub row_number: usize,
    pub student_name: Option<String>,
    pub grade: Option<String>,
    pub school_name: Option<String>,
    pub subject_counts: Vec<(String, CountCell)>,
    pub preferred_teachers: Vec<String>,
    pub ng_teachers: Vec<String>,
    pub ng_students: Vec<String>,
    pub preferred_times: Vec<String>,
    pub ng_days: BTreeSet<DayOfWeek>,
    pub ng_dates: BTreeSet<NaiveDate>,
    pub note: Option<String>,
    pub priority: Option<i32>,

    // 清洗阶段无法解析的令牌（交由 DQ 校验报告）
    pub invalid_preferred_times: Vec<String>,
    pub unknown_ng_days: Vec<String>,
    pub invalid_ng_dates: Vec<String>,
    pub invalid_priority: Option<String>,
}

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,   // 错误（该行不导入）
    Warning, // 警告（允许导入）
    Info,    // 提示（仅记录）
}

// ==========================================
// DqViolation - 数据质量违规明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DqViolation {
    pub row_number: usize,            // 原始文件行号（数据行，从 1 起）
    pub student_name: Option<String>, // 生徒名（如果可解析）
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DqSummary {
    pub total_rows: usize,    // 总行数
    pub demand_records: usize, // 产出的需求记录数（生徒×科目）
    pub blocked: usize,       // 阻断（ERROR）
    pub warning: usize,       // 警告（WARNING）
    pub info: usize,          // 提示（INFO）
}

impl DqSummary {
    pub fn from_violations(total_rows: usize, demand_records: usize, violations: &[DqViolation]) -> Self {
        let count = |level: DqLevel| violations.iter().filter(|v| v.level == level).count();
        Self {
            total_rows,
            demand_records,
            blocked: count(DqLevel::Error),
            warning: count(DqLevel::Warning),
            info: count(DqLevel::Info),
        }
    }
}

// ==========================================
// DemandImportBatch - 需求导入批次
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandImportBatch {
    pub batch_id: String,                   // 批次 ID（UUID）
    pub file_path: Option<String>,          // 源文件路径
    pub imported_at: DateTime<Utc>,         // 导入时间
    pub elapsed_ms: u64,                    // 导入耗时（毫秒）
    pub summary: DqSummary,
}

// ==========================================
// DemandImportResult - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandImportResult {
    pub batch: DemandImportBatch,
    pub demands: Vec<StudentDemand>,
    pub violations: Vec<DqViolation>,
}
