// ==========================================
// 个别指导排课系统 - 生徒コマ需求实体
// ==========================================
// 职责: StudentDemand（输入）与 ExpandedSlotDemand（展开输出）
// 红线: 记录构造后不可原地修改，由流水线逐级移交所有权
// ==========================================

use crate::domain::types::DayOfWeek;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 未指定优先度时的缺省值
pub const DEFAULT_PRIORITY: i32 = 5;

// ==========================================
// StudentDemand - 生徒×科目 需求记录
// ==========================================
// 不变式: weekly_count > 0（由导入层保证）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDemand {
    pub student_id: String,                  // 生徒 ID（由姓名派生）
    pub student_name: String,                // 生徒名
    pub subject: String,                     // 科目（原始缩写）
    #[serde(default)]
    pub grade: String,                       // 学年（S4 / C2 / K1 ...）
    pub weekly_count: u32,                   // 每周コマ数
    #[serde(default)]
    pub school_name: Option<String>,         // 学校名
    #[serde(default)]
    pub preferred_teachers: Vec<String>,     // 希望讲师（有序）
    #[serde(default)]
    pub ng_teachers: Vec<String>,            // NG 讲师
    #[serde(default)]
    pub ng_students: Vec<String>,            // NG 同席生徒
    #[serde(default)]
    pub preferred_times: Vec<String>,        // 希望时间令牌（"月17"）
    #[serde(default)]
    pub ng_days: BTreeSet<DayOfWeek>,        // NG 星期
    #[serde(default)]
    pub ng_dates: BTreeSet<NaiveDate>,       // NG 具体日期
    #[serde(default)]
    pub note: Option<String>,                // 备注
    #[serde(default)]
    pub priority: Option<i32>,               // 优先度（缺省 5）
}

impl StudentDemand {
    /// 创建只含必填字段的需求记录
    pub fn new(
        student_id: impl Into<String>,
        student_name: impl Into<String>,
        subject: impl Into<String>,
        weekly_count: u32,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            student_name: student_name.into(),
            subject: subject.into(),
            grade: String::new(),
            weekly_count,
            school_name: None,
            preferred_teachers: Vec::new(),
            ng_teachers: Vec::new(),
            ng_students: Vec::new(),
            preferred_times: Vec::new(),
            ng_days: BTreeSet::new(),
            ng_dates: BTreeSet::new(),
            note: None,
            priority: None,
        }
    }

    /// 该日期是否被 NG 星期或 NG 日期排除
    pub fn excludes_date(&self, date: NaiveDate) -> bool {
        self.ng_days.contains(&DayOfWeek::from_date(date)) || self.ng_dates.contains(&date)
    }

    /// 有效优先度
    pub fn effective_priority(&self, default_priority: i32) -> i32 {
        self.priority.unwrap_or(default_priority)
    }
}

// ==========================================
// ExpandedSlotDemand - 候选时段需求（匹配引擎的原子单位）
// ==========================================
// 不变式: (date, time) 必定存在于输入时段目录，且不落在 NG 星期/日期
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedSlotDemand {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub student_id: String,
    pub student_name: String,
    pub subject: String,                       // 规范化后的科目名
    pub grade: String,
    pub preferred_teacher_id: Option<String>,  // 仅取第一个希望讲师
    pub ng_teacher_ids: BTreeSet<String>,
    pub ng_students: Vec<String>,              // 原样透传（不解析为 ID）
    pub priority: i32,
}
