// ==========================================
// 个别指导排课系统 - 展开诊断通道
// ==========================================
// 职责: 定义展开过程的警告记录与可注入的警告接收者
// 说明: 警告既写入 tracing，也随结果返回，不使用全局可变状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

// ==========================================
// 希望时间令牌解析错误
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreferredTimeError {
    /// 空令牌
    Empty,
    /// 首字符不是星期字形
    UnknownDay { glyph: char },
    /// 星期字形之后没有数字
    InvalidHour { hour: String },
}

impl fmt::Display for PreferredTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferredTimeError::Empty => write!(f, "空令牌"),
            PreferredTimeError::UnknownDay { glyph } => write!(f, "未知星期字形 '{}'", glyph),
            PreferredTimeError::InvalidHour { hour } => write!(f, "无效时刻 '{}'", hour),
        }
    }
}

impl std::error::Error for PreferredTimeError {}

// ==========================================
// 展开警告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpansionWarning {
    /// 希望时间令牌无法解析（已跳过）
    #[serde(rename_all = "camelCase")]
    MalformedPreferredTime {
        student_id: String,
        student_name: String,
        token: String,
        reason: PreferredTimeError,
    },
    /// 该需求没有任何候选时段
    #[serde(rename_all = "camelCase")]
    NoCandidateSlots {
        student_id: String,
        student_name: String,
        subject: String,
    },
}

impl fmt::Display for ExpansionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionWarning::MalformedPreferredTime {
                student_name,
                token,
                reason,
                ..
            } => write!(f, "无效希望时间格式: {} (生徒={}, 原因={})", token, student_name, reason),
            ExpansionWarning::NoCandidateSlots {
                student_name,
                subject,
                ..
            } => write!(f, "无候选时段: 生徒={}, 科目={}", student_name, subject),
        }
    }
}

// ==========================================
// WarningSink Trait
// ==========================================
// 展开器向接收者报告警告；默认实现仅写日志
pub trait WarningSink: Send + Sync {
    fn report(&self, warning: &ExpansionWarning);
}

/// 仅写 tracing 日志的接收者
#[derive(Debug, Clone, Default)]
pub struct TracingWarningSink;

impl WarningSink for TracingWarningSink {
    fn report(&self, warning: &ExpansionWarning) {
        tracing::warn!("{}", warning);
    }
}

/// 收集警告的接收者（用于测试与批处理汇总）
#[derive(Debug, Default)]
pub struct CollectingWarningSink {
    warnings: Mutex<Vec<ExpansionWarning>>,
}

impl CollectingWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出已收集的警告
    pub fn take(&self) -> Vec<ExpansionWarning> {
        match self.warnings.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl WarningSink for CollectingWarningSink {
    fn report(&self, warning: &ExpansionWarning) {
        match self.warnings.lock() {
            Ok(mut guard) => guard.push(warning.clone()),
            Err(poisoned) => poisoned.into_inner().push(warning.clone()),
        }
    }
}
