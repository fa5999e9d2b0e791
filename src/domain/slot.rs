// ==========================================
// 个别指导排课系统 - 时段目录实体
// ==========================================
// 职责: Slot（日期 + 整点时刻 + 可选ブース）
// 红线: 时段目录由外部给定，展开器只读不写
// ==========================================

use crate::domain::types::DayOfWeek;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,          // ISO 日期（2025-01-06）
    pub time: NaiveTime,          // HH:MM:SS
    #[serde(default)]
    pub booth_id: Option<String>, // ブース ID（B1 / B2 ...）
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time,
            booth_id: None,
        }
    }

    pub fn with_booth(mut self, booth_id: impl Into<String>) -> Self {
        self.booth_id = Some(booth_id.into());
        self
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::from_date(self.date)
    }
}
