// ==========================================
// 个别指导排课系统 - 领域类型定义
// ==========================================
// 职责: 星期字形、时段时间等值对象
// 红线: 星期编号沿用 Sunday=0 … Saturday=6
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 星期 (Day Of Week)
// ==========================================
// 序列化格式: 单个星期字形（"月" / "火" / ...）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DayOfWeek {
    Sun, // 日
    Mon, // 月
    Tue, // 火
    Wed, // 水
    Thu, // 木
    Fri, // 金
    Sat, // 土
}

impl DayOfWeek {
    /// 按 Sunday=0 排列的全部星期
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sun,
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
    ];

    /// 从单个星期字形解析
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '日' => Some(DayOfWeek::Sun),
            '月' => Some(DayOfWeek::Mon),
            '火' => Some(DayOfWeek::Tue),
            '水' => Some(DayOfWeek::Wed),
            '木' => Some(DayOfWeek::Thu),
            '金' => Some(DayOfWeek::Fri),
            '土' => Some(DayOfWeek::Sat),
            _ => None,
        }
    }

    /// 星期字形
    pub fn glyph(&self) -> char {
        match self {
            DayOfWeek::Sun => '日',
            DayOfWeek::Mon => '月',
            DayOfWeek::Tue => '火',
            DayOfWeek::Wed => '水',
            DayOfWeek::Thu => '木',
            DayOfWeek::Fri => '金',
            DayOfWeek::Sat => '土',
        }
    }

    /// 星期编号（Sunday=0 … Saturday=6）
    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// 计算日历日期对应的星期
    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl From<DayOfWeek> for String {
    fn from(day: DayOfWeek) -> Self {
        day.glyph().to_string()
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(glyph), None) => {
                DayOfWeek::from_glyph(glyph).ok_or_else(|| format!("未知星期字形: {}", value))
            }
            _ => Err(format!("星期必须是单个字形: {}", value)),
        }
    }
}
