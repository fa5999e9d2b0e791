// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use booth_scheduler::domain::{DayOfWeek, Slot, StudentDemand};
use booth_scheduler::engine::derive_id;
use chrono::{NaiveDate, NaiveTime};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

// ==========================================
// StudentDemand 构建器
// ==========================================

pub struct DemandBuilder {
    demand: StudentDemand,
}

impl DemandBuilder {
    /// student_id 由姓名派生
    pub fn new(student_name: &str, subject: &str) -> Self {
        Self {
            demand: StudentDemand::new(derive_id(student_name), student_name, subject, 1),
        }
    }

    pub fn grade(mut self, grade: &str) -> Self {
        self.demand.grade = grade.to_string();
        self
    }

    pub fn weekly_count(mut self, count: u32) -> Self {
        self.demand.weekly_count = count;
        self
    }

    pub fn preferred_times(mut self, tokens: &[&str]) -> Self {
        self.demand.preferred_times = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn preferred_teachers(mut self, names: &[&str]) -> Self {
        self.demand.preferred_teachers = names.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn ng_teachers(mut self, names: &[&str]) -> Self {
        self.demand.ng_teachers = names.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn ng_students(mut self, names: &[&str]) -> Self {
        self.demand.ng_students = names.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn ng_days(mut self, days: &[DayOfWeek]) -> Self {
        self.demand.ng_days = days.iter().copied().collect();
        self
    }

    pub fn ng_date(mut self, date: NaiveDate) -> Self {
        self.demand.ng_dates.insert(date);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.demand.priority = Some(priority);
        self
    }

    pub fn build(self) -> StudentDemand {
        self.demand
    }
}

// ==========================================
// 时段目录
// ==========================================

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

/// 2025-01-06(月) 〜 2025-01-10(金)，每天 16/17/18 时（共 15 个）
pub fn week_slots() -> Vec<Slot> {
    (6..=10)
        .flat_map(|d| [16, 17, 18].map(|h| Slot::new(date(2025, 1, d), hour(h))))
        .collect()
}

// ==========================================
// CSV 夹具
// ==========================================

pub struct CsvFixtures {
    dir: TempDir,
}

impl CsvFixtures {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn write(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }
}
