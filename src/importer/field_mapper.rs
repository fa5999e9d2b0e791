// ==========================================
// 个别指导排课系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 支持: 需求表（宽表/长表）、时段目录、讲师能力表
// ==========================================

use crate::domain::import::RawDemandRow;
use crate::domain::slot::Slot;
use crate::engine::booth::BoothCodec;
use crate::engine::subject::SubjectNormalizer;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::RawRecord;
use chrono::{NaiveDate, NaiveTime};
use std::collections::{HashMap, HashSet};

/// 宽表中可作为コマ数列的科目缩写（按需求表的列顺序）
pub const WIDE_SUBJECT_COLUMNS: [&str; 22] = [
    "英", "英検", "数", "算", "国", "理", "社", "現", "古", "物", "化", "生", "日", "地", "政", "世",
    "倫", "作", "ⅠA", "ⅡB", "Ⅲ", "C",
];

/// 需求表的标准列（长表判定依据: 存在「科目」列）
pub const SUBJECT_COLUMN: &str = "科目";

// ==========================================
// DemandLayout - 需求表布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemandLayout {
    /// 一行 = 生徒×科目（科目 + コマ数 列）
    Long,
    /// 一行 = 生徒，每个科目一列
    Wide(Vec<String>),
}

impl DemandLayout {
    /// 依据全部记录出现过的列名判定布局
    pub fn detect(records: &[RawRecord]) -> Self {
        let headers: HashSet<&str> = records
            .iter()
            .flat_map(|r| r.fields.keys().map(String::as_str))
            .collect();

        if headers.contains(SUBJECT_COLUMN) {
            return DemandLayout::Long;
        }

        DemandLayout::Wide(
            WIDE_SUBJECT_COLUMNS
                .iter()
                .filter(|col| headers.contains(**col))
                .map(|col| col.to_string())
                .collect(),
        )
    }
}

// ==========================================
// RawCapabilityRow - 讲师能力表的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCapabilityRow {
    pub row_number: usize,
    pub teacher_name: String,
    pub subjects: Vec<String>, // 已规范化
}

pub struct FieldMapper {
    cleaner: DataCleaner,
    target_year: i32,
    target_month: u32,
    teacher_aliases: HashMap<String, String>,
}

impl FieldMapper {
    /// `target_year` / `target_month` 为无年份 NG 日程令牌的上下文
    pub fn new(target_year: i32, target_month: u32) -> Self {
        Self {
            cleaner: DataCleaner,
            target_year,
            target_month,
            teacher_aliases: HashMap::new(),
        }
    }

    /// 需求表中的讲师名按同一别名表转为简称，与讲师能力表的 ID 一致
    pub fn with_teacher_aliases(mut self, aliases: HashMap<String, String>) -> Self {
        self.teacher_aliases = aliases;
        self
    }

    // ==========================================
    // 需求表
    // ==========================================

    pub fn map_demand_row(&self, record: &RawRecord, layout: &DemandLayout) -> RawDemandRow {
        let cleaner = &self.cleaner;

        let subject_counts = match layout {
            DemandLayout::Long => match self.get_string(record, SUBJECT_COLUMN) {
                Some(subject) => vec![(subject, cleaner.parse_count(self.get_raw(record, "コマ数")))],
                None => Vec::new(),
            },
            DemandLayout::Wide(columns) => columns
                .iter()
                .map(|col| (col.clone(), cleaner.parse_count(record.fields.get(col).map(String::as_str))))
                .collect(),
        };

        let (preferred_times, invalid_preferred_times) =
            cleaner.expand_preferred_times(&cleaner.split_list(self.get_raw(record, "希望時間")));
        let (ng_days, unknown_ng_days) = cleaner.parse_ng_days(self.get_raw(record, "NG曜日"));
        let (ng_dates, invalid_ng_dates) = cleaner.parse_ng_dates(
            self.get_raw(record, "NG日程"),
            self.target_year,
            self.target_month,
        );
        let (priority, invalid_priority) = match cleaner.parse_priority(self.get_raw(record, "優先度")) {
            Ok(priority) => (priority, None),
            Err(raw) => (None, Some(raw)),
        };

        RawDemandRow {
            row_number: record.row_number,
            student_name: self.get_string(record, "生徒名"),
            grade: self.get_string(record, "学年"),
            school_name: self.get_string(record, "学校名"),
            subject_counts,
            preferred_teachers: self.get_teacher_names(record, "希望講師"),
            ng_teachers: self.get_teacher_names(record, "NG講師"),
            ng_students: cleaner.split_list(self.get_raw(record, "NG生徒")),
            preferred_times,
            ng_days,
            ng_dates,
            note: self.get_string(record, "備考"),
            priority,
            unknown_ng_days,
            invalid_ng_dates,
            invalid_preferred_times,
            invalid_priority,
        }
    }

    // ==========================================
    // 时段目录
    // ==========================================

    pub fn map_slot(&self, record: &RawRecord) -> ImportResult<Slot> {
        let date = self.parse_date(record, "日付")?;
        let time = self.parse_time(record, "時刻")?;
        let slot = Slot::new(date, time);

        Ok(match self.get_string(record, "ブース") {
            Some(booth) => slot.with_booth(BoothCodec::to_booth_id(&booth)),
            None => slot,
        })
    }

    // ==========================================
    // 讲师能力表
    // ==========================================

    /// 讲师名为空的行返回 None
    pub fn map_capability_row(&self, record: &RawRecord) -> Option<RawCapabilityRow> {
        let teacher_name = self.get_string(record, "講師名")?;
        let subjects = self
            .cleaner
            .split_list(self.get_raw(record, "指導可能科目"))
            .iter()
            .map(|s| SubjectNormalizer::normalize(s).to_string())
            .collect();

        Some(RawCapabilityRow {
            row_number: record.row_number,
            teacher_name,
            subjects,
        })
    }

    // ==========================================
    // 取值辅助
    // ==========================================

    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "生徒名" => &["生徒名", "氏名", "名前"],
            "学年" => &["学年"],
            "学校名" => &["学校名", "学校"],
            "科目" => &["科目"],
            "コマ数" => &["コマ数", "回数"],
            "希望講師" => &["希望講師"],
            "NG講師" => &["NG講師"],
            "NG生徒" => &["NG生徒", "隣接NG生徒名"],
            "希望時間" => &["希望時間", "希望時間帯"],
            "NG曜日" => &["NG曜日"],
            "NG日程" => &["NG日程", "NG日付"],
            "備考" => &["備考"],
            "優先度" => &["優先度", "優先順位"],
            "日付" => &["日付"],
            "時刻" => &["時刻", "時間"],
            "ブース" => &["ブース"],
            "講師名" => &["講師名", "講師"],
            "指導可能科目" => &["指導可能科目"],
            _ => &[],
        }
    }

    /// 第一个非空别名列的原始文本
    fn get_raw<'r>(&self, record: &'r RawRecord, key: &str) -> Option<&'r str> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| record.fields.get(*alias))
            .map(String::as_str)
            .find(|v| !v.trim().is_empty())
    }

    fn get_string(&self, record: &RawRecord, key: &str) -> Option<String> {
        self.cleaner.normalize_null(self.get_raw(record, key))
    }

    /// 讲师名列表 → 简称列表（保持顺序）
    fn get_teacher_names(&self, record: &RawRecord, key: &str) -> Vec<String> {
        self.cleaner
            .split_list(self.get_raw(record, key))
            .iter()
            .filter_map(|name| self.cleaner.short_teacher_name(name, &self.teacher_aliases))
            .collect()
    }

    fn parse_date(&self, record: &RawRecord, key: &str) -> ImportResult<NaiveDate> {
        let value = self.get_string(record, key).ok_or_else(|| ImportError::FieldMappingError {
            row: record.row_number,
            message: format!("缺少必填列: {}", key),
        })?;

        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&value, "%Y%m%d"))
            .map_err(|_| ImportError::DateFormatError {
                row: record.row_number,
                field: key.to_string(),
                value,
            })
    }

    fn parse_time(&self, record: &RawRecord, key: &str) -> ImportResult<NaiveTime> {
        let value = self.get_string(record, key).ok_or_else(|| ImportError::FieldMappingError {
            row: record.row_number,
            message: format!("缺少必填列: {}", key),
        })?;

        NaiveTime::parse_from_str(&value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M"))
            .map_err(|_| ImportError::TimeFormatError {
                row: record.row_number,
                field: key.to_string(),
                value,
            })
    }
}
