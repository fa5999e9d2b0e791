// ==========================================
// 个别指导排课系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 全角→半角 / NULL 标准化 / 列表拆分 / 令牌展开
// 红线: 不做业务校验（交由 DqValidator）
// ==========================================

use crate::domain::import::CountCell;
use crate::domain::types::DayOfWeek;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeSet, HashMap};

/// 列表单元格分隔符（半角逗号、全角逗号、读点）
const LIST_SEPARATORS: [char; 3] = [',', '，', '、'];

/// 希望时间区间的最大整点
const MAX_HOUR: u32 = 23;

pub struct DataCleaner;

impl DataCleaner {
    /// 全角数字/空格/斜线/波浪线 → 半角
    pub fn normalize_width(&self, value: &str) -> String {
        value
            .chars()
            .map(|c| match c {
                '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
                '\u{3000}' => ' ',
                '／' => '/',
                '－' | '〜' | '～' => '-',
                _ => c,
            })
            .collect()
    }

    pub fn clean_text(&self, value: &str) -> String {
        self.normalize_width(value.trim()).trim().to_string()
    }

    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.map(|v| self.clean_text(v)).filter(|v| !v.is_empty())
    }

    /// 拆分列表单元格，丢弃空令牌
    pub fn split_list(&self, value: Option<&str>) -> Vec<String> {
        let Some(value) = value else {
            return Vec::new();
        };
        self.clean_text(value)
            .split(|c| LIST_SEPARATORS.contains(&c))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 展开希望时间区间: `月17-19` → `月17`, `月18`, `月19`
    ///
    /// 返回 (展开后的令牌, 无效区间令牌)。非区间令牌原样保留，交由展开引擎解析；
    /// 区间两端必须都在 0..=23 且不逆序，否则整段作为无效令牌返回。
    pub fn expand_preferred_times(&self, tokens: &[String]) -> (Vec<String>, Vec<String>) {
        let mut expanded = Vec::with_capacity(tokens.len());
        let mut invalid = Vec::new();
        for token in tokens {
            let token = token.trim();
            let mut chars = token.chars();
            let (Some(day), rest) = (chars.next(), chars.as_str()) else {
                continue;
            };

            match rest.split_once('-') {
                Some((from, to)) => match (parse_hour(from), parse_hour(to)) {
                    (Some(from), Some(to)) if from <= to => {
                        expanded.extend((from..=to).map(|hour| format!("{}{}", day, hour)));
                    }
                    _ => invalid.push(token.to_string()),
                },
                None => expanded.push(token.to_string()),
            }
        }
        (expanded, invalid)
    }

    /// 解析 NG 曜日: 接受 `火` / `火曜` / `火曜日` / `火木`
    ///
    /// 返回 (可识别的曜日集合, 无法识别的令牌)
    pub fn parse_ng_days(&self, value: Option<&str>) -> (BTreeSet<DayOfWeek>, Vec<String>) {
        let mut days = BTreeSet::new();
        let mut unknown = Vec::new();

        for token in self.split_list(value) {
            let stem = token
                .strip_suffix("曜日")
                .or_else(|| token.strip_suffix('曜'))
                .unwrap_or(&token);
            let parsed: Option<Vec<DayOfWeek>> = stem.chars().map(DayOfWeek::from_glyph).collect();
            match parsed {
                Some(list) if !list.is_empty() => days.extend(list),
                _ => unknown.push(token),
            }
        }

        (days, unknown)
    }

    /// 解析 NG 日程: `2/5`, `2/1-2/7`, `2/19,2/24`, `5`（仅日 → 对象月）
    ///
    /// 对象月以外的日期静默忽略；格式错误或不存在的日期作为无效令牌返回。
    pub fn parse_ng_dates(
        &self,
        value: Option<&str>,
        year: i32,
        month: u32,
    ) -> (BTreeSet<NaiveDate>, Vec<String>) {
        let mut dates = BTreeSet::new();
        let mut invalid = Vec::new();

        for token in self.split_list(value) {
            let parsed = match token.split_once('-') {
                Some((from, to)) => parse_month_day(from, month)
                    .zip(parse_month_day(to, month))
                    .and_then(|((m1, d1), (m2, d2))| {
                        if m1 != m2 || d1 > d2 {
                            return None;
                        }
                        (d1..=d2)
                            .map(|d| calendar_date(year, m1, d))
                            .collect::<Option<Vec<_>>>()
                    }),
                None => parse_month_day(&token, month)
                    .and_then(|(m, d)| calendar_date(year, m, d))
                    .map(|date| vec![date]),
            };

            match parsed {
                Some(list) => dates.extend(list.into_iter().filter(|d| d.month() == month)),
                None => invalid.push(token),
            }
        }

        (dates, invalid)
    }

    /// 讲师简称: 别名表 → 已以 `T` 结尾则保留 → 首个空白分段 + `T`
    pub fn short_teacher_name(&self, name: &str, aliases: &HashMap<String, String>) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(short) = aliases.get(name) {
            return Some(short.clone());
        }
        if name.ends_with('T') {
            return Some(name.to_string());
        }
        name.split_whitespace().next().map(|first| format!("{}T", first))
    }

    /// 解析コマ数单元格（容忍 Excel 导出的 `2.0`）
    pub fn parse_count(&self, value: Option<&str>) -> CountCell {
        let Some(text) = self.normalize_null(value) else {
            return CountCell::Empty;
        };
        if let Ok(n) = text.parse::<i64>() {
            return CountCell::Count(n);
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => CountCell::Count(f as i64),
            _ => CountCell::Invalid(text),
        }
    }

    /// 解析优先度；空值为 None，非整数返回原文
    pub fn parse_priority(&self, value: Option<&str>) -> Result<Option<i32>, String> {
        match self.normalize_null(value) {
            None => Ok(None),
            Some(text) => text.parse::<i32>().map(Some).map_err(|_| text),
        }
    }
}

fn parse_hour(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|h| *h <= MAX_HOUR)
}

fn parse_month_day(token: &str, default_month: u32) -> Option<(u32, u32)> {
    let token = token.trim();
    match token.split_once('/') {
        Some((m, d)) => Some((m.trim().parse().ok()?, d.trim().parse().ok()?)),
        None => Some((default_month, token.parse().ok()?)),
    }
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
