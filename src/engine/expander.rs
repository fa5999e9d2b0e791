// ==========================================
// 个别指导排课系统 - 生徒コマ需求展开引擎
// ==========================================
// 职责: StudentDemand × 时段目录 → ExpandedSlotDemand 候选列表
// 流程: 希望时间解析 → 时段匹配 → NG 星期/日期过滤 → 讲师 ID 解析
// 红线: 无效希望时间只告警不中断；不做全局去重；不创建/修改时段
// ==========================================

use crate::domain::demand::{ExpandedSlotDemand, StudentDemand, DEFAULT_PRIORITY};
use crate::domain::slot::Slot;
use crate::domain::types::DayOfWeek;
use crate::engine::diagnostics::{
    ExpansionWarning, PreferredTimeError, TracingWarningSink, WarningSink,
};
use crate::engine::identity::{IdDeriver, NameHashIdDeriver};
use crate::engine::subject::SubjectNormalizer;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// PreferredTime - 希望时间令牌（"月17"）
// ==========================================
// 小时取星期字形之后的前导 ASCII 数字（"月17時" → 17）；
// 超出 0..=23 的小时可以解析，但不命中任何时段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreferredTime {
    pub day: DayOfWeek,
    pub hour: u32,
    time: Option<NaiveTime>,
}

impl PreferredTime {
    /// 整点时刻（HH:00:00）；小时超出范围时为 None
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// 时段是否命中该希望时间
    pub fn matches(&self, slot: &Slot) -> bool {
        self.time == Some(slot.time) && slot.day_of_week() == self.day
    }
}

impl FromStr for PreferredTime {
    type Err = PreferredTimeError;

    /// 解析规则: 首字符为星期字形，其后至少一位 ASCII 数字
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let mut chars = token.chars();
        let glyph = chars.next().ok_or(PreferredTimeError::Empty)?;
        let day = DayOfWeek::from_glyph(glyph).ok_or(PreferredTimeError::UnknownDay { glyph })?;

        let rest = chars.as_str().trim_start();
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(PreferredTimeError::InvalidHour {
                hour: rest.to_string(),
            });
        }

        // 溢出的数字串同样视为超出范围
        let hour = rest[..digits_end].parse::<u32>().unwrap_or(u32::MAX);
        let time = NaiveTime::from_hms_opt(hour, 0, 0);

        Ok(Self { day, hour, time })
    }
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.day, self.hour)
    }
}

// ==========================================
// 展开参数与结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionOptions {
    /// 需求未指定优先度时使用的值
    pub default_priority: i32,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionReport {
    pub candidates: Vec<ExpandedSlotDemand>,
    pub warnings: Vec<ExpansionWarning>,
}

// ==========================================
// DemandExpander - 需求展开器
// ==========================================
pub struct DemandExpander<D: IdDeriver = NameHashIdDeriver> {
    deriver: D,
    options: ExpansionOptions,
    sink: Arc<dyn WarningSink>,
}

impl DemandExpander<NameHashIdDeriver> {
    /// 默认配置: 'T' 前缀 ID、优先度缺省 5、警告写 tracing
    pub fn new() -> Self {
        Self::with_deriver(NameHashIdDeriver::default(), ExpansionOptions::default())
    }
}

impl Default for DemandExpander<NameHashIdDeriver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: IdDeriver> DemandExpander<D> {
    pub fn with_deriver(deriver: D, options: ExpansionOptions) -> Self {
        Self {
            deriver,
            options,
            sink: Arc::new(TracingWarningSink),
        }
    }

    /// 替换警告接收者
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn options(&self) -> ExpansionOptions {
        self.options
    }

    /// 展开需求列表
    ///
    /// # 规则
    /// - 有希望时间: 逐个令牌解析，匹配星期与整点相同的时段；无效令牌告警后跳过
    /// - 无希望时间: 展开到全部时段
    /// - 两种情况都按时段自身日期应用 NG 星期/NG 日期过滤
    /// - 多个令牌命中同一时段时重复产出（不去重）
    ///
    /// # 返回
    /// - ExpansionReport: 候选列表（按需求、令牌、时段顺序）+ 警告
    pub fn expand(&self, demands: &[StudentDemand], slots: &[Slot]) -> ExpansionReport {
        let mut report = ExpansionReport::default();
        if demands.is_empty() {
            return report;
        }

        for demand in demands {
            let before = report.candidates.len();
            self.expand_demand(demand, slots, &mut report);
            let produced = report.candidates.len() - before;

            debug!(
                student_id = %demand.student_id,
                subject = %demand.subject,
                produced = produced,
                "需求展开完成"
            );

            if produced == 0 {
                self.warn(
                    &mut report,
                    ExpansionWarning::NoCandidateSlots {
                        student_id: demand.student_id.clone(),
                        student_name: demand.student_name.clone(),
                        subject: demand.subject.clone(),
                    },
                );
            }
        }

        info!(
            demands = demands.len(),
            slots = slots.len(),
            candidates = report.candidates.len(),
            warnings = report.warnings.len(),
            "需求展开结束"
        );
        report
    }

    fn expand_demand(&self, demand: &StudentDemand, slots: &[Slot], report: &mut ExpansionReport) {
        let template = self.candidate_template(demand);

        if demand.preferred_times.is_empty() {
            for slot in slots {
                if !demand.excludes_date(slot.date) {
                    report.candidates.push(template.at(slot));
                }
            }
            return;
        }

        for token in &demand.preferred_times {
            let preferred = match token.parse::<PreferredTime>() {
                Ok(p) => p,
                Err(reason) => {
                    self.warn(
                        report,
                        ExpansionWarning::MalformedPreferredTime {
                            student_id: demand.student_id.clone(),
                            student_name: demand.student_name.clone(),
                            token: token.clone(),
                            reason,
                        },
                    );
                    continue;
                }
            };

            for slot in slots {
                if preferred.matches(slot) && !demand.excludes_date(slot.date) {
                    report.candidates.push(template.at(slot));
                }
            }
        }
    }

    /// 每个需求只解析一次讲师 ID 与科目名
    fn candidate_template(&self, demand: &StudentDemand) -> CandidateTemplate {
        let ng_teacher_ids: BTreeSet<String> = demand
            .ng_teachers
            .iter()
            .map(|name| self.deriver.derive_id(name))
            .collect();

        CandidateTemplate {
            student_id: demand.student_id.clone(),
            student_name: demand.student_name.clone(),
            subject: SubjectNormalizer::normalize(&demand.subject).to_string(),
            grade: demand.grade.clone(),
            preferred_teacher_id: demand
                .preferred_teachers
                .first()
                .map(|name| self.deriver.derive_id(name)),
            ng_teacher_ids,
            ng_students: demand.ng_students.clone(),
            priority: demand.effective_priority(self.options.default_priority),
        }
    }

    fn warn(&self, report: &mut ExpansionReport, warning: ExpansionWarning) {
        self.sink.report(&warning);
        report.warnings.push(warning);
    }
}

struct CandidateTemplate {
    student_id: String,
    student_name: String,
    subject: String,
    grade: String,
    preferred_teacher_id: Option<String>,
    ng_teacher_ids: BTreeSet<String>,
    ng_students: Vec<String>,
    priority: i32,
}

impl CandidateTemplate {
    fn at(&self, slot: &Slot) -> ExpandedSlotDemand {
        ExpandedSlotDemand {
            date: slot.date,
            time: slot.time,
            student_id: self.student_id.clone(),
            student_name: self.student_name.clone(),
            subject: self.subject.clone(),
            grade: self.grade.clone(),
            preferred_teacher_id: self.preferred_teacher_id.clone(),
            ng_teacher_ids: self.ng_teacher_ids.clone(),
            ng_students: self.ng_students.clone(),
            priority: self.priority,
        }
    }
}

/// 使用默认展开器展开需求
pub fn expand(demands: &[StudentDemand], slots: &[Slot]) -> ExpansionReport {
    DemandExpander::new().expand(demands, slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::diagnostics::CollectingWarningSink;
    use crate::engine::identity::derive_id;
    use chrono::NaiveDate;

    /// 2025-01-06(月) 〜 2025-01-10(金)，每天 16/17/18 时
    fn week_slots() -> Vec<Slot> {
        let mut slots = Vec::new();
        for day in 6..=10 {
            for hour in [16, 17, 18] {
                slots.push(
                    Slot::new(
                        NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                        NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                    )
                    .with_booth("A"),
                );
            }
        }
        slots
    }

    fn demand(preferred_times: &[&str]) -> StudentDemand {
        let mut d = StudentDemand::new(derive_id("松橋"), "松橋", "算", 2);
        d.grade = "S4".to_string();
        d.preferred_times = preferred_times.iter().map(|s| s.to_string()).collect();
        d
    }

    // ==========================================
    // 测试 1: 希望时间令牌解析
    // ==========================================

    #[test]
    fn test_parse_preferred_time() {
        let p: PreferredTime = "月17".parse().unwrap();
        assert_eq!(p.day, DayOfWeek::Mon);
        assert_eq!(p.hour, 17);
        assert_eq!(p.time(), NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(p.to_string(), "月17");

        let padded: PreferredTime = " 土 9 ".parse().unwrap();
        assert_eq!(padded.day, DayOfWeek::Sat);
        assert_eq!(padded.hour, 9);
    }

    #[test]
    fn test_parse_preferred_time_leading_digits() {
        let suffixed: PreferredTime = "月17時".parse().unwrap();
        assert_eq!((suffixed.day, suffixed.hour), (DayOfWeek::Mon, 17));

        let clock: PreferredTime = "火17:00".parse().unwrap();
        assert_eq!(clock.hour, 17);
        assert_eq!(clock.time(), NaiveTime::from_hms_opt(17, 0, 0));

        let late: PreferredTime = "月25".parse().unwrap();
        assert_eq!(late.hour, 25);
        assert_eq!(late.time(), None);

        let huge: PreferredTime = "月99999999999".parse().unwrap();
        assert_eq!(huge.time(), None);
    }

    #[test]
    fn test_parse_preferred_time_errors() {
        assert_eq!("".parse::<PreferredTime>(), Err(PreferredTimeError::Empty));
        assert_eq!(
            "無効99".parse::<PreferredTime>(),
            Err(PreferredTimeError::UnknownDay { glyph: '無' })
        );
        assert_eq!(
            "XYZ".parse::<PreferredTime>(),
            Err(PreferredTimeError::UnknownDay { glyph: 'X' })
        );
        assert_eq!(
            "月".parse::<PreferredTime>(),
            Err(PreferredTimeError::InvalidHour { hour: String::new() })
        );
        assert_eq!(
            "月時".parse::<PreferredTime>(),
            Err(PreferredTimeError::InvalidHour { hour: "時".to_string() })
        );
        assert!(matches!(
            "月-1".parse::<PreferredTime>(),
            Err(PreferredTimeError::InvalidHour { .. })
        ));
    }

    #[test]
    fn test_out_of_range_hour_matches_nothing_without_malformed_warning() {
        let report = expand(&[demand(&["月25", "月17時"])], &week_slots());

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert!(report.warnings.is_empty());
    }

    // ==========================================
    // 测试 2: 希望时间展开
    // ==========================================

    #[test]
    fn test_expand_preferred_times() {
        let report = expand(&[demand(&["月17", "水17", "金17"])], &week_slots());

        assert_eq!(report.candidates.len(), 3);
        let days: Vec<DayOfWeek> = report
            .candidates
            .iter()
            .map(|c| DayOfWeek::from_date(c.date))
            .collect();
        assert_eq!(days, vec![DayOfWeek::Mon, DayOfWeek::Wed, DayOfWeek::Fri]);
        assert!(report
            .candidates
            .iter()
            .all(|c| c.time == NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_subject_is_normalized_in_output() {
        let report = expand(&[demand(&["月17"])], &week_slots());
        assert_eq!(report.candidates[0].subject, "算数");
        assert_eq!(report.candidates[0].grade, "S4");
    }

    // ==========================================
    // 测试 3: NG 星期过滤
    // ==========================================

    #[test]
    fn test_ng_days_suppress_candidates() {
        let mut d = demand(&["月17", "火17", "水17", "木17", "金17"]);
        d.ng_days = [DayOfWeek::Tue, DayOfWeek::Thu].into_iter().collect();

        let report = expand(&[d], &week_slots());

        assert_eq!(report.candidates.len(), 3);
        assert!(report.candidates.iter().all(|c| {
            let day = DayOfWeek::from_date(c.date);
            day != DayOfWeek::Tue && day != DayOfWeek::Thu
        }));
    }

    #[test]
    fn test_ng_days_apply_without_preferred_times() {
        let mut d = demand(&[]);
        d.ng_days = [DayOfWeek::Wed].into_iter().collect();

        let report = expand(&[d], &week_slots());
        assert_eq!(report.candidates.len(), 12);
    }

    #[test]
    fn test_ng_dates_apply_to_both_paths() {
        let ng = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();

        let mut preferred = demand(&["月17", "水17"]);
        preferred.ng_dates.insert(ng);
        let mut open = demand(&[]);
        open.ng_dates.insert(ng);

        let slots = week_slots();
        assert_eq!(expand(&[preferred], &slots).candidates.len(), 1);
        assert_eq!(expand(&[open], &slots).candidates.len(), 12);
    }

    // ==========================================
    // 测试 4: 无希望时间 → 全时段展开
    // ==========================================

    #[test]
    fn test_expand_without_preferences_covers_all_slots() {
        let slots = week_slots();
        let report = expand(&[demand(&[])], &slots);
        assert_eq!(report.candidates.len(), slots.len());
        for (candidate, slot) in report.candidates.iter().zip(&slots) {
            assert_eq!((candidate.date, candidate.time), (slot.date, slot.time));
        }
    }

    // ==========================================
    // 测试 5: 无效令牌容错
    // ==========================================

    #[test]
    fn test_malformed_tokens_are_skipped_with_warning() {
        let sink = Arc::new(CollectingWarningSink::new());
        let expander = DemandExpander::new().with_sink(sink.clone());

        let report = expander.expand(&[demand(&["月17", "無効99", "XYZ", "火18"])], &week_slots());

        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.warnings.len(), 2);
        let tokens: Vec<&str> = report
            .warnings
            .iter()
            .filter_map(|w| match w {
                ExpansionWarning::MalformedPreferredTime { token, .. } => Some(token.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(tokens, vec!["無効99", "XYZ"]);
        // 接收者收到同样的警告
        assert_eq!(sink.take(), report.warnings);
    }

    #[test]
    fn test_no_candidates_produces_warning() {
        let report = expand(&[demand(&["日17"])], &week_slots());
        assert!(report.candidates.is_empty());
        assert!(matches!(
            report.warnings.as_slice(),
            [ExpansionWarning::NoCandidateSlots { .. }]
        ));
    }

    // ==========================================
    // 测试 6: 讲师 ID 解析
    // ==========================================

    #[test]
    fn test_only_first_preferred_teacher_is_resolved() {
        let mut d = demand(&["月17"]);
        d.preferred_teachers = vec!["西T".to_string(), "橋本T".to_string()];

        let report = expand(&[d], &week_slots());
        let candidate = &report.candidates[0];

        assert_eq!(candidate.preferred_teacher_id.as_deref(), Some("T6B23F8"));
        assert_eq!(candidate.preferred_teacher_id, Some(derive_id("西T")));
        let serialized = serde_json::to_string(&report.candidates).unwrap();
        assert!(!serialized.contains(&derive_id("橋本T")));
    }

    #[test]
    fn test_ng_teachers_fully_resolved_and_ng_students_passed_through() {
        let mut d = demand(&["月17", "火17"]);
        d.ng_teachers = vec!["田中T".to_string(), "佐藤T".to_string(), "田中T".to_string()];
        d.ng_students = vec!["松橋".to_string()];

        let report = expand(&[d], &week_slots());

        assert_eq!(report.candidates.len(), 2);
        for candidate in &report.candidates {
            assert_eq!(candidate.ng_teacher_ids.len(), 2);
            assert!(candidate.ng_teacher_ids.contains(&derive_id("田中T")));
            assert!(candidate.ng_teacher_ids.contains(&derive_id("佐藤T")));
            assert_eq!(candidate.ng_students, vec!["松橋".to_string()]);
            assert_eq!(candidate.preferred_teacher_id, None);
        }
    }

    // ==========================================
    // 测试 7: 优先度与去重
    // ==========================================

    #[test]
    fn test_priority_defaults_and_passes_through() {
        let plain = demand(&["月17"]);
        let mut urgent = demand(&["月17"]);
        urgent.priority = Some(1);

        let report = expand(&[plain.clone(), urgent], &week_slots());
        assert_eq!(report.candidates[0].priority, 5);
        assert_eq!(report.candidates[1].priority, 1);

        let custom = DemandExpander::with_deriver(
            NameHashIdDeriver::default(),
            ExpansionOptions { default_priority: 3 },
        );
        assert_eq!(custom.expand(&[plain], &week_slots()).candidates[0].priority, 3);
    }

    #[test]
    fn test_redundant_tokens_are_not_deduplicated() {
        let report = expand(&[demand(&["月17", "月17"])], &week_slots());
        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.candidates[0], report.candidates[1]);
    }

    #[test]
    fn test_empty_demands_yield_empty_report() {
        let report = expand(&[], &week_slots());
        assert!(report.candidates.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_candidates_only_reference_catalog_slots() {
        let slots = week_slots();
        let mut d = demand(&["月17", "火19", "土17", "金16"]);
        d.ng_days = [DayOfWeek::Fri].into_iter().collect();

        let report = expand(&[d.clone()], &slots);
        for candidate in &report.candidates {
            assert!(slots
                .iter()
                .any(|s| s.date == candidate.date && s.time == candidate.time));
            assert!(!d.excludes_date(candidate.date));
        }
        assert_eq!(report.candidates.len(), 1);
    }
}
