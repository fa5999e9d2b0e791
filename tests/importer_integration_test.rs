// ==========================================
// 导入层集成测试
// ==========================================
// 测试范围: CSV → 映射/清洗 → DQ → 强类型记录
// ==========================================

mod helpers;

use booth_scheduler::domain::{DayOfWeek, DqLevel};
use booth_scheduler::engine::{derive_id, CapabilityMatcher};
use booth_scheduler::importer::{DemandImporter, DemandImporterImpl, ImportError};
use booth_scheduler::logging;
use helpers::mock_config::MockConfig;
use helpers::test_data_builder::*;

#[test]
fn test_import_wide_demand_sheet() {
    logging::init_test();
    let fixtures = CsvFixtures::new();
    let path = fixtures.write(
        "demands.csv",
        &[
            "学年,生徒名,学校名,英,英検,数,算,希望講師,NG講師,隣接NG生徒名,希望時間,NG曜日,NG日程,備考",
            "S5,松橋,第一小,,,,2,\"西T,橋本T\",田中T,深澤,\"月17-18,水18\",土,\"1/8,1/20-1/21\",",
            "C2,深澤,第二中,1,1,0,,,,,,,,振替あり",
        ],
    );

    let importer = DemandImporterImpl::new(MockConfig::default());
    let result = importer.import_demands(&path).unwrap();

    assert_eq!(result.demands.len(), 3);
    assert_eq!(result.batch.summary.total_rows, 2);
    assert_eq!(result.batch.file_path.as_deref(), path.to_str());

    let matsuhashi = &result.demands[0];
    assert_eq!(matsuhashi.student_id, derive_id("松橋"));
    assert_eq!(matsuhashi.subject, "算");
    assert_eq!(matsuhashi.weekly_count, 2);
    assert_eq!(matsuhashi.school_name.as_deref(), Some("第一小"));
    assert_eq!(matsuhashi.preferred_times, vec!["月17", "月18", "水18"]);
    assert_eq!(matsuhashi.ng_teachers, vec!["田中T"]);
    assert_eq!(matsuhashi.ng_students, vec!["深澤"]);
    assert!(matsuhashi.ng_days.contains(&DayOfWeek::Sat));
    assert_eq!(
        matsuhashi.ng_dates.iter().copied().collect::<Vec<_>>(),
        vec![date(2025, 1, 8), date(2025, 1, 20), date(2025, 1, 21)]
    );

    let subjects: Vec<&str> = result.demands[1..].iter().map(|d| d.subject.as_str()).collect();
    assert_eq!(subjects, vec!["英", "英検"]);
    assert_eq!(result.demands[1].note.as_deref(), Some("振替あり"));

    // 数 = 0 → INFO
    assert_eq!(result.batch.summary.info, 1);
    assert_eq!(result.batch.summary.blocked, 0);
}

#[test]
fn test_import_long_demand_sheet_with_dq_violations() {
    logging::init_test();
    let fixtures = CsvFixtures::new();
    let path = fixtures.write(
        "long.csv",
        &[
            "氏名,科目,回数,希望講師,NG講師,NG曜日,優先度",
            "松橋,算,2,西T,西T,,1",
            "松橋,算,1,,,,",
            ",英,1,,,,",
            "深澤,英,abc,,,,",
            "高橋,書道,1,,,休日,高",
        ],
    );

    let importer = DemandImporterImpl::new(MockConfig::default());
    let result = importer.import_demands(&path).unwrap();

    let names: Vec<(&str, &str, u32)> = result
        .demands
        .iter()
        .map(|d| (d.student_name.as_str(), d.subject.as_str(), d.weekly_count))
        .collect();
    assert_eq!(
        names,
        vec![("松橋", "算", 2), ("松橋", "算", 1), ("高橋", "書道", 1)]
    );
    assert_eq!(result.demands[0].priority, Some(1));
    assert_eq!(result.demands[2].priority, None);

    let summary = &result.batch.summary;
    assert_eq!(summary.blocked, 2);
    // 希望/NG 重复、生徒×科目重复、未知曜日、无效优先度
    assert_eq!(summary.warning, 4);
    // 未知科目
    assert_eq!(summary.info, 1);

    let errors: Vec<usize> = result
        .violations
        .iter()
        .filter(|v| v.level == DqLevel::Error)
        .map(|v| v.row_number)
        .collect();
    assert_eq!(errors, vec![3, 4]);
}

#[test]
fn test_import_slots_converts_booth_glyphs() {
    logging::init_test();
    let fixtures = CsvFixtures::new();
    let path = fixtures.write(
        "slots.csv",
        &[
            "日付,時刻,ブース",
            "2025-01-06,17:00,①",
            "20250106,18:00:00,⑳",
            "2025-01-07,17:00,",
            "2025-01-07,18:00,B9",
        ],
    );

    let importer = DemandImporterImpl::new(MockConfig::default());
    let slots = importer.import_slots(&path).unwrap();

    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0].booth_id.as_deref(), Some("B1"));
    assert_eq!(slots[1].booth_id.as_deref(), Some("B20"));
    assert_eq!(slots[1].time, hour(18));
    assert_eq!(slots[2].booth_id, None);
    assert_eq!(slots[3].booth_id.as_deref(), Some("B9"));
}

#[test]
fn test_import_slots_rejects_malformed_rows() {
    logging::init_test();
    let fixtures = CsvFixtures::new();
    let path = fixtures.write("slots.csv", &["日付,時刻", "2025-01-06,17:00", "来週,17:00"]);

    let importer = DemandImporterImpl::new(MockConfig::default());
    let err = importer.import_slots(&path).unwrap_err();

    assert!(matches!(err, ImportError::DateFormatError { row: 2, .. }));
}

#[test]
fn test_import_capabilities_short_names_and_omission() {
    logging::init_test();
    let fixtures = CsvFixtures::new();
    let path = fixtures.write(
        "capabilities.csv",
        &[
            "講師名,指導可能科目",
            "西T,\"英,数\"",
            "橋本 花子,\"国,算\"",
            "田中　太郎,物",
            "佐藤T,",
        ],
    );

    let config = MockConfig::default().with_alias("橋本 花子", "橋本T");
    let importer = DemandImporterImpl::new(config);
    let roster = importer.import_capability_roster(&path).unwrap();
    let table = &roster.table;

    assert_eq!(roster.teacher_names, vec!["西T", "橋本T", "田中T", "佐藤T"]);
    assert_eq!(table.len(), 3);
    assert!(table.subjects_of("TE958ED").is_none());

    // 能力表已填充: 缺席讲师不可指导
    assert!(CapabilityMatcher::can_teach("T6B23F8", Some("英"), Some(table)));
    assert!(CapabilityMatcher::can_teach("T5828F0", Some("算数"), Some(table)));
    assert!(CapabilityMatcher::can_teach("T834836", Some("物"), Some(table)));
    assert!(!CapabilityMatcher::can_teach("T834836", Some("英"), Some(table)));
    assert!(!CapabilityMatcher::can_teach("TE958ED", Some("英"), Some(table)));

    let candidates = ["TE958ED", "T6B23F8", "T5828F0"];
    assert_eq!(
        CapabilityMatcher::eligible_teachers(Some("数"), &candidates, Some(table)),
        vec!["T6B23F8"]
    );
}
