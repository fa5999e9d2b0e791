// ==========================================
// 个别指导排课系统 - 需求数据导入器实现
// ==========================================
// 职责: 整合导入流程，从 CSV 到强类型记录
// 流程: 解析 → 映射/清洗 → 校验 → 拆分为 生徒×科目
// ==========================================

use crate::config::ExpansionConfigReader;
use crate::domain::demand::StudentDemand;
use crate::domain::import::{
    CountCell, DemandImportBatch, DemandImportResult, DqSummary, RawDemandRow,
};
use crate::domain::slot::Slot;
use crate::domain::teacher::{CapabilityTable, TeacherCapability};
use crate::engine::identity::IdDeriver;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::dq_validator::DqValidatorImpl;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{DemandLayout, FieldMapper};
use crate::importer::file_parser::CsvParser;
use crate::importer::importer_trait::{DemandImporter, DqValidator, FileParser, RawRecord};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// CapabilityImport - 讲师能力导入结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityImport {
    pub table: CapabilityTable,
    /// 全部讲师简称（含无可识别科目而未纳入能力表者）
    pub teacher_names: Vec<String>,
}

// ==========================================
// DemandImporterImpl - 需求数据导入器实现
// ==========================================
pub struct DemandImporterImpl<C>
where
    C: ExpansionConfigReader,
{
    // 配置读取器
    config: C,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    dq_validator: Box<dyn DqValidator>,
    cleaner: DataCleaner,
}

impl<C> DemandImporterImpl<C>
where
    C: ExpansionConfigReader,
{
    /// 使用默认组件（CsvParser + DqValidatorImpl）
    pub fn new(config: C) -> Self {
        Self::with_components(config, Box::new(CsvParser), Box::new(DqValidatorImpl))
    }

    pub fn with_components(
        config: C,
        file_parser: Box<dyn FileParser>,
        dq_validator: Box<dyn DqValidator>,
    ) -> Self {
        Self {
            config,
            file_parser,
            dq_validator,
            cleaner: DataCleaner,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 从已解析的记录导入需求（文件与内存数据共用）
    #[instrument(skip(self, records), fields(batch_id = tracing::field::Empty))]
    pub fn import_demand_records(
        &self,
        records: Vec<RawRecord>,
        file_path: Option<String>,
    ) -> ImportResult<DemandImportResult> {
        let start = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, total_rows = records.len(), "开始导入需求数据");

        let deriver = self.config.id_deriver()?;
        let mapper = FieldMapper::new(self.config.get_target_year()?, self.config.get_target_month()?)
            .with_teacher_aliases(self.config.get_teacher_aliases()?);

        // 步骤 1: 字段映射与清洗
        let layout = DemandLayout::detect(&records);
        debug!(layout = ?layout, "步骤 1: 字段映射");
        let rows: Vec<RawDemandRow> = records
            .iter()
            .map(|record| mapper.map_demand_row(record, &layout))
            .collect();

        // 步骤 2: DQ 校验
        debug!("步骤 2: DQ 校验");
        let mut violations: Vec<_> = rows
            .iter()
            .flat_map(|row| self.dq_validator.validate_row(row))
            .collect();
        violations.extend(self.dq_validator.validate_batch(&rows));
        violations.sort_by_key(|v| v.row_number);

        // 步骤 3: 拆分为 生徒×科目
        debug!("步骤 3: 生成需求记录");
        let mut demands = Vec::new();
        for row in &rows {
            if DqValidatorImpl::is_blocked(row.row_number, &violations) {
                warn!(row_number = row.row_number, "行存在 ERROR 级违规，跳过");
                continue;
            }
            demands.extend(self.build_demands(row, &*deriver));
        }

        let summary = DqSummary::from_violations(rows.len(), demands.len(), &violations);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            demand_records = summary.demand_records,
            blocked = summary.blocked,
            warning = summary.warning,
            elapsed_ms = elapsed_ms,
            "需求数据导入完成"
        );

        Ok(DemandImportResult {
            batch: DemandImportBatch {
                batch_id,
                file_path,
                imported_at: Utc::now(),
                elapsed_ms,
                summary,
            },
            demands,
            violations,
        })
    }

    fn build_demands(&self, row: &RawDemandRow, deriver: &dyn IdDeriver) -> Vec<StudentDemand> {
        let Some(name) = row.student_name.as_deref() else {
            return Vec::new();
        };
        let student_id = deriver.derive_id(name);

        row.subject_counts
            .iter()
            .filter_map(|(subject, cell)| match cell {
                CountCell::Count(n) if *n > 0 => Some((subject, u32::try_from(*n).unwrap_or(u32::MAX))),
                _ => None,
            })
            .map(|(subject, weekly_count)| StudentDemand {
                grade: row.grade.clone().unwrap_or_default(),
                school_name: row.school_name.clone(),
                preferred_teachers: row.preferred_teachers.clone(),
                ng_teachers: row.ng_teachers.clone(),
                ng_students: row.ng_students.clone(),
                preferred_times: row.preferred_times.clone(),
                ng_days: row.ng_days.clone(),
                ng_dates: row.ng_dates.clone(),
                note: row.note.clone(),
                priority: row.priority,
                ..StudentDemand::new(student_id.clone(), name, subject.clone(), weekly_count)
            })
            .collect()
    }

    /// 导入讲师能力表，同时返回全部讲师简称（用于 ID 冲突检查）
    #[instrument(skip(self, file_path))]
    pub fn import_capability_roster(&self, file_path: &Path) -> ImportResult<CapabilityImport> {
        info!(file_path = %file_path.display(), "开始导入讲师能力表");
        let records = self.file_parser.parse_to_raw_records(file_path)?;
        let aliases = self.config.get_teacher_aliases()?;
        let deriver = self.config.id_deriver()?;
        let mapper = FieldMapper::new(self.config.get_target_year()?, self.config.get_target_month()?);

        let mut result = CapabilityImport::default();
        for row in records.iter().filter_map(|r| mapper.map_capability_row(r)) {
            let Some(short_name) = self.cleaner.short_teacher_name(&row.teacher_name, &aliases) else {
                continue;
            };
            let capability = TeacherCapability {
                teacher_id: deriver.derive_id(&short_name),
                subjects: row.subjects.into_iter().collect(),
            };
            if !result.table.insert(capability) {
                debug!(row_number = row.row_number, teacher = %short_name, "无可识别科目，未纳入能力表");
            }
            if !result.teacher_names.contains(&short_name) {
                result.teacher_names.push(short_name);
            }
        }

        info!(teachers = result.table.len(), "讲师能力表导入完成");
        Ok(result)
    }
}

impl<C> DemandImporter for DemandImporterImpl<C>
where
    C: ExpansionConfigReader,
{
    fn import_demands(&self, file_path: &Path) -> ImportResult<DemandImportResult> {
        let records = self.file_parser.parse_to_raw_records(file_path)?;
        info!(file_path = %file_path.display(), total_rows = records.len(), "文件解析完成");
        self.import_demand_records(records, Some(file_path.display().to_string()))
    }

    #[instrument(skip(self, file_path))]
    fn import_slots(&self, file_path: &Path) -> ImportResult<Vec<Slot>> {
        let records = self.file_parser.parse_to_raw_records(file_path)?;
        let mapper = FieldMapper::new(self.config.get_target_year()?, self.config.get_target_month()?);

        let slots = records
            .iter()
            .map(|record| mapper.map_slot(record))
            .collect::<ImportResult<Vec<_>>>()?;

        info!(file_path = %file_path.display(), slots = slots.len(), "时段目录导入完成");
        Ok(slots)
    }

    fn import_capabilities(&self, file_path: &Path) -> ImportResult<CapabilityTable> {
        Ok(self.import_capability_roster(file_path)?.table)
    }
}
