// ==========================================
// 个别指导排课系统 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::import::{DemandImportResult, DqViolation, RawDemandRow};
use crate::domain::slot::Slot;
use crate::domain::teacher::CapabilityTable;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// RawRecord - 文件解析出的原始行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 数据行号（表头之后从 1 起，空行也计数）
    pub row_number: usize,
    /// 表头 → 单元格文本（已 TRIM）
    pub fields: HashMap<String, String>,
}

// ==========================================
// DemandImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: DemandImporterImpl
pub trait DemandImporter {
    /// 导入生徒コマ需求（宽表或长表）
    ///
    /// # 导入流程
    /// 1. 文件解析
    /// 2. 字段映射与清洗
    /// 3. DQ 校验
    /// 4. 拆分为 生徒×科目 记录（仅保留コマ数 > 0）
    fn import_demands(&self, file_path: &Path) -> ImportResult<DemandImportResult>;

    /// 导入时段目录；日期/时刻格式错误视为结构性错误
    fn import_slots(&self, file_path: &Path) -> ImportResult<Vec<Slot>>;

    /// 导入讲师指导可能科目表
    fn import_capabilities(&self, file_path: &Path) -> ImportResult<CapabilityTable>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 实现者: DqValidatorImpl
pub trait DqValidator: Send + Sync {
    /// 单行校验
    fn validate_row(&self, row: &RawDemandRow) -> Vec<DqViolation>;

    /// 跨行校验（同一生徒×科目重复）
    fn validate_batch(&self, rows: &[RawDemandRow]) -> Vec<DqViolation>;
}
