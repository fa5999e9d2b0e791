// ==========================================
// 需求展开API
// ==========================================
// 职责: 串联 配置 → 导入 → 展开，并提供 JSON 入口
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ExpansionConfigReader;
use crate::domain::demand::{ExpandedSlotDemand, StudentDemand};
use crate::domain::import::DqViolation;
use crate::domain::slot::Slot;
use crate::domain::teacher::CapabilityTable;
use crate::engine::diagnostics::{ExpansionWarning, TracingWarningSink, WarningSink};
use crate::engine::expander::{DemandExpander, ExpansionReport};
use crate::engine::identity::{find_id_collisions, IdCollision, IdDeriver};
use crate::importer::{CapabilityImport, DemandImporter, DemandImporterImpl};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 一次完整展开的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionOutcome {
    /// 需求导入批次ID
    pub batch_id: String,
    /// 候选时段需求
    pub candidates: Vec<ExpandedSlotDemand>,
    /// 展开警告
    pub warnings: Vec<ExpansionWarning>,
    /// 导入 DQ 违规明细
    pub dq_violations: Vec<DqViolation>,
    /// 讲师能力表（未提供能力文件时为空）
    pub capability_table: CapabilityTable,
    /// 讲师名与生徒名派生 ID 冲突
    pub id_collisions: Vec<IdCollision>,
}

/// 需求展开API
pub struct ExpansionApi<C: ExpansionConfigReader> {
    importer: DemandImporterImpl<C>,
    sink: Arc<dyn WarningSink>,
}

impl<C: ExpansionConfigReader> ExpansionApi<C> {
    pub fn new(config: C) -> Self {
        Self {
            importer: DemandImporterImpl::new(config),
            sink: Arc::new(TracingWarningSink),
        }
    }

    /// 替换展开警告接收者
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    /// 派生器取自配置（`ExpansionConfigReader::id_deriver`），导入与展开共用
    fn expander(&self) -> ApiResult<DemandExpander<Arc<dyn IdDeriver>>> {
        let config = self.importer.config();
        Ok(
            DemandExpander::with_deriver(config.id_deriver()?, config.expansion_options()?)
                .with_sink(Arc::clone(&self.sink)),
        )
    }

    /// 从 CSV 文件执行完整流程
    ///
    /// # 参数
    /// - demands_path: 需求表
    /// - slots_path: 时段目录
    /// - capabilities_path: 讲师能力表（可选）
    pub fn run_files(
        &self,
        demands_path: &Path,
        slots_path: &Path,
        capabilities_path: Option<&Path>,
    ) -> ApiResult<ExpansionOutcome> {
        let imported = self.importer.import_demands(demands_path)?;
        let slots = self.importer.import_slots(slots_path)?;
        let roster = match capabilities_path {
            Some(path) => self.importer.import_capability_roster(path)?,
            None => CapabilityImport::default(),
        };

        let report = self.expand_records(&imported.demands, &slots)?;
        let id_collisions = self.collisions(&imported.demands, &roster.teacher_names)?;

        info!(
            batch_id = %imported.batch.batch_id,
            candidates = report.candidates.len(),
            warnings = report.warnings.len(),
            collisions = id_collisions.len(),
            "展开流程完成"
        );

        Ok(ExpansionOutcome {
            batch_id: imported.batch.batch_id,
            candidates: report.candidates,
            warnings: report.warnings,
            dq_violations: imported.violations,
            capability_table: roster.table,
            id_collisions,
        })
    }

    /// 使用当前配置展开强类型记录
    pub fn expand_records(&self, demands: &[StudentDemand], slots: &[Slot]) -> ApiResult<ExpansionReport> {
        Ok(self.expander()?.expand(demands, slots))
    }

    /// JSON 入口: 两个参数都必须是 JSON 数组
    ///
    /// weeklyCount 缺失或为 0 的需求在此拒绝，不进入展开引擎
    pub fn expand_json(&self, demands_json: &str, slots_json: &str) -> ApiResult<ExpansionReport> {
        let demands: Vec<StudentDemand> = parse_array("demands", demands_json)?;
        if let Some(idx) = demands.iter().position(|d| d.weekly_count == 0) {
            return Err(ApiError::InvalidInput(format!(
                "demands[{}] weeklyCount 必须为正整数",
                idx
            )));
        }
        let slots: Vec<Slot> = parse_array("slots", slots_json)?;
        self.expand_records(&demands, &slots)
    }

    /// 讲师名（能力表 + 需求中的希望/NG 讲师）与生徒名的 ID 冲突
    fn collisions(&self, demands: &[StudentDemand], roster: &[String]) -> ApiResult<Vec<IdCollision>> {
        let deriver = self.importer.config().id_deriver()?;

        let mut teachers: Vec<&str> = roster.iter().map(String::as_str).collect();
        for demand in demands {
            for name in demand.preferred_teachers.iter().chain(&demand.ng_teachers) {
                if !teachers.contains(&name.as_str()) {
                    teachers.push(name);
                }
            }
        }
        let mut students: Vec<&str> = demands.iter().map(|d| d.student_name.as_str()).collect();
        students.sort_unstable();
        students.dedup();

        let collisions = find_id_collisions(&deriver, &teachers, &students);
        for collision in &collisions {
            warn!(
                id = %collision.id,
                teacher = %collision.teacher_name,
                student = %collision.student_name,
                "讲师与生徒派生 ID 冲突"
            );
        }
        Ok(collisions)
    }
}

fn parse_array<T: DeserializeOwned>(name: &str, json: &str) -> ApiResult<Vec<T>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ApiError::InvalidInput(format!("{} 不是有效 JSON: {}", name, e)))?;

    let Value::Array(items) = value else {
        return Err(ApiError::InvalidInput(format!("{} 顶层必须是数组", name)));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item)
                .map_err(|e| ApiError::InvalidInput(format!("{}[{}] 格式错误: {}", name, idx, e)))
        })
        .collect()
}
