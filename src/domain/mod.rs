// ==========================================
// 个别指导排课系统 - 领域模型层
// ==========================================
// 职责: 定义需求、时段、讲师能力等强类型记录
// 红线: 不含解析逻辑,不含引擎逻辑
// ==========================================

pub mod demand;
pub mod import;
pub mod slot;
pub mod teacher;
pub mod types;

// 重导出核心类型
pub use demand::{ExpandedSlotDemand, StudentDemand, DEFAULT_PRIORITY};
pub use import::{
    CountCell, DemandImportBatch, DemandImportResult, DqLevel, DqSummary, DqViolation,
    RawDemandRow,
};
pub use slot::Slot;
pub use teacher::{CapabilityTable, TeacherCapability};
pub use types::DayOfWeek;
