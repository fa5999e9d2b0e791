// ==========================================
// 个别指导排课系统 - 核心库
// ==========================================
// 职责: 生徒需求展开为候选时段 + 讲师/科目约束解析
// 系统定位: 匹配引擎的前置阶段（不做最终排课）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 引擎层 - 纯函数核心
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 流程入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CapabilityTable, DayOfWeek, ExpandedSlotDemand, Slot, StudentDemand, TeacherCapability,
};

// 引擎
pub use engine::{
    derive_id, expand, BoothCodec, CapabilityMatcher, DemandExpander, ExpansionReport,
    ExpansionWarning, SubjectNormalizer,
};

// API
pub use api::{ApiError, ExpansionApi, ExpansionOutcome};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "个别指导排课系统";
