// ==========================================
// 个别指导排课系统 - 引擎层
// ==========================================
// 职责: 需求展开与约束解析的纯逻辑
// 红线: 无 I/O、无全局可变状态；数据异常只告警不中断
// ==========================================

pub mod booth;
pub mod capability;
pub mod diagnostics;
pub mod expander;
pub mod identity;
pub mod subject;

// 重导出核心引擎
pub use booth::BoothCodec;
pub use capability::CapabilityMatcher;
pub use diagnostics::{
    CollectingWarningSink, ExpansionWarning, PreferredTimeError, TracingWarningSink, WarningSink,
};
pub use expander::{expand, DemandExpander, ExpansionOptions, ExpansionReport, PreferredTime};
pub use identity::{derive_id, find_id_collisions, IdCollision, IdDeriver, NameHashIdDeriver};
pub use subject::SubjectNormalizer;
