// ==========================================
// 个别指导排课系统 - API 层
// ==========================================
// 职责: 提供展开流程入口，供 CLI 与上层调用
// ==========================================

pub mod error;
pub mod expansion_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use expansion_api::{ExpansionApi, ExpansionOutcome};
