// ==========================================
// 个别指导排课系统 - 配置层
// ==========================================
// 职责: 系统配置管理，支持默认值与覆写
// ==========================================

pub mod config_manager;
pub mod config_reader;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use config_reader::ExpansionConfigReader;
