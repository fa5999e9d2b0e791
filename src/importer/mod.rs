// ==========================================
// 个别指导排课系统 - 导入层
// ==========================================
// 职责: 外部 CSV 数据导入，生成强类型记录
// 支持: 需求表（宽表/长表）、时段目录、讲师能力表
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod demand_importer;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use demand_importer::{CapabilityImport, DemandImporterImpl};
pub use dq_validator::DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{DemandLayout, FieldMapper, RawCapabilityRow};
pub use file_parser::CsvParser;

// 重导出 Trait 接口
pub use importer_trait::{DemandImporter, DqValidator, FileParser, RawRecord};
