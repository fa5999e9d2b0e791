// ==========================================
// 个别指导排课系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入层错误为调用方可读的消息
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入契约错误
    // ==========================================
    /// 顶层不是数组、元素无法反序列化等结构性错误
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportFailed(#[from] ImportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("序列化失败: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
