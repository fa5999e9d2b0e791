// ==========================================
// 个别指导排课系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 key-value（可从 JSON 对象文件加载）
// ==========================================

use crate::config::config_reader::ExpansionConfigReader;
use crate::domain::demand::DEFAULT_PRIORITY;
use crate::engine::identity::DEFAULT_ID_PREFIX;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{Datelike, Local};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Default)]
pub struct ConfigManager {
    values: RwLock<BTreeMap<String, String>>,
}

impl ConfigManager {
    /// 全部使用默认值
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values.into_iter().collect()),
        }
    }

    /// 从 JSON 对象文件加载
    ///
    /// 字符串值原样保存，其余值（数字、对象）保存为 JSON 文本
    pub fn from_json_file(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        let manager = Self::from_json_str(&text).map_err(|message| ImportError::ConfigReadError {
            key: path.display().to_string(),
            message,
        })?;
        debug!(path = %path.display(), "配置文件加载完成");
        Ok(manager)
    }

    fn from_json_str(text: &str) -> Result<Self, String> {
        let parsed: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        let Value::Object(object) = parsed else {
            return Err("配置文件顶层必须是 JSON 对象".to_string());
        };

        let values = object
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        Ok(Self {
            values: RwLock::new(values),
        })
    }

    /// 覆写配置值
    pub fn set(&self, key: &str, value: impl Into<String>) -> ImportResult<()> {
        let mut values = self.values.write().map_err(|e| ImportError::ConfigReadError {
            key: key.to_string(),
            message: format!("锁获取失败: {}", e),
        })?;
        values.insert(key.to_string(), value.into());
        Ok(())
    }

    /// 读取配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ImportResult<Option<String>> {
        let values = self.values.read().map_err(|e| ImportError::ConfigReadError {
            key: key.to_string(),
            message: format!("锁获取失败: {}", e),
        })?;
        Ok(values.get(key).cloned())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ImportResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    fn parse_value<T: std::str::FromStr>(&self, key: &str, default: &str) -> ImportResult<T>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self.get_config_or_default(key, default)?;
        raw.trim().parse::<T>().map_err(|e| ImportError::ConfigValueError {
            key: key.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })
    }

    /// 有效配置快照（JSON，已合并默认值）
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        let mut snapshot = serde_json::Map::new();
        snapshot.insert(
            config_keys::DEFAULT_PRIORITY.to_string(),
            Value::from(self.get_default_priority()?),
        );
        snapshot.insert(
            config_keys::ID_PREFIX.to_string(),
            Value::from(self.get_id_prefix()?.to_string()),
        );
        snapshot.insert(
            config_keys::TARGET_YEAR.to_string(),
            Value::from(self.get_target_year()?),
        );
        snapshot.insert(
            config_keys::TARGET_MONTH.to_string(),
            Value::from(self.get_target_month()?),
        );
        let aliases: BTreeMap<String, String> = self.get_teacher_aliases()?.into_iter().collect();
        snapshot.insert(
            config_keys::TEACHER_ALIASES.to_string(),
            serde_json::json!(aliases),
        );

        serde_json::to_string(&Value::Object(snapshot)).map_err(|e| ImportError::ConfigReadError {
            key: "snapshot".to_string(),
            message: e.to_string(),
        })
    }
}

impl ExpansionConfigReader for ConfigManager {
    fn get_default_priority(&self) -> ImportResult<i32> {
        self.parse_value(config_keys::DEFAULT_PRIORITY, &DEFAULT_PRIORITY.to_string())
    }

    fn get_id_prefix(&self) -> ImportResult<char> {
        let raw = self.get_config_or_default(config_keys::ID_PREFIX, &DEFAULT_ID_PREFIX.to_string())?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(prefix), None) => Ok(prefix),
            _ => Err(ImportError::ConfigValueError {
                key: config_keys::ID_PREFIX.to_string(),
                value: raw.clone(),
                message: "前缀必须是单个字符".to_string(),
            }),
        }
    }

    fn get_target_year(&self) -> ImportResult<i32> {
        self.parse_value(config_keys::TARGET_YEAR, &Local::now().year().to_string())
    }

    fn get_target_month(&self) -> ImportResult<u32> {
        let month: u32 = self.parse_value(config_keys::TARGET_MONTH, &Local::now().month().to_string())?;
        if !(1..=12).contains(&month) {
            return Err(ImportError::ConfigValueError {
                key: config_keys::TARGET_MONTH.to_string(),
                value: month.to_string(),
                message: "月份必须在 1..=12".to_string(),
            });
        }
        Ok(month)
    }

    fn get_teacher_aliases(&self) -> ImportResult<HashMap<String, String>> {
        let raw = self.get_config_or_default(config_keys::TEACHER_ALIASES, "{}")?;
        serde_json::from_str(&raw).map_err(|e| ImportError::ConfigValueError {
            key: config_keys::TEACHER_ALIASES.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 展开引擎
    pub const DEFAULT_PRIORITY: &str = "expander.default_priority";
    pub const ID_PREFIX: &str = "identity.id_prefix";

    // 导入
    pub const TARGET_YEAR: &str = "importer.target_year";
    pub const TARGET_MONTH: &str = "importer.target_month";
    pub const TEACHER_ALIASES: &str = "importer.teacher_aliases"; // 讲师全名 → 简称 (JSON)
}
