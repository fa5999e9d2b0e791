// ==========================================
// 个别指导排课系统 - 展开配置读取 Trait
// ==========================================
// 职责: 定义导入/展开所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::engine::expander::ExpansionOptions;
use crate::engine::identity::{IdDeriver, NameHashIdDeriver};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::sync::Arc;

// ==========================================
// ExpansionConfigReader Trait
// ==========================================
// 实现者: ConfigManager
pub trait ExpansionConfigReader: Send + Sync {
    // ===== 展开引擎 =====

    /// 未填写优先度时的缺省值
    ///
    /// # 默认值
    /// - 5
    fn get_default_priority(&self) -> ImportResult<i32>;

    /// 派生 ID 的前缀（必须为单个字符）
    ///
    /// # 默认值
    /// - 'T'
    fn get_id_prefix(&self) -> ImportResult<char>;

    // ===== 导入 =====

    /// NG 日程令牌（无年份）的对象年
    ///
    /// # 默认值
    /// - 当前本地年份
    fn get_target_year(&self) -> ImportResult<i32>;

    /// NG 日程令牌的对象月（1..=12）
    ///
    /// # 默认值
    /// - 当前本地月份
    fn get_target_month(&self) -> ImportResult<u32>;

    /// 讲师全名 → 简称
    ///
    /// # 默认值
    /// - 空表
    fn get_teacher_aliases(&self) -> ImportResult<HashMap<String, String>>;

    fn expansion_options(&self) -> ImportResult<ExpansionOptions> {
        Ok(ExpansionOptions {
            default_priority: self.get_default_priority()?,
        })
    }

    /// 导入与展开共用的 ID 派生器
    ///
    /// 缺省为带配置前缀的姓名哈希；实现者可覆盖以注入其他派生规则
    fn id_deriver(&self) -> ImportResult<Arc<dyn IdDeriver>> {
        Ok(Arc::new(NameHashIdDeriver::new(self.get_id_prefix()?)))
    }
}
