// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use booth_scheduler::config::ExpansionConfigReader;
use booth_scheduler::importer::ImportResult;
use std::collections::HashMap;

/// Mock 配置结构（对象月固定为 2025-01）
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub default_priority: i32,
    pub id_prefix: char,
    pub target_year: i32,
    pub target_month: u32,
    pub teacher_aliases: HashMap<String, String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_priority: 5,
            id_prefix: 'T',
            target_year: 2025,
            target_month: 1,
            teacher_aliases: HashMap::new(),
        }
    }
}

impl MockConfig {
    pub fn with_alias(mut self, full_name: &str, short_name: &str) -> Self {
        self.teacher_aliases
            .insert(full_name.to_string(), short_name.to_string());
        self
    }

    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }
}

impl ExpansionConfigReader for MockConfig {
    fn get_default_priority(&self) -> ImportResult<i32> {
        Ok(self.default_priority)
    }

    fn get_id_prefix(&self) -> ImportResult<char> {
        Ok(self.id_prefix)
    }

    fn get_target_year(&self) -> ImportResult<i32> {
        Ok(self.target_year)
    }

    fn get_target_month(&self) -> ImportResult<u32> {
        Ok(self.target_month)
    }

    fn get_teacher_aliases(&self) -> ImportResult<HashMap<String, String>> {
        Ok(self.teacher_aliases.clone())
    }
}
