// ==========================================
// 个别指导排课系统 - 讲师指导可能科目
// ==========================================
// 职责: TeacherCapability 与 讲师→科目 能力表
// 红线: 无可识别科目的讲师不进入能力表（缺席 ≠ 空集合）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherCapability {
    pub teacher_id: String,
    pub subjects: BTreeSet<String>, // 规范化后的科目名
}

// ==========================================
// CapabilityTable - 讲师能力表
// ==========================================
// 空表表示「未收集能力数据」，与「讲师缺席」语义不同
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由能力记录构建，科目为空的讲师被省略
    pub fn from_capabilities<I>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = TeacherCapability>,
    {
        let mut table = Self::new();
        for capability in capabilities {
            table.insert(capability);
        }
        table
    }

    /// 插入一条能力记录；同一讲师多次出现时合并科目
    ///
    /// 返回值表示该记录是否进入能力表
    pub fn insert(&mut self, capability: TeacherCapability) -> bool {
        if capability.subjects.is_empty() {
            return false;
        }
        self.entries
            .entry(capability.teacher_id)
            .or_default()
            .extend(capability.subjects);
        true
    }

    pub fn subjects_of(&self, teacher_id: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(teacher_id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn teacher_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
