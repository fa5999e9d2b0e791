// ==========================================
// 个别指导排课系统 - 姓名 → 标识符派生
// ==========================================
// 职责: 将讲师名/生徒名映射为稳定短 ID（前缀 + 6 位大写十六进制）
// 红线: 纯函数；不做空白/大小写规范化；讲师与生徒共用同一 ID 空间
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 默认 ID 前缀
pub const DEFAULT_ID_PREFIX: char = 'T';

const HASH_SEED: u32 = 5381;

// ==========================================
// IdDeriver Trait
// ==========================================
// 调用方只依赖此接口，可注入带角色标记的实现
pub trait IdDeriver: Send + Sync {
    fn derive_id(&self, name: &str) -> String;
}

impl<D: IdDeriver + ?Sized> IdDeriver for Arc<D> {
    fn derive_id(&self, name: &str) -> String {
        (**self).derive_id(name)
    }
}

// ==========================================
// NameHashIdDeriver - 乘法字符串哈希
// ==========================================
// h = h * 33 + code_unit（32 位回绕），取低 24 位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameHashIdDeriver {
    prefix: char,
}

impl NameHashIdDeriver {
    pub fn new(prefix: char) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// 32 位姓名哈希（按 UTF-16 码元迭代）
    pub fn hash(name: &str) -> u32 {
        name.encode_utf16().fold(HASH_SEED, |h, unit| {
            h.wrapping_mul(33).wrapping_add(u32::from(unit))
        })
    }
}

impl Default for NameHashIdDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdDeriver for NameHashIdDeriver {
    fn derive_id(&self, name: &str) -> String {
        format!("{}{:06X}", self.prefix, Self::hash(name) & 0x00FF_FFFF)
    }
}

/// 使用默认前缀派生 ID
pub fn derive_id(name: &str) -> String {
    NameHashIdDeriver::default().derive_id(name)
}

// ==========================================
// ID 冲突报告
// ==========================================
// 讲师名与生徒名哈希到同一 ID 属于已知歧义：只报告，不修正
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdCollision {
    pub id: String,
    pub teacher_name: String,
    pub student_name: String,
}

/// 列出所有派生 ID 相同的（讲师名, 生徒名）组合
///
/// 同名（讲师名 == 生徒名）同样共用一个 ID，也计入冲突；结果按 ID、讲师名、生徒名排序
pub fn find_id_collisions<D, S1, S2>(
    deriver: &D,
    teacher_names: &[S1],
    student_names: &[S2],
) -> Vec<IdCollision>
where
    D: IdDeriver + ?Sized,
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    let mut teachers_by_id: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for name in teacher_names {
        let name = name.as_ref();
        let entry = teachers_by_id.entry(deriver.derive_id(name)).or_default();
        if !entry.contains(&name) {
            entry.push(name);
        }
    }

    let mut collisions = Vec::new();
    for student in student_names {
        let student = student.as_ref();
        let id = deriver.derive_id(student);
        if let Some(teachers) = teachers_by_id.get(&id) {
            for teacher in teachers {
                collisions.push(IdCollision {
                    id: id.clone(),
                    teacher_name: teacher.to_string(),
                    student_name: student.to_string(),
                });
            }
        }
    }

    collisions.sort_by(|a, b| {
        (&a.id, &a.teacher_name, &a.student_name).cmp(&(&b.id, &b.teacher_name, &b.student_name))
    });
    collisions.dedup();
    collisions
}
