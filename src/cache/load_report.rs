//! 加载报告模块
//!
//! 记录一次成功加载附带的非致命诊断信息

use crate::error::EntityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 孤立字段警告：字段引用的字段类不在本次加载的字段类集合中
///
/// 该字段不会进入新快照，但加载本身仍然成功
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanFieldWarning {
    pub field_id: i64,
    pub field_name: String,
    /// 无法解析的字段类ID
    pub class_id: i64,
    /// 字段在加载器返回序列中的位置
    pub position: usize,
}

/// 重名覆盖警告（后写入者生效）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateNameWarning {
    pub entity: EntityKind,
    pub name: String,
    /// 被覆盖的记录ID
    pub replaced_id: i64,
    /// 最终生效的记录ID
    pub winner_id: i64,
    /// 字段重名时所在的字段类ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
}

/// 一次成功加载的结果报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    /// 发布的快照版本号
    pub generation: u64,
    /// 进入快照的字段类数量
    pub classes_loaded: usize,
    /// 进入快照的字段数量（不含孤立字段）
    pub fields_loaded: usize,
    pub orphan_fields: Vec<OrphanFieldWarning>,
    pub duplicate_names: Vec<DuplicateNameWarning>,
    /// 构建快照耗时（微秒）
    pub build_micros: u64,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    /// 是否存在任何非致命警告
    pub fn has_warnings(&self) -> bool {
        !self.orphan_fields.is_empty() || !self.duplicate_names.is_empty()
    }

    /// 日志用的单行摘要
    pub fn summary(&self) -> String {
        format!(
            "版本={}, 字段类={}, 字段={}, 孤立字段={}, 重名覆盖={}, 耗时={}μs",
            self.generation,
            self.classes_loaded,
            self.fields_loaded,
            self.orphan_fields.len(),
            self.duplicate_names.len(),
            self.build_micros
        )
    }
}
