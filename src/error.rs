//! 错误处理模块
//!
//! 定义缓存库统一的错误类型和结果别名

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 缓存库统一错误类型
#[derive(Error, Debug)]
pub enum MetaCacheError {
    /// 缓存尚未完成首次加载
    #[error("{}", crate::i18n::t("error.not_loaded"))]
    NotLoaded,

    /// 按键查找的实体不存在
    #[error("{}", crate::i18n::tf("error.not_found", &[("entity", .entity.as_str()), ("key", .key.as_str())]))]
    NotFound { entity: EntityKind, key: String },

    /// 加载数据结构性错误，本次加载被放弃，原快照保持不变
    #[error("{}", crate::i18n::tf("error.structural_load", &[("message", .0.to_string().as_str())]))]
    StructuralLoad(StructuralLoadError),

    /// 加载器读取后端存储失败
    #[error("{}", crate::i18n::tf("error.loader", &[("message", .message.as_str())]))]
    LoaderError { message: String },

    /// 配置错误
    #[error("{}", crate::i18n::tf("error.config", &[("message", .message.as_str())]))]
    ConfigError { message: String },

    /// 序列化/反序列化错误
    #[error("{}", crate::i18n::tf("error.serialization", &[("message", .message.as_str())]))]
    SerializationError { message: String },

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 其他错误
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// 缓存库结果类型
pub type MetaCacheResult<T> = Result<T, MetaCacheError>;

/// 实体种类，用于 NotFound 等错误描述
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    FieldClass,
    Field,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::FieldClass => "field_class",
            EntityKind::Field => "field",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 结构性加载错误
///
/// 后端存储的行数据内部不一致，无法构建可用快照
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralLoadError {
    /// 同一实体类中出现重复主键
    #[error("{}", crate::i18n::tf("error.duplicate_id", &[
        ("entity", .entity.as_str()),
        ("id", .id.to_string().as_str()),
        ("first", .first_position.to_string().as_str()),
        ("second", .second_position.to_string().as_str()),
    ]))]
    DuplicateId {
        entity: EntityKind,
        id: i64,
        first_position: usize,
        second_position: usize,
    },

    /// 同一实体类中出现重复名称（仅在 DuplicateNamePolicy::Reject 下产生）
    #[error("{}", crate::i18n::tf("error.duplicate_name", &[
        ("entity", .entity.as_str()),
        ("name", .name.as_str()),
        ("first", .first_id.to_string().as_str()),
        ("second", .second_id.to_string().as_str()),
    ]))]
    DuplicateName {
        entity: EntityKind,
        name: String,
        first_id: i64,
        second_id: i64,
    },

    /// 加载器报告成功，但字段类列表为空
    #[error("{}", crate::i18n::t("error.empty_class_set"))]
    EmptyClassSet,
}

impl From<StructuralLoadError> for MetaCacheError {
    fn from(err: StructuralLoadError) -> Self {
        MetaCacheError::StructuralLoad(err)
    }
}

impl From<serde_json::Error> for MetaCacheError {
    fn from(err: serde_json::Error) -> Self {
        MetaCacheError::SerializationError {
            message: err.to_string(),
        }
    }
}

impl MetaCacheError {
    /// 是否为"缓存预热中"类错误，API层据此区分"服务预热中"和"资源不存在"
    pub fn is_not_loaded(&self) -> bool {
        matches!(self, MetaCacheError::NotLoaded)
    }

    /// 是否为查找未命中
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetaCacheError::NotFound { .. })
    }

    /// 构造 NotFound 错误
    pub fn not_found(entity: EntityKind, key: impl std::fmt::Display) -> Self {
        MetaCacheError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// 便捷错误构造宏
///
/// ```ignore
/// quick_error!(config, "缓存配置必须设置");
/// quick_error!(loader, format!("读取数据集失败: {}", e));
/// ```
#[macro_export]
macro_rules! quick_error {
    (config, $msg:expr) => {
        $crate::error::MetaCacheError::ConfigError {
            message: ($msg).to_string(),
        }
    };
    (loader, $msg:expr) => {
        $crate::error::MetaCacheError::LoaderError {
            message: ($msg).to_string(),
        }
    };
    (serialization, $msg:expr) => {
        $crate::error::MetaCacheError::SerializationError {
            message: ($msg).to_string(),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_loaded_and_not_found_are_distinct() {
        let not_loaded = MetaCacheError::NotLoaded;
        let not_found = MetaCacheError::not_found(EntityKind::Field, 99);

        assert!(not_loaded.is_not_loaded());
        assert!(!not_loaded.is_not_found());
        assert!(not_found.is_not_found());
        assert!(!not_found.is_not_loaded());

        match not_found {
            MetaCacheError::NotFound { entity, key } => {
                assert_eq!(entity, EntityKind::Field);
                assert_eq!(key, "99");
            }
            other => panic!("意外的错误类型: {:?}", other),
        }
    }

    #[test]
    fn test_quick_error_macro() {
        let err = quick_error!(config, "缓存配置必须设置");
        assert!(matches!(err, MetaCacheError::ConfigError { ref message } if message == "缓存配置必须设置"));

        let err = quick_error!(loader, format!("读取失败: {}", 42));
        assert!(matches!(err, MetaCacheError::LoaderError { ref message } if message == "读取失败: 42"));
    }

    #[test]
    fn test_structural_error_converts() {
        let err: MetaCacheError = StructuralLoadError::EmptyClassSet.into();
        assert!(matches!(err, MetaCacheError::StructuralLoad(StructuralLoadError::EmptyClassSet)));
    }
}
