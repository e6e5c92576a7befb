//! 实体记录定义
//!
//! 与后端存储行一一对应的纯值类型。缓存对外只返回这些类型的副本

use crate::types::serde_helpers::{store_datetime, store_datetime_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 字段类（字段的分组，相当于记录类型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldClass {
    /// 主键
    pub id: i64,
    /// 实例标记
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is: Option<i64>,
    /// 字段类名称，在同一数据集中唯一
    #[serde(rename = "field_class_name")]
    pub name: String,
    /// 字段类类型标签
    pub class_type: String,
    /// 创建时间
    #[serde(with = "store_datetime")]
    pub create_date: DateTime<Utc>,
    /// 更新时间
    #[serde(default, with = "store_datetime_option", skip_serializing_if = "Option::is_none")]
    pub update_date: Option<DateTime<Utc>>,
    /// 描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldClass {
    /// 以当前时间创建字段类记录
    pub fn new(id: i64, name: impl Into<String>, class_type: impl Into<String>) -> Self {
        Self {
            id,
            is: None,
            name: name.into(),
            class_type: class_type.into(),
            create_date: Utc::now(),
            update_date: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// 字段（隶属于且仅隶属于一个字段类的具名、带类型的属性）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// 主键
    pub id: i64,
    /// 所属字段类ID
    pub class_id: i64,
    /// 字段名，在所属字段类内唯一
    pub name: String,
    /// 声明类型
    #[serde(rename = "type")]
    pub field_type: String,
    /// 长度
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    /// 精度
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision_size: Option<i32>,
    /// 默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// 创建时间
    #[serde(with = "store_datetime")]
    pub create_date: DateTime<Utc>,
    /// 更新时间
    #[serde(default, with = "store_datetime_option", skip_serializing_if = "Option::is_none")]
    pub update_date: Option<DateTime<Utc>>,
    /// 描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Field {
    /// 以当前时间创建字段记录
    pub fn new(
        id: i64,
        class_id: i64,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            class_id,
            name: name.into(),
            field_type: field_type.into(),
            size: None,
            precision_size: None,
            default_value: None,
            create_date: Utc::now(),
            update_date: None,
            description: None,
        }
    }

    pub fn with_size(mut self, size: i32, precision_size: Option<i32>) -> Self {
        self.size = Some(size);
        self.precision_size = precision_size;
        self
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_class_uses_store_column_names() {
        let json = r#"
        {
            "id": 1,
            "field_class_name": "Customer",
            "class_type": "entity",
            "create_date": "2025-10-20 13:54:23",
            "description": "客户"
        }
        "#;

        let class: FieldClass = serde_json::from_str(json).expect("字段类解析失败");
        assert_eq!(class.id, 1);
        assert_eq!(class.name, "Customer");
        assert_eq!(class.is, None);
        assert_eq!(class.update_date, None);
        assert_eq!(class.description.as_deref(), Some("客户"));

        let value = serde_json::to_value(&class).expect("字段类序列化失败");
        assert_eq!(value["field_class_name"], "Customer");
        assert!(value.get("update_date").is_none());
    }

    #[test]
    fn test_field_parses_optional_columns() {
        let json = r#"
        {
            "id": 10,
            "class_id": 1,
            "name": "amount",
            "type": "decimal",
            "size": 18,
            "precision_size": 2,
            "default_value": "0",
            "create_date": "2025-10-20T13:54:23Z",
            "update_date": null
        }
        "#;

        let field: Field = serde_json::from_str(json).expect("字段解析失败");
        assert_eq!(field.field_type, "decimal");
        assert_eq!(field.size, Some(18));
        assert_eq!(field.precision_size, Some(2));
        assert_eq!(field.default_value.as_deref(), Some("0"));
        assert_eq!(field.update_date, None);
    }
}
