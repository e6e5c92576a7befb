//! 查询转发相关方法
//!
//! `get_*` 原样转发缓存查找，`require_*` 把未找到转换为 NotFound 错误

use crate::error::{EntityKind, MetaCacheResult};
use crate::types::{Field, FieldClass};

use super::manager::require;
use super::MetadataManager;

impl MetadataManager {
    pub fn get_all_classes(&self) -> MetaCacheResult<Vec<FieldClass>> {
        self.cache.get_all_classes()
    }

    pub fn get_all_fields(&self) -> MetaCacheResult<Vec<Field>> {
        self.cache.get_all_fields()
    }

    pub fn get_class_by_id(&self, id: i64) -> MetaCacheResult<Option<FieldClass>> {
        self.cache.get_class_by_id(id)
    }

    pub fn get_class_by_name(&self, name: &str) -> MetaCacheResult<Option<FieldClass>> {
        self.cache.get_class_by_name(name)
    }

    pub fn get_field_by_id(&self, id: i64) -> MetaCacheResult<Option<Field>> {
        self.cache.get_field_by_id(id)
    }

    pub fn get_field_by_name(&self, name: &str) -> MetaCacheResult<Option<Field>> {
        self.cache.get_field_by_name(name)
    }

    pub fn get_fields_for_class(&self, class_id: i64) -> MetaCacheResult<Option<Vec<Field>>> {
        self.cache.get_fields_for_class(class_id)
    }

    pub fn get_fields_for_class_name(&self, class_name: &str) -> MetaCacheResult<Option<Vec<Field>>> {
        self.cache.get_fields_for_class_name(class_name)
    }

    pub fn get_field_in_class(&self, class_id: i64, field_name: &str) -> MetaCacheResult<Option<Field>> {
        self.cache.get_field_in_class(class_id, field_name)
    }

    pub fn get_class_for_field(&self, field_id: i64) -> MetaCacheResult<Option<FieldClass>> {
        self.cache.get_class_for_field(field_id)
    }

    /// 按ID获取字段类，不存在时返回 NotFound
    pub fn require_class_by_id(&self, id: i64) -> MetaCacheResult<FieldClass> {
        require(self.cache.get_class_by_id(id), EntityKind::FieldClass, id)
    }

    /// 按名称获取字段类，不存在时返回 NotFound
    pub fn require_class_by_name(&self, name: &str) -> MetaCacheResult<FieldClass> {
        require(self.cache.get_class_by_name(name), EntityKind::FieldClass, name)
    }

    /// 按ID获取字段，不存在时返回 NotFound
    pub fn require_field_by_id(&self, id: i64) -> MetaCacheResult<Field> {
        require(self.cache.get_field_by_id(id), EntityKind::Field, id)
    }

    /// 按名称获取字段，不存在时返回 NotFound
    pub fn require_field_by_name(&self, name: &str) -> MetaCacheResult<Field> {
        require(self.cache.get_field_by_name(name), EntityKind::Field, name)
    }

    /// 获取字段类下的字段，字段类不存在时返回 NotFound
    pub fn require_fields_for_class(&self, class_id: i64) -> MetaCacheResult<Vec<Field>> {
        require(self.cache.get_fields_for_class(class_id), EntityKind::FieldClass, class_id)
    }

    /// 按字段类名称获取其字段，字段类不存在时返回 NotFound
    pub fn require_fields_for_class_name(&self, class_name: &str) -> MetaCacheResult<Vec<Field>> {
        require(
            self.cache.get_fields_for_class_name(class_name),
            EntityKind::FieldClass,
            class_name,
        )
    }

    /// 在字段类内按名称获取字段，不存在时返回 NotFound
    pub fn require_field_in_class(&self, class_id: i64, field_name: &str) -> MetaCacheResult<Field> {
        require(
            self.cache.get_field_in_class(class_id, field_name),
            EntityKind::Field,
            format!("{}.{}", class_id, field_name),
        )
    }

    /// 获取字段所属的字段类，字段不存在时返回 NotFound
    pub fn require_class_for_field(&self, field_id: i64) -> MetaCacheResult<FieldClass> {
        require(self.cache.get_class_for_field(field_id), EntityKind::Field, field_id)
    }
}
