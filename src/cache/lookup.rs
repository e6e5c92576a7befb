//! 缓存读取模块
//!
//! 所有读取方法都只在固定快照期间复制记录，返回的值与缓存内部状态完全独立

use crate::error::MetaCacheResult;
use crate::types::{Field, FieldClass};

use super::data_cache::DataCache;

impl DataCache {
    /// 按加载顺序返回全部字段类的副本
    pub fn get_all_classes(&self) -> MetaCacheResult<Vec<FieldClass>> {
        self.with_snapshot(|snapshot| {
            snapshot
                .classes
                .iter()
                .map(|class| class.record.clone())
                .collect()
        })
    }

    /// 按加载顺序返回全部字段的副本
    pub fn get_all_fields(&self) -> MetaCacheResult<Vec<Field>> {
        self.with_snapshot(|snapshot| {
            snapshot
                .fields
                .iter()
                .map(|field| field.record.clone())
                .collect()
        })
    }

    /// 按ID获取字段类
    pub fn get_class_by_id(&self, id: i64) -> MetaCacheResult<Option<FieldClass>> {
        let found = self.with_snapshot(|snapshot| snapshot.class_by_id(id).map(|c| c.record.clone()))?;
        self.counters.record_lookup(found.is_some());
        crate::debug_log!("按ID查找字段类: id={}, 命中={}", id, found.is_some());
        Ok(found)
    }

    /// 按名称获取字段类（重名时为最后加载者）
    pub fn get_class_by_name(&self, name: &str) -> MetaCacheResult<Option<FieldClass>> {
        let found = self.with_snapshot(|snapshot| snapshot.class_by_name(name).map(|c| c.record.clone()))?;
        self.counters.record_lookup(found.is_some());
        crate::debug_log!("按名称查找字段类: name={}, 命中={}", name, found.is_some());
        Ok(found)
    }

    /// 按ID获取字段
    pub fn get_field_by_id(&self, id: i64) -> MetaCacheResult<Option<Field>> {
        let found = self.with_snapshot(|snapshot| snapshot.field_by_id(id).map(|f| f.record.clone()))?;
        self.counters.record_lookup(found.is_some());
        crate::debug_log!("按ID查找字段: id={}, 命中={}", id, found.is_some());
        Ok(found)
    }

    /// 按名称获取字段
    ///
    /// 字段名只在所属字段类内唯一，跨字段类同名时返回最后加载的那个
    pub fn get_field_by_name(&self, name: &str) -> MetaCacheResult<Option<Field>> {
        let found = self.with_snapshot(|snapshot| snapshot.field_by_name(name).map(|f| f.record.clone()))?;
        self.counters.record_lookup(found.is_some());
        crate::debug_log!("按名称查找字段: name={}, 命中={}", name, found.is_some());
        Ok(found)
    }

    /// 获取字段类的全部字段
    ///
    /// 字段类不存在时返回 None；存在但没有字段时返回空列表
    pub fn get_fields_for_class(&self, class_id: i64) -> MetaCacheResult<Option<Vec<Field>>> {
        let found = self.with_snapshot(|snapshot| {
            snapshot
                .class_by_id(class_id)
                .map(|class| snapshot.copy_fields_of(class))
        })?;
        self.counters.record_lookup(found.is_some());
        Ok(found)
    }

    /// 按字段类名称获取其全部字段
    pub fn get_fields_for_class_name(&self, class_name: &str) -> MetaCacheResult<Option<Vec<Field>>> {
        let found = self.with_snapshot(|snapshot| {
            snapshot
                .class_by_name(class_name)
                .map(|class| snapshot.copy_fields_of(class))
        })?;
        self.counters.record_lookup(found.is_some());
        Ok(found)
    }

    /// 在指定字段类内按名称查找字段
    ///
    /// 字段类不存在或字段不存在都返回 None
    pub fn get_field_in_class(&self, class_id: i64, field_name: &str) -> MetaCacheResult<Option<Field>> {
        let found = self.with_snapshot(|snapshot| {
            snapshot
                .class_by_id(class_id)
                .and_then(|class| snapshot.field_in_class(class, field_name))
                .map(|field| field.record.clone())
        })?;
        self.counters.record_lookup(found.is_some());
        Ok(found)
    }

    /// 通过字段的反向引用获取其所属字段类
    pub fn get_class_for_field(&self, field_id: i64) -> MetaCacheResult<Option<FieldClass>> {
        let found = self.with_snapshot(|snapshot| {
            snapshot
                .field_by_id(field_id)
                .and_then(|field| snapshot.owner_of(field))
                .map(|class| class.record.clone())
        })?;
        self.counters.record_lookup(found.is_some());
        Ok(found)
    }
}
