//! 快照与关系构建模块
//!
//! 把加载器返回的扁平字段类/字段序列构建成一个互相链接、内部一致的只读快照。
//! 快照一经发布即不可变，读者通过固定住的 `Arc<Snapshot>` 访问

use super::load_report::{DuplicateNameWarning, LoadReport, OrphanFieldWarning};
use crate::error::{EntityKind, StructuralLoadError};
use crate::types::{CacheConfig, DuplicateNamePolicy, Field, FieldClass};
use chrono::{DateTime, Utc};
use rat_logger::{debug, warn};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Instant;

/// 带字段索引的字段类
///
/// 索引值是快照 `fields` 序列中的下标，只覆盖本字段类自己的字段
#[derive(Debug)]
pub(crate) struct IndexedFieldClass {
    pub(crate) record: FieldClass,
    pub(crate) fields_by_id: HashMap<i64, usize>,
    pub(crate) fields_by_name: HashMap<String, usize>,
    /// 按加载顺序排列的字段下标
    pub(crate) field_order: Vec<usize>,
}

/// 带所属字段类反向引用的字段
///
/// 反向引用只保存字段类主键，通过快照的 class-by-id 索引按需解析
#[derive(Debug)]
pub(crate) struct IndexedField {
    pub(crate) record: Field,
    pub(crate) owner_id: i64,
}

/// 一次加载产生的完整快照
#[derive(Debug)]
pub(crate) struct Snapshot {
    pub(crate) classes: Vec<IndexedFieldClass>,
    pub(crate) fields: Vec<IndexedField>,
    pub(crate) class_by_id: HashMap<i64, usize>,
    pub(crate) class_by_name: HashMap<String, usize>,
    pub(crate) field_by_id: HashMap<i64, usize>,
    pub(crate) field_by_name: HashMap<String, usize>,
    pub(crate) generation: u64,
    pub(crate) last_updated: DateTime<Utc>,
}

impl Snapshot {
    pub(crate) fn class_by_id(&self, id: i64) -> Option<&IndexedFieldClass> {
        self.class_by_id.get(&id).map(|&idx| &self.classes[idx])
    }

    pub(crate) fn class_by_name(&self, name: &str) -> Option<&IndexedFieldClass> {
        self.class_by_name.get(name).map(|&idx| &self.classes[idx])
    }

    pub(crate) fn field_by_id(&self, id: i64) -> Option<&IndexedField> {
        self.field_by_id.get(&id).map(|&idx| &self.fields[idx])
    }

    pub(crate) fn field_by_name(&self, name: &str) -> Option<&IndexedField> {
        self.field_by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// 解析字段的所属字段类
    pub(crate) fn owner_of(&self, field: &IndexedField) -> Option<&IndexedFieldClass> {
        self.class_by_id(field.owner_id)
    }

    /// 按加载顺序复制字段类的全部字段
    pub(crate) fn copy_fields_of(&self, class: &IndexedFieldClass) -> Vec<Field> {
        class
            .field_order
            .iter()
            .map(|&idx| self.fields[idx].record.clone())
            .collect()
    }

    /// 在字段类内按名称查找字段
    pub(crate) fn field_in_class(&self, class: &IndexedFieldClass, name: &str) -> Option<&IndexedField> {
        class.fields_by_name.get(name).map(|&idx| &self.fields[idx])
    }
}

/// 快照构建器
///
/// 只在私有数据上工作，不触碰任何共享状态
pub(crate) struct SnapshotBuilder<'a> {
    config: &'a CacheConfig,
}

impl<'a> SnapshotBuilder<'a> {
    pub(crate) fn new(config: &'a CacheConfig) -> Self {
        Self { config }
    }

    /// 构建快照
    ///
    /// 返回的快照与报告中的版本号为 0，由发布方在发布前填写
    pub(crate) fn build(
        &self,
        classes: Vec<FieldClass>,
        fields: Vec<Field>,
    ) -> Result<(Snapshot, LoadReport), StructuralLoadError> {
        let started = Instant::now();

        if classes.is_empty() && !self.config.allow_empty_dataset {
            return Err(StructuralLoadError::EmptyClassSet);
        }

        let mut duplicate_names = Vec::new();
        let mut orphan_fields = Vec::new();

        // 第一步：字段类索引
        let mut class_by_id: HashMap<i64, usize> = HashMap::with_capacity(classes.len());
        let mut class_by_name: HashMap<String, usize> = HashMap::with_capacity(classes.len());
        let mut indexed_classes: Vec<IndexedFieldClass> = Vec::with_capacity(classes.len());

        for (position, class) in classes.into_iter().enumerate() {
            match class_by_id.entry(class.id) {
                Entry::Occupied(existing) => {
                    return Err(StructuralLoadError::DuplicateId {
                        entity: EntityKind::FieldClass,
                        id: class.id,
                        first_position: *existing.get(),
                        second_position: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }

            if let Some(&previous) = class_by_name.get(&class.name) {
                let replaced_id = indexed_classes[previous].record.id;
                if self.config.duplicate_name_policy == DuplicateNamePolicy::Reject {
                    return Err(StructuralLoadError::DuplicateName {
                        entity: EntityKind::FieldClass,
                        name: class.name,
                        first_id: replaced_id,
                        second_id: class.id,
                    });
                }
                warn!(
                    "字段类名称重复，后加载者生效: name={}, 被覆盖ID={}, 生效ID={}",
                    class.name, replaced_id, class.id
                );
                duplicate_names.push(DuplicateNameWarning {
                    entity: EntityKind::FieldClass,
                    name: class.name.clone(),
                    replaced_id,
                    winner_id: class.id,
                    class_id: None,
                });
            }
            class_by_name.insert(class.name.clone(), position);

            indexed_classes.push(IndexedFieldClass {
                record: class,
                fields_by_id: HashMap::new(),
                fields_by_name: HashMap::new(),
                field_order: Vec::new(),
            });
        }

        // 第二、三步：解析所属字段类并挂接到局部和全局索引
        let mut field_by_id: HashMap<i64, usize> = HashMap::with_capacity(fields.len());
        let mut field_by_name: HashMap<String, usize> = HashMap::with_capacity(fields.len());
        let mut indexed_fields: Vec<IndexedField> = Vec::with_capacity(fields.len());
        // 字段ID -> 加载器序列中的位置，用于重复主键报告
        let mut field_positions: HashMap<i64, usize> = HashMap::with_capacity(fields.len());

        for (position, field) in fields.into_iter().enumerate() {
            // 主键唯一性与归属无关，孤立行也参与检查
            if let Some(&first_position) = field_positions.get(&field.id) {
                return Err(StructuralLoadError::DuplicateId {
                    entity: EntityKind::Field,
                    id: field.id,
                    first_position,
                    second_position: position,
                });
            }
            field_positions.insert(field.id, position);

            let Some(&owner_idx) = class_by_id.get(&field.class_id) else {
                warn!(
                    "字段引用的字段类不存在，已排除: field_id={}, name={}, class_id={}",
                    field.id, field.name, field.class_id
                );
                orphan_fields.push(OrphanFieldWarning {
                    field_id: field.id,
                    field_name: field.name,
                    class_id: field.class_id,
                    position,
                });
                continue;
            };

            let owner = &mut indexed_classes[owner_idx];
            if let Some(&previous) = owner.fields_by_name.get(&field.name) {
                let replaced_id = indexed_fields[previous].record.id;
                if self.config.duplicate_name_policy == DuplicateNamePolicy::Reject {
                    return Err(StructuralLoadError::DuplicateName {
                        entity: EntityKind::Field,
                        name: field.name,
                        first_id: replaced_id,
                        second_id: field.id,
                    });
                }
                warn!(
                    "字段类内字段名重复，后加载者生效: class_id={}, name={}, 被覆盖ID={}, 生效ID={}",
                    field.class_id, field.name, replaced_id, field.id
                );
                duplicate_names.push(DuplicateNameWarning {
                    entity: EntityKind::Field,
                    name: field.name.clone(),
                    replaced_id,
                    winner_id: field.id,
                    class_id: Some(field.class_id),
                });
            } else if let Some(&previous) = field_by_name.get(&field.name) {
                // 跨字段类同名是正常情况，全局名称索引按加载顺序后写入者生效
                debug!(
                    "全局字段名索引覆盖: name={}, 原ID={}, 新ID={}",
                    field.name, indexed_fields[previous].record.id, field.id
                );
            }

            let idx = indexed_fields.len();
            owner.fields_by_id.insert(field.id, idx);
            owner.fields_by_name.insert(field.name.clone(), idx);
            owner.field_order.push(idx);

            field_by_id.insert(field.id, idx);
            field_by_name.insert(field.name.clone(), idx);

            indexed_fields.push(IndexedField {
                owner_id: field.class_id,
                record: field,
            });
        }

        let now = Utc::now();
        let report = LoadReport {
            generation: 0,
            classes_loaded: indexed_classes.len(),
            fields_loaded: indexed_fields.len(),
            orphan_fields,
            duplicate_names,
            build_micros: started.elapsed().as_micros() as u64,
            loaded_at: now,
        };

        let snapshot = Snapshot {
            classes: indexed_classes,
            fields: indexed_fields,
            class_by_id,
            class_by_name,
            field_by_id,
            field_by_name,
            generation: 0,
            last_updated: now,
        };

        Ok((snapshot, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        config: &CacheConfig,
        classes: Vec<FieldClass>,
        fields: Vec<Field>,
    ) -> Result<(Snapshot, LoadReport), StructuralLoadError> {
        SnapshotBuilder::new(config).build(classes, fields)
    }

    #[test]
    fn test_links_fields_to_owning_class() {
        let config = CacheConfig::default();
        let (snapshot, report) = build(
            &config,
            vec![FieldClass::new(1, "Customer", "entity"), FieldClass::new(2, "Order", "entity")],
            vec![
                Field::new(10, 1, "email", "string"),
                Field::new(20, 2, "total", "decimal"),
                Field::new(11, 1, "phone", "string"),
            ],
        )
        .expect("构建快照失败");

        assert!(!report.has_warnings());
        assert_eq!(report.classes_loaded, 2);
        assert_eq!(report.fields_loaded, 3);

        let customer = snapshot.class_by_id(1).expect("字段类1不存在");
        let names: Vec<String> = snapshot
            .copy_fields_of(customer)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["email", "phone"]);

        let email = snapshot.field_in_class(customer, "email").expect("字段email不存在");
        assert_eq!(email.record.id, 10);
        assert_eq!(customer.fields_by_id.len(), 2);

        let total = snapshot.field_by_id(20).expect("字段20不存在");
        assert_eq!(snapshot.owner_of(total).map(|c| c.record.name.as_str()), Some("Order"));
    }

    #[test]
    fn test_duplicate_class_id_is_structural_error() {
        let config = CacheConfig::default();
        let err = build(
            &config,
            vec![FieldClass::new(1, "A", "entity"), FieldClass::new(1, "B", "entity")],
            vec![],
        )
        .unwrap_err();

        assert_eq!(
            err,
            StructuralLoadError::DuplicateId {
                entity: EntityKind::FieldClass,
                id: 1,
                first_position: 0,
                second_position: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_field_id_is_structural_error() {
        let config = CacheConfig::default();
        let err = build(
            &config,
            vec![FieldClass::new(1, "A", "entity")],
            vec![Field::new(5, 1, "x", "string"), Field::new(5, 1, "y", "string")],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            StructuralLoadError::DuplicateId { entity: EntityKind::Field, id: 5, first_position: 0, second_position: 1 }
        ));
    }

    #[test]
    fn test_duplicate_field_id_with_orphan_row_is_structural_error() {
        let config = CacheConfig::default();
        let classes = || vec![FieldClass::new(1, "Customer", "entity")];

        // 孤立行在前
        let err = build(
            &config,
            classes(),
            vec![Field::new(5, 2, "ghost", "string"), Field::new(5, 1, "email", "string")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StructuralLoadError::DuplicateId { entity: EntityKind::Field, id: 5, first_position: 0, second_position: 1 }
        ));

        // 孤立行在后
        let err = build(
            &config,
            classes(),
            vec![Field::new(5, 1, "email", "string"), Field::new(5, 2, "ghost", "string")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StructuralLoadError::DuplicateId { entity: EntityKind::Field, id: 5, .. }
        ));

        // 两行都是孤立行
        let err = build(
            &config,
            classes(),
            vec![Field::new(5, 2, "ghost", "string"), Field::new(5, 3, "phantom", "string")],
        )
        .unwrap_err();
        assert!(matches!(err, StructuralLoadError::DuplicateId { id: 5, .. }));
    }

    #[test]
    fn test_duplicate_field_name_in_class_last_write_wins() {
        let config = CacheConfig::default();
        let (snapshot, report) = build(
            &config,
            vec![FieldClass::new(1, "Customer", "entity")],
            vec![Field::new(10, 1, "email", "string"), Field::new(11, 1, "email", "string")],
        )
        .expect("字段类内重名不应导致加载失败");

        assert_eq!(
            report.duplicate_names,
            vec![DuplicateNameWarning {
                entity: EntityKind::Field,
                name: "email".to_string(),
                replaced_id: 10,
                winner_id: 11,
                class_id: Some(1),
            }]
        );

        let customer = snapshot.class_by_id(1).expect("字段类1不存在");
        assert_eq!(snapshot.field_in_class(customer, "email").map(|f| f.record.id), Some(11));
        assert_eq!(snapshot.field_by_name("email").map(|f| f.record.id), Some(11));

        // 两行都保留在字段类列表中，按加载顺序各出现一次
        let ids: Vec<i64> = snapshot.copy_fields_of(customer).into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert!(snapshot.field_by_id(10).is_some());
    }

    #[test]
    fn test_duplicate_field_name_in_class_rejected_by_policy() {
        let config = CacheConfig {
            duplicate_name_policy: DuplicateNamePolicy::Reject,
            ..CacheConfig::default()
        };
        let err = build(
            &config,
            vec![FieldClass::new(1, "Customer", "entity")],
            vec![Field::new(10, 1, "email", "string"), Field::new(11, 1, "email", "string")],
        )
        .unwrap_err();

        assert_eq!(
            err,
            StructuralLoadError::DuplicateName {
                entity: EntityKind::Field,
                name: "email".to_string(),
                first_id: 10,
                second_id: 11,
            }
        );
    }

    #[test]
    fn test_orphan_fields_are_excluded_and_reported() {
        let config = CacheConfig::default();
        let (snapshot, report) = build(
            &config,
            vec![FieldClass::new(1, "Customer", "entity")],
            vec![Field::new(10, 1, "email", "string"), Field::new(30, 2, "ghost", "string")],
        )
        .expect("孤立字段不应导致加载失败");

        assert_eq!(snapshot.fields.len(), 1);
        assert!(snapshot.field_by_id(30).is_none());
        assert!(snapshot.field_by_name("ghost").is_none());
        assert_eq!(
            report.orphan_fields,
            vec![OrphanFieldWarning {
                field_id: 30,
                field_name: "ghost".to_string(),
                class_id: 2,
                position: 1,
            }]
        );
    }

    #[test]
    fn test_duplicate_class_name_last_write_wins() {
        let config = CacheConfig::default();
        let (snapshot, report) = build(
            &config,
            vec![FieldClass::new(1, "Customer", "entity"), FieldClass::new(2, "Customer", "entity")],
            vec![],
        )
        .expect("重名字段类不应导致加载失败");

        assert_eq!(snapshot.classes.len(), 2);
        assert_eq!(snapshot.class_by_name("Customer").map(|c| c.record.id), Some(2));
        assert_eq!(report.duplicate_names.len(), 1);
        assert_eq!(report.duplicate_names[0].replaced_id, 1);
        assert_eq!(report.duplicate_names[0].winner_id, 2);
    }

    #[test]
    fn test_duplicate_name_rejected_by_policy() {
        let config = CacheConfig {
            duplicate_name_policy: DuplicateNamePolicy::Reject,
            ..CacheConfig::default()
        };
        let err = build(
            &config,
            vec![FieldClass::new(1, "Customer", "entity"), FieldClass::new(2, "Customer", "entity")],
            vec![],
        )
        .unwrap_err();

        assert!(matches!(err, StructuralLoadError::DuplicateName { first_id: 1, second_id: 2, .. }));
    }

    #[test]
    fn test_same_field_name_across_classes_is_not_a_warning() {
        let config = CacheConfig::default();
        let (snapshot, report) = build(
            &config,
            vec![FieldClass::new(1, "Customer", "entity"), FieldClass::new(2, "Supplier", "entity")],
            vec![Field::new(10, 1, "email", "string"), Field::new(20, 2, "email", "string")],
        )
        .expect("构建快照失败");

        assert!(report.duplicate_names.is_empty());
        // 全局名称索引按加载顺序后写入者生效
        assert_eq!(snapshot.field_by_name("email").map(|f| f.record.id), Some(20));
        let customer = snapshot.class_by_id(1).expect("字段类1不存在");
        assert_eq!(snapshot.field_in_class(customer, "email").map(|f| f.record.id), Some(10));
    }

    #[test]
    fn test_empty_class_set() {
        let config = CacheConfig::default();
        assert_eq!(
            build(&config, vec![], vec![]).unwrap_err(),
            StructuralLoadError::EmptyClassSet
        );

        let permissive = CacheConfig {
            allow_empty_dataset: true,
            ..CacheConfig::default()
        };
        let (snapshot, _) = build(&permissive, vec![], vec![]).expect("允许空数据集时应成功");
        assert!(snapshot.classes.is_empty());
    }
}
