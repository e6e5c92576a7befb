use super::MetadataLoader;
use crate::error::MetaCacheResult;
use crate::types::{Field, FieldClass};
use async_trait::async_trait;
use parking_lot::RwLock;

/// 内存数据加载器
///
/// 持有一份可替换的行数据，适合嵌入式使用和测试
#[derive(Debug, Default)]
pub struct StaticLoader {
    rows: RwLock<(Vec<FieldClass>, Vec<Field>)>,
}

impl StaticLoader {
    pub fn new(classes: Vec<FieldClass>, fields: Vec<Field>) -> Self {
        Self {
            rows: RwLock::new((classes, fields)),
        }
    }

    /// 替换后端数据，下一次加载时生效
    pub fn replace(&self, classes: Vec<FieldClass>, fields: Vec<Field>) {
        *self.rows.write() = (classes, fields);
    }
}

#[async_trait]
impl MetadataLoader for StaticLoader {
    async fn load_field_classes(&self) -> MetaCacheResult<Vec<FieldClass>> {
        Ok(self.rows.read().0.clone())
    }

    async fn load_fields(&self) -> MetaCacheResult<Vec<Field>> {
        Ok(self.rows.read().1.clone())
    }

    fn source(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_takes_effect_on_next_load() {
        let loader = StaticLoader::new(vec![FieldClass::new(1, "Customer", "entity")], Vec::new());

        let (classes, fields) = tokio_test::block_on(loader.load_dataset()).expect("读取失败");
        assert_eq!(classes.len(), 1);
        assert!(fields.is_empty());

        loader.replace(
            vec![FieldClass::new(2, "Order", "entity")],
            vec![Field::new(20, 2, "amount", "decimal")],
        );
        let (classes, fields) = tokio_test::block_on(loader.load_dataset()).expect("读取失败");
        assert_eq!(classes[0].name, "Order");
        assert_eq!(fields.len(), 1);
        assert_eq!(loader.source(), "memory");
    }
}
