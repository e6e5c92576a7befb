//! 元数据加载器模块
//!
//! 加载器负责从后端存储读取字段类和字段行，缓存本身不做任何I/O

mod file_loader;
mod static_loader;

pub use file_loader::{DatasetFile, FileLoader};
pub use static_loader::StaticLoader;

use crate::error::MetaCacheResult;
use crate::types::{Field, FieldClass};
use async_trait::async_trait;

/// 元数据加载器
///
/// 两个方法都返回完整物化的序列，反映调用时后端存储的状态
#[async_trait]
pub trait MetadataLoader: Send + Sync {
    /// 读取全部字段类
    async fn load_field_classes(&self) -> MetaCacheResult<Vec<FieldClass>>;

    /// 读取全部字段
    async fn load_fields(&self) -> MetaCacheResult<Vec<Field>>;

    /// 一次读取字段类和字段
    ///
    /// 默认先读字段类再读字段；能一次性读取的加载器应覆盖此方法，保证两者来自同一份数据
    async fn load_dataset(&self) -> MetaCacheResult<(Vec<FieldClass>, Vec<Field>)> {
        let classes = self.load_field_classes().await?;
        let fields = self.load_fields().await?;
        Ok((classes, fields))
    }

    /// 数据来源描述，用于日志和状态输出
    fn source(&self) -> String;
}
