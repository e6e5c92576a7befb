//! 实体记录和缓存配置类型
//!
//! 定义字段类、字段记录以及缓存行为配置

pub mod serde_helpers;
pub mod records;
pub mod cache_config;

pub use records::{Field, FieldClass};
pub use cache_config::{CacheConfig, DuplicateNamePolicy, MemoryEstimateConfig};
