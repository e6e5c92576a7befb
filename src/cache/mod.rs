//! 元数据缓存模块
//!
//! 提供字段类/字段的只读高并发内存缓存：构建后原子替换的加载协议、
//! 复制返回的读取接口，以及统计信息

// 导出所有子模块
pub mod data_cache;
pub mod load_report;
pub mod lookup;
pub mod stats;
pub(crate) mod snapshot;

// 重新导出主要的公共类型和结构体
pub use data_cache::DataCache;
pub use load_report::{DuplicateNameWarning, LoadReport, OrphanFieldWarning};
pub use stats::{CachePerformanceStats, CacheStats, MemoryUsage};
