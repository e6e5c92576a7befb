//! rat_metacache - 字段类/字段元数据内存缓存
//!
//! 从后端存储一次性读取字段类和字段，在内存中建立按ID、按名称和按归属的索引，
//! 供大量并发读者以O(1)查找。重载时在私有结构上构建完整快照，成功后原子替换发布

// 导出所有公共模块
pub mod cache;
pub mod config;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod manager;
pub mod types;

// 重新导出常用类型和函数
pub use cache::{
    CachePerformanceStats, CacheStats, DataCache, DuplicateNameWarning, LoadReport, MemoryUsage,
    OrphanFieldWarning,
};
pub use config::{
    AppConfig, AppConfigBuilder, CacheConfigBuilder, Environment, GlobalConfig, GlobalConfigBuilder,
    LogLevel, LoggingConfig, LoggingConfigBuilder, SourceConfig,
};
pub use error::{EntityKind, MetaCacheError, MetaCacheResult, StructuralLoadError};
pub use loader::{DatasetFile, FileLoader, MetadataLoader, StaticLoader};
pub use manager::{ManagerStatus, MetadataManager};
pub use types::*;

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        // 在 release 模式下不输出调试信息
    };
}

/// 初始化rat_metacache库
///
/// 注册多语言错误消息并按环境变量选择语言
///
/// 注意：日志系统由调用者自行初始化，本库不会初始化日志
pub fn init() {
    i18n::ErrorMessageI18n::init();
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
