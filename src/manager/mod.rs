//! 元数据管理器模块
//!
//! 把加载器和缓存组合起来：初始加载、串行化重载、查询转发、状态输出和后台自动重载

mod cache_ops;
mod maintenance;
mod manager;
mod query_ops;

// 重新导出主要类型
pub use cache_ops::ManagerStatus;
pub use manager::MetadataManager;
