//! 缓存状态与维护相关方法

use crate::cache::{CachePerformanceStats, CacheStats};
use rat_logger::info;
use serde::{Deserialize, Serialize};

use super::MetadataManager;

/// 管理器状态，可直接序列化输出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerStatus {
    /// 数据来源
    pub source: String,
    /// 当前快照版本号，未加载时为 None
    pub generation: Option<u64>,
    /// 缓存统计
    pub cache: CacheStats,
    /// 查找与加载计数
    pub performance: CachePerformanceStats,
    /// 最近一次成功加载的摘要
    pub last_report: Option<String>,
    /// 自动重载是否在运行
    pub auto_reload: bool,
}

impl MetadataManager {
    /// 获取缓存统计信息
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// 获取查找与加载计数
    pub fn performance(&self) -> CachePerformanceStats {
        self.cache.performance()
    }

    /// 清理缓存，回到未加载状态
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("已清理元数据缓存: 数据源={}", self.loader.source());
    }

    /// 获取管理器状态
    pub async fn status(&self) -> ManagerStatus {
        let auto_reload = self.reload_handle.read().await.is_some();

        ManagerStatus {
            source: self.loader.source(),
            generation: self.cache.generation(),
            cache: self.cache.stats(),
            performance: self.cache.performance(),
            last_report: self.cache.last_report().map(|report| report.summary()),
            auto_reload,
        }
    }
}
