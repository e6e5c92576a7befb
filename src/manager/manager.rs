//! 元数据管理器核心定义

use crate::cache::{DataCache, LoadReport};
use crate::config::GlobalConfig;
use crate::error::{MetaCacheError, MetaCacheResult};
use crate::loader::MetadataLoader;
use crate::types::CacheConfig;
use rat_logger::{error, info};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// 元数据管理器
///
/// 显式构造，不存在全局单例。缓存句柄可以通过 [`MetadataManager::cache`] 共享给只读调用方
pub struct MetadataManager {
    /// 元数据缓存
    pub(crate) cache: Arc<DataCache>,
    /// 元数据加载器
    pub(crate) loader: Arc<dyn MetadataLoader>,
    /// 重载锁，同一时刻只允许一个加载在构建
    pub(crate) reload_lock: Arc<Mutex<()>>,
    /// 自动重载任务句柄
    pub(crate) reload_handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl std::fmt::Debug for MetadataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataManager")
            .field("source", &self.loader.source())
            .field("cache", &self.cache)
            .finish()
    }
}

impl MetadataManager {
    /// 创建新的元数据管理器，缓存处于未加载状态
    pub fn new(config: CacheConfig, loader: Arc<dyn MetadataLoader>) -> Self {
        info!("创建元数据管理器: 数据源={}", loader.source());

        Self {
            cache: Arc::new(DataCache::new(config)),
            loader,
            reload_lock: Arc::new(Mutex::new(())),
            reload_handle: Arc::new(RwLock::new(None)),
        }
    }

    /// 根据全局配置创建元数据管理器
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.cache.clone(), config.source.create_loader())
    }

    /// 共享的缓存句柄
    pub fn cache(&self) -> Arc<DataCache> {
        self.cache.clone()
    }

    /// 数据来源描述
    pub fn source(&self) -> String {
        self.loader.source()
    }

    /// 初始加载
    ///
    /// 失败时缓存保持未加载状态，错误原样返回
    pub async fn initialize(&self) -> MetaCacheResult<LoadReport> {
        info!("初始化元数据缓存: 数据源={}", self.loader.source());
        match self.reload().await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("元数据缓存初始化失败: {}", e);
                Err(e)
            }
        }
    }

    /// 从加载器重新读取并发布新快照
    ///
    /// 多个重载串行执行；失败时之前的快照保持可用
    pub async fn reload(&self) -> MetaCacheResult<LoadReport> {
        reload_from(&self.cache, self.loader.as_ref(), &self.reload_lock).await
    }
}

/// 串行化的一次完整重载：读取数据集后在缓存上构建并发布
pub(crate) async fn reload_from(
    cache: &DataCache,
    loader: &dyn MetadataLoader,
    reload_lock: &Mutex<()>,
) -> MetaCacheResult<LoadReport> {
    let _guard = reload_lock.lock().await;

    let (classes, fields) = match loader.load_dataset().await {
        Ok(rows) => rows,
        Err(e) => {
            cache.counters.record_failed_load();
            error!("读取元数据失败，保留现有快照: 数据源={}, 错误={}", loader.source(), e);
            return Err(e);
        }
    };

    let report = cache.load(classes, fields)?;

    info!("元数据重载完成: 数据源={}, {}", loader.source(), report.summary());
    Ok(report)
}

impl Drop for MetadataManager {
    fn drop(&mut self) {
        if let Ok(mut handle) = self.reload_handle.try_write() {
            if let Some(handle) = handle.take() {
                handle.abort();
            }
        }
    }
}

/// 把 None 转换为 NotFound 错误
pub(crate) fn require<T>(
    found: MetaCacheResult<Option<T>>,
    entity: crate::error::EntityKind,
    key: impl std::fmt::Display,
) -> MetaCacheResult<T> {
    found?.ok_or_else(|| MetaCacheError::not_found(entity, key))
}
