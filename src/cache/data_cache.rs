//! 数据缓存核心模块
//!
//! 提供DataCache的结构定义、加载（构建后原子替换）和清理

use super::load_report::LoadReport;
use super::snapshot::{Snapshot, SnapshotBuilder};
use super::stats::PerformanceCounters;
use crate::error::{MetaCacheError, MetaCacheResult};
use crate::types::{CacheConfig, Field, FieldClass};
use arc_swap::ArcSwapOption;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use rat_logger::{error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 字段类/字段元数据缓存
///
/// 读多写少：读者固定住当前快照后复制出所需记录；`load` 在私有结构上构建完整快照，
/// 成功后才以 O(1) 的原子替换发布。任何时刻读者看到的都是某一次加载的完整快照
#[derive(Debug)]
pub struct DataCache {
    /// 当前发布的快照，None 表示尚未加载
    pub(crate) live: ArcSwapOption<Snapshot>,
    /// 缓存配置
    pub(crate) config: CacheConfig,
    /// 最近一次发布的快照版本号
    pub(crate) generation: AtomicU64,
    /// 最近一次成功加载的报告
    pub(crate) last_report: RwLock<Option<LoadReport>>,
    /// 发布锁，保证版本号分配和快照替换按同一顺序进行
    pub(crate) publish_lock: Mutex<()>,
    /// 原子计数器用于高频统计
    pub(crate) counters: PerformanceCounters,
}

impl DataCache {
    /// 创建新的空缓存
    pub fn new(config: CacheConfig) -> Self {
        Self {
            live: ArcSwapOption::empty(),
            config,
            generation: AtomicU64::new(0),
            last_report: RwLock::new(None),
            publish_lock: Mutex::new(()),
            counters: PerformanceCounters::default(),
        }
    }

    /// 缓存配置
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// 加载字段类和字段
    ///
    /// 失败时之前发布的快照（如果有）保持不变，错误原样返回
    pub fn load(&self, classes: Vec<FieldClass>, fields: Vec<Field>) -> MetaCacheResult<LoadReport> {
        let (class_rows, field_rows) = (classes.len(), fields.len());

        let (mut snapshot, mut report) = match SnapshotBuilder::new(&self.config).build(classes, fields) {
            Ok(built) => built,
            Err(e) => {
                self.counters.record_failed_load();
                error!(
                    "构建缓存快照失败，保留现有快照: 字段类行数={}, 字段行数={}, 错误={}",
                    class_rows, field_rows, e
                );
                return Err(MetaCacheError::StructuralLoad(e));
            }
        };

        // 构建在锁外进行，锁内只有版本号分配和O(1)替换
        {
            let _publish = self.publish_lock.lock();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now();
            snapshot.generation = generation;
            snapshot.last_updated = now;
            report.generation = generation;
            report.loaded_at = now;

            self.live.store(Some(Arc::new(snapshot)));
            *self.last_report.write() = Some(report.clone());
        }
        self.counters.record_load();

        if report.has_warnings() {
            warn!("缓存加载完成（含警告）: {}", report.summary());
        } else {
            info!("缓存加载完成: {}", report.summary());
        }

        Ok(report)
    }

    /// 是否已完成至少一次成功加载（且之后未被清理）
    pub fn is_loaded(&self) -> bool {
        self.live.load().is_some()
    }

    /// 当前快照版本号，未加载时为 None
    pub fn generation(&self) -> Option<u64> {
        self.live.load().as_deref().map(|snapshot| snapshot.generation)
    }

    /// 最近一次成功加载的报告副本
    pub fn last_report(&self) -> Option<LoadReport> {
        self.last_report.read().clone()
    }

    /// 清空缓存，回到未加载状态
    pub fn clear(&self) {
        let _publish = self.publish_lock.lock();
        self.live.store(None);
        *self.last_report.write() = None;
        info!("元数据缓存已清理");
    }

    /// 固定住当前快照执行只读操作
    ///
    /// 闭包内只做复制，快照引用在返回前释放
    pub(crate) fn with_snapshot<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> MetaCacheResult<R> {
        let guard = self.live.load();
        match guard.as_deref() {
            Some(snapshot) => Ok(f(snapshot)),
            None => Err(MetaCacheError::NotLoaded),
        }
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StructuralLoadError;

    fn customer_dataset() -> (Vec<FieldClass>, Vec<Field>) {
        (
            vec![FieldClass::new(1, "Customer", "entity")],
            vec![Field::new(10, 1, "email", "string")],
        )
    }

    #[test]
    fn test_load_publishes_snapshot() {
        let cache = DataCache::default();
        assert!(!cache.is_loaded());
        assert_eq!(cache.generation(), None);

        let (classes, fields) = customer_dataset();
        let report = cache.load(classes, fields).expect("加载失败");

        assert!(cache.is_loaded());
        assert_eq!(report.generation, 1);
        assert_eq!(cache.generation(), Some(1));
        assert_eq!(cache.last_report().map(|r| r.fields_loaded), Some(1));
    }

    #[test]
    fn test_failed_load_keeps_previous_snapshot() {
        let cache = DataCache::default();
        let (classes, fields) = customer_dataset();
        cache.load(classes, fields).expect("加载失败");

        let err = cache
            .load(
                vec![FieldClass::new(7, "A", "entity"), FieldClass::new(7, "B", "entity")],
                vec![],
            )
            .unwrap_err();

        assert!(matches!(
            err,
            MetaCacheError::StructuralLoad(StructuralLoadError::DuplicateId { id: 7, .. })
        ));
        assert_eq!(cache.generation(), Some(1));
        assert_eq!(cache.last_report().map(|r| r.generation), Some(1));
        assert_eq!(cache.performance().failed_loads, 1);
    }

    #[test]
    fn test_clear_returns_to_unloaded() {
        let cache = DataCache::default();
        let (classes, fields) = customer_dataset();
        cache.load(classes, fields).expect("加载失败");

        cache.clear();
        assert!(!cache.is_loaded());
        assert!(cache.last_report().is_none());
        assert!(cache.with_snapshot(|_| ()).unwrap_err().is_not_loaded());

        // 清理后重新加载，版本号继续递增
        let (classes, fields) = customer_dataset();
        let report = cache.load(classes, fields).expect("重新加载失败");
        assert_eq!(report.generation, 2);
    }
}
