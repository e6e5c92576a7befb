//! 缓存统计模块
//!
//! 提供缓存统计和性能信息收集功能。统计只读取当前快照，从不阻塞加载

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use super::data_cache::DataCache;
use super::snapshot::Snapshot;
use crate::types::MemoryEstimateConfig;

/// 缓存性能统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachePerformanceStats {
    /// 查找命中次数
    pub hits: u64,
    /// 查找未命中次数
    pub misses: u64,
    /// 成功加载次数
    pub loads: u64,
    /// 失败加载次数
    pub failed_loads: u64,
}

impl CachePerformanceStats {
    /// 计算命中率
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// 高频统计用的原子计数器
#[derive(Debug, Default)]
pub(crate) struct PerformanceCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    failed_loads: AtomicU64,
}

impl PerformanceCounters {
    pub(crate) fn record_lookup(&self, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed_load(&self) {
        self.failed_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CachePerformanceStats {
        CachePerformanceStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            failed_loads: self.failed_loads.load(Ordering::Relaxed),
        }
    }
}

/// 内存使用估算（字节，近似值）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub classes_bytes: usize,
    pub fields_bytes: usize,
    pub total_bytes: usize,
}

/// 缓存统计信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub is_loaded: bool,
    /// 最近一次成功加载的时间（ISO-8601），未加载时为 null
    pub last_updated: Option<DateTime<Utc>>,
    pub classes_count: usize,
    pub fields_count: usize,
    pub memory_usage: MemoryUsage,
}

impl CacheStats {
    fn unloaded() -> Self {
        Self {
            is_loaded: false,
            last_updated: None,
            classes_count: 0,
            fields_count: 0,
            memory_usage: MemoryUsage::default(),
        }
    }
}

/// 估算快照占用的内存
///
/// 每条记录按配置的基础字节数计，再加上字符串内容长度
fn estimate_memory_usage(snapshot: &Snapshot, estimate: &MemoryEstimateConfig) -> MemoryUsage {
    let classes_bytes: usize = snapshot
        .classes
        .iter()
        .map(|class| {
            let record = &class.record;
            estimate.class_bytes
                + record.name.len()
                + record.class_type.len()
                + record.description.as_ref().map_or(0, String::len)
        })
        .sum();

    let fields_bytes: usize = snapshot
        .fields
        .iter()
        .map(|field| {
            let record = &field.record;
            estimate.field_bytes
                + record.name.len()
                + record.field_type.len()
                + record.default_value.as_ref().map_or(0, String::len)
                + record.description.as_ref().map_or(0, String::len)
        })
        .sum();

    MemoryUsage {
        classes_bytes,
        fields_bytes,
        total_bytes: classes_bytes + fields_bytes,
    }
}

impl DataCache {
    /// 获取缓存统计信息
    pub fn stats(&self) -> CacheStats {
        self.with_snapshot(|snapshot| CacheStats {
            is_loaded: true,
            last_updated: Some(snapshot.last_updated),
            classes_count: snapshot.classes.len(),
            fields_count: snapshot.fields.len(),
            memory_usage: estimate_memory_usage(snapshot, &self.config.memory_estimate),
        })
        .unwrap_or_else(|_| CacheStats::unloaded())
    }

    /// 获取查找和加载的性能统计
    pub fn performance(&self) -> CachePerformanceStats {
        self.counters.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, FieldClass};

    #[test]
    fn test_stats_before_and_after_load() {
        let cache = DataCache::default();
        let stats = cache.stats();
        assert!(!stats.is_loaded);
        assert_eq!(stats.last_updated, None);
        assert_eq!(stats.memory_usage.total_bytes, 0);

        cache
            .load(
                vec![FieldClass::new(1, "Customer", "entity")],
                vec![Field::new(10, 1, "email", "string"), Field::new(11, 2, "orphan", "string")],
            )
            .expect("加载失败");

        let stats = cache.stats();
        assert!(stats.is_loaded);
        assert!(stats.last_updated.is_some());
        assert_eq!(stats.classes_count, 1);
        assert_eq!(stats.fields_count, 1);
        // 200 + "Customer" + "entity"
        assert_eq!(stats.memory_usage.classes_bytes, 200 + 8 + 6);
        // 150 + "email" + "string"
        assert_eq!(stats.memory_usage.fields_bytes, 150 + 5 + 6);
        assert_eq!(
            stats.memory_usage.total_bytes,
            stats.memory_usage.classes_bytes + stats.memory_usage.fields_bytes
        );
    }

    #[test]
    fn test_stats_payload_keys() {
        let cache = DataCache::default();
        cache
            .load(vec![FieldClass::new(1, "Customer", "entity")], vec![])
            .expect("加载失败");

        let value = serde_json::to_value(cache.stats()).expect("统计序列化失败");
        for key in ["is_loaded", "last_updated", "classes_count", "fields_count", "memory_usage"] {
            assert!(value.get(key).is_some(), "缺少键: {}", key);
        }
        for key in ["classes_bytes", "fields_bytes", "total_bytes"] {
            assert!(value["memory_usage"].get(key).is_some(), "缺少键: memory_usage.{}", key);
        }
        assert!(value["last_updated"].as_str().is_some());
    }

    #[test]
    fn test_hit_rate_without_lookups() {
        assert_eq!(CachePerformanceStats::default().hit_rate(), 0.0);
    }
}
