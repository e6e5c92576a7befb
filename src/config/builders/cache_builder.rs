//! # 缓存配置构建器模块
//!
//! 提供元数据缓存配置的构建器实现，支持链式调用和严格验证

use crate::error::MetaCacheError;
use crate::types::{CacheConfig, DuplicateNamePolicy, MemoryEstimateConfig};
use rat_logger::info;

/// 缓存配置构建器
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    duplicate_name_policy: Option<DuplicateNamePolicy>,
    allow_empty_dataset: Option<bool>,
    reload_interval_secs: Option<u64>,
    memory_estimate: Option<MemoryEstimateConfig>,
}

impl CacheConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置重名处理策略
    ///
    /// # 参数
    ///
    /// * `policy` - 后写入者生效或视为结构性错误
    pub fn duplicate_name_policy(mut self, policy: DuplicateNamePolicy) -> Self {
        self.duplicate_name_policy = Some(policy);
        self
    }

    /// 设置是否允许空数据集
    pub fn allow_empty_dataset(mut self, allow: bool) -> Self {
        self.allow_empty_dataset = Some(allow);
        self
    }

    /// 设置自动重载间隔（秒）
    ///
    /// 不设置表示不启用自动重载
    pub fn reload_interval_secs(mut self, secs: u64) -> Self {
        self.reload_interval_secs = Some(secs);
        self
    }

    /// 设置内存估算参数
    pub fn memory_estimate(mut self, class_bytes: usize, field_bytes: usize) -> Self {
        self.memory_estimate = Some(MemoryEstimateConfig {
            class_bytes,
            field_bytes,
        });
        self
    }

    /// 构建缓存配置
    ///
    /// # 错误
    ///
    /// 重名策略和空数据集选项必须显式设置；自动重载间隔不能为零
    pub fn build(self) -> Result<CacheConfig, MetaCacheError> {
        let duplicate_name_policy = self
            .duplicate_name_policy
            .ok_or_else(|| crate::quick_error!(config, "重名处理策略必须设置"))?;

        let allow_empty_dataset = self
            .allow_empty_dataset
            .ok_or_else(|| crate::quick_error!(config, "空数据集选项必须设置"))?;

        if self.reload_interval_secs == Some(0) {
            return Err(crate::quick_error!(config, "自动重载间隔不能为零"));
        }

        info!(
            "创建缓存配置: 重名策略={:?}, 允许空数据集={}, 自动重载间隔={:?}",
            duplicate_name_policy, allow_empty_dataset, self.reload_interval_secs
        );

        Ok(CacheConfig {
            duplicate_name_policy,
            allow_empty_dataset,
            reload_interval_secs: self.reload_interval_secs,
            memory_estimate: self.memory_estimate.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_items_must_be_set() {
        let err = CacheConfigBuilder::new().allow_empty_dataset(false).build().unwrap_err();
        assert!(matches!(err, MetaCacheError::ConfigError { .. }));

        let err = CacheConfigBuilder::new()
            .duplicate_name_policy(DuplicateNamePolicy::Reject)
            .build()
            .unwrap_err();
        assert!(matches!(err, MetaCacheError::ConfigError { .. }));
    }

    #[test]
    fn test_zero_reload_interval_rejected() {
        let err = CacheConfigBuilder::new()
            .duplicate_name_policy(DuplicateNamePolicy::LastWriteWins)
            .allow_empty_dataset(false)
            .reload_interval_secs(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, MetaCacheError::ConfigError { .. }));
    }

    #[test]
    fn test_build_cache_config() {
        let config = CacheConfigBuilder::new()
            .duplicate_name_policy(DuplicateNamePolicy::Reject)
            .allow_empty_dataset(true)
            .reload_interval_secs(60)
            .memory_estimate(256, 128)
            .build()
            .expect("构建缓存配置失败");

        assert_eq!(config.duplicate_name_policy, DuplicateNamePolicy::Reject);
        assert!(config.allow_empty_dataset);
        assert_eq!(config.reload_interval_secs, Some(60));
        assert_eq!(config.memory_estimate.class_bytes, 256);
        assert_eq!(config.memory_estimate.field_bytes, 128);
    }
}
