//! # 全局配置构建器模块
//!
//! 提供全局配置的构建器实现，支持链式调用和严格验证

use crate::config::core::{AppConfig, GlobalConfig, LoggingConfig, SourceConfig};
use crate::error::MetaCacheError;
use crate::types::CacheConfig;
use rat_logger::info;

/// 全局配置构建器
///
/// 提供链式配置接口，支持流畅的API调用
#[derive(Debug, Default)]
pub struct GlobalConfigBuilder {
    app: Option<AppConfig>,
    logging: Option<LoggingConfig>,
    cache: Option<CacheConfig>,
    source: Option<SourceConfig>,
}

impl GlobalConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置应用配置
    pub fn app(mut self, app: AppConfig) -> Self {
        self.app = Some(app);
        self
    }

    /// 设置日志配置
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// 设置缓存配置
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// 设置数据源配置
    ///
    /// # 参数
    ///
    /// * `source` - 数据集文件或存储目录
    pub fn source(mut self, source: SourceConfig) -> Self {
        self.source = Some(source);
        self
    }

    /// 构建全局配置
    ///
    /// # 错误
    ///
    /// 如果任何必需的配置项未设置，将返回错误
    pub fn build(self) -> Result<GlobalConfig, MetaCacheError> {
        let app = self
            .app
            .ok_or_else(|| crate::quick_error!(config, "应用配置必须设置"))?;

        let logging = self
            .logging
            .ok_or_else(|| crate::quick_error!(config, "日志配置必须设置"))?;

        let cache = self
            .cache
            .ok_or_else(|| crate::quick_error!(config, "缓存配置必须设置"))?;

        let source = self
            .source
            .ok_or_else(|| crate::quick_error!(config, "数据源配置必须设置"))?;

        if let SourceConfig::LatestInDir { prefix, suffix, .. } = &source {
            if prefix.is_empty() && suffix.is_empty() {
                return Err(crate::quick_error!(config, "存储目录数据源必须指定文件名前缀或后缀"));
            }
        }

        info!("创建全局配置: 应用={}, 数据源={:?}", app.name, source);

        Ok(GlobalConfig {
            app,
            logging,
            cache,
            source,
        })
    }
}
