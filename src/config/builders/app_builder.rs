//! # 应用配置构建器模块

use crate::config::core::{AppConfig, Environment};
use crate::error::MetaCacheError;
use rat_logger::info;

/// 应用配置构建器
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    name: Option<String>,
    environment: Option<Environment>,
    debug: Option<bool>,
}

impl AppConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置应用名称
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 设置环境类型
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// 设置调试模式
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// 构建应用配置
    ///
    /// # 错误
    ///
    /// 如果任何必需的配置项未设置，将返回错误
    pub fn build(self) -> Result<AppConfig, MetaCacheError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| crate::quick_error!(config, "应用名称必须设置且不能为空"))?;

        let environment = self
            .environment
            .ok_or_else(|| crate::quick_error!(config, "环境类型必须设置"))?;

        let debug = self
            .debug
            .ok_or_else(|| crate::quick_error!(config, "调试模式必须设置"))?;

        info!("创建应用配置: 名称={}, 环境={:?}", name, environment);

        Ok(AppConfig {
            name,
            environment,
            debug,
        })
    }
}
