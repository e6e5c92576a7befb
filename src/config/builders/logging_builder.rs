//! # 日志配置构建器模块

use crate::config::core::{LogLevel, LoggingConfig};
use crate::error::MetaCacheError;
use std::path::PathBuf;

/// 日志配置构建器
#[derive(Debug, Default)]
pub struct LoggingConfigBuilder {
    level: Option<LogLevel>,
    console: Option<bool>,
    file_path: Option<PathBuf>,
}

impl LoggingConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置日志级别
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// 设置是否输出到控制台
    pub fn console(mut self, console: bool) -> Self {
        self.console = Some(console);
        self
    }

    /// 设置日志文件路径
    pub fn file_path<P: Into<PathBuf>>(mut self, file_path: P) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// 构建日志配置
    ///
    /// 控制台和文件至少要启用一个输出
    pub fn build(self) -> Result<LoggingConfig, MetaCacheError> {
        let level = self
            .level
            .ok_or_else(|| crate::quick_error!(config, "日志级别必须设置"))?;

        let console = self
            .console
            .ok_or_else(|| crate::quick_error!(config, "控制台输出选项必须设置"))?;

        if !console && self.file_path.is_none() {
            return Err(crate::quick_error!(config, "控制台和日志文件至少需要启用一个"));
        }

        Ok(LoggingConfig {
            level,
            console,
            file_path: self.file_path,
        })
    }
}
