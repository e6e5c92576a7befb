//! 维护操作相关方法

use crate::error::MetaCacheResult;
use rat_logger::{debug, info, warn};
use tokio::time::{interval, Duration, MissedTickBehavior};

use super::manager::reload_from;
use super::MetadataManager;

impl MetadataManager {
    /// 启动自动重载任务
    ///
    /// 任务已在运行时不会重复启动；重载失败只记录日志，旧快照继续可用
    pub async fn start_auto_reload(&self, period: Duration) -> MetaCacheResult<()> {
        if period.is_zero() {
            return Err(crate::quick_error!(config, "自动重载间隔不能为零"));
        }

        let mut reload_handle = self.reload_handle.write().await;

        // 如果重载任务已经在运行，不需要重复启动
        if reload_handle.is_some() {
            return Ok(());
        }

        let cache = self.cache.clone();
        let loader = self.loader.clone();
        let reload_lock = self.reload_lock.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // 第一次tick立即返回，跳过它
            ticker.tick().await;

            info!("启动元数据自动重载任务: 间隔={:?}", period);

            loop {
                ticker.tick().await;

                debug!("执行元数据自动重载");

                if let Err(e) = reload_from(&cache, loader.as_ref(), &reload_lock).await {
                    warn!("元数据自动重载失败: {}", e);
                }
            }
        });

        *reload_handle = Some(handle);
        Ok(())
    }

    /// 按缓存配置启动自动重载，未配置间隔时什么都不做
    pub async fn start_configured_auto_reload(&self) -> MetaCacheResult<bool> {
        match self.cache.config().reload_interval_secs {
            Some(secs) => {
                self.start_auto_reload(Duration::from_secs(secs)).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 停止自动重载任务
    pub async fn stop_auto_reload(&self) {
        let mut reload_handle = self.reload_handle.write().await;

        if let Some(handle) = reload_handle.take() {
            handle.abort();
            info!("元数据自动重载任务已停止");
        }
    }
}
