use serde::{Deserialize, Serialize};

/// 元数据缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 重名处理策略（字段类名、字段名）
    pub duplicate_name_policy: DuplicateNamePolicy,
    /// 是否允许加载器返回空的字段类列表
    pub allow_empty_dataset: bool,
    /// 自动重载间隔（秒），None 表示不自动重载
    #[serde(default)]
    pub reload_interval_secs: Option<u64>,
    /// 内存估算参数
    #[serde(default)]
    pub memory_estimate: MemoryEstimateConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            duplicate_name_policy: DuplicateNamePolicy::LastWriteWins,
            allow_empty_dataset: false,
            reload_interval_secs: None,
            memory_estimate: MemoryEstimateConfig::default(),
        }
    }
}

/// 重名处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateNamePolicy {
    /// 按加载顺序后写入者生效，记录警告
    LastWriteWins,
    /// 重名视为结构性错误，放弃本次加载
    Reject,
}

/// 内存估算配置（每条记录的粗略字节数）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEstimateConfig {
    /// 每个字段类的估算字节数
    pub class_bytes: usize,
    /// 每个字段的估算字节数
    pub field_bytes: usize,
}

impl Default for MemoryEstimateConfig {
    fn default() -> Self {
        Self {
            class_bytes: 200,
            field_bytes: 150,
        }
    }
}
