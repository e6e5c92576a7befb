use super::MetadataLoader;
use crate::error::{MetaCacheError, MetaCacheResult};
use crate::types::{Field, FieldClass};
use async_trait::async_trait;
use rat_logger::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 数据集文件格式
///
/// ```json
/// { "field_classes": [ ... ], "fields": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub field_classes: Vec<FieldClass>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl DatasetFile {
    /// 按扩展名解析（.toml 为 TOML，其余按 JSON）
    pub fn parse(path: &Path, content: &str) -> MetaCacheResult<Self> {
        if is_toml(path) {
            toml::from_str(content).map_err(|e| {
                crate::quick_error!(serialization, format!("解析TOML数据集失败 {:?}: {}", path, e))
            })
        } else {
            serde_json::from_str(content).map_err(|e| {
                crate::quick_error!(serialization, format!("解析JSON数据集失败 {:?}: {}", path, e))
            })
        }
    }

    /// 按扩展名序列化
    pub fn render(&self, path: &Path) -> MetaCacheResult<String> {
        if is_toml(path) {
            toml::to_string_pretty(self)
                .map_err(|e| crate::quick_error!(serialization, format!("序列化TOML数据集失败: {}", e)))
        } else {
            Ok(serde_json::to_string_pretty(self)?)
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}

/// 数据集文件位置
#[derive(Debug, Clone)]
enum DatasetLocation {
    /// 固定文件
    Fixed(PathBuf),
    /// 每次加载时选取目录中最新的匹配文件
    Latest {
        dir: PathBuf,
        prefix: String,
        suffix: String,
    },
}

/// 文件数据加载器
#[derive(Debug, Clone)]
pub struct FileLoader {
    location: DatasetLocation,
}

impl FileLoader {
    /// 从固定文件加载
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            location: DatasetLocation::Fixed(path.into()),
        }
    }

    /// 每次加载时从存储目录中选取修改时间最新、文件名匹配前后缀的数据集
    pub fn latest_in<P: Into<PathBuf>>(dir: P, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            location: DatasetLocation::Latest {
                dir: dir.into(),
                prefix: prefix.into(),
                suffix: suffix.into(),
            },
        }
    }

    /// 解析本次加载要读取的文件
    pub async fn resolve_path(&self) -> MetaCacheResult<PathBuf> {
        match &self.location {
            DatasetLocation::Fixed(path) => Ok(path.clone()),
            DatasetLocation::Latest { dir, prefix, suffix } => find_latest(dir, prefix, suffix).await,
        }
    }

    async fn read_dataset(&self) -> MetaCacheResult<DatasetFile> {
        let path = self.resolve_path().await?;
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            crate::quick_error!(loader, format!("读取数据集文件失败 {:?}: {}", path, e))
        })?;
        let dataset = DatasetFile::parse(&path, &content)?;
        info!(
            "从文件读取数据集: {:?}, 字段类={}, 字段={}",
            path,
            dataset.field_classes.len(),
            dataset.fields.len()
        );
        Ok(dataset)
    }
}

async fn find_latest(dir: &Path, prefix: &str, suffix: &str) -> MetaCacheResult<PathBuf> {
    let dir_display = dir.display().to_string();
    if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
        return Err(MetaCacheError::LoaderError {
            message: crate::i18n::tf("error.dataset_dir_missing", &[("path", dir_display.as_str())]),
        });
    }

    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !name.starts_with(prefix) || !name.ends_with(suffix) {
            continue;
        }
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        debug!("发现候选数据集文件: {}, 修改时间={:?}", name, modified);

        let newer = match &latest {
            Some((best, best_path)) => modified > *best || (modified == *best && entry.path() > *best_path),
            None => true,
        };
        if newer {
            latest = Some((modified, entry.path()));
        }
    }

    latest.map(|(_, path)| path).ok_or_else(|| MetaCacheError::LoaderError {
        message: crate::i18n::tf("error.dataset_not_found", &[("path", dir_display.as_str())]),
    })
}

#[async_trait]
impl MetadataLoader for FileLoader {
    async fn load_field_classes(&self) -> MetaCacheResult<Vec<FieldClass>> {
        Ok(self.read_dataset().await?.field_classes)
    }

    async fn load_fields(&self) -> MetaCacheResult<Vec<Field>> {
        Ok(self.read_dataset().await?.fields)
    }

    async fn load_dataset(&self) -> MetaCacheResult<(Vec<FieldClass>, Vec<Field>)> {
        let dataset = self.read_dataset().await?;
        Ok((dataset.field_classes, dataset.fields))
    }

    fn source(&self) -> String {
        match &self.location {
            DatasetLocation::Fixed(path) => format!("file:{}", path.display()),
            DatasetLocation::Latest { dir, prefix, suffix } => {
                format!("dir:{}/{}*{}", dir.display(), prefix, suffix)
            }
        }
    }
}
