//! 编辑器配置模块
//!
//! 提供编辑器配置的加载、保存和管理功能。配置以 JSON 文件存储，
//! 缺失的字段用默认值填充，文件不存在时返回默认配置。
//!
//! # 使用示例
//!
//! ```no_run
//! use std::path::Path;
//! use courseflow_lib::editor::{ConfigManager, EditorConfig};
//!
//! let path = Path::new("config.json");
//!
//! // 加载配置
//! let mut config = ConfigManager::load(path).unwrap();
//!
//! // 修改并保存
//! config.listener_capacity = 64;
//! ConfigManager::save(path, &config).unwrap();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::course::Category;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 配置结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 默认监听器通道容量
pub const DEFAULT_LISTENER_CAPACITY: usize = 32;

/// 编辑器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// 新建课程的默认分类
    pub default_category: Category,
    /// 监听器通道容量
    pub listener_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_category: Category::default(),
            listener_capacity: DEFAULT_LISTENER_CAPACITY,
        }
    }
}

/// 配置管理器
///
/// 提供配置的加载、保存和管理功能
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// 从配置文件加载配置，如果文件不存在则返回默认配置
    pub fn load(path: &Path) -> ConfigResult<EditorConfig> {
        tracing::debug!(path = %path.display(), "Loading config");

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            tracing::info!(path = %path.display(), "Config loaded successfully");
            Ok(config)
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(EditorConfig::default())
        }
    }

    /// 保存配置
    ///
    /// 将配置保存到配置文件，父目录不存在时自动创建
    pub fn save(path: &Path, config: &EditorConfig) -> ConfigResult<()> {
        tracing::debug!(path = %path.display(), "Saving config");

        // 确保目录存在
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "Config saved successfully");
        Ok(())
    }

    /// 检查配置文件是否存在
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// 删除配置文件
    pub fn delete(path: &Path) -> ConfigResult<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
            tracing::info!(path = %path.display(), "Config deleted");
        }
        Ok(())
    }

    /// 重置为默认配置
    pub fn reset(path: &Path) -> ConfigResult<EditorConfig> {
        let config = EditorConfig::default();
        Self::save(path, &config)?;
        tracing::info!("Config reset to defaults");
        Ok(config)
    }
}
