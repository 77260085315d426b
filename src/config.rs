//! 解析器配置
//!
//! 配置读取优先级：
//! 1. 环境变量 `DECIDEX_CONFIG` 指定的文件
//! 2. `~/.config/decidex/config.json`
//! 3. 内置默认值
//!
//! 配置文件为 JSON 格式，所有字段可选：
//! `{"analysis_markers": ["成本总览", ...], "default_message": "请选择以下问题"}`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::interpreter::classifier::ANALYSIS_MARKERS;
use crate::interpreter::types::DEFAULT_QUESTION_MESSAGE;

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "DECIDEX_CONFIG";

/// 默认配置文件（相对 home 目录）
pub const DEFAULT_CONFIG_PATH: &str = ".config/decidex/config.json";

/// 解析器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// 成本分析报告特征短语
    pub analysis_markers: Vec<String>,
    /// 自动包装问题集时使用的提示语
    pub default_message: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            analysis_markers: ANALYSIS_MARKERS.iter().map(|m| m.to_string()).collect(),
            default_message: DEFAULT_QUESTION_MESSAGE.to_string(),
        }
    }
}

impl InterpreterConfig {
    /// 从指定文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        debug!(path = %path.display(), markers = config.analysis_markers.len(), "Loaded interpreter config");
        Ok(config)
    }

    /// 按优先级自动加载，全部失败时使用默认值
    pub fn auto_load() -> Self {
        // 1. 环境变量指定的文件：显式指定但不存在时告警
        if let Some(path) = Self::env_config_path() {
            if path.exists() {
                if let Some(config) = Self::try_load(&path) {
                    return config;
                }
            } else {
                warn!(path = %path.display(), "{} points to a missing file, ignoring", CONFIG_ENV_VAR);
            }
        }

        // 2. ~/.config/decidex/config.json
        if let Some(home) = dirs::home_dir() {
            let path = home.join(DEFAULT_CONFIG_PATH);
            if path.exists() {
                if let Some(config) = Self::try_load(&path) {
                    return config;
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn env_config_path() -> Option<PathBuf> {
        std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    fn try_load(path: &Path) -> Option<Self> {
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(error = %e, "Skipping unusable config file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InterpreterConfig::default();
        assert_eq!(config.analysis_markers, vec!["成本总览", "显性成本", "决策建议"]);
        assert_eq!(config.default_message, "请选择以下问题");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: InterpreterConfig =
            serde_json::from_str(r#"{"default_message": "请回答"}"#).unwrap();
        assert_eq!(config.default_message, "请回答");
        assert_eq!(config.analysis_markers.len(), 3);
    }
}
