//! 配置模块, 负责加载JSON配置文件

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 默认的Filter参数名前缀.
pub const DEFAULT_FILTER_PREFIX: &str = "filter";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    Missing { path: String },
    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("无法解析JSON配置文件 {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Filter解析配置.
///
/// `date_formats` 按顺序逐个尝试, 只有日期部分的格式解析为当天零点.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// 参数名前缀, 默认为 "filter"
    #[serde(default = "default_prefix")]
    pub filter_prefix: String,
    /// D类型值接受的日期格式列表
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

fn default_prefix() -> String {
    DEFAULT_FILTER_PREFIX.to_string()
}

fn default_date_formats() -> Vec<String> {
    crate::convert::DEFAULT_DATE_FORMATS
        .iter()
        .map(|format| format.to_string())
        .collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_prefix: default_prefix(),
            date_formats: default_date_formats(),
        }
    }
}

impl FilterConfig {
    /// 从JSON文件加载配置.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::Missing {
                path: path_ref.display().to_string(),
            });
        }

        let content = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path_ref.display().to_string(),
            source,
        })
    }
}
