//! 配置模块，负责加载JSON配置文件
//!
//! ```json
//! {
//!     "species": ["Job", "Task"],
//!     "groups": { "Job": "Jobs" },
//!     "tables": { "Job": "jobs" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 搜索配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    NotFound { path: String },
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("无法解析JSON配置文件 {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn default_species() -> Vec<String> {
    vec!["Job".to_string()]
}

/// 不规则复数的分组名；文件配置缺省 `groups` 时与 `Default` 相同
fn default_groups() -> HashMap<String, String> {
    let mut groups = HashMap::new();
    groups.insert("Job".to_string(), "Jobs".to_string());
    groups.insert("Company".to_string(), "Companies".to_string());
    groups
}

/// 搜索配置结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// 参与解析的物种名
    #[serde(default = "default_species")]
    pub species: Vec<String>,
    /// 物种名到结果分组名的映射
    #[serde(default = "default_groups")]
    pub groups: HashMap<String, String>,
    /// 物种名到数据库表名的映射
    #[serde(default)]
    pub tables: HashMap<String, String>,
}

impl SearchConfig {
    /// 从JSON文件加载搜索配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        // 检查文件是否存在
        if !path_ref.exists() {
            return Err(ConfigError::NotFound {
                path: path_ref.display().to_string(),
            });
        }

        // 读取文件内容
        let content = fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;

        // 解析JSON
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path_ref.display().to_string(),
            source,
        })
    }

    /// 获取物种对应的分组名，如果不存在则在物种名后加 "s"
    pub fn get_group_label(&self, species: &str) -> String {
        self.groups
            .get(species)
            .cloned()
            .unwrap_or_else(|| format!("{}s", species))
    }

    /// 获取物种对应的表名，如果不存在则返回小写的分组名
    pub fn get_table_name(&self, species: &str) -> String {
        self.tables
            .get(species)
            .cloned()
            .unwrap_or_else(|| self.get_group_label(species).to_lowercase())
    }
}

impl Default for SearchConfig {
    /// 默认只接通 Job；分组名覆盖不规则复数
    fn default() -> Self {
        Self {
            species: default_species(),
            groups: default_groups(),
            tables: HashMap::new(),
        }
    }
}
