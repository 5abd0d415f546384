// ==========================================
// 工单缓存同步系统 - 配置层
// ==========================================
// 职责: 同步参数的加载、默认值与持久化
// 存储: JSON 配置文件
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// 默认并发请求数
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 3;

/// 默认远程查询标识集合
///
/// 远程系统中预置的部门保存查询,按业务约定顺序执行。
pub const DEFAULT_QUERIES: [&str; 5] = ["query55", "query56", "query59", "query57", "query58"];

// ==========================================
// SyncConfig - 同步配置
// ==========================================

/// 同步配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// 并发请求上限（worker 池规模）
    pub max_concurrent_requests: usize,
    /// 远程查询标识列表
    pub queries: Vec<String>,
    /// 快照/数据库默认存放目录
    pub cache_dir: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl SyncConfig {
    /// 从 JSON 配置文件加载
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        let config: SyncConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置,失败时回退默认值
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "配置加载失败,使用默认配置: path={}, error={}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// 保存配置到 JSON 文件
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 默认缓存目录（平台数据目录下）
fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("workorder-cache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.max_concurrent_requests, 3);
        assert_eq!(config.queries.len(), 5);
        assert_eq!(config.queries[0], "query55");
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        // serde(default): 缺省字段取默认值
        let config: SyncConfig =
            serde_json::from_str(r#"{ "max_concurrent_requests": 8 }"#).unwrap();
        assert_eq!(config.max_concurrent_requests, 8);
        assert_eq!(config.queries.len(), 5);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = SyncConfig::load_or_default(Path::new("/nonexistent/sync.json"));
        assert_eq!(config.max_concurrent_requests, 3);
    }
}
