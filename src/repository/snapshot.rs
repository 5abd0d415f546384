// ==========================================
// 工单缓存同步系统 - 平面快照仓储
// ==========================================
// 格式: JSON 文档 {timestamp_data, timestamp_save, workorders}
// 对齐: .pro_cache 快照文件（记录字段 camelCase）
// ==========================================

use crate::repository::error::RepositoryResult;
use crate::repository::PersistenceAdapter;
use crate::domain::workorder::WorkOrderRecord;
use crate::store::RecordStore;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ==========================================
// CacheSnapshot - 缓存快照文档
// ==========================================

/// 缓存快照
///
/// 持久化的序列化形态,字段与磁盘文档一一对应。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// 最后一次成功同步时间
    pub timestamp_data: Option<DateTime<Utc>>,
    /// 最后一次持久化时间
    pub timestamp_save: Option<DateTime<Utc>>,
    /// 工单记录（保持缓存内顺序）
    pub workorders: Vec<WorkOrderRecord>,
}

impl CacheSnapshot {
    /// 从缓存导出快照
    pub fn from_store(store: &RecordStore) -> Self {
        Self {
            timestamp_data: store.timestamp_data(),
            timestamp_save: store.timestamp_save(),
            workorders: store.iter().cloned().collect(),
        }
    }

    /// 还原为缓存（不做去重,完整性校验由调用方执行）
    pub fn into_store(self) -> RecordStore {
        RecordStore::from_parts(self.timestamp_data, self.timestamp_save, self.workorders)
    }
}

// ==========================================
// SnapshotRepository - JSON 平面文件仓储
// ==========================================

/// JSON 平面文件快照仓储
pub struct SnapshotRepository {
    path: PathBuf,
}

impl SnapshotRepository {
    /// 创建指向给定快照文件的仓储
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认快照文件名: "YYYY-M-D@HH-MM.pro_cache"（本地时间）
    pub fn default_file_name() -> String {
        let now = Local::now();
        format!("{}.pro_cache", now.format("%Y-%-m-%-d@%H-%M"))
    }

    /// 快照文件路径
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PersistenceAdapter for SnapshotRepository {
    fn load(&self) -> RepositoryResult<CacheSnapshot> {
        let content = fs::read_to_string(&self.path)?;
        let snapshot: CacheSnapshot = serde_json::from_str(&content)?;

        tracing::debug!(
            "快照已读取: path={}, {} 条记录",
            self.path.display(),
            snapshot.workorders.len()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &CacheSnapshot) -> RepositoryResult<()> {
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, content)?;

        tracing::debug!(
            "快照已写入: path={}, {} 条记录",
            self.path.display(),
            snapshot.workorders.len()
        );
        Ok(())
    }
}
