// ==========================================
// 工单缓存同步系统 - 工单记录缓存
// ==========================================
// 职责: 独占持有工单记录集合与同步/保存时间戳
// 红线: upsert 永不产生重复 index; 刷新只增不删
// ==========================================

use crate::domain::types::CacheFreshness;
use crate::domain::workorder::{WorkOrderFilter, WorkOrderRecord};
use chrono::{DateTime, Local, Utc};
use std::collections::HashSet;

// ==========================================
// RecordStore - 工单记录缓存
// ==========================================

/// 工单记录缓存
///
/// 记录按插入顺序保存，以 `index` 为唯一键。
/// 生命周期: 新建为空 / 从快照恢复；仅由调度器合并写入；
/// 整体替换通过显式 reset 完成，刷新过程从不删除未匹配记录。
#[derive(Debug, Clone)]
pub struct RecordStore {
    // 最后一次成功同步时间（None = 从未同步）
    timestamp_data: Option<DateTime<Utc>>,
    // 最后一次持久化时间（None = 从未保存）
    timestamp_save: Option<DateTime<Utc>>,
    // 工单记录（插入有序, index 唯一）
    workorders: Vec<WorkOrderRecord>,
}

impl RecordStore {
    /// 创建空缓存
    pub fn new() -> Self {
        Self {
            timestamp_data: None,
            timestamp_save: None,
            workorders: Vec::new(),
        }
    }

    /// 从快照字段恢复缓存
    ///
    /// 说明: 不做去重——完整性校验由 IntegrityChecker 在接受快照前执行。
    pub fn from_parts(
        timestamp_data: Option<DateTime<Utc>>,
        timestamp_save: Option<DateTime<Utc>>,
        workorders: Vec<WorkOrderRecord>,
    ) -> Self {
        Self {
            timestamp_data,
            timestamp_save,
            workorders,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 按工单号查找记录
    pub fn lookup(&self, index: &str) -> Option<&WorkOrderRecord> {
        self.workorders.iter().find(|wo| wo.index == index)
    }

    /// 是否包含指定工单号
    pub fn contains(&self, index: &str) -> bool {
        self.lookup(index).is_some()
    }

    /// 按过滤器查询记录（状态相等 AND 资源前缀,两条件均可选）
    pub fn filter(&self, options: &WorkOrderFilter) -> Vec<&WorkOrderRecord> {
        self.workorders
            .iter()
            .filter(|wo| {
                // 状态过滤
                if let Some(status) = options.status {
                    if wo.status != status {
                        return false;
                    }
                }

                // 资源前缀过滤（任一工序行,忽略大小写）
                if let Some(resource) = &options.resource {
                    if !wo.contains_resource_prefix(resource) {
                        return false;
                    }
                }

                true
            })
            .collect()
    }

    /// 遍历全部记录
    pub fn iter(&self) -> impl Iterator<Item = &WorkOrderRecord> {
        self.workorders.iter()
    }

    /// 记录总数
    pub fn len(&self) -> usize {
        self.workorders.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.workorders.is_empty()
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 插入或替换记录
    ///
    /// 已存在同 index 的记录时原位替换（保持位置），否则追加。
    ///
    /// # 返回
    /// - true: 替换了已有记录
    /// - false: 追加了新记录
    pub fn upsert(&mut self, record: WorkOrderRecord) -> bool {
        match self.workorders.iter_mut().find(|wo| wo.index == record.index) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.workorders.push(record);
                false
            }
        }
    }

    // ==========================================
    // 时间戳与新鲜度
    // ==========================================

    /// 最后一次成功同步时间
    pub fn timestamp_data(&self) -> Option<DateTime<Utc>> {
        self.timestamp_data
    }

    /// 最后一次持久化时间
    pub fn timestamp_save(&self) -> Option<DateTime<Utc>> {
        self.timestamp_save
    }

    /// 记录同步完成时刻
    pub fn touch_data_timestamp(&mut self) {
        self.timestamp_data = Some(Utc::now());
    }

    /// 记录持久化时刻
    pub fn touch_save_timestamp(&mut self) {
        self.timestamp_save = Some(Utc::now());
    }

    /// 缓存新鲜度判定
    ///
    /// 判定顺序:
    /// 1. 从未同步 → EMPTY
    /// 2. 最后同步不在今天（本地日历日） → OUTDATED
    /// 3. 同步晚于保存 → UNSAVED_CHANGES
    /// 4. 今天已同步且已保存 → OK
    /// 5. 其余 → ERROR（正常运行不可达）
    pub fn freshness(&self) -> CacheFreshness {
        let data = match self.timestamp_data {
            None => return CacheFreshness::Empty,
            Some(t) => t,
        };

        let today = Local::now().date_naive();
        let data_day = data.with_timezone(&Local).date_naive();

        if data_day != today {
            return CacheFreshness::Outdated;
        }

        let saved = self
            .timestamp_save
            .map(|save| data <= save)
            .unwrap_or(false);

        if !saved {
            return CacheFreshness::UnsavedChanges;
        }

        if data_day == today {
            return CacheFreshness::Ok;
        }

        CacheFreshness::Error
    }

    // ==========================================
    // 完整性
    // ==========================================

    /// 唯一性校验: 不存在两条记录共享同一 index（按键值比较）
    pub fn verify_integrity(&self) -> bool {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.workorders.len());

        for wo in &self.workorders {
            if !seen.insert(wo.index.as_str()) {
                return false;
            }
        }

        true
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
