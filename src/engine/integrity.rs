// ==========================================
// 工单缓存同步系统 - 完整性校验
// ==========================================
// 职责: 缓存唯一性不变量校验（按键值比较,非对象同一性）
// 用途: 快照恢复后、接受为活动缓存前的健全性检查
// ==========================================

use crate::store::RecordStore;
use std::collections::HashSet;

// ==========================================
// IntegrityChecker - 完整性校验器
// ==========================================

/// 缓存完整性校验器
pub struct IntegrityChecker;

impl IntegrityChecker {
    /// 唯一性校验: 单次遍历,首个重复键即返回 false
    ///
    /// 重复检测按 index 键值比较。空缓存视为通过。
    pub fn verify(store: &RecordStore) -> bool {
        let mut seen: HashSet<&str> = HashSet::with_capacity(store.len());

        for wo in store.iter() {
            if !seen.insert(wo.index.as_str()) {
                tracing::error!("完整性校验失败: 重复工单号 {}", wo.index);
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WorkOrderStatus;
    use crate::domain::workorder::WorkOrderRecord;

    #[test]
    fn test_verify_empty_store() {
        assert!(IntegrityChecker::verify(&RecordStore::new()));
    }

    #[test]
    fn test_verify_store_built_via_upsert() {
        let mut store = RecordStore::new();
        for i in 0..10 {
            store.upsert(WorkOrderRecord::new(
                format!("10-{:04}", i),
                WorkOrderStatus::Active,
                1,
            ));
            // 重复 upsert 不产生重复键
            store.upsert(WorkOrderRecord::new(
                format!("10-{:04}", i),
                WorkOrderStatus::Complete,
                1,
            ));
        }

        assert!(IntegrityChecker::verify(&store));
    }

    #[test]
    fn test_verify_detects_injected_duplicate() {
        // 构造快照注入的重复键: 键值相等但字段不同的两条记录
        let store = RecordStore::from_parts(
            None,
            None,
            vec![
                WorkOrderRecord::new("10-0001", WorkOrderStatus::Active, 1),
                WorkOrderRecord::new("10-0002", WorkOrderStatus::Active, 2),
                WorkOrderRecord::new("10-0001", WorkOrderStatus::Shipped, 3),
            ],
        );

        assert!(!IntegrityChecker::verify(&store));
    }
}
