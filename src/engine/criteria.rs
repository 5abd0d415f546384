// ==========================================
// 工单缓存同步系统 - 刷新条件判定
// ==========================================
// 职责: 纯谓词——给定条件下某条记录是否需要刷新
// 红线: 无副作用,不访问远程/仓储
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::domain::workorder::{UpdateCriteria, WorkOrderRecord};

// ==========================================
// CriteriaMatcher - 条件匹配器
// ==========================================

/// 刷新条件匹配器
pub struct CriteriaMatcher;

impl CriteriaMatcher {
    /// 判定记录是否匹配刷新条件
    ///
    /// 规则:
    /// 1. 记录状态为 UNKNOWN 且目标集合含 UNKNOWN → 无条件匹配（优先于其它检查）
    /// 2. 否则要求: 记录状态 ∈ 目标集合, 且任一工序行资源名
    ///    以 machines 中某项为前缀（忽略大小写）
    pub fn matches(record: &WorkOrderRecord, criteria: &UpdateCriteria) -> bool {
        // 未知状态兜底: 覆盖所有其它检查
        if record.status == WorkOrderStatus::Unknown
            && criteria.contains_status(WorkOrderStatus::Unknown)
        {
            return true;
        }

        if !criteria.contains_status(record.status) {
            return false;
        }

        criteria
            .machines
            .iter()
            .any(|machine| record.contains_resource_prefix(machine))
    }
}
