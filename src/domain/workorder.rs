// ==========================================
// 工单缓存同步系统 - 工单领域模型
// ==========================================
// 对齐: 快照文件 workorders 数组 / workorder 表
// 用途: 调度引擎合并写入,查询接口只读
// ==========================================

use crate::domain::types::WorkOrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// WorkOrderRecord - 工单记录
// ==========================================
// 红线: index 为唯一键,创建后不可变更
// 所有权: 仅 RecordStore 持有,外部只读快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderRecord {
    // ===== 主键 =====
    pub index: String, // 工单号（唯一标识）

    // ===== 状态与数量 =====
    pub status: WorkOrderStatus, // 工单状态
    pub order_quantity: i64,     // 订单数量

    // ===== 工艺路线 =====
    pub routing_rows: Vec<OperationRow>, // 工序行（有序）

    // ===== 机时跟踪 =====
    pub tracking_rows: Vec<TrackingRow>, // 跟踪行（有序）
}

impl WorkOrderRecord {
    /// 创建新的工单记录
    pub fn new(index: impl Into<String>, status: WorkOrderStatus, order_quantity: i64) -> Self {
        Self {
            index: index.into(),
            status,
            order_quantity,
            routing_rows: Vec::new(),
            tracking_rows: Vec::new(),
        }
    }

    /// 任一工序行的资源名是否匹配给定前缀（忽略大小写）
    pub fn contains_resource_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_lowercase();
        self.routing_rows
            .iter()
            .any(|row| row.resource.to_lowercase().starts_with(&prefix))
    }
}

// ==========================================
// OperationRow - 工序行
// ==========================================
// 对齐: routing_row 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRow {
    pub op: String,                              // 工序代码
    pub op_desc: String,                         // 工序描述
    pub resource: String,                        // 资源/机台名
    pub complete: bool,                          // 完工标记
    pub complete_total: f64,                     // 完工数量
    pub complete_date: Option<DateTime<Utc>>,    // 完工时间（未完工为 None）
}

// ==========================================
// TrackingRow - 机时跟踪行
// ==========================================
// 对齐: tracking_row 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRow {
    pub date_started: DateTime<Utc>,        // 开始时间
    pub date_ended: Option<DateTime<Utc>>,  // 结束时间（进行中为 None）
    pub op: String,                         // 工序号
    pub resource: String,                   // 资源/机台名
    pub quantity_start: f64,                // 起始数量
    pub quantity_end: f64,                  // 结束数量
    pub quantity_total: f64,                // 运行总量
}

// ==========================================
// UpdateCriteria - 刷新条件
// ==========================================
// 用途: 构建刷新队列的判定依据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCriteria {
    // 目标状态集合
    pub statuses: Vec<WorkOrderStatus>,
    // 远程查询标识列表
    pub queries: Vec<String>,
    // 机台名前缀列表（缓存内匹配用）
    pub machines: Vec<String>,
    // 是否查询远程数据源
    pub fetch_external: bool,
    // 是否搜索本地缓存
    pub fetch_internal: bool,
}

impl UpdateCriteria {
    /// 判断状态是否在目标集合内
    pub fn contains_status(&self, status: WorkOrderStatus) -> bool {
        self.statuses.contains(&status)
    }
}

// ==========================================
// WorkOrderFilter - 缓存查询过滤器
// ==========================================
// 两个条件均可选,同时给定时取交集（AND）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkOrderFilter {
    // 状态过滤（相等匹配）
    pub status: Option<WorkOrderStatus>,
    // 资源名前缀过滤（忽略大小写,匹配任一工序行）
    pub resource: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_resource(index: &str, resource: &str) -> WorkOrderRecord {
        let mut record = WorkOrderRecord::new(index, WorkOrderStatus::Active, 10);
        record.routing_rows.push(OperationRow {
            op: "10".to_string(),
            op_desc: "铣削".to_string(),
            resource: resource.to_string(),
            complete: false,
            complete_total: 0.0,
            complete_date: None,
        });
        record
    }

    #[test]
    fn test_contains_resource_prefix_case_insensitive() {
        let record = record_with_resource("10-0100", "MILL-3");

        assert!(record.contains_resource_prefix("mill"));
        assert!(record.contains_resource_prefix("MILL-3"));
        assert!(!record.contains_resource_prefix("lathe"));
    }

    #[test]
    fn test_contains_resource_prefix_empty_rows() {
        let record = WorkOrderRecord::new("10-0200", WorkOrderStatus::Active, 5);
        assert!(!record.contains_resource_prefix("mill"));
    }
}
