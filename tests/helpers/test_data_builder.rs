// ==========================================
// 测试辅助 - 测试数据构建器
// ==========================================

use chrono::{TimeZone, Utc};
use workorder_cache::{
    OperationRow, TrackingRow, WorkOrderDetail, WorkOrderRecord, WorkOrderStatus,
};

// ==========================================
// WorkOrderBuilder - 工单记录构建器
// ==========================================

pub struct WorkOrderBuilder {
    record: WorkOrderRecord,
}

impl WorkOrderBuilder {
    pub fn new(index: &str) -> Self {
        Self {
            record: WorkOrderRecord::new(index, WorkOrderStatus::Active, 1),
        }
    }

    pub fn status(mut self, status: WorkOrderStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.record.order_quantity = quantity;
        self
    }

    /// 追加一条在给定机台上的工序行
    pub fn machine(mut self, resource: &str) -> Self {
        let seq = self.record.routing_rows.len() + 1;
        self.record.routing_rows.push(OperationRow {
            op: format!("{}", seq * 10),
            op_desc: format!("Op {}", seq * 10),
            resource: resource.to_string(),
            complete: false,
            complete_total: 0.0,
            complete_date: None,
        });
        self
    }

    /// 追加一条已完工的工序行
    pub fn completed_machine(mut self, resource: &str, total: f64) -> Self {
        let seq = self.record.routing_rows.len() + 1;
        self.record.routing_rows.push(OperationRow {
            op: format!("{}", seq * 10),
            op_desc: format!("Op {}", seq * 10),
            resource: resource.to_string(),
            complete: true,
            complete_total: total,
            complete_date: Some(Utc.with_ymd_and_hms(2026, 3, 14, 15, 30, 0).unwrap()),
        });
        self
    }

    /// 追加一条机时跟踪行
    pub fn tracking(mut self, op: &str, resource: &str, quantity_total: f64) -> Self {
        self.record.tracking_rows.push(TrackingRow {
            date_started: Utc.with_ymd_and_hms(2026, 3, 14, 8, 0, 0).unwrap(),
            date_ended: Some(Utc.with_ymd_and_hms(2026, 3, 14, 11, 45, 0).unwrap()),
            op: op.to_string(),
            resource: resource.to_string(),
            quantity_start: 0.0,
            quantity_end: quantity_total,
            quantity_total,
        });
        self
    }

    pub fn build(self) -> WorkOrderRecord {
        self.record
    }
}

/// 详情应答简写
pub fn detail(status: WorkOrderStatus, order_quantity: i64) -> WorkOrderDetail {
    WorkOrderDetail {
        status,
        order_quantity,
        routing_rows: Vec::new(),
        tracking_rows: Vec::new(),
    }
}

/// 带工序行的详情应答
pub fn detail_on_machine(
    status: WorkOrderStatus,
    order_quantity: i64,
    resource: &str,
) -> WorkOrderDetail {
    WorkOrderDetail {
        status,
        order_quantity,
        routing_rows: vec![OperationRow {
            op: "10".to_string(),
            op_desc: "Op 10".to_string(),
            resource: resource.to_string(),
            complete: false,
            complete_total: 0.0,
            complete_date: None,
        }],
        tracking_rows: Vec::new(),
    }
}
