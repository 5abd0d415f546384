// ==========================================
// 工单缓存同步系统 - 领域层
// ==========================================
// 职责: 定义工单实体与领域类型
// 红线: 领域层不依赖引擎/仓储层
// ==========================================

pub mod types;
pub mod update_report;
pub mod workorder;

pub use types::{CacheFreshness, WorkOrderStatus};
pub use update_report::UpdateReport;
pub use workorder::{
    OperationRow, TrackingRow, UpdateCriteria, WorkOrderFilter, WorkOrderRecord,
};
