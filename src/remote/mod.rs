// ==========================================
// 工单缓存同步系统 - 远程数据源接口
// ==========================================
// 职责: 定义远程系统查询/抓取 trait，实现依赖倒置
// 说明: 页面解析、字段提取、登录会话均由实现方负责,
//       引擎层只消费结构化结果
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::domain::workorder::{OperationRow, TrackingRow};
use async_trait::async_trait;
use thiserror::Error;

// ==========================================
// 错误类型
// ==========================================

/// 远程数据源错误
///
/// 单条抓取的失败被限制在单个 worker 迭代内,
/// 不会中止整个刷新过程（重试策略由实现方自行决定）。
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("网络请求失败: {0}")]
    Network(String),

    #[error("页面解析失败: {0}")]
    Parse(String),
}

// ==========================================
// 查询与抓取结果
// ==========================================

/// 远程查询结果行
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// 工单号
    pub index: String,
    /// 查询结果页上报告的状态
    pub reported_status: WorkOrderStatus,
}

/// 工单详情抓取结果
///
/// 对应一次工单详情页抓取,覆盖记录的全部可变字段。
#[derive(Debug, Clone)]
pub struct WorkOrderDetail {
    pub status: WorkOrderStatus,
    pub order_quantity: i64,
    pub routing_rows: Vec<OperationRow>,
    pub tracking_rows: Vec<TrackingRow>,
}

// ==========================================
// 远程数据源 Trait
// ==========================================

/// 远程工单数据源
///
/// 引擎层定义,采集层实现。
///
/// # 实现说明
/// - `search` 对应远程系统的保存查询（按查询标识）
/// - `fetch_detail` 对应单个工单详情页抓取
#[async_trait]
pub trait RemoteRecordSource: Send + Sync {
    /// 执行远程保存查询,返回工单号与报告状态列表
    async fn search(&self, query_id: &str) -> Result<Vec<SearchHit>, RemoteError>;

    /// 抓取单个工单的详情字段
    async fn fetch_detail(&self, index: &str) -> Result<WorkOrderDetail, RemoteError>;
}
