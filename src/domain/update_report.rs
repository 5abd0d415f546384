// ==========================================
// 工单缓存同步系统 - 刷新报告实体
// ==========================================
// 用途: 一轮刷新的审计记录,由仓储层写入 sync_log 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// UpdateReport - 刷新报告
// ==========================================

/// 一轮刷新的汇总报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    // ===== 主键 =====
    pub sync_id: Uuid, // 本轮刷新标识

    // ===== 时间信息 =====
    pub time_started: DateTime<Utc>, // 刷新开始时刻
    pub time_ended: DateTime<Utc>,   // 刷新结束时刻

    // ===== 计数 =====
    pub records_updated: usize, // 本轮处理总数（= 队列 total）
    pub records_failed: usize,  // 其中抓取失败条数
}
