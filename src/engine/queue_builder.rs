// ==========================================
// 工单缓存同步系统 - 刷新队列构建器
// ==========================================
// 职责: 按固定阶段顺序装配去重刷新队列
// 阶段: 远程查询 → 本地缓存匹配 → 未知状态兜底
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::domain::workorder::UpdateCriteria;
use crate::engine::criteria::CriteriaMatcher;
use crate::engine::events::OptionalNotifier;
use crate::engine::queue::FetchQueue;
use crate::remote::RemoteRecordSource;
use crate::store::RecordStore;

// ==========================================
// QueueBuilder - 队列构建器
// ==========================================

/// 刷新队列构建器
pub struct QueueBuilder;

impl QueueBuilder {
    /// 构建本轮刷新队列
    ///
    /// 执行顺序:
    /// 1. fetch_external: 逐个执行远程查询——缓存中不存在的结果无条件入队,
    ///    已存在的仅当报告状态命中目标集合时入队
    /// 2. fetch_internal: 遍历缓存,按 CriteriaMatcher 匹配入队
    /// 3. 无条件兜底: 缓存内所有 UNKNOWN 状态记录入队
    /// 4. 固化 total/processed 计数
    ///
    /// 单个远程查询失败仅记录与通知,跳过该查询继续构建。
    /// 每个阶段通过 Notifier 上报发现计数。
    pub async fn build(
        criteria: &UpdateCriteria,
        store: &RecordStore,
        source: &dyn RemoteRecordSource,
        notifier: &OptionalNotifier,
    ) -> FetchQueue {
        let mut queue = FetchQueue::new();

        // ===== 阶段 1: 远程查询 =====
        if criteria.fetch_external {
            for query in &criteria.queries {
                notifier.notify(&format!("Processing query: {}", query));

                let hits = match source.search(query).await {
                    Ok(hits) => hits,
                    Err(e) => {
                        tracing::warn!("远程查询失败: query={}, error={}", query, e);
                        notifier.notify(&format!("Query {} failed: {}", query, e));
                        continue;
                    }
                };

                let before = queue.len();
                for hit in &hits {
                    if store.contains(&hit.index) {
                        // 已缓存: 报告状态命中目标集合才刷新
                        if criteria.contains_status(hit.reported_status) {
                            queue.enqueue(&hit.index);
                        }
                    } else {
                        // 新发现的工单,无条件入队
                        queue.enqueue(&hit.index);
                    }
                }

                notifier.notify(&format!("Found {} entries for {}", hits.len(), query));
                notifier.notify(&format!(
                    "Found {} matching criteria",
                    queue.len() - before
                ));
            }
        }

        // ===== 阶段 2: 本地缓存匹配 =====
        if criteria.fetch_internal {
            notifier.notify("Searching internal cache");

            let mut matched = 0usize;
            for wo in store.iter() {
                if CriteriaMatcher::matches(wo, criteria) {
                    queue.enqueue(&wo.index);
                    matched += 1;
                }
            }

            notifier.notify(&format!("Found {} matching criteria", matched));
        }

        // ===== 阶段 3: 未知状态兜底（不受 criteria 约束）=====
        let unknowns: Vec<&str> = store
            .iter()
            .filter(|wo| wo.status == WorkOrderStatus::Unknown)
            .map(|wo| wo.index.as_str())
            .collect();

        if !unknowns.is_empty() {
            notifier.notify(&format!(
                "Found {} of unknown status, attempting to update",
                unknowns.len()
            ));
            for index in unknowns {
                queue.enqueue(index);
            }
        }

        // ===== 阶段 4: 固化计数 =====
        queue.seal();
        tracing::debug!("刷新队列构建完成: total={}", queue.total());

        queue
    }
}
