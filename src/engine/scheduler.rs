// ==========================================
// 工单缓存同步系统 - 并发刷新调度器
// ==========================================
// 职责: 固定规模 worker 池共享一个队列,逐条抓取并合并
// 红线: 出队原子（同一工单号绝不被两个 worker 处理）;
//       单条失败不中止兄弟 worker 与整轮刷新
// ==========================================

use crate::domain::workorder::WorkOrderRecord;
use crate::engine::events::OptionalNotifier;
use crate::engine::queue::FetchQueue;
use crate::remote::RemoteRecordSource;
use crate::store::RecordStore;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;

// ==========================================
// SchedulerOutcome - 调度结果
// ==========================================

/// 一轮调度的汇总结果
#[derive(Debug, Clone, Copy)]
pub struct SchedulerOutcome {
    /// 已处理条数（成败均计）
    pub processed: usize,
    /// 本轮总条数
    pub total: usize,
    /// 抓取失败条数
    pub failed: usize,
}

// ==========================================
// FetchScheduler - 刷新调度器
// ==========================================

/// 并发刷新调度器
///
/// 以 min(concurrency, 队列长度) 个 worker 共享队列,
/// 每个 worker 循环: 原子出队 → 抓取详情 → 合并入缓存 → 上报进度,
/// 队列空则退出。全部 worker 退出后刷新缓存同步时间戳。
pub struct FetchScheduler;

impl FetchScheduler {
    /// 执行一轮并发刷新
    ///
    /// # 参数
    /// - queue: 已 seal 的刷新队列
    /// - store: 共享缓存（合并仅发生在 worker 的出队完成点）
    /// - source: 远程数据源
    /// - notifier: 进度通知
    /// - concurrency: worker 上限
    pub async fn run(
        queue: FetchQueue,
        store: Arc<Mutex<RecordStore>>,
        source: Arc<dyn RemoteRecordSource>,
        notifier: OptionalNotifier,
        concurrency: usize,
    ) -> SchedulerOutcome {
        let total = queue.total();
        let worker_count = concurrency.max(1).min(queue.len());
        let queue = Arc::new(Mutex::new(queue));

        tracing::info!(
            "刷新调度启动: total={}, workers={}",
            total,
            worker_count
        );

        let mut handles = Vec::with_capacity(worker_count);

        for worker_id in 0..worker_count {
            let queue = Arc::clone(&queue);
            let store = Arc::clone(&store);
            let source = Arc::clone(&source);
            let notifier = notifier.clone();

            handles.push(tokio::spawn(async move {
                let mut failures = 0usize;

                loop {
                    // 出队在队列锁内完成,两个 worker 不会取到同一工单号
                    let index = { queue.lock().await.pop() };
                    let Some(index) = index else {
                        break;
                    };

                    match source.fetch_detail(&index).await {
                        Ok(detail) => {
                            let record = WorkOrderRecord {
                                index: index.clone(),
                                status: detail.status,
                                order_quantity: detail.order_quantity,
                                routing_rows: detail.routing_rows,
                                tracking_rows: detail.tracking_rows,
                            };

                            // 合并: 已存在则原位替换可变字段,否则追加新记录
                            let replaced = store.lock().await.upsert(record);
                            tracing::debug!(
                                "worker#{} 已{}: {}",
                                worker_id,
                                if replaced { "更新" } else { "新增" },
                                index
                            );
                        }
                        Err(e) => {
                            // 单条失败: 通知并继续下一条,不中止本轮
                            failures += 1;
                            tracing::warn!(
                                "worker#{} 工单抓取失败: index={}, error={}",
                                worker_id,
                                index,
                                e
                            );
                            notifier.notify(&format!("Failed to update {}: {}", index, e));
                        }
                    }

                    // 进度计数: 出队条目无论成败均计入
                    let (processed, total) = {
                        let mut queue = queue.lock().await;
                        (queue.mark_processed(), queue.total())
                    };
                    notifier.notify(&format!(
                        "{} of {} work orders updated",
                        processed, total
                    ));
                }

                failures
            }));
        }

        let mut failed = 0usize;
        for result in join_all(handles).await {
            match result {
                Ok(worker_failures) => failed += worker_failures,
                Err(e) => tracing::error!("worker 异常退出: {}", e),
            }
        }

        // 全部 worker 退出后记录同步完成时刻
        store.lock().await.touch_data_timestamp();

        let processed = queue.lock().await.processed();
        tracing::info!(
            "刷新调度结束: processed={}/{}, failed={}",
            processed,
            total,
            failed
        );

        SchedulerOutcome {
            processed,
            total,
            failed,
        }
    }
}
