// ==========================================
// 工单缓存同步系统 - 同步编排器
// ==========================================
// 职责: 独占持有活动缓存,协调队列构建与并发调度
// 红线: 缓存生命周期显式化（新建/加载/整体替换）,
//       不依赖模块级单例状态
// ==========================================

use crate::config::SyncConfig;
use crate::domain::types::CacheFreshness;
use crate::domain::update_report::UpdateReport;
use crate::domain::workorder::{UpdateCriteria, WorkOrderFilter, WorkOrderRecord};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::events::OptionalNotifier;
use crate::engine::integrity::IntegrityChecker;
use crate::engine::queue_builder::QueueBuilder;
use crate::engine::scheduler::FetchScheduler;
use crate::remote::RemoteRecordSource;
use crate::repository::snapshot::CacheSnapshot;
use crate::repository::PersistenceAdapter;
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

// ==========================================
// SyncOrchestrator - 同步编排器
// ==========================================

/// 同步编排器
///
/// 活动缓存的唯一持有者。缓存在 `new_database` / `load_database`
/// 之前不存在,此时除 `freshness` 外的读写操作均返回
/// `EngineError::UninitializedStore`。
pub struct SyncOrchestrator {
    config: SyncConfig,
    store: Option<RecordStore>,
}

impl SyncOrchestrator {
    /// 创建编排器（此时缓存尚未初始化）
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// 缓存是否已初始化
    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    // ==========================================
    // 生命周期
    // ==========================================

    /// 新建空缓存
    ///
    /// 已有缓存时为整体替换: 丢弃全部既有记录。
    pub fn new_database(&mut self) {
        if self.store.is_some() {
            tracing::info!("整体替换活动缓存");
        }
        self.store = Some(RecordStore::new());
    }

    /// 从持久化快照加载缓存
    ///
    /// 恢复后先做完整性校验,失败则拒绝快照并保持原有缓存不变。
    pub fn load_database(
        &mut self,
        adapter: &dyn PersistenceAdapter,
        notifier: &OptionalNotifier,
    ) -> EngineResult<()> {
        let snapshot = adapter.load()?;
        notifier.notify("Imported database");

        notifier.notify("Verifying integrity");
        let candidate = snapshot.into_store();

        if !IntegrityChecker::verify(&candidate) {
            notifier.notify("ERROR: Database failed integrity test");
            return Err(EngineError::IntegrityCheckFailed);
        }

        notifier.notify("All checks passed");
        tracing::info!("快照加载完成: {} 条记录", candidate.len());
        self.store = Some(candidate);

        Ok(())
    }

    /// 持久化当前缓存
    pub fn save_database(
        &mut self,
        adapter: &dyn PersistenceAdapter,
        notifier: &OptionalNotifier,
    ) -> EngineResult<()> {
        let store = self
            .store
            .as_mut()
            .ok_or(EngineError::UninitializedStore)?;

        store.touch_save_timestamp();
        notifier.notify("Saving cache");

        let snapshot = CacheSnapshot::from_store(store);
        adapter.save(&snapshot)?;

        tracing::info!("缓存已保存: {} 条记录", snapshot.workorders.len());
        Ok(())
    }

    // ==========================================
    // 刷新
    // ==========================================

    /// 执行一轮刷新: 构建队列 → 并发抓取合并 → 产出报告
    ///
    /// 单条抓取失败被限制在 worker 内,最终报告总能给出
    /// processed/total 计数; 缓存未初始化则直接传播错误并中止。
    pub async fn run_update(
        &mut self,
        criteria: &UpdateCriteria,
        source: Arc<dyn RemoteRecordSource>,
        notifier: &OptionalNotifier,
    ) -> EngineResult<UpdateReport> {
        let sync_id = Uuid::new_v4();
        let time_started = Utc::now();

        let queue = {
            let store = self
                .store
                .as_ref()
                .ok_or(EngineError::UninitializedStore)?;
            QueueBuilder::build(criteria, store, source.as_ref(), notifier).await
        };

        tracing::info!(
            "刷新开始: sync_id={}, 待更新 {} 条",
            sync_id,
            queue.total()
        );

        // 调度期间缓存移交给 worker 池共享,结束后收回
        let store = self
            .store
            .take()
            .ok_or(EngineError::UninitializedStore)?;
        let shared = Arc::new(Mutex::new(store));

        let outcome = FetchScheduler::run(
            queue,
            Arc::clone(&shared),
            source,
            notifier.clone(),
            self.config.max_concurrent_requests,
        )
        .await;

        let store = Arc::try_unwrap(shared)
            .map_err(|_| {
                EngineError::StorePoisoned("刷新结束后仍有未释放的缓存引用".to_string())
            })?
            .into_inner();
        self.store = Some(store);

        let report = UpdateReport {
            sync_id,
            time_started,
            time_ended: Utc::now(),
            records_updated: outcome.total,
            records_failed: outcome.failed,
        };

        tracing::info!(
            "刷新完成: sync_id={}, processed={}/{}, failed={}",
            sync_id,
            outcome.processed,
            outcome.total,
            outcome.failed
        );

        Ok(report)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 缓存新鲜度（未初始化视为 EMPTY）
    pub fn freshness(&self) -> CacheFreshness {
        match &self.store {
            None => CacheFreshness::Empty,
            Some(store) => store.freshness(),
        }
    }

    /// 记录总数
    pub fn entry_count(&self) -> EngineResult<usize> {
        Ok(self.active_store()?.len())
    }

    /// 最后一次成功同步时间
    pub fn data_timestamp(&self) -> EngineResult<Option<DateTime<Utc>>> {
        Ok(self.active_store()?.timestamp_data())
    }

    /// 按工单号查找（只读快照）
    pub fn lookup(&self, index: &str) -> EngineResult<Option<WorkOrderRecord>> {
        Ok(self.active_store()?.lookup(index).cloned())
    }

    /// 按过滤器查询（只读快照）
    pub fn matching(&self, filter: &WorkOrderFilter) -> EngineResult<Vec<WorkOrderRecord>> {
        Ok(self
            .active_store()?
            .filter(filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 活动缓存引用（未初始化为结构性错误）
    fn active_store(&self) -> EngineResult<&RecordStore> {
        self.store.as_ref().ok_or(EngineError::UninitializedStore)
    }
}
