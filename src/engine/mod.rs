// ==========================================
// 工单缓存同步系统 - 引擎层
// ==========================================
// 职责: 刷新条件判定、队列构建、并发调度、完整性校验
// 红线: 引擎只通过 trait 消费远程数据源与持久化适配器
// ==========================================

pub mod criteria;
pub mod error;
pub mod events;
pub mod integrity;
pub mod orchestrator;
pub mod queue;
pub mod queue_builder;
pub mod scheduler;

// 重导出核心引擎
pub use criteria::CriteriaMatcher;
pub use error::{EngineError, EngineResult};
pub use events::{NoOpNotifier, Notifier, OptionalNotifier};
pub use integrity::IntegrityChecker;
pub use orchestrator::SyncOrchestrator;
pub use queue::FetchQueue;
pub use queue_builder::QueueBuilder;
pub use scheduler::{FetchScheduler, SchedulerOutcome};

// 报告实体在领域层定义
pub use crate::domain::UpdateReport;
