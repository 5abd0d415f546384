// ==========================================
// 工单缓存同步系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio + SQLite
// 系统定位: 制造工单本地缓存与刷新引擎
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 缓存层 - 工单记录集合
pub mod store;

// 引擎层 - 刷新队列与调度
pub mod engine;

// 远程数据源接口
pub mod remote;

// 数据仓储层 - 持久化适配
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CacheFreshness, WorkOrderStatus};

// 领域实体
pub use domain::{OperationRow, TrackingRow, UpdateCriteria, WorkOrderFilter, WorkOrderRecord};

// 缓存
pub use store::RecordStore;

// 引擎
pub use engine::{
    CriteriaMatcher, FetchQueue, FetchScheduler, IntegrityChecker, NoOpNotifier, Notifier,
    OptionalNotifier, QueueBuilder, SyncOrchestrator, UpdateReport,
};

// 远程接口
pub use remote::{RemoteError, RemoteRecordSource, SearchHit, WorkOrderDetail};

// 仓储
pub use repository::{PersistenceAdapter, SnapshotRepository, WorkOrderRepository};

// 配置
pub use config::SyncConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工单缓存同步系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";
