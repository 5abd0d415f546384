// ==========================================
// 工单缓存同步系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
///
/// 单条抓取失败不在此列——它被限制在 worker 迭代内,仅记录与通知。
/// 这里只包含会中止整个操作的结构性错误。
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 生命周期错误 =====
    #[error("缓存未初始化")]
    UninitializedStore,

    #[error("快照完整性校验失败: 存在重复工单号")]
    IntegrityCheckFailed,

    #[error("缓存状态异常: {0}")]
    StorePoisoned(String),

    // ===== 仓储层错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
