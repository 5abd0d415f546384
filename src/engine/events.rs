// ==========================================
// 工单缓存同步系统 - 进度通知
// ==========================================
// 职责: 定义进度通知 trait，实现依赖倒置
// 说明: 引擎层定义 trait，展示层实现适配器
// 语义: fire-and-forget,未注册时为空操作
// ==========================================

use std::sync::Arc;

// ==========================================
// 通知 Trait
// ==========================================

/// 进度通知者 Trait
///
/// 引擎层定义，展示层实现。
/// 引擎只负责产出进度消息,不关心格式化与投递方式。
pub trait Notifier: Send + Sync {
    /// 投递一条进度消息
    fn notify(&self, message: &str);
}

/// 空操作通知者
///
/// 用于不需要进度通知的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!("NoOpNotifier: 跳过进度消息 - {}", message);
    }
}

/// 可选的通知者包装
///
/// 简化 Option<Arc<dyn Notifier>> 的使用
#[derive(Clone)]
pub struct OptionalNotifier {
    inner: Option<Arc<dyn Notifier>>,
}

impl OptionalNotifier {
    /// 创建带通知者的实例
    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Some(notifier),
        }
    }

    /// 创建空实例（不投递消息）
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 投递消息（如果有通知者）
    pub fn notify(&self, message: &str) {
        match &self.inner {
            Some(notifier) => notifier.notify(message),
            None => {
                tracing::debug!("OptionalNotifier: 未配置通知者，跳过消息 - {}", message);
            }
        }
    }

    /// 检查是否配置了通知者
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalNotifier {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 收集消息的测试通知者
    struct CollectingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_noop_notifier() {
        let notifier = NoOpNotifier;
        notifier.notify("进度消息");
    }

    #[test]
    fn test_optional_notifier_none() {
        let notifier = OptionalNotifier::none();
        assert!(!notifier.is_configured());
        notifier.notify("进度消息");
    }

    #[test]
    fn test_optional_notifier_delivers() {
        let collector = Arc::new(CollectingNotifier {
            messages: Mutex::new(Vec::new()),
        });
        let notifier = OptionalNotifier::with_notifier(collector.clone());
        assert!(notifier.is_configured());

        notifier.notify("1 of 3 work orders updated");
        notifier.notify("2 of 3 work orders updated");

        let messages = collector.messages.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "1 of 3 work orders updated");
    }
}
