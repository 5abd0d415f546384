// ==========================================
// 测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod mock_remote;
pub mod test_data_builder;

use std::sync::Mutex;
use workorder_cache::Notifier;

// ==========================================
// CollectingNotifier - 消息收集通知者
// ==========================================

/// 收集全部进度消息,供断言使用
#[derive(Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收集消息的副本
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// 是否收到过完全相同的消息
    pub fn contains(&self, message: &str) -> bool {
        self.messages.lock().unwrap().iter().any(|m| m == message)
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
