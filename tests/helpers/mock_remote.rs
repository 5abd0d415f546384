// ==========================================
// 测试辅助 - 脚本化远程数据源
// ==========================================
// 用途: 以预置查询结果/详情应答模拟远程系统,
//       并记录抓取轨迹供断言
// ==========================================

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use workorder_cache::{
    RemoteError, RemoteRecordSource, SearchHit, WorkOrderDetail, WorkOrderStatus,
};

/// 脚本化远程数据源
pub struct MockRemoteSource {
    // 查询标识 → 结果行
    search_results: HashMap<String, Vec<SearchHit>>,
    // 工单号 → 详情应答
    details: HashMap<String, WorkOrderDetail>,
    // 抓取必定失败的工单号
    failing_indices: HashSet<String>,
    // 必定失败的查询标识
    failing_queries: HashSet<String>,
    // 抓取轨迹（fetch_detail 调用的工单号）
    fetch_log: Mutex<Vec<String>>,
}

impl MockRemoteSource {
    pub fn new() -> Self {
        Self {
            search_results: HashMap::new(),
            details: HashMap::new(),
            failing_indices: HashSet::new(),
            failing_queries: HashSet::new(),
            fetch_log: Mutex::new(Vec::new()),
        }
    }

    /// 预置查询结果
    pub fn with_search(mut self, query: &str, hits: Vec<(&str, WorkOrderStatus)>) -> Self {
        self.search_results.insert(
            query.to_string(),
            hits.into_iter()
                .map(|(index, reported_status)| SearchHit {
                    index: index.to_string(),
                    reported_status,
                })
                .collect(),
        );
        self
    }

    /// 预置详情应答
    pub fn with_detail(mut self, index: &str, detail: WorkOrderDetail) -> Self {
        self.details.insert(index.to_string(), detail);
        self
    }

    /// 指定抓取必定失败的工单号
    pub fn with_failing_index(mut self, index: &str) -> Self {
        self.failing_indices.insert(index.to_string());
        self
    }

    /// 指定必定失败的查询
    pub fn with_failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    /// 抓取轨迹副本
    pub fn fetch_log(&self) -> Vec<String> {
        self.fetch_log.lock().unwrap().clone()
    }
}

impl Default for MockRemoteSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteRecordSource for MockRemoteSource {
    async fn search(&self, query_id: &str) -> Result<Vec<SearchHit>, RemoteError> {
        if self.failing_queries.contains(query_id) {
            return Err(RemoteError::Network(format!(
                "connection refused: {}",
                query_id
            )));
        }
        Ok(self
            .search_results
            .get(query_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_detail(&self, index: &str) -> Result<WorkOrderDetail, RemoteError> {
        self.fetch_log.lock().unwrap().push(index.to_string());

        if self.failing_indices.contains(index) {
            return Err(RemoteError::Network(format!("connection reset: {}", index)));
        }

        // 未脚本化的工单给出合成详情
        Ok(self.details.get(index).cloned().unwrap_or(WorkOrderDetail {
            status: WorkOrderStatus::Active,
            order_quantity: 1,
            routing_rows: Vec::new(),
            tracking_rows: Vec::new(),
        }))
    }
}
