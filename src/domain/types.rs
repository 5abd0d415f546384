// ==========================================
// 工单缓存同步系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 红线: 封闭枚举,解析必须全定义（未识别输入落入 UNKNOWN）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Active,                // 生产中
    Canceled,              // 已取消
    Complete,              // 已完工
    Invoiced,              // 已开票
    ManufacturingComplete, // 制造完成
    OnHold,                // 暂停
    Shipped,               // 已发运
    Unknown,               // 未知状态（解析兜底）
}

/// 状态解析查找表
///
/// 远程系统页面上的状态文本，统一 trim + 小写后匹配。
/// "canceled" 与 "cancelled" 两种拼写在远程系统中都出现过，均映射为 CANCELED。
const STATUS_LOOKUP: &[(&str, WorkOrderStatus)] = &[
    ("active", WorkOrderStatus::Active),
    ("canceled", WorkOrderStatus::Canceled),
    ("cancelled", WorkOrderStatus::Canceled),
    ("complete", WorkOrderStatus::Complete),
    ("invoiced", WorkOrderStatus::Invoiced),
    ("manufacturing complete", WorkOrderStatus::ManufacturingComplete),
    ("on hold", WorkOrderStatus::OnHold),
    ("shipped", WorkOrderStatus::Shipped),
];

impl WorkOrderStatus {
    /// 从远程状态文本解析（全函数，无法识别时返回 Unknown）
    pub fn parse(input: &str) -> Self {
        let cleaned = input.trim().to_lowercase();

        STATUS_LOOKUP
            .iter()
            .find(|(text, _)| *text == cleaned)
            .map(|(_, status)| *status)
            .unwrap_or(WorkOrderStatus::Unknown)
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Active => "ACTIVE",
            WorkOrderStatus::Canceled => "CANCELED",
            WorkOrderStatus::Complete => "COMPLETE",
            WorkOrderStatus::Invoiced => "INVOICED",
            WorkOrderStatus::ManufacturingComplete => "MANUFACTURING_COMPLETE",
            WorkOrderStatus::OnHold => "ON_HOLD",
            WorkOrderStatus::Shipped => "SHIPPED",
            WorkOrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// 从数据库字符串解析状态
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "ACTIVE" => WorkOrderStatus::Active,
            "CANCELED" => WorkOrderStatus::Canceled,
            "COMPLETE" => WorkOrderStatus::Complete,
            "INVOICED" => WorkOrderStatus::Invoiced,
            "MANUFACTURING_COMPLETE" => WorkOrderStatus::ManufacturingComplete,
            "ON_HOLD" => WorkOrderStatus::OnHold,
            "SHIPPED" => WorkOrderStatus::Shipped,
            _ => WorkOrderStatus::Unknown,
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 缓存新鲜度 (Cache Freshness)
// ==========================================
// 判定顺序: EMPTY → OUTDATED → UNSAVED_CHANGES → OK → ERROR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheFreshness {
    Empty,          // 从未同步
    Outdated,       // 最后同步不在今天
    Ok,             // 今天已同步且已保存
    UnsavedChanges, // 同步晚于保存
    Error,          // 不可达（判定分支兜底）
}

impl fmt::Display for CacheFreshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheFreshness::Empty => write!(f, "EMPTY"),
            CacheFreshness::Outdated => write!(f, "OUTDATED"),
            CacheFreshness::Ok => write!(f, "OK"),
            CacheFreshness::UnsavedChanges => write!(f, "UNSAVED_CHANGES"),
            CacheFreshness::Error => write!(f, "ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_known_statuses() {
        assert_eq!(WorkOrderStatus::parse("active"), WorkOrderStatus::Active);
        assert_eq!(WorkOrderStatus::parse("canceled"), WorkOrderStatus::Canceled);
        assert_eq!(WorkOrderStatus::parse("complete"), WorkOrderStatus::Complete);
        assert_eq!(WorkOrderStatus::parse("invoiced"), WorkOrderStatus::Invoiced);
        assert_eq!(
            WorkOrderStatus::parse("manufacturing complete"),
            WorkOrderStatus::ManufacturingComplete
        );
        assert_eq!(WorkOrderStatus::parse("on hold"), WorkOrderStatus::OnHold);
        assert_eq!(WorkOrderStatus::parse("shipped"), WorkOrderStatus::Shipped);
    }

    #[test]
    fn test_parse_normalizes_input() {
        assert_eq!(WorkOrderStatus::parse("  Active  "), WorkOrderStatus::Active);
        assert_eq!(WorkOrderStatus::parse("ON HOLD"), WorkOrderStatus::OnHold);
        assert_eq!(
            WorkOrderStatus::parse("Manufacturing Complete"),
            WorkOrderStatus::ManufacturingComplete
        );
    }

    #[test]
    fn test_parse_both_cancel_spellings() {
        // 远程系统两种拼写都出现过
        assert_eq!(WorkOrderStatus::parse("canceled"), WorkOrderStatus::Canceled);
        assert_eq!(WorkOrderStatus::parse("cancelled"), WorkOrderStatus::Canceled);
    }

    #[test]
    fn test_parse_unrecognized_falls_back_to_unknown() {
        assert_eq!(WorkOrderStatus::parse(""), WorkOrderStatus::Unknown);
        assert_eq!(WorkOrderStatus::parse("archived"), WorkOrderStatus::Unknown);
        assert_eq!(WorkOrderStatus::parse("???"), WorkOrderStatus::Unknown);
    }

    #[test]
    fn test_db_str_roundtrip() {
        for (_, status) in STATUS_LOOKUP {
            assert_eq!(WorkOrderStatus::from_db_str(status.to_db_str()), *status);
        }
        assert_eq!(
            WorkOrderStatus::from_db_str("UNKNOWN"),
            WorkOrderStatus::Unknown
        );
    }
}
