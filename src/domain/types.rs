// ==========================================
// EngordaPro 育肥管理系统 - 领域类型定义
// ==========================================
// 职责: 收支类型、饲喂份额、适应期查表模式等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 收支类型 (Transaction Type)
// ==========================================
// 序列化格式: 小写 (与原始数据一致: income / expense)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,  // 收入
    Expense, // 支出
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl TransactionType {
    /// 从字符串解析（未知值返回 None）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

// ==========================================
// 饲喂份额 (Feed Fraction)
// ==========================================
// 闭集: 1/4、2/4、自由采食
// 以日精料量为基数: Quarter = 1/4, Half = 2/4, FreeChoice = 全量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedFraction {
    Quarter,    // 1/4 concentrado
    Half,       // 2/4 concentrado
    FreeChoice, // Concentrado à vontade
}

impl FeedFraction {
    /// 该份额对应的精料量 (kg)
    ///
    /// # 参数
    /// - `daily_concentrate`: 日精料量 (kg)
    pub fn amount(&self, daily_concentrate: f64) -> f64 {
        match self {
            FeedFraction::Quarter => daily_concentrate / 4.0,
            FeedFraction::Half => daily_concentrate / 2.0,
            FeedFraction::FreeChoice => daily_concentrate,
        }
    }

    /// 模板中的原始占位写法
    pub fn placeholder(&self) -> &'static str {
        match self {
            FeedFraction::Quarter => "1/4",
            FeedFraction::Half => "2/4",
            FeedFraction::FreeChoice => "à vontade",
        }
    }
}

impl fmt::Display for FeedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFraction::Quarter => write!(f, "QUARTER"),
            FeedFraction::Half => write!(f, "HALF"),
            FeedFraction::FreeChoice => write!(f, "FREE_CHOICE"),
        }
    }
}

// ==========================================
// 适应期阶段查表模式 (Phase Lookup Mode)
// ==========================================
// ExactMatch: 仅 start_day 精确命中才返回对应阶段，否则返回最后阶段（默认）
// Band: 返回最近的前置断点阶段，day < 1 时返回第一阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseLookupMode {
    #[default]
    ExactMatch,
    Band,
}

impl fmt::Display for PhaseLookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl PhaseLookupMode {
    /// 从配置字符串解析（未知值回退为 ExactMatch）
    pub fn from_config_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "BAND" => PhaseLookupMode::Band,
            _ => PhaseLookupMode::ExactMatch,
        }
    }

    /// 转换为配置存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PhaseLookupMode::ExactMatch => "EXACT_MATCH",
            PhaseLookupMode::Band => "BAND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_roundtrip_from_db() {
        assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse(" EXPENSE "), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("transfer"), None);
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn test_feed_fraction_amount() {
        assert_eq!(FeedFraction::Quarter.amount(200.0), 50.0);
        assert_eq!(FeedFraction::Half.amount(200.0), 100.0);
        assert_eq!(FeedFraction::FreeChoice.amount(200.0), 200.0);
    }

    #[test]
    fn test_phase_lookup_mode_parse() {
        assert_eq!(PhaseLookupMode::from_config_str("band"), PhaseLookupMode::Band);
        assert_eq!(
            PhaseLookupMode::from_config_str("EXACT_MATCH"),
            PhaseLookupMode::ExactMatch
        );
        // 未知值回退默认
        assert_eq!(PhaseLookupMode::from_config_str("???"), PhaseLookupMode::ExactMatch);
        assert_eq!(PhaseLookupMode::default(), PhaseLookupMode::ExactMatch);
    }
}
