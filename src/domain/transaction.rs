// ==========================================
// EngordaPro 育肥管理系统 - 收支领域模型
// ==========================================

use crate::domain::types::TransactionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Transaction - 收支记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub farm_id: String,
    pub lot_id: Option<String>, // 可选关联批次
    pub user_id: String,
    pub kind: TransactionType,
    pub amount: f64,            // 金额 (> 0)
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,    // 记账时间（创建时写入）
}

// ==========================================
// FinancialSummary - 收支汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
}

impl FinancialSummary {
    /// 汇总收支
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_income = 0.0;
        let mut total_expenses = 0.0;
        for t in transactions {
            match t.kind {
                TransactionType::Income => total_income += t.amount,
                TransactionType::Expense => total_expenses += t.amount,
            }
        }
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.balance >= 0.0
    }
}
