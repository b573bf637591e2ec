// ==========================================
// EngordaPro 育肥管理系统 - 收支管理 API
// ==========================================
// 职责: 收支记录增删查、收支汇总（总体 / 按农场）
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_id, InputValidator};
use crate::domain::transaction::{FinancialSummary, Transaction};
use crate::domain::types::TransactionType;
use crate::i18n::t_with_args;
use crate::repository::farm_repo::FarmRepository;
use crate::repository::lot_repo::LotRepository;
use crate::repository::transaction_repo::TransactionRepository;

/// 新增收支请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransactionRequest {
    pub user_id: String,
    pub farm_id: String,
    pub lot_id: Option<String>,
    /// "income" | "expense"
    pub kind: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
}

/// 农场收支汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmFinancialSummary {
    pub farm_id: String,
    pub farm_name: String,
    pub summary: FinancialSummary,
}

// ==========================================
// FinanceApi - 收支管理 API
// ==========================================
pub struct FinanceApi {
    farm_repo: Arc<FarmRepository>,
    lot_repo: Arc<LotRepository>,
    transaction_repo: Arc<TransactionRepository>,
}

impl FinanceApi {
    pub fn new(
        farm_repo: Arc<FarmRepository>,
        lot_repo: Arc<LotRepository>,
        transaction_repo: Arc<TransactionRepository>,
    ) -> Self {
        Self {
            farm_repo,
            lot_repo,
            transaction_repo,
        }
    }

    /// 新增收支记录（date = now）
    #[instrument(skip(self, request, now), fields(farm_id = %request.farm_id))]
    pub fn add_transaction(
        &self,
        request: NewTransactionRequest,
        now: DateTime<Utc>,
    ) -> ApiResult<Transaction> {
        InputValidator::new()
            .require_text("user_id", &request.user_id)
            .require_text("farm_id", &request.farm_id)
            .require_text("description", &request.description)
            .require_text("category", &request.category)
            .require_amount("amount", request.amount)
            .finish()?;

        let kind = TransactionType::parse(&request.kind).ok_or_else(|| {
            ApiError::InvalidInput(t_with_args(
                "validation.invalid_transaction_type",
                &[("value", &request.kind)],
            ))
        })?;

        if self.farm_repo.find_by_id(&request.farm_id)?.is_none() {
            return Err(ApiError::NotFound(t_with_args(
                "validation.farm_not_found",
                &[("id", &request.farm_id)],
            )));
        }

        let lot_id = request
            .lot_id
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        if let Some(lot_id) = &lot_id {
            let belongs_to_farm = self
                .lot_repo
                .find_by_id(lot_id)?
                .map(|lot| lot.farm_id == request.farm_id)
                .unwrap_or(false);
            if !belongs_to_farm {
                return Err(ApiError::NotFound(t_with_args(
                    "validation.lot_not_found",
                    &[("id", lot_id)],
                )));
            }
        }

        let transaction = Transaction {
            transaction_id: uuid::Uuid::new_v4().to_string(),
            farm_id: request.farm_id,
            lot_id,
            user_id: request.user_id,
            kind,
            amount: request.amount,
            description: request.description.trim().to_string(),
            category: request.category.trim().to_string(),
            date: now,
        };
        self.transaction_repo.insert(&transaction)?;

        tracing::info!(
            transaction_id = %transaction.transaction_id,
            kind = %transaction.kind,
            amount = transaction.amount,
            "收支记录已新增"
        );
        Ok(transaction)
    }

    /// 删除收支记录
    #[instrument(skip(self))]
    pub fn delete_transaction(&self, transaction_id: &str) -> ApiResult<()> {
        require_id("transaction_id", transaction_id)?;
        self.transaction_repo.delete(transaction_id)?;
        Ok(())
    }

    /// 查询用户全部收支（时间倒序）
    pub fn list_by_user(&self, user_id: &str) -> ApiResult<Vec<Transaction>> {
        require_id("user_id", user_id)?;
        Ok(self.transaction_repo.list_by_user(user_id)?)
    }

    /// 查询农场全部收支（时间倒序）
    pub fn list_by_farm(&self, farm_id: &str) -> ApiResult<Vec<Transaction>> {
        require_id("farm_id", farm_id)?;
        Ok(self.transaction_repo.list_by_farm(farm_id)?)
    }

    /// 用户总体收支汇总
    pub fn summary(&self, user_id: &str) -> ApiResult<FinancialSummary> {
        let transactions = self.list_by_user(user_id)?;
        Ok(FinancialSummary::from_transactions(&transactions))
    }

    /// 按农场收支汇总（含无记录的农场）
    pub fn summary_by_farm(&self, user_id: &str) -> ApiResult<Vec<FarmFinancialSummary>> {
        require_id("user_id", user_id)?;
        let transactions = self.transaction_repo.list_by_user(user_id)?;
        let farms = self.farm_repo.list_by_user(user_id)?;

        Ok(farms
            .into_iter()
            .map(|farm| {
                let summary = FinancialSummary::from_transactions(
                    transactions.iter().filter(|t| t.farm_id == farm.farm_id),
                );
                FarmFinancialSummary {
                    farm_id: farm.farm_id,
                    farm_name: farm.name,
                    summary,
                }
            })
            .collect())
    }
}
