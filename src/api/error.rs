// ==========================================
// EngordaPro 育肥管理系统 - API 层错误类型
// ==========================================
// 职责: 统一对外错误；仓储错误在此转换为用户可读消息
// ==========================================

use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API 层错误
#[derive(Error, Debug)]
pub enum ApiError {
    /// 单项入参不合法（消息已本地化）
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 多项入参同时不合法
    #[error("输入校验失败: {reason}")]
    InputValidationError {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 违反引用完整性（如批次所属农场已被删除）
    #[error("数据冲突: {0}")]
    Conflict(String),

    #[error("存储错误: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::ForeignKeyViolation(msg)
            | RepositoryError::UniqueConstraintViolation(msg) => ApiError::Conflict(msg),
            other => {
                tracing::error!(error = %other, "仓储层错误");
                ApiError::Storage(other.to_string())
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// 校验违规项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub field: String,
    /// 已本地化
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::not_found("Lot", "L001").into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Lot"));
                assert!(msg.contains("L001"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }

        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(api_err, ApiError::Storage(_)));

        let api_err: ApiError =
            RepositoryError::ForeignKeyViolation("FOREIGN KEY constraint failed".to_string()).into();
        assert!(matches!(api_err, ApiError::Conflict(_)));
    }
}
