// ==========================================
// EngordaPro 育肥管理系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{entity} 不存在: {id}")]
    NotFound { entity: String, id: String },

    /// 共享连接的 Mutex 已中毒
    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    /// 例如为不存在的批次写入牲畜
    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    /// 已落库的时间/日期列无法解析
    #[error("第 {column} 列数据损坏: {message}")]
    CorruptRow { column: usize, message: String },

    #[error("SQLite 错误: {0}")]
    Sqlite(String),
}

impl RepositoryError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        RepositoryError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("FOREIGN KEY") => {
                RepositoryError::ForeignKeyViolation(msg)
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("UNIQUE") => {
                RepositoryError::UniqueConstraintViolation(msg)
            }
            rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
                RepositoryError::CorruptRow {
                    column,
                    message: source.to_string(),
                }
            }
            other => RepositoryError::Sqlite(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_from_sqlite_errors() {
        let err: RepositoryError = rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            "bad timestamp".into(),
        )
        .into();
        assert!(matches!(err, RepositoryError::CorruptRow { column: 4, .. }));

        let err: RepositoryError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, RepositoryError::Sqlite(_)));
    }
}
