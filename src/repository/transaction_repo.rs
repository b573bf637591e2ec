// ==========================================
// EngordaPro 育肥管理系统 - 收支记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 收支记录独立于农场生命周期，不随农场级联删除
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::transaction::Transaction;
use crate::domain::types::TransactionType;
use crate::repository::db_utils::{encode_timestamp, parse_timestamp};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const TRANSACTION_COLUMNS: &str = r#"
    transaction_id, farm_id, lot_id, user_id, kind,
    amount, description, category, date
"#;

// ==========================================
// TransactionRepository - 收支仓储
// ==========================================
pub struct TransactionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TransactionRepository {
    /// 创建新的 TransactionRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增收支记录
    pub fn insert(&self, transaction: &Transaction) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO finance_transaction (
                transaction_id, farm_id, lot_id, user_id, kind,
                amount, description, category, date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                transaction.transaction_id,
                transaction.farm_id,
                transaction.lot_id,
                transaction.user_id,
                transaction.kind.to_db_str(),
                transaction.amount,
                transaction.description,
                transaction.category,
                encode_timestamp(&transaction.date),
            ],
        )?;
        Ok(())
    }

    /// 查询用户全部收支（按时间倒序）
    pub fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Transaction>> {
        self.query_list("user_id", user_id)
    }

    /// 查询农场全部收支（按时间倒序）
    pub fn list_by_farm(&self, farm_id: &str) -> RepositoryResult<Vec<Transaction>> {
        self.query_list("farm_id", farm_id)
    }

    fn query_list(&self, column: &str, value: &str) -> RepositoryResult<Vec<Transaction>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM finance_transaction WHERE {} = ?1 ORDER BY date DESC, transaction_id ASC",
            TRANSACTION_COLUMNS, column
        );
        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params![value], map_transaction_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(transactions)
    }

    /// 删除收支记录
    pub fn delete(&self, transaction_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM finance_transaction WHERE transaction_id = ?1",
            params![transaction_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Transaction", transaction_id));
        }
        Ok(())
    }
}

fn map_transaction_row(row: &Row<'_>) -> SqliteResult<Transaction> {
    let kind_raw: String = row.get(4)?;
    let kind = TransactionType::parse(&kind_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            format!("未知收支类型: {}", kind_raw).into(),
        )
    })?;

    Ok(Transaction {
        transaction_id: row.get(0)?,
        farm_id: row.get(1)?,
        lot_id: row.get(2)?,
        user_id: row.get(3)?,
        kind,
        amount: row.get(5)?,
        description: row.get(6)?,
        category: row.get(7)?,
        date: parse_timestamp(8, &row.get::<_, String>(8)?)?,
    })
}
