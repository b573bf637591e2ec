// ==========================================
// EngordaPro 育肥管理系统 - 批次数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: adaptation_start_date 只在 insert 写入，不提供更新入口
// 说明: 派生指标只能通过 refresh_metrics 写入
// 说明: refresh_metrics 在单个事务内完成 读名单 → 重算 → 写回
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::animal::Animal;
use crate::domain::lot::{Lot, LotMetrics};
use crate::repository::animal_repo::load_roster;
use crate::repository::db_utils::{encode_timestamp, parse_timestamp};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const LOT_COLUMNS: &str = r#"
    lot_id, farm_id, name, breed, created_at,
    adaptation_start_date, total_weight, concentrate_amount
"#;

// ==========================================
// LotRepository - 批次仓储
// ==========================================
/// 职责: 管理 lot 表的 CRUD 操作
/// 返回的 Lot.animals 为空，名单由 AnimalRepository 加载
pub struct LotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LotRepository {
    /// 创建新的 LotRepository 实例
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

    /// 创建批次
    pub fn insert(&self, lot: &Lot) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO lot (
                lot_id, farm_id, name, breed, created_at,
                adaptation_start_date, total_weight, concentrate_amount
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                lot.lot_id,
                lot.farm_id,
                lot.name,
                lot.breed,
                encode_timestamp(&lot.created_at),
                encode_timestamp(&lot.adaptation_start_date),
                lot.total_weight,
                lot.concentrate_amount,
            ],
        )?;
        Ok(())
    }

    /// 按主键查询
    pub fn find_by_id(&self, lot_id: &str) -> RepositoryResult<Option<Lot>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM lot WHERE lot_id = ?1", LOT_COLUMNS);
        let lot = conn
            .query_row(&sql, params![lot_id], map_lot_row)
            .optional()?;
        Ok(lot)
    }

    /// 查询农场下全部批次（按创建时间升序）
    pub fn list_by_farm(&self, farm_id: &str) -> RepositoryResult<Vec<Lot>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM lot WHERE farm_id = ?1 ORDER BY created_at ASC, lot_id ASC",
            LOT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let lots = stmt
            .query_map(params![farm_id], map_lot_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(lots)
    }

    /// 查询用户名下全部批次
    pub fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Lot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT l.lot_id, l.farm_id, l.name, l.breed, l.created_at,
                   l.adaptation_start_date, l.total_weight, l.concentrate_amount
            FROM lot l
            JOIN farm f ON f.farm_id = l.farm_id
            WHERE f.user_id = ?1
            ORDER BY l.created_at ASC, l.lot_id ASC
            "#,
        )?;
        let lots = stmt
            .query_map(params![user_id], map_lot_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(lots)
    }

    /// 按当前名单重算并写回派生指标
    ///
    /// 读名单、计算、UPDATE 持有同一把连接锁并处于同一事务，
    /// 并发的名单变更无法在读与写之间插入，写回值总是对应最新名单
    pub fn refresh_metrics<F>(&self, lot_id: &str, compute: F) -> RepositoryResult<LotMetrics>
    where
        F: FnOnce(&[Animal]) -> LotMetrics,
    {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let roster = load_roster(&tx, lot_id)?;
        let metrics = compute(&roster);
        let affected = tx.execute(
            r#"
            UPDATE lot
            SET total_weight = ?1, concentrate_amount = ?2
            WHERE lot_id = ?3
            "#,
            params![metrics.total_weight, metrics.concentrate_amount, lot_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Lot", lot_id));
        }
        tx.commit()?;
        Ok(metrics)
    }

    /// 删除批次（级联删除其牲畜与称重记录）
    pub fn delete(&self, lot_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM lot WHERE lot_id = ?1", params![lot_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Lot", lot_id));
        }
        Ok(())
    }
}

fn map_lot_row(row: &Row<'_>) -> SqliteResult<Lot> {
    Ok(Lot {
        lot_id: row.get(0)?,
        farm_id: row.get(1)?,
        name: row.get(2)?,
        breed: row.get(3)?,
        created_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
        adaptation_start_date: parse_timestamp(5, &row.get::<_, String>(5)?)?,
        total_weight: row.get(6)?,
        concentrate_amount: row.get(7)?,
        animals: Vec::new(),
    })
}
