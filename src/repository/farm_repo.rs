// ==========================================
// EngordaPro 育肥管理系统 - 农场数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 删除农场由外键级联清理批次/牲畜/称重记录
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::farm::Farm;
use crate::repository::db_utils::{encode_timestamp, parse_timestamp};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// FarmRepository - 农场仓储
// ==========================================
/// 职责: 管理 farm 表的 CRUD 操作
/// 返回的 Farm.lots 为空，批次由 LotRepository 加载
pub struct FarmRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FarmRepository {
    /// 创建新的 FarmRepository 实例
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

    /// 创建农场
    pub fn insert(&self, farm: &Farm) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO farm (farm_id, name, location, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                farm.farm_id,
                farm.name,
                farm.location,
                farm.user_id,
                encode_timestamp(&farm.created_at),
            ],
        )?;
        Ok(())
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(Farm)): 找到农场
    /// - Ok(None): 未找到
    pub fn find_by_id(&self, farm_id: &str) -> RepositoryResult<Option<Farm>> {
        let conn = self.get_conn()?;
        let farm = conn
            .query_row(
                r#"
                SELECT farm_id, name, location, user_id, created_at
                FROM farm
                WHERE farm_id = ?1
                "#,
                params![farm_id],
                map_farm_row,
            )
            .optional()?;
        Ok(farm)
    }

    /// 查询用户的全部农场（按创建时间升序）
    pub fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Farm>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT farm_id, name, location, user_id, created_at
            FROM farm
            WHERE user_id = ?1
            ORDER BY created_at ASC, farm_id ASC
            "#,
        )?;

        let farms = stmt
            .query_map(params![user_id], map_farm_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(farms)
    }

    /// 统计农场总数
    pub fn count_by_user(&self, user_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM farm WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// 删除农场（级联删除其批次与牲畜）
    pub fn delete(&self, farm_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM farm WHERE farm_id = ?1", params![farm_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Farm", farm_id));
        }
        Ok(())
    }
}

fn map_farm_row(row: &Row<'_>) -> SqliteResult<Farm> {
    Ok(Farm {
        farm_id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        user_id: row.get(3)?,
        created_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
        lots: Vec::new(),
    })
}
