// ==========================================
// EngordaPro 育肥管理系统 - 牲畜与称重数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: weight_record 只追加，不更新、不删除（随牲畜级联删除除外）
// 说明: 名单顺序 = 插入顺序 (seq)；读取时按 record_id 去重称重历史
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::animal::{dedup_weight_history, Animal, WeightRecord};
use crate::repository::db_utils::{encode_date, encode_timestamp, parse_date, parse_timestamp};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const ANIMAL_COLUMNS: &str = r#"
    animal_id, lot_id, tag_number, age_months, breed, entry_date,
    initial_weight, current_weight, created_at
"#;

// ==========================================
// AnimalRepository - 牲畜仓储
// ==========================================
/// 职责: 管理 animal / weight_record 表
pub struct AnimalRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AnimalRepository {
    /// 创建新的 AnimalRepository 实例
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

    /// 新增牲畜（连同已有称重历史一并写入）
    pub fn insert(&self, animal: &Animal) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO animal (
                animal_id, lot_id, tag_number, age_months, breed, entry_date,
                initial_weight, current_weight, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                animal.animal_id,
                animal.lot_id,
                animal.tag_number,
                animal.age_months,
                animal.breed,
                encode_date(&animal.entry_date),
                animal.initial_weight,
                animal.current_weight,
                encode_timestamp(&animal.created_at),
            ],
        )?;
        for record in &animal.weight_history {
            insert_weight_record(&tx, record)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// 追加称重记录并同步 current_weight
    ///
    /// 两步写入在同一事务内完成
    pub fn append_weight_record(&self, record: &WeightRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let affected = tx.execute(
            "UPDATE animal SET current_weight = ?1 WHERE animal_id = ?2",
            params![record.weight, record.animal_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Animal", &record.animal_id));
        }
        insert_weight_record(&tx, record)?;
        tx.commit()?;
        Ok(())
    }

    /// 按主键查询（含去重后的称重历史）
    pub fn find_by_id(&self, animal_id: &str) -> RepositoryResult<Option<Animal>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM animal WHERE animal_id = ?1", ANIMAL_COLUMNS);
        let animal = conn
            .query_row(&sql, params![animal_id], map_animal_row)
            .optional()?;

        match animal {
            Some(mut animal) => {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT record_id, animal_id, weight, recorded_at
                    FROM weight_record
                    WHERE animal_id = ?1
                    ORDER BY seq ASC
                    "#,
                )?;
                let records = stmt
                    .query_map(params![animal_id], map_weight_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                animal.weight_history = dedup_weight_history(records);
                Ok(Some(animal))
            }
            None => Ok(None),
        }
    }

    /// 查询批次牲畜名单（插入顺序，含称重历史）
    pub fn list_by_lot(&self, lot_id: &str) -> RepositoryResult<Vec<Animal>> {
        let conn = self.get_conn()?;
        load_roster(&conn, lot_id)
    }

    /// 删除牲畜（级联删除称重记录）
    pub fn delete(&self, animal_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM animal WHERE animal_id = ?1", params![animal_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Animal", animal_id));
        }
        Ok(())
    }
}

/// 在给定连接（或事务）上读取批次名单
///
/// LotRepository::refresh_metrics 在同一事务内复用
pub(crate) fn load_roster(conn: &Connection, lot_id: &str) -> RepositoryResult<Vec<Animal>> {
    let sql = format!(
        "SELECT {} FROM animal WHERE lot_id = ?1 ORDER BY seq ASC",
        ANIMAL_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut animals = stmt
        .query_map(params![lot_id], map_animal_row)?
        .collect::<SqliteResult<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        r#"
        SELECT w.record_id, w.animal_id, w.weight, w.recorded_at
        FROM weight_record w
        JOIN animal a ON a.animal_id = w.animal_id
        WHERE a.lot_id = ?1
        ORDER BY w.seq ASC
        "#,
    )?;
    let mut histories: HashMap<String, Vec<WeightRecord>> = HashMap::new();
    for record in stmt.query_map(params![lot_id], map_weight_row)? {
        let record = record?;
        histories
            .entry(record.animal_id.clone())
            .or_default()
            .push(record);
    }

    for animal in &mut animals {
        if let Some(records) = histories.remove(&animal.animal_id) {
            animal.weight_history = dedup_weight_history(records);
        }
    }
    Ok(animals)
}

fn insert_weight_record(conn: &Connection, record: &WeightRecord) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO weight_record (record_id, animal_id, weight, recorded_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            record.record_id,
            record.animal_id,
            record.weight,
            encode_timestamp(&record.recorded_at),
        ],
    )?;
    Ok(())
}

fn map_animal_row(row: &Row<'_>) -> SqliteResult<Animal> {
    Ok(Animal {
        animal_id: row.get(0)?,
        lot_id: row.get(1)?,
        tag_number: row.get(2)?,
        age_months: row.get(3)?,
        breed: row.get(4)?,
        entry_date: parse_date(5, &row.get::<_, String>(5)?)?,
        initial_weight: row.get(6)?,
        current_weight: row.get(7)?,
        weight_history: Vec::new(),
        created_at: parse_timestamp(8, &row.get::<_, String>(8)?)?,
    })
}

fn map_weight_row(row: &Row<'_>) -> SqliteResult<WeightRecord> {
    Ok(WeightRecord {
        record_id: row.get(0)?,
        animal_id: row.get(1)?,
        weight: row.get(2)?,
        recorded_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
    })
}
