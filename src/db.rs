// ==========================================
// EngordaPro 育肥管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键级联删除依赖 foreign_keys）
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 统一建表，仓储与测试共用同一份 schema
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表（幂等）
///
/// 级联关系: farm → lot → animal → weight_record
/// weight_record.record_id 不做唯一约束，重复由读取侧去重
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_scope (
            scope_id TEXT PRIMARY KEY,
            scope_type TEXT NOT NULL,
            scope_key TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(scope_type, scope_key)
        );

        INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key)
        VALUES ('global', 'GLOBAL', 'global');

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL REFERENCES config_scope(scope_id) ON DELETE CASCADE,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS farm (
            farm_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            location TEXT,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_farm_user ON farm(user_id);

        CREATE TABLE IF NOT EXISTS lot (
            lot_id TEXT PRIMARY KEY,
            farm_id TEXT NOT NULL REFERENCES farm(farm_id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            breed TEXT,
            created_at TEXT NOT NULL,
            adaptation_start_date TEXT NOT NULL,
            total_weight REAL NOT NULL DEFAULT 0,
            concentrate_amount REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_lot_farm ON lot(farm_id);

        CREATE TABLE IF NOT EXISTS animal (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            animal_id TEXT NOT NULL UNIQUE,
            lot_id TEXT NOT NULL REFERENCES lot(lot_id) ON DELETE CASCADE,
            tag_number TEXT NOT NULL,
            age_months INTEGER NOT NULL,
            breed TEXT NOT NULL,
            entry_date TEXT NOT NULL,
            initial_weight REAL NOT NULL,
            current_weight REAL NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_animal_lot ON animal(lot_id);

        CREATE TABLE IF NOT EXISTS weight_record (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            record_id TEXT NOT NULL,
            animal_id TEXT NOT NULL REFERENCES animal(animal_id) ON DELETE CASCADE,
            weight REAL NOT NULL,
            recorded_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_weight_record_animal ON weight_record(animal_id, seq);

        CREATE TABLE IF NOT EXISTS finance_transaction (
            transaction_id TEXT PRIMARY KEY,
            farm_id TEXT NOT NULL,
            lot_id TEXT,
            user_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            amount REAL NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_finance_user ON finance_transaction(user_id);
        CREATE INDEX IF NOT EXISTS idx_finance_farm ON finance_transaction(farm_id);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);

        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_farm_delete_cascades() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();

        conn.execute_batch(
            r#"
            INSERT INTO farm VALUES ('F1', 'Fazenda', NULL, 'U1', '2026-01-01T00:00:00Z');
            INSERT INTO lot (lot_id, farm_id, name, created_at, adaptation_start_date)
              VALUES ('L1', 'F1', 'Lote', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z');
            INSERT INTO animal (animal_id, lot_id, tag_number, age_months, breed, entry_date,
                                initial_weight, current_weight, created_at)
              VALUES ('A1', 'L1', 'T1', 12, 'Nelore', '2026-01-01', 300, 300, '2026-01-01T00:00:00Z');
            INSERT INTO weight_record (record_id, animal_id, weight, recorded_at)
              VALUES ('A1_1', 'A1', 300, '2026-01-01T00:00:00Z');
            DELETE FROM farm WHERE farm_id = 'F1';
            "#,
        )
        .unwrap();

        let remaining: i64 = conn
            .query_row(
                "SELECT (SELECT COUNT(*) FROM lot) + (SELECT COUNT(*) FROM animal) + (SELECT COUNT(*) FROM weight_record)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
