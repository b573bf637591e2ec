// ==========================================
// EngordaPro 育肥管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::protocol_config_trait::ProtocolConfigReader;
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::types::PhaseLookupMode;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};

/// 支持的展示语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["pt-BR", "en"];

/// 默认展示语言
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 当前只使用 global 作用域
const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 独立打开数据库（建表幂等）
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 复用 AppState 的共享连接（PRAGMA 再应用一次，幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Box<dyn Error>> {
        Ok(self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?)
    }

    /// 读取 global 配置值，不存在返回 None
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn value_or(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global 配置值（upsert）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 全部 global 配置的 JSON 快照（键有序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1")?;
        let entries = stmt
            .query_map(params![GLOBAL_SCOPE], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<BTreeMap<String, String>>>()?;
        Ok(serde_json::to_string(&entries)?)
    }
}

// ==========================================
// ProtocolConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ProtocolConfigReader for ConfigManager {
    async fn get_phase_lookup_mode(&self) -> Result<PhaseLookupMode, Box<dyn Error>> {
        let value = self.value_or(
            config_keys::PHASE_LOOKUP_MODE,
            PhaseLookupMode::ExactMatch.to_db_str(),
        )?;
        Ok(PhaseLookupMode::from_config_str(&value))
    }

    async fn get_display_locale(&self) -> Result<String, Box<dyn Error>> {
        let value = self.value_or(config_keys::DISPLAY_LOCALE, DEFAULT_LOCALE)?;
        let trimmed = value.trim();
        match SUPPORTED_LOCALES.iter().find(|l| l.eq_ignore_ascii_case(trimmed)) {
            Some(locale) => Ok(locale.to_string()),
            None => {
                tracing::warn!(
                    config_key = config_keys::DISPLAY_LOCALE,
                    raw_value = %value,
                    "不支持的展示语言，使用默认值"
                );
                Ok(DEFAULT_LOCALE.to_string())
            }
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 适应期阶段查表模式: EXACT_MATCH | BAND
    pub const PHASE_LOOKUP_MODE: &str = "phase_lookup_mode";

    // 展示语言: pt-BR | en
    pub const DISPLAY_LOCALE: &str = "display_locale";
}
