// ==========================================
// EngordaPro 育肥管理系统 - 仓储层行解析工具
// ==========================================
// 职责: 时间/日期列的统一编码与解析
// 格式: 时间戳 RFC 3339（毫秒精度，UTC），日期 YYYY-MM-DD
// ==========================================

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;

/// 时间戳编码为 RFC 3339 文本
pub fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 日期编码为 YYYY-MM-DD
pub fn encode_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 解析 RFC 3339 时间列
///
/// 解析失败转换为 FromSqlConversionFailure，不静默回退
pub fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// 解析 YYYY-MM-DD 日期列
pub fn parse_date(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
