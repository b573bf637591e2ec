// ==========================================
// EngordaPro 育肥管理系统 - 适应期天数计算
// ==========================================
// 规则: day = min(ceil(|now - start| / 1天), 15)
// 说明:
// - 使用绝对值: start 在未来时与同距离的过去等价（容忍的数据异常）
// - 同一时刻创建返回 0，阶段解析时按查表模式处理
// - 适应期结束后固定为 15，不会出现 16+
// ==========================================

use crate::domain::animal::div_ceil_millis;
use crate::engine::adaptation_schedule::PROTOCOL_LENGTH_DAYS;
use chrono::{DateTime, Utc};

/// 计算适应期第几天，范围 [0, 15]
pub fn day_in_protocol(now: DateTime<Utc>, adaptation_start: DateTime<Utc>) -> u32 {
    let elapsed_ms = (now - adaptation_start).num_milliseconds().abs();
    let days = div_ceil_millis(elapsed_ms);
    days.min(PROTOCOL_LENGTH_DAYS as i64) as u32
}

/// 是否仍处于适应期（未达到最后一天）
pub fn is_in_adaptation(day: u32) -> bool {
    day < PROTOCOL_LENGTH_DAYS
}

/// 距离适应期结束的剩余天数
pub fn days_remaining(day: u32) -> u32 {
    PROTOCOL_LENGTH_DAYS.saturating_sub(day)
}
