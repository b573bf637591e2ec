// ==========================================
// EngordaPro 育肥管理系统 - 牲畜与称重领域模型
// ==========================================
// 红线: 称重历史只追加不修改；创建牲畜不算一次称重
// 红线: current_weight 始终等于最近一次称重结果
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 一天的毫秒数
pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

// ==========================================
// WeightRecord - 称重记录
// ==========================================
// 创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub record_id: String,          // 记录ID: "{animal_id}_{毫秒时间戳}"
    pub animal_id: String,          // 所属牲畜
    pub weight: f64,                // 体重 (kg)
    pub recorded_at: DateTime<Utc>, // 称重时间
}

impl WeightRecord {
    /// 同一牲畜在同一毫秒内的两次称重得到相同 record_id，读取去重时合并为一条
    pub fn new(animal_id: &str, weight: f64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            record_id: format!("{}_{}", animal_id, recorded_at.timestamp_millis()),
            animal_id: animal_id.to_string(),
            weight,
            recorded_at,
        }
    }
}

// ==========================================
// Animal - 牲畜
// ==========================================
// 身份以 animal_id 为准；耳标号 (tag_number) 不保证唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    // ===== 主键 =====
    pub animal_id: String,
    pub lot_id: String,

    // ===== 基本信息 =====
    pub tag_number: String,   // 耳标号
    pub age_months: u32,      // 月龄
    pub breed: String,        // 品种
    pub entry_date: NaiveDate, // 入栏日期

    // ===== 体重 =====
    pub initial_weight: f64, // 入栏体重 (kg)
    pub current_weight: f64, // 当前体重 (kg)
    pub weight_history: Vec<WeightRecord>,

    pub created_at: DateTime<Utc>,
}

impl Animal {
    /// 创建新牲畜
    ///
    /// current_weight 初始化为 initial_weight，称重历史为空
    pub fn new(
        lot_id: &str,
        tag_number: &str,
        initial_weight: f64,
        age_months: u32,
        breed: &str,
        entry_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            animal_id: uuid::Uuid::new_v4().to_string(),
            lot_id: lot_id.to_string(),
            tag_number: tag_number.to_string(),
            age_months,
            breed: breed.to_string(),
            entry_date,
            initial_weight,
            current_weight: initial_weight,
            weight_history: Vec::new(),
            created_at,
        }
    }

    /// 追加一次称重，并同步 current_weight
    ///
    /// 同一天允许多次称重
    pub fn record_weight(&mut self, weight: f64, recorded_at: DateTime<Utc>) -> WeightRecord {
        let record = WeightRecord::new(&self.animal_id, weight, recorded_at);
        self.weight_history.push(record.clone());
        self.current_weight = weight;
        record
    }

    /// 增重 (kg) = 当前体重 - 入栏体重
    pub fn weight_gain(&self) -> f64 {
        self.current_weight - self.initial_weight
    }

    /// 日增重 GMD (kg/天)
    ///
    /// 取称重历史首末两条记录计算，保留两位小数（恰好居中时向正无穷进位）
    /// 少于两条记录或时间跨度为 0 时返回 0
    pub fn average_daily_gain(&self) -> f64 {
        let (first, last) = match (self.weight_history.first(), self.weight_history.last()) {
            (Some(first), Some(last)) if self.weight_history.len() >= 2 => (first, last),
            _ => return 0.0,
        };

        let span_ms = (last.recorded_at - first.recorded_at).num_milliseconds().abs();
        if span_ms == 0 {
            return 0.0;
        }

        let days = span_ms as f64 / MILLIS_PER_DAY as f64;
        round_two_decimals((last.weight - first.weight) / days)
    }

    /// 在栏天数（向上取整）
    pub fn days_on_feed(&self, now: DateTime<Utc>) -> i64 {
        let entry = self
            .entry_date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or(self.created_at);
        let elapsed_ms = (now - entry).num_milliseconds();
        div_ceil_millis(elapsed_ms)
    }
}

/// 保留两位小数
///
/// 只有 x.xx5 恰为二进制精确值（8 倍为奇数）时才是真正的中点，此时取较大者：
/// 0.125 → 0.13，-0.125 → -0.12。其余按精确值就近舍入
fn round_two_decimals(value: f64) -> f64 {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0 + 0.5).floor() / 100.0;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// 毫秒数换算为天数（向上取整，负数同样向正无穷取整）
pub(crate) fn div_ceil_millis(ms: i64) -> i64 {
    let days = ms / MILLIS_PER_DAY;
    if ms % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// 按 record_id 去重称重历史
///
/// 规则: 保留 id 首次出现的位置，内容取该 id 最后一次出现的记录
pub fn dedup_weight_history(records: Vec<WeightRecord>) -> Vec<WeightRecord> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<WeightRecord> = Vec::with_capacity(records.len());

    for record in records {
        match position.get(&record.record_id) {
            Some(&idx) => unique[idx] = record,
            None => {
                position.insert(record.record_id.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}
