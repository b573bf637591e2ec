// ==========================================
// EngordaPro 育肥管理系统 - 批次领域模型
// ==========================================
// 红线: adaptation_start_date 仅在创建时写入一次，之后不可变
// 红线: total_weight / concentrate_amount 为派生值，必须等于当前牲畜名单的汇总
// ==========================================

use crate::domain::animal::Animal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// LotMetrics - 批次派生指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LotMetrics {
    pub total_weight: f64,       // 总活重 (kg)
    pub concentrate_amount: f64, // 日精料量 (kg)
}

impl LotMetrics {
    pub fn zero() -> Self {
        Self::default()
    }
}

// ==========================================
// Lot - 批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    // ===== 主键 =====
    pub lot_id: String,
    pub farm_id: String,

    // ===== 基本信息 =====
    pub name: String,
    pub breed: Option<String>,
    pub created_at: DateTime<Utc>,

    // ===== 适应期锚点 =====
    pub adaptation_start_date: DateTime<Utc>,

    // ===== 派生指标 =====
    pub total_weight: f64,
    pub concentrate_amount: f64,

    // ===== 牲畜名单（按加入顺序） =====
    pub animals: Vec<Animal>,
}

impl Lot {
    /// 创建新批次
    ///
    /// adaptation_start_date = created_at = now，派生指标归零
    pub fn new(farm_id: &str, name: &str, breed: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            lot_id: uuid::Uuid::new_v4().to_string(),
            farm_id: farm_id.to_string(),
            name: name.to_string(),
            breed,
            created_at: now,
            adaptation_start_date: now,
            total_weight: 0.0,
            concentrate_amount: 0.0,
            animals: Vec::new(),
        }
    }

    /// 当前派生指标
    pub fn metrics(&self) -> LotMetrics {
        LotMetrics {
            total_weight: self.total_weight,
            concentrate_amount: self.concentrate_amount,
        }
    }

    /// 写入重算后的派生指标
    pub fn apply_metrics(&mut self, metrics: LotMetrics) {
        self.total_weight = metrics.total_weight;
        self.concentrate_amount = metrics.concentrate_amount;
    }

    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    /// 平均体重 (kg)，空批次为 0
    pub fn average_weight(&self) -> f64 {
        if self.animals.is_empty() {
            return 0.0;
        }
        let total: f64 = self.animals.iter().map(|a| a.current_weight).sum();
        total / self.animals.len() as f64
    }

    /// 平均日增重 (kg/天)，空批次为 0
    pub fn average_daily_gain(&self) -> f64 {
        if self.animals.is_empty() {
            return 0.0;
        }
        let total: f64 = self.animals.iter().map(|a| a.average_daily_gain()).sum();
        total / self.animals.len() as f64
    }
}
