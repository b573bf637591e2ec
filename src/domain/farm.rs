// ==========================================
// EngordaPro 育肥管理系统 - 农场领域模型
// ==========================================

use crate::domain::lot::Lot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Farm - 农场
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub farm_id: String,
    pub name: String,
    pub location: Option<String>,
    pub user_id: String, // 所属用户（不做鉴权，仅作归属过滤）
    pub created_at: DateTime<Utc>,
    pub lots: Vec<Lot>,
}

impl Farm {
    pub fn new(name: &str, location: Option<String>, user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            farm_id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            location,
            user_id: user_id.to_string(),
            created_at: now,
            lots: Vec::new(),
        }
    }

    /// 农场内牲畜总数
    pub fn animal_count(&self) -> usize {
        self.lots.iter().map(|lot| lot.animal_count()).sum()
    }
}
