// ==========================================
// EngordaPro 育肥管理系统 - 适应期阶段领域模型
// ==========================================
// 职责: 定义适应期阶段、餐次饲喂描述
// 红线: 阶段表为静态数据，随代码打包，不可外部配置
// ==========================================

use crate::domain::types::FeedFraction;
use serde::Serialize;

// ==========================================
// MealPlan - 单餐饲喂描述
// ==========================================
// template: 展示用原文（含份额占位写法）
// fraction: 结构化份额标记（None 表示该餐不含精料）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MealPlan {
    pub template: &'static str,
    pub fraction: Option<FeedFraction>,
}

impl MealPlan {
    pub const fn new(template: &'static str, fraction: Option<FeedFraction>) -> Self {
        Self { template, fraction }
    }

    /// 该餐精料量 (kg)，不含精料时为 0
    pub fn concentrate_kg(&self, daily_concentrate: f64) -> f64 {
        self.fraction
            .map(|f| f.amount(daily_concentrate))
            .unwrap_or(0.0)
    }
}

// ==========================================
// AdaptationPhase - 适应期阶段
// ==========================================
// 对齐原始数据字段: day / phase / morningFeed / afternoonFeed / instructions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdaptationPhase {
    pub start_day: u32,               // 阶段起始日 (从 1 开始)
    pub label: &'static str,          // 展示名称
    pub morning_feed: MealPlan,       // 上午饲喂
    pub afternoon_feed: MealPlan,     // 下午饲喂
    pub instructions: &'static str,   // 操作说明（可能含占位写法）
}

impl AdaptationPhase {
    /// 是否为最终自由采食阶段
    pub fn is_free_choice(&self) -> bool {
        matches!(self.morning_feed.fraction, Some(FeedFraction::FreeChoice))
    }
}
