// ==========================================
// EngordaPro 育肥管理系统 - 适应期阶段表
// ==========================================
// 职责: 15 天 6 阶段精料适应方案（静态数据）
// 不变量: start_day 严格递增；最后一个阶段 start_day == PROTOCOL_LENGTH_DAYS
// ==========================================

use crate::domain::adaptation::{AdaptationPhase, MealPlan};
use crate::domain::types::FeedFraction;

/// 适应期总天数
pub const PROTOCOL_LENGTH_DAYS: u32 = 15;

/// 适应期阶段表（按 start_day 升序）
pub static ADAPTATION_PHASES: [AdaptationPhase; 6] = [
    AdaptationPhase {
        start_day: 1,
        label: "Fase 1 - Dias 1-3",
        morning_feed: MealPlan::new("1/4 concentrado + volumoso", Some(FeedFraction::Quarter)),
        afternoon_feed: MealPlan::new("Apenas volumoso", None),
        instructions: "Período inicial de adaptação. Oferecer 1/4 do concentrado pela manhã com volumoso.",
    },
    AdaptationPhase {
        start_day: 4,
        label: "Fase 2 - Dias 4-6",
        morning_feed: MealPlan::new("1/4 concentrado + volumoso", Some(FeedFraction::Quarter)),
        afternoon_feed: MealPlan::new("1/4 concentrado + volumoso", Some(FeedFraction::Quarter)),
        instructions: "Aumentar para 2 refeições diárias com concentrado.",
    },
    AdaptationPhase {
        start_day: 7,
        label: "Fase 3 - Dias 7-10",
        morning_feed: MealPlan::new("1/4 concentrado + volumoso", Some(FeedFraction::Quarter)),
        afternoon_feed: MealPlan::new("2/4 concentrado apenas", Some(FeedFraction::Half)),
        instructions: "Aumentar concentrado da tarde e retirar volumoso gradualmente.",
    },
    AdaptationPhase {
        start_day: 11,
        label: "Fase 4 - Dias 11-13",
        morning_feed: MealPlan::new("2/4 concentrado apenas", Some(FeedFraction::Half)),
        afternoon_feed: MealPlan::new("2/4 concentrado apenas", Some(FeedFraction::Half)),
        instructions: "Retirar volumoso completamente. Oferecer apenas concentrado.",
    },
    AdaptationPhase {
        start_day: 14,
        label: "Fase 5 - Dia 14",
        morning_feed: MealPlan::new("2/4 concentrado apenas", Some(FeedFraction::Half)),
        afternoon_feed: MealPlan::new("Sem alimentação", None),
        instructions: "Reduzir para apenas 1 refeição pela manhã.",
    },
    AdaptationPhase {
        start_day: 15,
        label: "Fase Final - Autoconsumo",
        morning_feed: MealPlan::new("Concentrado à vontade", Some(FeedFraction::FreeChoice)),
        afternoon_feed: MealPlan::new("Concentrado à vontade", Some(FeedFraction::FreeChoice)),
        instructions: "Adaptação concluída! Concentrado à vontade (autogrão).",
    },
];

/// 获取阶段表
pub fn adaptation_phases() -> &'static [AdaptationPhase] {
    &ADAPTATION_PHASES
}

/// 最终阶段（自由采食）
pub fn final_phase() -> &'static AdaptationPhase {
    &ADAPTATION_PHASES[ADAPTATION_PHASES.len() - 1]
}

/// 阶段覆盖的天数区间 [start, end]
///
/// end = 下一阶段 start_day - 1；最后阶段 end == start
pub fn phase_day_range(table: &[AdaptationPhase], index: usize) -> Option<(u32, u32)> {
    let phase = table.get(index)?;
    let end = table
        .get(index + 1)
        .map(|next| next.start_day.saturating_sub(1))
        .unwrap_or(phase.start_day);
    Some((phase.start_day, end))
}
