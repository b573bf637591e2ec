// ==========================================
// EngordaPro 育肥管理系统 - 饲喂计划组装引擎
// ==========================================
// 职责: 由批次 + 当前时间组装当日饲喂计划
// 流程: 适应期天数 → 阶段解析 → 精料量 → 餐次/说明渲染
// 说明: 无状态机，每次读取都由 now 重新计算
// ==========================================

use crate::domain::adaptation::AdaptationPhase;
use crate::domain::lot::Lot;
use crate::domain::types::PhaseLookupMode;
use crate::engine::adaptation_day::{day_in_protocol, days_remaining, is_in_adaptation};
use crate::engine::adaptation_schedule::PROTOCOL_LENGTH_DAYS;
use crate::engine::concentrate::{daily_concentrate, render_instruction, render_meal};
use crate::engine::phase_resolver::resolve_phase_with_mode;
use crate::i18n::adaptation_status_badge;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ==========================================
// RenderedMeal - 渲染后的单餐
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMeal {
    pub text: String,        // 展示文本
    pub concentrate_kg: f64, // 该餐精料量 (kg)，不含精料为 0
}

// ==========================================
// FeedPlan - 当日饲喂计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPlan {
    pub lot_id: String,
    pub adaptation_day: u32,
    pub protocol_length_days: u32,
    pub days_remaining: u32,
    pub in_adaptation: bool,
    pub status_label: String, // 本地化状态徽标
    pub phase_label: String,
    pub phase_start_day: u32,
    pub free_choice: bool, // 自由采食阶段（精料不限量）
    pub daily_concentrate: f64,
    pub morning: RenderedMeal,
    pub afternoon: RenderedMeal,
    pub instructions: String,
}

// ==========================================
// AdaptationEngine - 适应期饲喂引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptationEngine {
    lookup_mode: PhaseLookupMode,
}

impl AdaptationEngine {
    pub fn new(lookup_mode: PhaseLookupMode) -> Self {
        Self { lookup_mode }
    }

    pub fn lookup_mode(&self) -> PhaseLookupMode {
        self.lookup_mode
    }

    /// 解析批次当前阶段
    pub fn current_phase(&self, lot: &Lot, now: DateTime<Utc>) -> (u32, &'static AdaptationPhase) {
        let day = day_in_protocol(now, lot.adaptation_start_date);
        (day, resolve_phase_with_mode(day, self.lookup_mode))
    }

    /// 组装批次当日饲喂计划
    ///
    /// 使用批次已持久化的 total_weight
    pub fn feed_plan(&self, lot: &Lot, now: DateTime<Utc>) -> FeedPlan {
        let (day, phase) = self.current_phase(lot, now);
        let plan = render_phase(phase, lot.total_weight);

        tracing::debug!(
            lot_id = %lot.lot_id,
            day,
            phase = phase.label,
            mode = self.lookup_mode.to_db_str(),
            "饲喂计划已组装"
        );

        let in_adaptation = is_in_adaptation(day);
        FeedPlan {
            lot_id: lot.lot_id.clone(),
            adaptation_day: day,
            protocol_length_days: PROTOCOL_LENGTH_DAYS,
            days_remaining: days_remaining(day),
            in_adaptation,
            status_label: adaptation_status_badge(day, PROTOCOL_LENGTH_DAYS, in_adaptation),
            phase_label: plan.label,
            phase_start_day: phase.start_day,
            free_choice: phase.is_free_choice(),
            daily_concentrate: plan.daily_concentrate,
            morning: plan.morning,
            afternoon: plan.afternoon,
            instructions: plan.instructions,
        }
    }
}

// ==========================================
// RenderedPhase - 按总活重渲染的阶段
// ==========================================
// 供协议指南展示（不绑定具体批次）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPhase {
    pub start_day: u32,
    pub label: String,
    pub daily_concentrate: f64,
    pub morning: RenderedMeal,
    pub afternoon: RenderedMeal,
    pub instructions: String,
}

/// 按总活重渲染单个阶段
pub fn render_phase(phase: &AdaptationPhase, total_weight: f64) -> RenderedPhase {
    let daily = daily_concentrate(total_weight);
    RenderedPhase {
        start_day: phase.start_day,
        label: phase.label.to_string(),
        daily_concentrate: daily,
        morning: RenderedMeal {
            text: render_meal(&phase.morning_feed, total_weight),
            concentrate_kg: phase.morning_feed.concentrate_kg(daily),
        },
        afternoon: RenderedMeal {
            text: render_meal(&phase.afternoon_feed, total_weight),
            concentrate_kg: phase.afternoon_feed.concentrate_kg(daily),
        },
        instructions: render_instruction(phase.instructions, total_weight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn lot_with_weight(total_weight: f64) -> Lot {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 6, 0, 0).unwrap();
        let mut lot = Lot::new("F001", "Lote Norte", None, start);
        lot.total_weight = total_weight;
        lot.concentrate_amount = daily_concentrate(total_weight);
        lot
    }

    #[test]
    fn test_feed_plan_day_one() {
        let lot = lot_with_weight(770.0);
        let now = lot.adaptation_start_date + Duration::hours(5);
        let plan = AdaptationEngine::default().feed_plan(&lot, now);

        assert_eq!(plan.adaptation_day, 1);
        assert!(plan.in_adaptation);
        assert_eq!(plan.days_remaining, 14);
        assert_eq!(plan.phase_label, "Fase 1 - Dias 1-3");
        assert!(!plan.free_choice);
        assert_eq!(plan.morning.text, "3.9kg de concentrado + volumoso");
        assert!((plan.morning.concentrate_kg - 3.85).abs() < 1e-9);
        assert_eq!(plan.afternoon.text, "Apenas volumoso");
        assert_eq!(plan.afternoon.concentrate_kg, 0.0);
        assert_eq!(
            plan.instructions,
            "Período inicial de adaptação. Oferecer 3.9kg de concentrado pela manhã com volumoso."
        );
    }

    #[test]
    fn test_feed_plan_day_zero_default_mode_uses_final_phase() {
        let lot = lot_with_weight(770.0);
        let plan = AdaptationEngine::default().feed_plan(&lot, lot.adaptation_start_date);
        assert_eq!(plan.adaptation_day, 0);
        assert_eq!(plan.phase_start_day, 15);
        assert!(plan.free_choice);
        assert_eq!(plan.morning.text, "15.4kg de concentrado à vontade");
    }

    #[test]
    fn test_feed_plan_day_zero_band_mode_uses_first_phase() {
        let lot = lot_with_weight(770.0);
        let engine = AdaptationEngine::new(PhaseLookupMode::Band);
        let plan = engine.feed_plan(&lot, lot.adaptation_start_date);
        assert_eq!(plan.phase_start_day, 1);
    }

    #[test]
    fn test_feed_plan_after_protocol() {
        let lot = lot_with_weight(10_000.0);
        let plan = AdaptationEngine::default()
            .feed_plan(&lot, lot.adaptation_start_date + Duration::days(40));
        assert_eq!(plan.adaptation_day, 15);
        assert!(!plan.in_adaptation);
        assert_eq!(plan.days_remaining, 0);
        assert_eq!(plan.daily_concentrate, 200.0);
        assert_eq!(
            plan.instructions,
            "Adaptação concluída! 200.0kg de concentrado à vontade (autogrão)."
        );
    }

    #[test]
    fn test_render_phase_empty_lot() {
        let phase = resolve_phase_with_mode(11, PhaseLookupMode::ExactMatch);
        let rendered = render_phase(phase, 0.0);
        assert_eq!(rendered.morning.text, "0.0kg de concentrado apenas");
        assert_eq!(rendered.daily_concentrate, 0.0);
    }
}
