// ==========================================
// EngordaPro 育肥管理系统 - 适应期阶段解析
// ==========================================
// ExactMatch（默认）:
// - 返回 start_day == day 的第一个阶段
// - 未命中（0, 2, 3, 5, 6, 8, 9, 10, 12, 13, >15）一律返回最后阶段
// Band（配置开启）:
// - 返回 start_day <= day 的最后一个阶段
// - day < 1 时返回第一阶段
// ==========================================

use crate::domain::adaptation::AdaptationPhase;
use crate::domain::types::PhaseLookupMode;
use crate::engine::adaptation_schedule::{adaptation_phases, final_phase};

/// 按默认规则 (ExactMatch) 在内置阶段表中解析
pub fn resolve_phase(day: u32) -> &'static AdaptationPhase {
    resolve_phase_with_mode(day, PhaseLookupMode::ExactMatch)
}

/// 按指定查表模式在内置阶段表中解析
pub fn resolve_phase_with_mode(day: u32, mode: PhaseLookupMode) -> &'static AdaptationPhase {
    resolve_phase_in(day, adaptation_phases(), mode).unwrap_or_else(final_phase)
}

/// 在任意阶段表中解析（表为空时返回 None）
pub fn resolve_phase_in(
    day: u32,
    table: &[AdaptationPhase],
    mode: PhaseLookupMode,
) -> Option<&AdaptationPhase> {
    match mode {
        PhaseLookupMode::ExactMatch => table
            .iter()
            .find(|phase| phase.start_day == day)
            .or_else(|| table.last()),
        PhaseLookupMode::Band => table
            .iter()
            .rev()
            .find(|phase| phase.start_day <= day)
            .or_else(|| table.first()),
    }
}
