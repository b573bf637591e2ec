// ==========================================
// EngordaPro 育肥管理系统 - 引擎层
// ==========================================
// 职责: 适应期天数、阶段解析、精料计算、批次指标汇总
// 红线: Engine 不拼 SQL，全部为纯函数或无状态结构
// ==========================================

pub mod adaptation_day;
pub mod adaptation_schedule;
pub mod concentrate;
pub mod events;
pub mod feed_plan;
pub mod lot_aggregator;
pub mod phase_resolver;

// 重导出核心引擎
pub use adaptation_day::{day_in_protocol, days_remaining, is_in_adaptation};
pub use adaptation_schedule::{adaptation_phases, final_phase, phase_day_range, PROTOCOL_LENGTH_DAYS};
pub use concentrate::{daily_concentrate, format_one_decimal, render_instruction, render_meal};
pub use events::{
    ChannelEventPublisher, LotEvent, LotEventPublisher, LotEventType, NoOpEventPublisher,
    OptionalEventPublisher,
};
pub use feed_plan::{render_phase, AdaptationEngine, FeedPlan, RenderedMeal, RenderedPhase};
pub use lot_aggregator::{recompute, LotAggregator};
pub use phase_resolver::{resolve_phase, resolve_phase_with_mode};
