// ==========================================
// EngordaPro 育肥管理系统 - 批次指标汇总引擎
// ==========================================
// 职责: 由当前牲畜名单重算批次总活重与日精料量
// 红线: 每次都基于完整名单全量重算，不做增量加减
// 触发: 新增牲畜 / 删除牲畜 / 重新称重 / 农场数据重载
// ==========================================

use crate::domain::animal::Animal;
use crate::domain::lot::LotMetrics;
use crate::engine::concentrate::daily_concentrate;
use tracing::instrument;

/// 全量重算批次指标
///
/// 空名单返回 {0, 0}；同一名单重复调用结果一致
pub fn recompute(animals: &[Animal]) -> LotMetrics {
    let total_weight: f64 = animals.iter().map(|a| a.current_weight).sum();
    LotMetrics {
        total_weight,
        concentrate_amount: daily_concentrate(total_weight),
    }
}

// ==========================================
// LotAggregator - 批次指标汇总引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LotAggregator;

impl LotAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 重算批次指标
    #[instrument(skip(self, animals), fields(count = animals.len()))]
    pub fn recompute(&self, animals: &[Animal]) -> LotMetrics {
        let metrics = recompute(animals);
        tracing::debug!(
            total_weight = metrics.total_weight,
            concentrate_amount = metrics.concentrate_amount,
            "批次指标重算完成"
        );
        metrics
    }
}
