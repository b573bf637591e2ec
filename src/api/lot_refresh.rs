// ==========================================
// EngordaPro 育肥管理系统 - 批次指标刷新
// ==========================================
// 职责: 名单变更后的统一收尾步骤
// 流程: 读取完整名单 → LotAggregator 全量重算 → 持久化（同一事务）→ 发布事件
// 红线: 写入批次指标的唯一入口
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::lot::LotMetrics;
use crate::engine::events::{LotEvent, LotEventType, OptionalEventPublisher};
use crate::engine::lot_aggregator::LotAggregator;
use crate::repository::lot_repo::LotRepository;

/// 批次指标刷新器
pub struct LotMetricsRefresher {
    lot_repo: Arc<LotRepository>,
    aggregator: LotAggregator,
    event_publisher: OptionalEventPublisher,
}

impl LotMetricsRefresher {
    pub fn new(
        lot_repo: Arc<LotRepository>,
        event_publisher: OptionalEventPublisher,
    ) -> Self {
        Self {
            lot_repo,
            aggregator: LotAggregator::new(),
            event_publisher,
        }
    }

    /// 重算并持久化批次指标，随后发布事件
    ///
    /// # 参数
    /// - farm_id / lot_id: 目标批次
    /// - event_type: 触发原因
    /// - animal_id: 触发的牲畜（批次级为 None）
    pub fn refresh(
        &self,
        farm_id: &str,
        lot_id: &str,
        event_type: LotEventType,
        animal_id: Option<String>,
    ) -> ApiResult<LotMetrics> {
        let aggregator = &self.aggregator;
        let metrics = self
            .lot_repo
            .refresh_metrics(lot_id, |roster| aggregator.recompute(roster))?;

        tracing::info!(
            lot_id,
            event_type = event_type.as_str(),
            total_weight = metrics.total_weight,
            concentrate_amount = metrics.concentrate_amount,
            "批次指标已刷新"
        );

        self.event_publisher
            .publish(LotEvent::new(farm_id, lot_id, event_type, animal_id, metrics));
        Ok(metrics)
    }
}
