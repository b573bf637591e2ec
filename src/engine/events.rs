// ==========================================
// EngordaPro 育肥管理系统 - 批次变更事件发布
// ==========================================
// 职责: 定义批次事件发布 trait，实现依赖倒置
// 说明: API 层在名单变更并重算指标后发布事件，同步层订阅
// ==========================================

use crate::domain::lot::LotMetrics;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

// ==========================================
// 批次事件类型
// ==========================================

/// 批次事件触发类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotEventType {
    /// 批次创建
    LotCreated,
    /// 新增牲畜
    AnimalAdded,
    /// 删除牲畜
    AnimalRemoved,
    /// 重新称重
    AnimalWeighed,
    /// 农场重载时刷新指标
    MetricsRefreshed,
}

impl LotEventType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            LotEventType::LotCreated => "LotCreated",
            LotEventType::AnimalAdded => "AnimalAdded",
            LotEventType::AnimalRemoved => "AnimalRemoved",
            LotEventType::AnimalWeighed => "AnimalWeighed",
            LotEventType::MetricsRefreshed => "MetricsRefreshed",
        }
    }
}

/// 批次事件
///
/// 携带重算后的指标，订阅方无需再次读取
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotEvent {
    pub farm_id: String,
    pub lot_id: String,
    pub event_type: LotEventType,
    /// 触发事件的牲畜（批次级事件为 None）
    pub animal_id: Option<String>,
    pub metrics: LotMetrics,
}

impl LotEvent {
    pub fn new(
        farm_id: &str,
        lot_id: &str,
        event_type: LotEventType,
        animal_id: Option<String>,
        metrics: LotMetrics,
    ) -> Self {
        Self {
            farm_id: farm_id.to_string(),
            lot_id: lot_id.to_string(),
            event_type,
            animal_id,
            metrics,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 批次事件发布者 Trait
pub trait LotEventPublisher: Send + Sync {
    /// 发布批次事件
    fn publish(&self, event: LotEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
///
/// 用于不需要事件发布的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl LotEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: LotEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - lot_id={}, event_type={}",
            event.lot_id,
            event.event_type.as_str()
        );
        Ok(())
    }
}

/// 基于 tokio 无界通道的事件发布者
///
/// 同步层持有 receiver 消费事件
#[derive(Debug, Clone)]
pub struct ChannelEventPublisher {
    sender: UnboundedSender<LotEvent>,
}

impl ChannelEventPublisher {
    /// 创建发布者与对应的接收端
    pub fn channel() -> (Self, UnboundedReceiver<LotEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl LotEventPublisher for ChannelEventPublisher {
    fn publish(&self, event: LotEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.sender
            .send(event)
            .map_err(|e| format!("事件通道已关闭: lot_id={}", e.0.lot_id).into())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn LotEventPublisher>> 的使用
#[derive(Clone)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn LotEventPublisher>>,
}

impl OptionalEventPublisher {
    /// 创建带发布者的实例
    pub fn with_publisher(publisher: Arc<dyn LotEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    /// 创建空实例（不发布事件）
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）
    ///
    /// 发布失败只记录告警，不影响已完成的写入
    pub fn publish(&self, event: LotEvent) {
        match &self.inner {
            Some(publisher) => {
                let lot_id = event.lot_id.clone();
                if let Err(e) = publisher.publish(event) {
                    tracing::warn!("批次事件发布失败: lot_id={}, error={}", lot_id, e);
                }
            }
            None => {
                tracing::debug!(
                    "OptionalEventPublisher: 未配置发布者，跳过事件 - lot_id={}, event_type={}",
                    event.lot_id,
                    event.event_type.as_str()
                );
            }
        }
    }

    /// 检查是否配置了发布者
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}
