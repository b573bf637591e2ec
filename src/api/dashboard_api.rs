// ==========================================
// EngordaPro 育肥管理系统 - 仪表盘 API
// ==========================================
// 职责: 首页汇总（农场/批次/牲畜数量）、适应期中的批次、适应期方案指南
// 说明: 只读，不触发指标重算
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::error::ApiResult;
use crate::api::farm_api::FarmApi;
use crate::config::protocol_config_trait::ProtocolConfigReader;
use crate::domain::types::PhaseLookupMode;
use crate::engine::adaptation_schedule::{adaptation_phases, phase_day_range};
use crate::engine::feed_plan::{render_phase, AdaptationEngine, RenderedPhase};
use crate::i18n::day_range_badge;

/// 方案指南示例批次总活重 (kg)
pub const EXAMPLE_LOT_WEIGHT_KG: f64 = 10_000.0;

// ==========================================
// 响应结构
// ==========================================

/// 仪表盘汇总
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub farm_count: usize,
    pub lot_count: usize,
    pub animal_count: usize,
    pub lots_in_adaptation: Vec<AdaptingLotInfo>,
    pub farms: Vec<FarmCard>,
}

/// 农场卡片
#[derive(Debug, Clone, Serialize)]
pub struct FarmCard {
    pub farm_id: String,
    pub name: String,
    pub location: Option<String>,
    pub lot_count: usize,
    pub animal_count: usize,
}

/// 适应期中的批次
#[derive(Debug, Clone, Serialize)]
pub struct AdaptingLotInfo {
    pub farm_id: String,
    pub farm_name: String,
    pub lot_id: String,
    pub lot_name: String,
    pub adaptation_day: u32,
    pub days_remaining: u32,
    pub phase_label: String,
    pub animal_count: usize,
    pub total_weight: f64,
    pub average_weight: f64,
    pub average_daily_gain: f64,
    pub concentrate_amount: f64,
}

/// 方案指南条目
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolGuideEntry {
    /// 天数徽标（"Dias 1-3" / "Dia 14"）
    pub badge: String,
    pub phase: RenderedPhase,
}

// ==========================================
// DashboardApi - 仪表盘 API
// ==========================================
pub struct DashboardApi {
    farm_api: Arc<FarmApi>,
    config: Arc<dyn ProtocolConfigReader>,
}

impl DashboardApi {
    pub fn new(farm_api: Arc<FarmApi>, config: Arc<dyn ProtocolConfigReader>) -> Self {
        Self { farm_api, config }
    }

    /// 仪表盘汇总
    ///
    /// 适应期中的批次: adaptation_day < 15
    pub async fn overview(&self, user_id: &str, now: DateTime<Utc>) -> ApiResult<DashboardOverview> {
        let farms = self.farm_api.load_user_farms(user_id)?;
        let engine = AdaptationEngine::new(self.lookup_mode().await);

        let mut lots_in_adaptation = Vec::new();
        for farm in &farms {
            for lot in &farm.lots {
                let plan = engine.feed_plan(lot, now);
                if !plan.in_adaptation {
                    continue;
                }
                lots_in_adaptation.push(AdaptingLotInfo {
                    farm_id: farm.farm_id.clone(),
                    farm_name: farm.name.clone(),
                    lot_id: lot.lot_id.clone(),
                    lot_name: lot.name.clone(),
                    adaptation_day: plan.adaptation_day,
                    days_remaining: plan.days_remaining,
                    phase_label: plan.phase_label,
                    animal_count: lot.animal_count(),
                    total_weight: lot.total_weight,
                    average_weight: lot.average_weight(),
                    average_daily_gain: lot.average_daily_gain(),
                    concentrate_amount: lot.concentrate_amount,
                });
            }
        }

        let overview = DashboardOverview {
            farm_count: farms.len(),
            lot_count: farms.iter().map(|f| f.lots.len()).sum(),
            animal_count: farms.iter().map(|f| f.animal_count()).sum(),
            lots_in_adaptation,
            farms: farms
                .iter()
                .map(|f| FarmCard {
                    farm_id: f.farm_id.clone(),
                    name: f.name.clone(),
                    location: f.location.clone(),
                    lot_count: f.lots.len(),
                    animal_count: f.animal_count(),
                })
                .collect(),
        };

        tracing::debug!(
            farm_count = overview.farm_count,
            lot_count = overview.lot_count,
            adapting = overview.lots_in_adaptation.len(),
            "仪表盘汇总完成"
        );
        Ok(overview)
    }

    /// 适应期方案指南（按给定总活重渲染全部阶段）
    pub fn protocol_guide(&self, total_weight: f64) -> Vec<ProtocolGuideEntry> {
        let table = adaptation_phases();
        table
            .iter()
            .enumerate()
            .map(|(idx, phase)| {
                let badge = phase_day_range(table, idx)
                    .map(|(start, end)| day_range_badge(start, end))
                    .unwrap_or_default();
                ProtocolGuideEntry {
                    badge,
                    phase: render_phase(phase, total_weight),
                }
            })
            .collect()
    }

    /// 示例批次 (10 000 kg) 的方案指南
    pub fn example_protocol_guide(&self) -> Vec<ProtocolGuideEntry> {
        self.protocol_guide(EXAMPLE_LOT_WEIGHT_KG)
    }

    async fn lookup_mode(&self) -> PhaseLookupMode {
        match self.config.get_phase_lookup_mode().await {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(error = %e, "读取阶段查表模式失败，使用默认值");
                PhaseLookupMode::default()
            }
        }
    }
}
