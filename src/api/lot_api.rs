// ==========================================
// EngordaPro 育肥管理系统 - 批次管理 API
// ==========================================
// 职责: 批次增删查、当日饲喂计划
// 红线: 创建时 adaptation_start_date = now，之后不可修改
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_id, InputValidator};
use crate::config::protocol_config_trait::ProtocolConfigReader;
use crate::domain::lot::Lot;
use crate::domain::types::PhaseLookupMode;
use crate::engine::events::{LotEvent, LotEventType, OptionalEventPublisher};
use crate::engine::feed_plan::{AdaptationEngine, FeedPlan};
use crate::i18n::t_with_args;
use crate::repository::animal_repo::AnimalRepository;
use crate::repository::farm_repo::FarmRepository;
use crate::repository::lot_repo::LotRepository;

// ==========================================
// LotApi - 批次管理 API
// ==========================================
pub struct LotApi {
    farm_repo: Arc<FarmRepository>,
    lot_repo: Arc<LotRepository>,
    animal_repo: Arc<AnimalRepository>,
    config: Arc<dyn ProtocolConfigReader>,
    event_publisher: OptionalEventPublisher,
}

impl LotApi {
    pub fn new(
        farm_repo: Arc<FarmRepository>,
        lot_repo: Arc<LotRepository>,
        animal_repo: Arc<AnimalRepository>,
        config: Arc<dyn ProtocolConfigReader>,
        event_publisher: OptionalEventPublisher,
    ) -> Self {
        Self {
            farm_repo,
            lot_repo,
            animal_repo,
            config,
            event_publisher,
        }
    }

    /// 创建批次
    ///
    /// 派生指标初始为 0，适应期从 now 开始
    #[instrument(skip(self, breed, now))]
    pub fn create_lot(
        &self,
        farm_id: &str,
        name: &str,
        breed: Option<String>,
        now: DateTime<Utc>,
    ) -> ApiResult<Lot> {
        InputValidator::new()
            .require_text("farm_id", farm_id)
            .require_text("name", name)
            .finish()?;

        if self.farm_repo.find_by_id(farm_id)?.is_none() {
            return Err(ApiError::NotFound(t_with_args(
                "validation.farm_not_found",
                &[("id", farm_id)],
            )));
        }

        let breed = breed.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());
        let lot = Lot::new(farm_id, name.trim(), breed, now);
        self.lot_repo.insert(&lot)?;

        tracing::info!(lot_id = %lot.lot_id, "批次已创建");
        self.event_publisher.publish(LotEvent::new(
            farm_id,
            &lot.lot_id,
            LotEventType::LotCreated,
            None,
            lot.metrics(),
        ));
        Ok(lot)
    }

    /// 查询农场下全部批次（不含名单）
    pub fn list_lots(&self, farm_id: &str) -> ApiResult<Vec<Lot>> {
        require_id("farm_id", farm_id)?;
        Ok(self.lot_repo.list_by_farm(farm_id)?)
    }

    /// 查询批次（含名单）
    pub fn get_lot(&self, lot_id: &str) -> ApiResult<Lot> {
        require_id("lot_id", lot_id)?;
        let mut lot = self.lot_repo.find_by_id(lot_id)?.ok_or_else(|| {
            ApiError::NotFound(t_with_args("validation.lot_not_found", &[("id", lot_id)]))
        })?;
        lot.animals = self.animal_repo.list_by_lot(lot_id)?;
        Ok(lot)
    }

    /// 删除批次（级联删除牲畜）
    #[instrument(skip(self))]
    pub fn delete_lot(&self, lot_id: &str) -> ApiResult<()> {
        require_id("lot_id", lot_id)?;
        self.lot_repo.delete(lot_id)?;
        tracing::info!("批次已删除");
        Ok(())
    }

    /// 当日饲喂计划
    ///
    /// 查表模式从配置读取；读取失败时按默认模式处理
    pub async fn feed_plan(&self, lot_id: &str, now: DateTime<Utc>) -> ApiResult<FeedPlan> {
        let lot = self.get_lot(lot_id)?;
        let engine = AdaptationEngine::new(self.lookup_mode().await);
        Ok(engine.feed_plan(&lot, now))
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
