// ==========================================
// EngordaPro 育肥管理系统 - 农场管理 API
// ==========================================
// 职责: 农场增删查、农场数据重载
// 说明: 重载会对每个批次执行一次全量指标重算并持久化
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::lot_refresh::LotMetricsRefresher;
use crate::api::validator::{require_id, InputValidator};
use crate::domain::farm::Farm;
use crate::engine::events::LotEventType;
use crate::i18n::t_with_args;
use crate::repository::animal_repo::AnimalRepository;
use crate::repository::farm_repo::FarmRepository;
use crate::repository::lot_repo::LotRepository;

// ==========================================
// FarmApi - 农场管理 API
// ==========================================
pub struct FarmApi {
    farm_repo: Arc<FarmRepository>,
    lot_repo: Arc<LotRepository>,
    animal_repo: Arc<AnimalRepository>,
    refresher: Arc<LotMetricsRefresher>,
}

impl FarmApi {
    pub fn new(
        farm_repo: Arc<FarmRepository>,
        lot_repo: Arc<LotRepository>,
        animal_repo: Arc<AnimalRepository>,
        refresher: Arc<LotMetricsRefresher>,
    ) -> Self {
        Self {
            farm_repo,
            lot_repo,
            animal_repo,
            refresher,
        }
    }

    /// 创建农场
    #[instrument(skip(self, location, now))]
    pub fn create_farm(
        &self,
        user_id: &str,
        name: &str,
        location: Option<String>,
        now: DateTime<Utc>,
    ) -> ApiResult<Farm> {
        InputValidator::new()
            .require_text("user_id", user_id)
            .require_text("name", name)
            .finish()?;

        let location = location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        let farm = Farm::new(name.trim(), location, user_id, now);
        self.farm_repo.insert(&farm)?;

        tracing::info!(farm_id = %farm.farm_id, "农场已创建");
        Ok(farm)
    }

    /// 查询用户的全部农场（不含批次）
    pub fn list_farms(&self, user_id: &str) -> ApiResult<Vec<Farm>> {
        require_id("user_id", user_id)?;
        Ok(self.farm_repo.list_by_user(user_id)?)
    }

    /// 查询单个农场（不含批次）
    pub fn get_farm(&self, farm_id: &str) -> ApiResult<Farm> {
        require_id("farm_id", farm_id)?;
        self.farm_repo
            .find_by_id(farm_id)?
            .ok_or_else(|| {
                ApiError::NotFound(t_with_args("validation.farm_not_found", &[("id", farm_id)]))
            })
    }

    /// 删除农场（级联删除批次与牲畜）
    #[instrument(skip(self))]
    pub fn delete_farm(&self, farm_id: &str) -> ApiResult<()> {
        require_id("farm_id", farm_id)?;
        self.farm_repo.delete(farm_id)?;
        tracing::info!("农场已删除");
        Ok(())
    }

    /// 重载农场完整数据
    ///
    /// 加载全部批次及其名单，逐批次重算、持久化并发布 MetricsRefreshed
    #[instrument(skip(self))]
    pub fn reload_farm(&self, farm_id: &str) -> ApiResult<Farm> {
        let mut farm = self.get_farm(farm_id)?;

        let mut lots = self.lot_repo.list_by_farm(farm_id)?;
        for lot in &mut lots {
            let metrics = self.refresher.refresh(
                farm_id,
                &lot.lot_id,
                LotEventType::MetricsRefreshed,
                None,
            )?;
            lot.apply_metrics(metrics);
            lot.animals = self.animal_repo.list_by_lot(&lot.lot_id)?;
        }
        farm.lots = lots;

        tracing::info!(lot_count = farm.lots.len(), "农场数据已重载");
        Ok(farm)
    }

    /// 加载用户全部农场的完整数据（不重算）
    pub fn load_user_farms(&self, user_id: &str) -> ApiResult<Vec<Farm>> {
        let mut farms = self.list_farms(user_id)?;
        for farm in &mut farms {
            let mut lots = self.lot_repo.list_by_farm(&farm.farm_id)?;
            for lot in &mut lots {
                lot.animals = self.animal_repo.list_by_lot(&lot.lot_id)?;
            }
            farm.lots = lots;
        }
        Ok(farms)
    }
}
