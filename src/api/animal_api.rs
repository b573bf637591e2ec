// ==========================================
// EngordaPro 育肥管理系统 - 牲畜管理 API
// ==========================================
// 职责: 牲畜新增/删除/称重/名单查询
// 红线: 每次名单变更后必须全量重算并持久化批次指标
// 说明: 新增牲畜不产生称重记录；称重只追加不覆盖
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::lot_refresh::LotMetricsRefresher;
use crate::api::validator::{require_id, InputValidator};
use crate::domain::animal::{Animal, WeightRecord};
use crate::domain::lot::LotMetrics;
use crate::engine::events::LotEventType;
use crate::i18n::t_with_args;
use crate::repository::animal_repo::AnimalRepository;
use crate::repository::lot_repo::LotRepository;

// ==========================================
// 请求 / 响应
// ==========================================

/// 新增牲畜请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAnimalRequest {
    pub lot_id: String,
    pub tag_number: String,
    pub initial_weight: f64,
    pub age_months: u32,
    pub breed: String,
    /// 入栏日期（缺省取 now 的日期）
    pub entry_date: Option<NaiveDate>,
}

/// 名单变更结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterChange<T> {
    pub value: T,
    pub lot_metrics: LotMetrics,
}

// ==========================================
// AnimalApi - 牲畜管理 API
// ==========================================
pub struct AnimalApi {
    lot_repo: Arc<LotRepository>,
    animal_repo: Arc<AnimalRepository>,
    refresher: Arc<LotMetricsRefresher>,
}

impl AnimalApi {
    pub fn new(
        lot_repo: Arc<LotRepository>,
        animal_repo: Arc<AnimalRepository>,
        refresher: Arc<LotMetricsRefresher>,
    ) -> Self {
        Self {
            lot_repo,
            animal_repo,
            refresher,
        }
    }

    /// 新增牲畜
    ///
    /// current_weight = initial_weight，称重历史为空
    #[instrument(skip(self, request, now), fields(lot_id = %request.lot_id))]
    pub fn add_animal(
        &self,
        request: AddAnimalRequest,
        now: DateTime<Utc>,
    ) -> ApiResult<RosterChange<Animal>> {
        InputValidator::new()
            .require_text("lot_id", &request.lot_id)
            .require_text("tag_number", &request.tag_number)
            .require_text("breed", &request.breed)
            .require_weight("initial_weight", request.initial_weight)
            .finish()?;

        let lot = self.lot_repo.find_by_id(&request.lot_id)?.ok_or_else(|| {
            ApiError::NotFound(t_with_args(
                "validation.lot_not_found",
                &[("id", &request.lot_id)],
            ))
        })?;

        let animal = Animal::new(
            &lot.lot_id,
            request.tag_number.trim(),
            request.initial_weight,
            request.age_months,
            request.breed.trim(),
            request.entry_date.unwrap_or_else(|| now.date_naive()),
            now,
        );
        self.animal_repo.insert(&animal)?;
        tracing::info!(animal_id = %animal.animal_id, "牲畜已加入批次");

        let lot_metrics = self.refresher.refresh(
            &lot.farm_id,
            &lot.lot_id,
            LotEventType::AnimalAdded,
            Some(animal.animal_id.clone()),
        )?;
        Ok(RosterChange {
            value: animal,
            lot_metrics,
        })
    }

    /// 删除牲畜
    #[instrument(skip(self))]
    pub fn delete_animal(&self, animal_id: &str) -> ApiResult<RosterChange<()>> {
        let animal = self.get_animal(animal_id)?;
        let farm_id = self.farm_id_of(&animal.lot_id)?;

        self.animal_repo.delete(animal_id)?;
        tracing::info!(lot_id = %animal.lot_id, "牲畜已删除");

        let lot_metrics = self.refresher.refresh(
            &farm_id,
            &animal.lot_id,
            LotEventType::AnimalRemoved,
            Some(animal.animal_id),
        )?;
        Ok(RosterChange {
            value: (),
            lot_metrics,
        })
    }

    /// 记录称重
    ///
    /// 追加一条称重记录并把 current_weight 更新为本次体重
    #[instrument(skip(self, now))]
    pub fn record_weight(
        &self,
        animal_id: &str,
        weight: f64,
        now: DateTime<Utc>,
    ) -> ApiResult<RosterChange<WeightRecord>> {
        InputValidator::new()
            .require_text("animal_id", animal_id)
            .require_weight("weight", weight)
            .finish()?;

        let mut animal = self.get_animal(animal_id)?;
        let farm_id = self.farm_id_of(&animal.lot_id)?;

        let record = animal.record_weight(weight, now);
        self.animal_repo.append_weight_record(&record)?;
        tracing::info!(record_id = %record.record_id, "称重已记录");

        let lot_metrics = self.refresher.refresh(
            &farm_id,
            &animal.lot_id,
            LotEventType::AnimalWeighed,
            Some(animal.animal_id.clone()),
        )?;
        Ok(RosterChange {
            value: record,
            lot_metrics,
        })
    }

    /// 查询单个牲畜（含称重历史）
    pub fn get_animal(&self, animal_id: &str) -> ApiResult<Animal> {
        require_id("animal_id", animal_id)?;
        self.animal_repo.find_by_id(animal_id)?.ok_or_else(|| {
            ApiError::NotFound(t_with_args("validation.animal_not_found", &[("id", animal_id)]))
        })
    }

    /// 查询批次名单（加入顺序）
    pub fn list_animals(&self, lot_id: &str) -> ApiResult<Vec<Animal>> {
        require_id("lot_id", lot_id)?;
        Ok(self.animal_repo.list_by_lot(lot_id)?)
    }

    fn farm_id_of(&self, lot_id: &str) -> ApiResult<String> {
        self.lot_repo
            .find_by_id(lot_id)?
            .map(|lot| lot.farm_id)
            .ok_or_else(|| {
                ApiError::NotFound(t_with_args("validation.lot_not_found", &[("id", lot_id)]))
            })
    }
}
