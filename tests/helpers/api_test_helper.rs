// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::error::Error;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::NamedTempFile;
use tokio::sync::mpsc::UnboundedReceiver;

use engorda_pro::app::AppState;
use engorda_pro::domain::{Farm, Lot};
use engorda_pro::engine::events::{ChannelEventPublisher, LotEvent};

/// 测试用固定时间
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap()
}

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含全部API实例与事件接收端
pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,
    pub events: UnboundedReceiver<LotEvent>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        engorda_pro::logging::init_test();
        engorda_pro::i18n::set_locale(engorda_pro::config::DEFAULT_LOCALE);
        let (temp_file, db_path) = test_helpers::create_test_db()?;

        let (publisher, events) = ChannelEventPublisher::channel();
        let state = AppState::with_event_publisher(db_path.clone(), Some(Arc::new(publisher)))?;

        Ok(Self {
            db_path,
            state,
            events,
            _temp_file: temp_file,
        })
    }

    /// 创建农场 + 批次
    pub fn farm_with_lot(&self, user_id: &str, now: DateTime<Utc>) -> (Farm, Lot) {
        let farm = self
            .state
            .farm_api
            .create_farm(user_id, "Fazenda Boa Vista", Some("Goiás".to_string()), now)
            .expect("创建农场失败");
        let lot = self
            .state
            .lot_api
            .create_lot(&farm.farm_id, "Lote 01", Some("Nelore".to_string()), now)
            .expect("创建批次失败");
        (farm, lot)
    }

    /// 取出当前已发布的全部事件
    pub fn drain_events(&mut self) -> Vec<LotEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}
