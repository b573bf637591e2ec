// ==========================================
// EngordaPro 育肥管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，入参校验在此完成
// ==========================================

pub mod animal_api;
pub mod dashboard_api;
pub mod error;
pub mod farm_api;
pub mod finance_api;
pub mod lot_api;
pub mod lot_refresh;
pub mod validator;

// 重导出核心类型
pub use animal_api::{AddAnimalRequest, AnimalApi, RosterChange};
pub use dashboard_api::{
    AdaptingLotInfo, DashboardApi, DashboardOverview, FarmCard, ProtocolGuideEntry,
    EXAMPLE_LOT_WEIGHT_KG,
};
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use farm_api::FarmApi;
pub use finance_api::{FarmFinancialSummary, FinanceApi, NewTransactionRequest};
pub use lot_api::LotApi;
pub use lot_refresh::LotMetricsRefresher;
pub use validator::InputValidator;
