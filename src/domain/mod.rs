// ==========================================
// EngordaPro 育肥管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod adaptation;
pub mod animal;
pub mod farm;
pub mod lot;
pub mod transaction;
pub mod types;

// 重导出核心类型
pub use adaptation::{AdaptationPhase, MealPlan};
pub use animal::{dedup_weight_history, Animal, WeightRecord, MILLIS_PER_DAY};
pub use farm::Farm;
pub use lot::{Lot, LotMetrics};
pub use transaction::{FinancialSummary, Transaction};
pub use types::{FeedFraction, PhaseLookupMode, TransactionType};
