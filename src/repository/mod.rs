// ==========================================
// EngordaPro 育肥管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口，屏蔽数据库细节
// 约束: 所有查询使用参数化，防止 SQL 注入
// ==========================================

pub mod animal_repo;
pub mod db_utils;
pub mod error;
pub mod farm_repo;
pub mod lot_repo;
pub mod transaction_repo;

// 重导出核心仓储
pub use animal_repo::AnimalRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use farm_repo::FarmRepository;
pub use lot_repo::LotRepository;
pub use transaction_repo::TransactionRepository;
