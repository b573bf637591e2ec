// ==========================================
// EngordaPro 育肥管理系统 - 应用层
// ==========================================
// 职责: 装配仓储/API，供命令行或宿主进程使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
