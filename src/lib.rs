// ==========================================
// EngordaPro 育肥管理系统 - 核心库
// ==========================================
// 职责: 肉牛育肥批次管理，核心为 15 天精料适应期方案
// 技术栈: Rust + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FeedFraction, PhaseLookupMode, TransactionType};

// 领域实体
pub use domain::{
    AdaptationPhase, Animal, Farm, FinancialSummary, Lot, LotMetrics, MealPlan, Transaction,
    WeightRecord,
};

// 引擎
pub use engine::{
    daily_concentrate, day_in_protocol, recompute, render_instruction, resolve_phase,
    AdaptationEngine, FeedPlan, LotAggregator,
};

// API
pub use api::{AnimalApi, DashboardApi, FarmApi, FinanceApi, LotApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "EngordaPro";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_core_reexports() {
        use chrono::{Duration, TimeZone, Utc};

        let start = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let day = day_in_protocol(start + Duration::days(4), start);
        assert_eq!(resolve_phase(day).start_day, 4);
        assert_eq!(daily_concentrate(770.0), 770.0 * 0.02);
        assert_eq!(recompute(&[]), LotMetrics::zero());
        assert_eq!(render_instruction("Apenas volumoso", 770.0), "Apenas volumoso");
    }
}
