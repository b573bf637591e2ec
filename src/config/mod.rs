// ==========================================
// EngordaPro 育肥管理系统 - 配置层
// ==========================================
// 职责: 系统配置管理（阶段查表模式、展示语言）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod protocol_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DEFAULT_LOCALE, SUPPORTED_LOCALES};
pub use protocol_config_trait::ProtocolConfigReader;
