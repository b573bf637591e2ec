// ==========================================
// EngordaPro 育肥管理系统 - 适应期配置读取 Trait
// ==========================================
// 职责: 定义饲喂计划与展示层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::PhaseLookupMode;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ProtocolConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ProtocolConfigReader: Send + Sync {
    /// 获取阶段查表模式
    ///
    /// # 返回
    /// - PhaseLookupMode::ExactMatch: 起始日精确匹配，未命中取最后阶段
    /// - PhaseLookupMode::Band: 取 start_day <= day 的最后阶段
    ///
    /// # 默认值
    /// - EXACT_MATCH
    async fn get_phase_lookup_mode(&self) -> Result<PhaseLookupMode, Box<dyn Error>>;

    /// 获取展示语言
    ///
    /// # 返回
    /// - "pt-BR" 或 "en"
    ///
    /// # 默认值
    /// - pt-BR
    async fn get_display_locale(&self) -> Result<String, Box<dyn Error>>;
}
