// ==========================================
// EngordaPro 育肥管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{AnimalApi, DashboardApi, FarmApi, FinanceApi, LotApi, LotMetricsRefresher};
use crate::config::config_manager::ConfigManager;
use crate::config::protocol_config_trait::ProtocolConfigReader;
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::engine::events::{LotEventPublisher, OptionalEventPublisher};
use crate::repository::{AnimalRepository, FarmRepository, LotRepository, TransactionRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 农场API
    pub farm_api: Arc<FarmApi>,

    /// 批次API
    pub lot_api: Arc<LotApi>,

    /// 牲畜API
    pub animal_api: Arc<AnimalApi>,

    /// 收支API
    pub finance_api: Arc<FinanceApi>,

    /// 仪表盘API
    pub dashboard_api: Arc<DashboardApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例（不发布批次事件）
    pub fn new(db_path: String) -> Result<Self, String> {
        Self::with_event_publisher(db_path, None)
    }

    /// 创建AppState并挂接批次事件发布者
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn with_event_publisher(
        db_path: String,
        publisher: Option<Arc<dyn LotEventPublisher>>,
    ) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        match read_schema_version(&conn) {
            Ok(Some(v)) if v != CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    found = v,
                    expected = CURRENT_SCHEMA_VERSION,
                    "schema_version 与当前代码不一致"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("读取 schema_version 失败(将继续启动): {}", e),
        }
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let farm_repo = Arc::new(FarmRepository::from_connection(conn.clone()));
        let lot_repo = Arc::new(LotRepository::from_connection(conn.clone()));
        let animal_repo = Arc::new(AnimalRepository::from_connection(conn.clone()));
        let transaction_repo = Arc::new(TransactionRepository::from_connection(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config_reader: Arc<dyn ProtocolConfigReader> = config_manager.clone();

        let event_publisher = match publisher {
            Some(p) => OptionalEventPublisher::with_publisher(p),
            None => OptionalEventPublisher::none(),
        };

        // ==========================================
        // 初始化API层
        // ==========================================
        let refresher = Arc::new(LotMetricsRefresher::new(
            lot_repo.clone(),
            event_publisher.clone(),
        ));

        let farm_api = Arc::new(FarmApi::new(
            farm_repo.clone(),
            lot_repo.clone(),
            animal_repo.clone(),
            refresher.clone(),
        ));
        let lot_api = Arc::new(LotApi::new(
            farm_repo.clone(),
            lot_repo.clone(),
            animal_repo.clone(),
            config_reader.clone(),
            event_publisher,
        ));
        let animal_api = Arc::new(AnimalApi::new(
            lot_repo.clone(),
            animal_repo,
            refresher,
        ));
        let finance_api = Arc::new(FinanceApi::new(farm_repo, lot_repo, transaction_repo));
        let dashboard_api = Arc::new(DashboardApi::new(farm_api.clone(), config_reader));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            farm_api,
            lot_api,
            animal_api,
            finance_api,
            dashboard_api,
            config_manager,
        })
    }

    /// 按配置切换展示语言
    pub async fn apply_display_locale(&self) -> String {
        let locale = match self.config_manager.get_display_locale().await {
            Ok(locale) => locale,
            Err(e) => {
                tracing::warn!("读取展示语言失败，使用默认值: {}", e);
                crate::config::DEFAULT_LOCALE.to_string()
            }
        };
        crate::i18n::set_locale(&locale);
        locale
    }
}

/// 获取默认数据库路径
///
/// 优先级: ENGORDA_PRO_DB_PATH 环境变量 > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("ENGORDA_PRO_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./engorda_pro.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("engorda-pro");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("engorda_pro.db");
        }
    }

    path.to_string_lossy().to_string()
}
