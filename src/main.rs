// ==========================================
// EngordaPro 育肥管理系统 - 命令行入口
// ==========================================
// 用法:
//   engorda-pro                 输出示例批次 (10 000 kg) 的适应期方案
//   engorda-pro <user_id>       额外输出该用户的仪表盘汇总与适应期中的批次
// ==========================================

use chrono::Utc;
use engorda_pro::api::EXAMPLE_LOT_WEIGHT_KG;
use engorda_pro::app::{get_default_db_path, AppState};
use engorda_pro::engine::format_one_decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    engorda_pro::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 育肥管理系统", engorda_pro::APP_NAME);
    tracing::info!("系统版本: {}", engorda_pro::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let app_state = AppState::new(db_path).map_err(anyhow::Error::msg)?;
    let locale = app_state.apply_display_locale().await;
    tracing::info!("展示语言: {}", locale);

    println!(
        "Protocolo de adaptação ({}kg de peso vivo)",
        format_one_decimal(EXAMPLE_LOT_WEIGHT_KG)
    );
    for entry in app_state.dashboard_api.example_protocol_guide() {
        println!();
        println!("[{}] {}", entry.badge, entry.phase.label);
        println!("  Manhã: {}", entry.phase.morning.text);
        println!("  Tarde: {}", entry.phase.afternoon.text);
        println!("  {}", entry.phase.instructions);
    }

    if let Some(user_id) = std::env::args().nth(1) {
        let overview = app_state
            .dashboard_api
            .overview(&user_id, Utc::now())
            .await?;

        println!();
        println!(
            "Fazendas: {}  Lotes: {}  Animais: {}  Em adaptação: {}",
            overview.farm_count,
            overview.lot_count,
            overview.animal_count,
            overview.lots_in_adaptation.len()
        );
        for lot in &overview.lots_in_adaptation {
            println!(
                "  {} / {}: dia {} ({}) - {}kg de concentrado/dia",
                lot.farm_name,
                lot.lot_name,
                lot.adaptation_day,
                lot.phase_label,
                format_one_decimal(lot.concentrate_amount)
            );
        }
    }

    Ok(())
}
