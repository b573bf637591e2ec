// ==========================================
// FarmApi 集成测试
// ==========================================
// 测试范围:
// 1. 农场创建/查询/按用户过滤
// 2. 重载农场: 逐批次重算并发布 MetricsRefreshed
// 3. 删除农场: 级联删除批次与牲畜，收支记录保留
// ==========================================

mod helpers;

use engorda_pro::api::ApiError;
use engorda_pro::engine::events::LotEventType;
use helpers::api_test_helper::{t0, ApiTestEnv};
use helpers::test_data_builder::{AnimalBuilder, TransactionBuilder};
use rusqlite::params;

#[test]
fn test_create_and_list_farms_by_user() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.farm_api;

    let farm = api
        .create_farm("U1", "  Fazenda Sol  ", Some("   ".to_string()), t0())
        .expect("创建失败");
    assert_eq!(farm.name, "Fazenda Sol");
    assert_eq!(farm.location, None);
    assert_eq!(farm.user_id, "U1");

    api.create_farm("U2", "Fazenda Lua", None, t0()).expect("创建失败");

    let farms = api.list_farms("U1").expect("查询失败");
    assert_eq!(farms.len(), 1);
    assert_eq!(farms[0].farm_id, farm.farm_id);
    assert_eq!(farms[0].created_at, t0());

    assert!(matches!(
        api.create_farm("U1", "", None, t0()),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(api.get_farm("nope"), Err(ApiError::NotFound(_))));
}

#[test]
fn test_reload_farm_recomputes_every_lot() {
    let mut env = ApiTestEnv::new().expect("无法创建测试环境");
    let (farm, lot_a) = env.farm_with_lot("U1", t0());
    let lot_b = env
        .state
        .lot_api
        .create_lot(&farm.farm_id, "Lote 02", None, t0())
        .expect("创建失败");

    env.state
        .animal_api
        .add_animal(AnimalBuilder::new(&lot_a.lot_id).weight(400.0).build(), t0())
        .expect("新增失败");

    // 绕过 API 直接改写持久化指标，模拟陈旧数据
    let conn = test_helpers::open_test_connection(&env.db_path).expect("连接失败");
    conn.execute(
        "UPDATE lot SET total_weight = 1.0, concentrate_amount = 1.0 WHERE lot_id = ?1",
        params![lot_a.lot_id],
    )
    .expect("更新失败");
    drop(conn);
    env.drain_events();

    let reloaded = env.state.farm_api.reload_farm(&farm.farm_id).expect("重载失败");
    assert_eq!(reloaded.lots.len(), 2);

    let a = reloaded
        .lots
        .iter()
        .find(|l| l.lot_id == lot_a.lot_id)
        .expect("应包含批次 A");
    assert_eq!(a.total_weight, 400.0);
    assert!((a.concentrate_amount - 8.0).abs() < 1e-9);
    assert_eq!(a.animals.len(), 1);

    let b = reloaded
        .lots
        .iter()
        .find(|l| l.lot_id == lot_b.lot_id)
        .expect("应包含批次 B");
    assert_eq!(b.total_weight, 0.0);
    assert!(b.animals.is_empty());

    let events = env.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|e| e.event_type == LotEventType::MetricsRefreshed && e.animal_id.is_none()));

    let stored = env.state.lot_api.get_lot(&lot_a.lot_id).expect("查询失败");
    assert_eq!(stored.total_weight, 400.0);
}

#[test]
fn test_load_user_farms_builds_full_tree() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (_farm, lot) = env.farm_with_lot("U1", t0());
    for tag in ["A1", "A2", "A3"] {
        env.state
            .animal_api
            .add_animal(AnimalBuilder::new(&lot.lot_id).tag(tag).build(), t0())
            .expect("新增失败");
    }

    let farms = env.state.farm_api.load_user_farms("U1").expect("查询失败");
    assert_eq!(farms.len(), 1);
    assert_eq!(farms[0].lots.len(), 1);
    assert_eq!(farms[0].animal_count(), 3);
    assert_eq!(farms[0].lots[0].total_weight, 1050.0);

    assert!(env.state.farm_api.load_user_farms("U2").unwrap().is_empty());
}

#[test]
fn test_delete_farm_cascades_but_keeps_transactions() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (farm, lot) = env.farm_with_lot("U1", t0());
    let animal = env
        .state
        .animal_api
        .add_animal(AnimalBuilder::new(&lot.lot_id).build(), t0())
        .expect("新增失败")
        .value;
    env.state
        .finance_api
        .add_transaction(
            TransactionBuilder::expense("U1", &farm.farm_id, 1200.0).build(),
            t0(),
        )
        .expect("记账失败");

    env.state.farm_api.delete_farm(&farm.farm_id).expect("删除失败");

    assert!(env.state.farm_api.list_farms("U1").unwrap().is_empty());
    assert!(matches!(
        env.state.lot_api.get_lot(&lot.lot_id),
        Err(ApiError::NotFound(_))
    ));
    assert!(matches!(
        env.state.animal_api.get_animal(&animal.animal_id),
        Err(ApiError::NotFound(_))
    ));

    let transactions = env.state.finance_api.list_by_user("U1").expect("查询失败");
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].farm_id, farm.farm_id);

    assert!(matches!(
        env.state.farm_api.delete_farm(&farm.farm_id),
        Err(ApiError::NotFound(_))
    ));
}
