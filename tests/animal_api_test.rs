// ==========================================
// AnimalApi 集成测试
// ==========================================
// 测试范围:
// 1. 新增/删除/称重后批次指标全量重算并持久化
// 2. 每次名单变更发布一次批次事件
// 3. 入参校验
// 4. 多线程并发新增后持久化指标与名单一致
// ==========================================

mod helpers;

use chrono::Duration;
use engorda_pro::api::ApiError;
use engorda_pro::engine::events::LotEventType;
use helpers::api_test_helper::{t0, ApiTestEnv};
use helpers::test_data_builder::AnimalBuilder;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_add_animals_updates_lot_metrics() {
    let mut env = ApiTestEnv::new().expect("无法创建测试环境");
    let (_farm, lot) = env.farm_with_lot("U1", t0());

    env.state
        .animal_api
        .add_animal(AnimalBuilder::new(&lot.lot_id).tag("A1").weight(350.0).build(), t0())
        .expect("新增失败");
    let change = env
        .state
        .animal_api
        .add_animal(AnimalBuilder::new(&lot.lot_id).tag("A2").weight(420.0).build(), t0())
        .expect("新增失败");

    assert_eq!(change.lot_metrics.total_weight, 770.0);
    assert_close(change.lot_metrics.concentrate_amount, 15.4);

    // 持久化后的值与返回值一致
    let stored = env.state.lot_api.get_lot(&lot.lot_id).expect("查询失败");
    assert_eq!(stored.total_weight, 770.0);
    assert_close(stored.concentrate_amount, 15.4);
    assert_eq!(stored.animals.len(), 2);
    assert_eq!(stored.animals[0].tag_number, "A1");
    assert_eq!(stored.animals[1].tag_number, "A2");

    let roster = env.state.animal_api.list_animals(&lot.lot_id).expect("查询失败");
    assert_eq!(roster, stored.animals);

    let events = env.drain_events();
    let kinds: Vec<LotEventType> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        kinds,
        vec![
            LotEventType::LotCreated,
            LotEventType::AnimalAdded,
            LotEventType::AnimalAdded
        ]
    );
    assert_eq!(events[2].metrics.total_weight, 770.0);
}

#[test]
fn test_new_animal_has_no_weight_history() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (_farm, lot) = env.farm_with_lot("U1", t0());

    let change = env
        .state
        .animal_api
        .add_animal(AnimalBuilder::new(&lot.lot_id).weight(300.0).build(), t0())
        .expect("新增失败");
    let animal = env
        .state
        .animal_api
        .get_animal(&change.value.animal_id)
        .expect("查询失败");

    assert_eq!(animal.current_weight, 300.0);
    assert_eq!(animal.initial_weight, 300.0);
    assert!(animal.weight_history.is_empty());
    assert_eq!(animal.entry_date, t0().date_naive());
}

#[test]
fn test_add_then_delete_restores_metrics_exactly() {
    let mut env = ApiTestEnv::new().expect("无法创建测试环境");
    let (_farm, lot) = env.farm_with_lot("U1", t0());
    let api = &env.state.animal_api;

    api.add_animal(AnimalBuilder::new(&lot.lot_id).weight(350.0).build(), t0())
        .expect("新增失败");
    api.add_animal(AnimalBuilder::new(&lot.lot_id).weight(420.0).build(), t0())
        .expect("新增失败");

    let third = api
        .add_animal(AnimalBuilder::new(&lot.lot_id).weight(100.0).build(), t0())
        .expect("新增失败");
    assert_eq!(third.lot_metrics.total_weight, 870.0);
    assert_close(third.lot_metrics.concentrate_amount, 17.4);

    let removed = api
        .delete_animal(&third.value.animal_id)
        .expect("删除失败");
    assert_eq!(removed.lot_metrics.total_weight, 770.0);
    assert_eq!(removed.lot_metrics.concentrate_amount, 770.0 * 0.02);

    let last_event = env.drain_events().pop().expect("应有事件");
    assert_eq!(last_event.event_type, LotEventType::AnimalRemoved);
    assert_eq!(last_event.animal_id.as_deref(), Some(third.value.animal_id.as_str()));
}

#[test]
fn test_delete_last_animal_zeroes_metrics() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (_farm, lot) = env.farm_with_lot("U1", t0());

    let only = env
        .state
        .animal_api
        .add_animal(AnimalBuilder::new(&lot.lot_id).weight(512.5).build(), t0())
        .expect("新增失败");
    let removed = env
        .state
        .animal_api
        .delete_animal(&only.value.animal_id)
        .expect("删除失败");

    assert_eq!(removed.lot_metrics.total_weight, 0.0);
    assert_eq!(removed.lot_metrics.concentrate_amount, 0.0);
}

#[test]
fn test_record_weight_appends_history_and_recomputes() {
    let mut env = ApiTestEnv::new().expect("无法创建测试环境");
    let (_farm, lot) = env.farm_with_lot("U1", t0());
    let api = &env.state.animal_api;

    let a = api
        .add_animal(AnimalBuilder::new(&lot.lot_id).weight(350.0).build(), t0())
        .expect("新增失败")
        .value;
    api.add_animal(AnimalBuilder::new(&lot.lot_id).weight(420.0).build(), t0())
        .expect("新增失败");

    api.record_weight(&a.animal_id, 350.0, t0() + Duration::days(1))
        .expect("称重失败");
    let change = api
        .record_weight(&a.animal_id, 365.0, t0() + Duration::days(11))
        .expect("称重失败");

    assert_eq!(change.value.weight, 365.0);
    assert_eq!(change.lot_metrics.total_weight, 785.0);

    let animal = api.get_animal(&a.animal_id).expect("查询失败");
    assert_eq!(animal.current_weight, 365.0);
    assert_eq!(animal.weight_history.len(), 2);
    assert_eq!(animal.weight_gain(), 15.0);
    assert_eq!(animal.average_daily_gain(), 1.5);

    let last_event = env.drain_events().pop().expect("应有事件");
    assert_eq!(last_event.event_type, LotEventType::AnimalWeighed);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (_farm, lot) = env.farm_with_lot("U1", t0());
    let api = &env.state.animal_api;

    let result = api.add_animal(AnimalBuilder::new(&lot.lot_id).weight(0.0).build(), t0());
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = api.add_animal(AnimalBuilder::new(&lot.lot_id).weight(f64::NAN).build(), t0());
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = api.add_animal(
        AnimalBuilder::new(&lot.lot_id).tag(" ").weight(-3.0).build(),
        t0(),
    );
    assert!(matches!(result, Err(ApiError::InputValidationError { .. })));

    let result = api.add_animal(AnimalBuilder::new("missing-lot").build(), t0());
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    let result = api.record_weight("missing-animal", 300.0, t0());
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    // 校验失败不改变批次指标
    let stored = env.state.lot_api.get_lot(&lot.lot_id).expect("查询失败");
    assert_eq!(stored.total_weight, 0.0);
    assert!(stored.animals.is_empty());
}

#[test]
fn test_concurrent_additions_keep_lot_total_equal_to_roster_sum() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let (farm, _lot) = env.farm_with_lot("U1", t0());

    for round in 0..20 {
        let lot = env
            .state
            .lot_api
            .create_lot(&farm.farm_id, &format!("Lote C{}", round), None, t0())
            .expect("创建批次失败");

        std::thread::scope(|scope| {
            for i in 0..16u32 {
                let api = &env.state.animal_api;
                let lot_id = lot.lot_id.as_str();
                scope.spawn(move || {
                    api.add_animal(
                        AnimalBuilder::new(lot_id)
                            .tag(&format!("T{}", i))
                            .weight(100.0 + f64::from(i))
                            .build(),
                        t0(),
                    )
                    .expect("新增失败");
                });
            }
        });

        let stored = env.state.lot_api.get_lot(&lot.lot_id).expect("查询失败");
        let roster_sum: f64 = stored.animals.iter().map(|a| a.current_weight).sum();
        assert_eq!(stored.animals.len(), 16);
        // 100 + 101 + ... + 115
        assert_eq!(roster_sum, 1720.0);
        assert_eq!(stored.total_weight, roster_sum, "round {}", round);
        assert_close(stored.concentrate_amount, roster_sum * 0.02);
    }
}
