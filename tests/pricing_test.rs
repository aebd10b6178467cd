// ==========================================
// 定价建议 / 约束优化 集成测试
// ==========================================
// 测试范围:
// 1. 建议价不低于 成本 × 最低毛利倍数
// 2. 入住率落在 [10, 95]
// 3. 约束后价格落在 [最低售价, 最高售价] 且不低于毛利下限
// ==========================================


use hotel_rms::domain::agent::AgentRoster;
use hotel_rms::domain::pricing::OptimizationConstraints;
use hotel_rms::engine::{apply_constraints, ForecastPipeline};
use test_helpers::{build_state, fixed_config};

#[test]
fn test_recommendations_respect_margin_floor() {
    let snapshot = ForecastPipeline::new().run(&fixed_config(11, 30), &AgentRoster::default());

    for rec in &snapshot.recommendations {
        let forecast = snapshot.forecast_for(rec.timestamp).expect("缺少当日预测");
        assert!(
            rec.recommended_price >= forecast.cost_estimate * 1.3,
            "{} {} {}: {} < {}",
            rec.timestamp,
            rec.room_type,
            rec.segment,
            rec.recommended_price,
            forecast.cost_estimate * 1.3
        );
        assert!((10.0..=95.0).contains(&rec.expected_occupancy));
        assert!(rec.min_price <= rec.max_price);
        assert_eq!(rec.recommended_price, rec.recommended_price.round());
    }
}

#[test]
fn test_margin_floor_holds_across_seeds() {
    let pipeline = ForecastPipeline::new();
    let roster = AgentRoster::default();

    for seed in 0..200 {
        let snapshot = pipeline.run(&fixed_config(seed, 30), &roster);
        for rec in &snapshot.recommendations {
            let forecast = snapshot.forecast_for(rec.timestamp).unwrap();
            assert!(
                rec.recommended_price >= forecast.cost_estimate * 1.3,
                "seed {} {} {} {}: {} < {}",
                seed,
                rec.timestamp,
                rec.room_type,
                rec.segment,
                rec.recommended_price,
                forecast.cost_estimate * 1.3
            );
        }
    }
}

#[test]
fn test_higher_margin_ratio_raises_floor() {
    let mut config = fixed_config(11, 10);
    config.min_margin_ratio = 3.0;
    let snapshot = ForecastPipeline::new().run(&config, &AgentRoster::default());

    for rec in &snapshot.recommendations {
        let forecast = snapshot.forecast_for(rec.timestamp).unwrap();
        assert!(rec.recommended_price >= forecast.cost_estimate * 3.0);
    }
}

#[test]
fn test_constrained_prices_within_bounds() {
    let snapshot = ForecastPipeline::new().run(&fixed_config(5, 20), &AgentRoster::default());
    let constraints = OptimizationConstraints {
        min_price: 90.0,
        max_price: 200.0,
        max_price_change: 5.0,
        ..Default::default()
    };

    let constrained = apply_constraints(
        &snapshot.recommendations,
        &snapshot.forecast_data,
        &snapshot.rooms,
        &constraints,
    )
    .expect("约束应有效");

    assert_eq!(constrained.len(), snapshot.recommendations.len());
    for rec in &constrained {
        assert!(
            (90.0..=200.0).contains(&rec.recommended_price),
            "价格越界: {}",
            rec.recommended_price
        );
        assert!((10.0..=95.0).contains(&rec.expected_occupancy));
    }
}

#[test]
fn test_constrained_recommendations_via_api() {
    let state = build_state(5, 7);
    let constraints = OptimizationConstraints {
        max_price: 150.0,
        ..Default::default()
    };

    let recs = state
        .dashboard_api
        .constrained_recommendations(&constraints, Some("suite"), None)
        .expect("查询失败");
    assert_eq!(recs.len(), 4 * 7);
    assert!(recs.iter().all(|r| r.recommended_price <= 150.0));

    let invalid = OptimizationConstraints {
        min_price: 300.0,
        max_price: 100.0,
        ..Default::default()
    };
    let err = state
        .dashboard_api
        .constrained_recommendations(&invalid, None, None)
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_INPUT");
}

#[test]
fn test_summary_counts_changes() {
    let state = build_state(21, 7);
    let summary = state.dashboard_api.recommendation_summary(None).expect("汇总失败");
    let day = state.snapshot.recommendations_for(None, None);
    let first_day: Vec<_> = day
        .iter()
        .filter(|r| Some(r.timestamp) == state.snapshot.start_date())
        .collect();

    assert_eq!(first_day.len(), 16);
    let increases = first_day
        .iter()
        .filter(|r| r.recommended_price > r.current_price)
        .count();
    assert_eq!(summary.increases, increases);
    assert_eq!(summary.total, 16);
    assert_eq!(summary.increases + summary.decreases + summary.unchanged, summary.total);
}
