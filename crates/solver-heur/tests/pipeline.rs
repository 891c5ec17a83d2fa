//! End-to-end run of the heuristic planning pipeline: daily forecasts ->
//! weekly demand -> mix plan -> staffing slots -> shift schedule.

use std::collections::BTreeMap;

use plan_core::{demand::aggregate_weekly, staffing::derive_staffing, MixPlanner, ShiftScheduler};
use solver_heur::{EqualSplitPlanner, GreedyRotationScheduler};
use types::{
    ForecastPoint, LineId, ModelName, PlanParams, ProductionLine, ReferenceData, Worker, WorkerId,
};

fn forecast(model: &str, daily: u32, days: usize) -> Vec<ForecastPoint> {
    (0..days)
        .map(|i| ForecastPoint {
            date: format!("2024-02-{:02}", i + 1),
            model: ModelName::from(model),
            forecast_units: daily,
            conf_lo: (daily as f64 * 0.8) as u32,
            conf_hi: (daily as f64 * 1.2) as u32,
        })
        .collect()
}

fn reference() -> ReferenceData {
    ReferenceData {
        lines: vec![
            ProductionLine {
                id: LineId::from("L1"),
                eligible_models: ProductionLine::parse_eligible_models("ModelA"),
                base_daily_capacity: 500,
            },
            ProductionLine {
                id: LineId::from("L2"),
                eligible_models: ProductionLine::parse_eligible_models("ModelB"),
                base_daily_capacity: 300,
            },
        ],
        workers: vec![
            Worker {
                id: WorkerId::from("W1"),
                name: "Kim".into(),
                years: 12,
                wage_per_hour: 10.0,
                max_hours_week: 48,
            },
            Worker {
                id: WorkerId::from("W2"),
                name: "Lee".into(),
                years: 8,
                wage_per_hour: 12.0,
                max_hours_week: 40,
            },
            Worker {
                id: WorkerId::from("W3"),
                name: "Park".into(),
                years: 4,
                wage_per_hour: 14.0,
                max_hours_week: 40,
            },
            Worker {
                id: WorkerId::from("W4"),
                name: "Choi".into(),
                years: 1,
                wage_per_hour: 16.0,
                max_hours_week: 40,
            },
        ],
        changeovers: vec![],
    }
}

#[test]
fn heuristic_pipeline_end_to_end() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init()
        .ok();

    let data = reference();
    plan_core::validate(&data).expect("reference bundle is clean");

    let mut forecasts = BTreeMap::new();
    forecasts.insert(ModelName::from("ModelA"), forecast("ModelA", 400, 28));
    forecasts.insert(ModelName::from("ModelB"), forecast("ModelB", 200, 30));

    let demand = aggregate_weekly(&forecasts);
    // Four full weeks per model; ModelB's 2-day tail is dropped.
    assert_eq!(demand.len(), 8);
    assert!(demand.iter().filter(|d| d.model.0 == "ModelA").all(|d| d.units == 2800));
    assert!(demand.iter().filter(|d| d.model.0 == "ModelB").all(|d| d.units == 1400));

    let params = PlanParams::default();
    let mix = EqualSplitPlanner::new()
        .plan(&demand, &data, &params)
        .into_result()
        .expect("equal split always succeeds");
    assert_eq!(mix.mix_plan.len(), 8);
    assert_eq!(mix.kpi.total_demand, 16_800);
    assert_eq!(mix.kpi.total_planned, 16_800);
    assert_eq!(mix.kpi.fulfillment_rate, 100.0);
    let a0 = &mix.mix_plan[0];
    assert_eq!(a0.line_id, LineId::from("L1"));
    assert_eq!(a0.line_utilization, 0.8);

    let slots = derive_staffing(&mix.mix_plan);
    // ModelA entries need 2 per shift, ModelB entries 1 per shift,
    // 14 slots per entry, 8 entries.
    assert_eq!(slots.len(), 112);
    let total_required: u32 = slots.iter().map(|s| s.required).sum();
    assert_eq!(total_required, 168);

    let schedule = GreedyRotationScheduler::new()
        .schedule(&slots, &data, &params)
        .into_result()
        .expect("greedy rotation always succeeds");
    assert_eq!(schedule.schedule.len(), 168);
    assert_eq!(schedule.kpi.fulfillment_rate, 100.0);
    // 168 assignments rotate evenly over 4 workers: 42 shifts each.
    let expected_cost = 42.0 * 8.0 * (10.0 + 12.0 + 14.0 + 16.0);
    assert!((schedule.kpi.total_cost - expected_cost).abs() < 1e-6);
    // Most experienced worker opens the rotation.
    assert_eq!(schedule.schedule[0].worker_id, WorkerId::from("W1"));
    assert_eq!(schedule.schedule[0].date, "Week 1, Day 1");
}
