use std::collections::{BTreeMap, BTreeSet, HashMap};

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};

use plan_core::kpi;
use types::{
    MixPlan, MixPlanEntry, ModelName, PlanOutcome, PlanParams, ReferenceData, SolveQuality,
    WeeklyDemand, UNIT_PRODUCTION_COST,
};

/// One (line, model, week) decision: an integer quantity bounded by the
/// line's weekly capacity and a companion is-producing indicator. Pairs
/// outside a line's eligible set get no variable at all.
pub(crate) struct MixVar {
    pub line: usize,
    pub model: usize,
    pub week: u32,
    pub qty: Variable,
    pub active: Variable,
}

pub(crate) fn solve(
    demand: &[WeeklyDemand],
    data: &ReferenceData,
    params: &PlanParams,
) -> anyhow::Result<PlanOutcome<MixPlan>> {
    let models = demanded_models(demand);
    let model_idx: HashMap<&str, usize> = models
        .iter()
        .enumerate()
        .map(|(i, m)| (m.0.as_str(), i))
        .collect();
    let weeks: BTreeSet<u32> = demand.iter().map(|d| d.week).collect();

    let mut demand_by: BTreeMap<(usize, u32), u64> = BTreeMap::new();
    for d in demand {
        *demand_by.entry((model_idx[d.model.0.as_str()], d.week)).or_default() += d.units;
    }
    let total_demand: u64 = demand.iter().map(|d| d.units).sum();

    let mut pvars = ProblemVariables::new();
    let vars = declare_vars(&mut pvars, data, &models, &weeks);

    if vars.is_empty() {
        if total_demand == 0 {
            let kpi = kpi::mix_kpi(demand, &[]);
            return Ok(PlanOutcome::success(
                MixPlan {
                    mix_plan: vec![],
                    kpi,
                },
                SolveQuality::Optimal,
            ));
        }
        return Ok(infeasible("no line is eligible for any demanded model"));
    }

    let mut objective = Expression::from(0.0);
    for v in &vars {
        objective = objective + (UNIT_PRODUCTION_COST as f64) * v.qty;
    }

    let mut model = pvars.minimise(objective).using(default_solver);
    model.set_parameter("sec", &params.time_limit_sec.to_string());
    model.set_parameter("log", "0");
    model = add_single_model_constraints(model, data.lines.len(), &weeks, &vars);
    model = add_linking_constraints(model, data, &vars);
    model = add_demand_constraints(model, &demand_by, &vars);

    match model.solve() {
        Ok(sol) => {
            let entries = extract_plan(data, &models, &vars, &sol);
            let kpi = kpi::mix_kpi(demand, &entries);
            Ok(PlanOutcome::success(
                MixPlan {
                    mix_plan: entries,
                    kpi,
                },
                SolveQuality::Optimal,
            ))
        }
        Err(ResolutionError::Infeasible) => {
            Ok(infeasible("no production mix satisfies every weekly demand"))
        }
        Err(e) => Ok(PlanOutcome::Error {
            message: e.to_string(),
        }),
    }
}

fn infeasible(message: &str) -> PlanOutcome<MixPlan> {
    PlanOutcome::Infeasible {
        message: message.into(),
        suggestion: "add eligible lines or daily capacity, or reduce weekly demand".into(),
    }
}

/// Demanded model names in order of first appearance.
fn demanded_models(demand: &[WeeklyDemand]) -> Vec<ModelName> {
    let mut models: Vec<ModelName> = Vec::new();
    for d in demand {
        if !models.contains(&d.model) {
            models.push(d.model.clone());
        }
    }
    models
}

fn declare_vars(
    pvars: &mut ProblemVariables,
    data: &ReferenceData,
    models: &[ModelName],
    weeks: &BTreeSet<u32>,
) -> Vec<MixVar> {
    let mut vars = Vec::new();
    for (li, line) in data.lines.iter().enumerate() {
        for (mi, model) in models.iter().enumerate() {
            if !line.is_eligible(model) {
                continue;
            }
            for &week in weeks {
                let qty = pvars.add(
                    variable()
                        .integer()
                        .min(0.0)
                        .max(line.weekly_capacity() as f64),
                );
                let active = pvars.add(variable().binary());
                vars.push(MixVar {
                    line: li,
                    model: mi,
                    week,
                    qty,
                    active,
                });
            }
        }
    }
    vars
}

/// At most one model indicated active per (line, week).
fn add_single_model_constraints<M: SolverModel>(
    mut model: M,
    line_count: usize,
    weeks: &BTreeSet<u32>,
    vars: &[MixVar],
) -> M {
    for li in 0..line_count {
        for &week in weeks {
            let mut sum = Expression::from(0.0);
            let mut any = false;
            for v in vars.iter().filter(|v| v.line == li && v.week == week) {
                sum = sum + v.active;
                any = true;
            }
            if any {
                model = model.with(sum.leq(1.0));
            }
        }
    }
    model
}

/// Quantity is zero unless the indicator is set, and never exceeds weekly
/// capacity when it is.
fn add_linking_constraints<M: SolverModel>(
    mut model: M,
    data: &ReferenceData,
    vars: &[MixVar],
) -> M {
    for v in vars {
        let cap = data.lines[v.line].weekly_capacity() as f64;
        model = model.with((v.qty - cap * v.active).leq(0.0));
    }
    model
}

/// Summed quantity across lines covers each (model, week) demand.
fn add_demand_constraints<M: SolverModel>(
    mut model: M,
    demand_by: &BTreeMap<(usize, u32), u64>,
    vars: &[MixVar],
) -> M {
    for (&(mi, week), &units) in demand_by {
        if units == 0 {
            continue;
        }
        let mut sum = Expression::from(0.0);
        for v in vars.iter().filter(|v| v.model == mi && v.week == week) {
            sum = sum + v.qty;
        }
        model = model.with(sum.geq(units as f64));
    }
    model
}

fn extract_plan(
    data: &ReferenceData,
    models: &[ModelName],
    vars: &[MixVar],
    sol: &impl Solution,
) -> Vec<MixPlanEntry> {
    let mut entries = Vec::new();
    for v in vars {
        if sol.value(v.active) < 0.5 {
            continue;
        }
        let planned = sol.value(v.qty).round() as u64;
        if planned == 0 {
            continue;
        }
        let line = &data.lines[v.line];
        entries.push(MixPlanEntry {
            week: v.week,
            line_id: line.id.clone(),
            model: models[v.model].clone(),
            planned_units: planned,
            line_utilization: line.utilization(planned),
        });
    }
    entries
}
