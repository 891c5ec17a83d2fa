use std::collections::BTreeSet;

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};

use plan_core::kpi;
use types::{
    PlanOutcome, PlanParams, ReferenceData, ScheduleAssignment, ShiftSchedule, SolveQuality,
    StaffingSlot, SHIFT_HOURS,
};

pub(crate) fn solve(
    slots: &[StaffingSlot],
    data: &ReferenceData,
    params: &PlanParams,
) -> anyhow::Result<PlanOutcome<ShiftSchedule>> {
    let total_required: u64 = slots.iter().map(|s| s.required as u64).sum();
    if total_required == 0 {
        let kpi = kpi::schedule_kpi(slots, &[], &data.workers);
        return Ok(PlanOutcome::success(
            ShiftSchedule {
                schedule: vec![],
                kpi,
            },
            SolveQuality::Optimal,
        ));
    }
    if data.workers.is_empty() {
        return Ok(infeasible("no workers available for the required slots"));
    }

    // One binary per (worker, slot), worker-major.
    let mut pvars = ProblemVariables::new();
    let vars: Vec<Variable> = (0..data.workers.len() * slots.len())
        .map(|_| pvars.add(variable().binary()))
        .collect();
    let var_at = |wi: usize, si: usize| vars[wi * slots.len() + si];

    let mut objective = Expression::from(0.0);
    for (wi, worker) in data.workers.iter().enumerate() {
        let shift_wage = worker.wage_per_hour * SHIFT_HOURS as f64;
        for si in 0..slots.len() {
            objective = objective + shift_wage * var_at(wi, si);
        }
    }

    let mut model = pvars.minimise(objective).using(default_solver);
    model.set_parameter("sec", &params.time_limit_sec.to_string());
    model.set_parameter("log", "0");

    // Each slot gets exactly its required headcount.
    for (si, slot) in slots.iter().enumerate() {
        let mut sum = Expression::from(0.0);
        for wi in 0..data.workers.len() {
            sum = sum + var_at(wi, si);
        }
        model = model.with(sum.eq(slot.required as f64));
    }

    // At most one shift per worker per calendar day.
    let days: BTreeSet<(u32, u8)> = slots.iter().map(|s| (s.week, s.day)).collect();
    for wi in 0..data.workers.len() {
        for &(week, day) in &days {
            let mut sum = Expression::from(0.0);
            for (si, _) in slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.week == week && s.day == day)
            {
                sum = sum + var_at(wi, si);
            }
            model = model.with(sum.leq(1.0));
        }
    }

    // Weekly-hours ceiling as a shift count per (worker, week).
    let weeks: BTreeSet<u32> = slots.iter().map(|s| s.week).collect();
    for (wi, worker) in data.workers.iter().enumerate() {
        for &week in &weeks {
            let mut sum = Expression::from(0.0);
            for (si, _) in slots.iter().enumerate().filter(|(_, s)| s.week == week) {
                sum = sum + var_at(wi, si);
            }
            model = model.with(sum.leq(worker.max_shifts_per_week() as f64));
        }
    }

    match model.solve() {
        Ok(sol) => {
            let assignments = extract_schedule(slots, data, &var_at, &sol);
            let kpi = kpi::schedule_kpi(slots, &assignments, &data.workers);
            Ok(PlanOutcome::success(
                ShiftSchedule {
                    schedule: assignments,
                    kpi,
                },
                SolveQuality::Optimal,
            ))
        }
        Err(ResolutionError::Infeasible) => {
            Ok(infeasible("no feasible assignment covers the required headcount"))
        }
        Err(e) => Ok(PlanOutcome::Error {
            message: e.to_string(),
        }),
    }
}

fn infeasible(message: &str) -> PlanOutcome<ShiftSchedule> {
    PlanOutcome::Infeasible {
        message: message.into(),
        suggestion: "increase the worker pool or reduce required headcount".into(),
    }
}

fn extract_schedule(
    slots: &[StaffingSlot],
    data: &ReferenceData,
    var_at: &impl Fn(usize, usize) -> Variable,
    sol: &impl Solution,
) -> Vec<ScheduleAssignment> {
    let mut assignments = Vec::new();
    for (si, slot) in slots.iter().enumerate() {
        for (wi, worker) in data.workers.iter().enumerate() {
            if sol.value(var_at(wi, si)) > 0.5 {
                assignments.push(ScheduleAssignment {
                    date: format!("Week {}, Day {}", slot.week + 1, slot.day + 1),
                    line_id: slot.line_id.clone(),
                    shift: slot.shift,
                    worker_id: worker.id.clone(),
                    worker_name: worker.name.clone(),
                });
            }
        }
    }
    assignments
}
