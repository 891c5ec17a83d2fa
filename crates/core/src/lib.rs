pub mod demand;
pub mod kpi;
pub mod staffing;

use thiserror::Error;

pub use types::{
    ChangeoverCost, MixPlan, MixPlanEntry, PlanOutcome, PlanParams, ProductionLine, ReferenceData,
    ScheduleAssignment, ShiftSchedule, StaffingSlot, WeeklyDemand, Worker,
};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid reference data: {0}")]
    Msg(String),
}

/// Semantic contract check over the reference snapshot. Schema-level
/// concerns (file parsing, missing columns) belong to the upstream data
/// layer; this only rejects bundles no engine can plan against.
pub fn validate(data: &ReferenceData) -> Result<(), ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    if data.lines.is_empty() {
        errors.push("lines table is empty".into());
    }

    fn chk_unique<I: ToString>(name: &str, ids: impl Iterator<Item = I>, errors: &mut Vec<String>) {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        for id in ids {
            let s = id.to_string();
            if !seen.insert(s.clone()) {
                errors.push(format!("duplicate {name} id: {s}"));
            }
        }
    }
    chk_unique("line", data.lines.iter().map(|l| &l.id.0), &mut errors);
    chk_unique("worker", data.workers.iter().map(|w| &w.id.0), &mut errors);

    for line in &data.lines {
        if line.base_daily_capacity == 0 {
            errors.push(format!("line {} has zero daily capacity", line.id));
        }
        if line.eligible_models.is_empty() {
            errors.push(format!("line {} has no eligible models", line.id));
        }
    }

    for worker in &data.workers {
        if worker.max_hours_week == 0 {
            errors.push(format!("worker {} has zero weekly hours", worker.id));
        }
        if worker.wage_per_hour < 0.0 {
            errors.push(format!("worker {} has negative wage", worker.id));
        }
    }

    use std::collections::HashSet;
    let known_models: HashSet<&str> = data
        .lines
        .iter()
        .flat_map(|l| l.eligible_models.iter().map(|m| m.0.as_str()))
        .collect();
    for c in &data.changeovers {
        if c.from_model == c.to_model {
            errors.push(format!("changeover {} -> {} is a self-loop", c.from_model, c.to_model));
        }
        for m in [&c.from_model, &c.to_model] {
            if !known_models.contains(m.0.as_str()) {
                errors.push(format!("changeover references unknown model {m}"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Msg(errors.join("; ")))
    }
}

/// Weekly production mix allocation. Implementations share one contract so
/// callers can swap fidelity tiers without changing call sites.
pub trait MixPlanner: Send + Sync + 'static {
    fn plan(
        &self,
        demand: &[WeeklyDemand],
        data: &ReferenceData,
        params: &PlanParams,
    ) -> PlanOutcome<MixPlan>;
}

/// Worker-to-slot shift scheduling, same dual-fidelity contract.
pub trait ShiftScheduler: Send + Sync + 'static {
    fn schedule(
        &self,
        slots: &[StaffingSlot],
        data: &ReferenceData,
        params: &PlanParams,
    ) -> PlanOutcome<ShiftSchedule>;
}
