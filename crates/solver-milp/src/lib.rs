#[cfg(feature = "with-milp")]
mod milp_mix;
#[cfg(feature = "with-milp")]
mod milp_schedule;

use tracing::info;

use plan_core::{MixPlanner, ShiftScheduler};
use types::{
    MixPlan, PlanOutcome, PlanParams, ReferenceData, ShiftSchedule, StaffingSlot, WeeklyDemand,
};

#[cfg(not(feature = "with-milp"))]
const NO_BACKEND: &str = "built without the with-milp feature; no MILP backend is linked";

/// Exact production mix solver on an integer program: per (eligible line,
/// model, week) an integer quantity bounded by weekly capacity plus an
/// is-producing indicator, at most one model active per line and week,
/// demand covered per (model, week), cost-minimal.
pub struct MilpMixPlanner;

impl MilpMixPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MilpMixPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MixPlanner for MilpMixPlanner {
    fn plan(
        &self,
        demand: &[WeeklyDemand],
        data: &ReferenceData,
        params: &PlanParams,
    ) -> PlanOutcome<MixPlan> {
        info!(
            "exact mix solve over {} demand rows and {} lines",
            demand.len(),
            data.lines.len()
        );
        solve_mix(demand, data, params)
    }
}

#[cfg(feature = "with-milp")]
fn solve_mix(
    demand: &[WeeklyDemand],
    data: &ReferenceData,
    params: &PlanParams,
) -> PlanOutcome<MixPlan> {
    match milp_mix::solve(demand, data, params) {
        Ok(outcome) => outcome,
        Err(e) => PlanOutcome::Error {
            message: e.to_string(),
        },
    }
}

#[cfg(not(feature = "with-milp"))]
fn solve_mix(
    _demand: &[WeeklyDemand],
    _data: &ReferenceData,
    _params: &PlanParams,
) -> PlanOutcome<MixPlan> {
    PlanOutcome::SolverUnavailable {
        message: NO_BACKEND.into(),
    }
}

/// Exact shift scheduler: one binary per (worker, slot), at most one shift
/// per worker per day, required headcount met exactly, weekly shift-count
/// ceiling per worker, wage-minimal.
pub struct MilpShiftScheduler;

impl MilpShiftScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MilpShiftScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftScheduler for MilpShiftScheduler {
    fn schedule(
        &self,
        slots: &[StaffingSlot],
        data: &ReferenceData,
        params: &PlanParams,
    ) -> PlanOutcome<ShiftSchedule> {
        info!(
            "exact shift solve over {} slots and {} workers",
            slots.len(),
            data.workers.len()
        );
        solve_schedule(slots, data, params)
    }
}

#[cfg(feature = "with-milp")]
fn solve_schedule(
    slots: &[StaffingSlot],
    data: &ReferenceData,
    params: &PlanParams,
) -> PlanOutcome<ShiftSchedule> {
    match milp_schedule::solve(slots, data, params) {
        Ok(outcome) => outcome,
        Err(e) => PlanOutcome::Error {
            message: e.to_string(),
        },
    }
}

#[cfg(not(feature = "with-milp"))]
fn solve_schedule(
    _slots: &[StaffingSlot],
    _data: &ReferenceData,
    _params: &PlanParams,
) -> PlanOutcome<ShiftSchedule> {
    PlanOutcome::SolverUnavailable {
        message: NO_BACKEND.into(),
    }
}
