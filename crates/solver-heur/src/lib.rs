use tracing::info;

use plan_core::{kpi, MixPlanner, ShiftScheduler};
use types::{
    MixPlan, MixPlanEntry, PlanOutcome, PlanParams, ReferenceData, ScheduleAssignment,
    ShiftSchedule, SolveQuality, StaffingSlot, WeeklyDemand, Worker,
};

/// Equal-split production mix heuristic.
///
/// Each model's weekly demand is partitioned across all eligible lines by
/// integer division, the remainder going one unit at a time to the first
/// lines in reference order. Line capacity is not enforced: utilization is
/// reported capped at 1.0 but planned units are never reduced. Unlike the
/// exact solver, a line may be handed several models in the same week.
pub struct EqualSplitPlanner;

impl EqualSplitPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EqualSplitPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MixPlanner for EqualSplitPlanner {
    fn plan(
        &self,
        demand: &[WeeklyDemand],
        data: &ReferenceData,
        _params: &PlanParams,
    ) -> PlanOutcome<MixPlan> {
        info!(
            "equal-split allocation over {} demand rows and {} lines",
            demand.len(),
            data.lines.len()
        );

        let mut entries: Vec<MixPlanEntry> = Vec::new();
        for d in demand {
            let eligible: Vec<_> = data
                .lines
                .iter()
                .filter(|line| line.is_eligible(&d.model))
                .collect();
            if eligible.is_empty() {
                // No line can build this model; the shortfall stays
                // visible in the KPI instead of failing the whole plan.
                continue;
            }
            let n = eligible.len() as u64;
            let per_line = d.units / n;
            let remainder = d.units % n;
            for (i, line) in eligible.iter().enumerate() {
                let planned = per_line + u64::from((i as u64) < remainder);
                if planned == 0 {
                    continue;
                }
                entries.push(MixPlanEntry {
                    week: d.week,
                    line_id: line.id.clone(),
                    model: d.model.clone(),
                    planned_units: planned,
                    line_utilization: line.utilization(planned),
                });
            }
        }

        let kpi = kpi::mix_kpi(demand, &entries);
        PlanOutcome::success(
            MixPlan {
                mix_plan: entries,
                kpi,
            },
            SolveQuality::Heuristic,
        )
    }
}

/// Greedy round-robin shift scheduler.
///
/// Workers are ordered by experience descending (stable, so ties keep the
/// reference order) and a single cursor rotates through them across every
/// headcount unit of every slot. There are no feasibility checks: the same
/// worker can land on both shifts of a day, and weekly-hour caps are not
/// consulted. The exact solver enforces both.
pub struct GreedyRotationScheduler;

impl GreedyRotationScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedyRotationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftScheduler for GreedyRotationScheduler {
    fn schedule(
        &self,
        slots: &[StaffingSlot],
        data: &ReferenceData,
        _params: &PlanParams,
    ) -> PlanOutcome<ShiftSchedule> {
        info!(
            "greedy rotation over {} slots and {} workers",
            slots.len(),
            data.workers.len()
        );

        let total_required: u64 = slots.iter().map(|s| s.required as u64).sum();
        if total_required > 0 && data.workers.is_empty() {
            return PlanOutcome::Error {
                message: "workers reference table is empty".into(),
            };
        }

        let mut workers: Vec<&Worker> = data.workers.iter().collect();
        workers.sort_by(|a, b| b.years.cmp(&a.years));

        let mut schedule: Vec<ScheduleAssignment> = Vec::new();
        let mut cursor = 0usize;
        for slot in slots {
            for _ in 0..slot.required {
                let worker = workers[cursor % workers.len()];
                schedule.push(ScheduleAssignment {
                    date: format!("Week {}, Day {}", slot.week + 1, slot.day + 1),
                    line_id: slot.line_id.clone(),
                    shift: slot.shift,
                    worker_id: worker.id.clone(),
                    worker_name: worker.name.clone(),
                });
                cursor += 1;
            }
        }

        let kpi = kpi::schedule_kpi(slots, &schedule, &data.workers);
        PlanOutcome::success(ShiftSchedule { schedule, kpi }, SolveQuality::Heuristic)
    }
}
