use std::collections::HashMap;

use types::{
    MixKpi, MixPlanEntry, ScheduleAssignment, ScheduleKpi, Shift, StaffingSlot, WeeklyDemand,
    Worker, SHIFT_HOURS, UNIT_PRODUCTION_COST,
};

/// Aggregate metrics for a mix plan against the demand it was planned for.
///
/// Fulfillment is planned/demand as a percentage, 100.0 when there is no
/// demand. The changeover count is a fixed zero: changeover reference data
/// exists but is not consumed by any objective yet.
pub fn mix_kpi(demand: &[WeeklyDemand], plan: &[MixPlanEntry]) -> MixKpi {
    let total_demand: u64 = demand.iter().map(|d| d.units).sum();
    let total_planned: u64 = plan.iter().map(|e| e.planned_units).sum();
    let fulfillment_rate = if total_demand > 0 {
        round1(total_planned as f64 / total_demand as f64 * 100.0)
    } else {
        100.0
    };
    MixKpi {
        total_demand,
        total_planned,
        fulfillment_rate,
        total_changeovers: 0,
        estimated_cost: total_planned * UNIT_PRODUCTION_COST,
    }
}

/// Aggregate metrics for a shift schedule against the slots it covers.
///
/// Labor cost sums wage x shift hours per assignment. Overtime hours are a
/// placeholder until true hour accounting lands; the night-shift bias is
/// the share of assignments on the night shift.
pub fn schedule_kpi(
    slots: &[StaffingSlot],
    assignments: &[ScheduleAssignment],
    workers: &[Worker],
) -> ScheduleKpi {
    let wage_by_id: HashMap<&str, f64> = workers
        .iter()
        .map(|w| (w.id.0.as_str(), w.wage_per_hour))
        .collect();

    let total_cost: f64 = assignments
        .iter()
        .filter_map(|a| wage_by_id.get(a.worker_id.0.as_str()))
        .map(|wage| wage * SHIFT_HOURS as f64)
        .sum();

    let total_required: u64 = slots.iter().map(|s| s.required as u64).sum();
    let fulfillment_rate = if total_required > 0 {
        round1(assignments.len() as f64 / total_required as f64 * 100.0)
    } else {
        100.0
    };

    let night_shift_bias = if assignments.is_empty() {
        0.0
    } else {
        let nights = assignments.iter().filter(|a| a.shift == Shift::Night).count();
        nights as f64 / assignments.len() as f64
    };

    ScheduleKpi {
        total_cost,
        fulfillment_rate,
        overtime_hours: 0.0,
        night_shift_bias,
    }
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
