use tracing::debug;
use types::{MixPlanEntry, Shift, StaffingSlot, DAYS_PER_WEEK, UNITS_PER_WORKER};

/// Derives per (week, day, line, shift) headcount requirements from a mix
/// plan.
///
/// Per entry: daily units = planned / 7, required staff = one worker per
/// 100 daily units with half-to-even rounding, split across the two
/// shifts by integer division. The split drops the odd worker when the
/// requirement is odd, and slots whose per-shift count lands at zero are
/// omitted entirely. Both behaviors are part of the contract downstream
/// consumers rely on.
pub fn derive_staffing(plan: &[MixPlanEntry]) -> Vec<StaffingSlot> {
    let mut slots = Vec::new();
    for entry in plan {
        let daily_units = entry.planned_units as f64 / DAYS_PER_WEEK as f64;
        let required_staff = round_half_to_even(daily_units / UNITS_PER_WORKER);
        let per_shift = (required_staff / 2) as u32;
        if per_shift == 0 {
            debug!(
                "mix entry (week {}, line {}, {}) needs no full shift crew",
                entry.week, entry.line_id, entry.model
            );
            continue;
        }
        for day in 0..DAYS_PER_WEEK as u8 {
            for shift in Shift::BOTH {
                slots.push(StaffingSlot {
                    week: entry.week,
                    day,
                    line_id: entry.line_id.clone(),
                    shift,
                    required: per_shift,
                });
            }
        }
    }
    slots
}

/// Banker's rounding: exact halves go to the nearest even integer,
/// everything else to the nearest integer.
pub fn round_half_to_even(x: f64) -> u64 {
    let floor = x.floor();
    let frac = x - floor;
    if (frac - 0.5).abs() < 1e-9 {
        let f = floor as u64;
        if f % 2 == 0 {
            f
        } else {
            f + 1
        }
    } else {
        x.round() as u64
    }
}
