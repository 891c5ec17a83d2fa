use std::collections::BTreeMap;

use tracing::debug;
use types::{ForecastPoint, ModelName, WeeklyDemand, DAYS_PER_WEEK, PLANNING_WEEKS};

/// Collapses per-model daily forecast sequences into per-week totals for
/// week indices 0..=3.
///
/// Only full 7-day chunks are aggregated: a partial trailing week is
/// excluded rather than mis-summed, and points beyond the planning horizon
/// are ignored. Short input is not an error; it just yields fewer weeks.
pub fn aggregate_weekly(forecasts: &BTreeMap<ModelName, Vec<ForecastPoint>>) -> Vec<WeeklyDemand> {
    let mut rows = Vec::new();
    for (model, points) in forecasts {
        let full_weeks = (points.len() as u32 / DAYS_PER_WEEK).min(PLANNING_WEEKS);
        if (points.len() as u32) < DAYS_PER_WEEK {
            debug!(
                "model {} has {} forecast points, less than one full week",
                model,
                points.len()
            );
        }
        for week in 0..full_weeks {
            let start = (week * DAYS_PER_WEEK) as usize;
            let units: u64 = points[start..start + DAYS_PER_WEEK as usize]
                .iter()
                .map(|p| p.forecast_units as u64)
                .sum();
            rows.push(WeeklyDemand {
                model: model.clone(),
                week,
                units,
            });
        }
    }
    rows
}
