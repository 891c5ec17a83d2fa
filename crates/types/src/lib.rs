use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DAYS_PER_WEEK: u32 = 7;
pub const PLANNING_WEEKS: u32 = 4;
pub const SHIFT_HOURS: u32 = 8;
pub const UNIT_PRODUCTION_COST: u64 = 1000;
pub const UNITS_PER_WORKER: f64 = 100.0;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone,
            Debug,
            Serialize,
            Deserialize,
            JsonSchema,
            Eq,
            PartialEq,
            Ord,
            PartialOrd,
            Hash,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}
id_newtype!(LineId);
id_newtype!(WorkerId);
id_newtype!(ModelName);

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash)]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    pub const BOTH: [Shift; 2] = [Shift::Day, Shift::Night];
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shift::Day => "Day",
            Shift::Night => "Night",
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProductionLine {
    pub id: LineId,
    #[serde(default)]
    pub eligible_models: Vec<ModelName>,
    pub base_daily_capacity: u32,
}

impl ProductionLine {
    /// Parses the upstream `"ModelA,ModelB"` reference format, trimming
    /// whitespace and dropping empty segments.
    pub fn parse_eligible_models(raw: &str) -> Vec<ModelName> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| ModelName(s.to_string()))
            .collect()
    }

    pub fn is_eligible(&self, model: &ModelName) -> bool {
        self.eligible_models.contains(model)
    }

    pub fn weekly_capacity(&self) -> u64 {
        self.base_daily_capacity as u64 * DAYS_PER_WEEK as u64
    }

    /// Fraction of weekly capacity consumed by `planned_units`, capped at
    /// 1.0 and rounded to two decimals. Planned units above capacity are
    /// reported capped, not reduced.
    pub fn utilization(&self, planned_units: u64) -> f64 {
        let weekly = self.weekly_capacity();
        if weekly == 0 {
            return 0.0;
        }
        let raw = (planned_units as f64 / weekly as f64).min(1.0);
        (raw * 100.0).round() / 100.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub years: u32,
    pub wage_per_hour: f64,
    pub max_hours_week: u32,
}

impl Worker {
    /// Weekly-hours ceiling expressed as a shift count.
    pub fn max_shifts_per_week(&self) -> u32 {
        self.max_hours_week / SHIFT_HOURS
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ChangeoverCost {
    pub from_model: ModelName,
    pub to_model: ModelName,
    pub changeover_hours: f64,
    pub changeover_cost: u64,
}

/// Read-only reference snapshot supplied by the data-access layer for the
/// duration of one planning call.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceData {
    pub lines: Vec<ProductionLine>,
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub changeovers: Vec<ChangeoverCost>,
}

/// One daily forecast record. The date is an opaque label to the planning
/// core and is carried through untouched.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ForecastPoint {
    pub date: String,
    pub model: ModelName,
    pub forecast_units: u32,
    #[serde(default)]
    pub conf_lo: u32,
    #[serde(default)]
    pub conf_hi: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
pub struct WeeklyDemand {
    pub model: ModelName,
    pub week: u32,
    pub units: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct MixPlanEntry {
    pub week: u32,
    pub line_id: LineId,
    pub model: ModelName,
    pub planned_units: u64,
    pub line_utilization: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
pub struct StaffingSlot {
    pub week: u32,
    pub day: u8,
    pub line_id: LineId,
    pub shift: Shift,
    pub required: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleAssignment {
    pub date: String,
    pub line_id: LineId,
    pub shift: Shift,
    pub worker_id: WorkerId,
    pub worker_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct MixKpi {
    pub total_demand: u64,
    pub total_planned: u64,
    pub fulfillment_rate: f64,
    pub total_changeovers: u32,
    pub estimated_cost: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleKpi {
    pub total_cost: f64,
    pub fulfillment_rate: f64,
    pub overtime_hours: f64,
    pub night_shift_bias: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PlannerKind {
    Heuristic,
    Exact,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema)]
pub struct PlanParams {
    pub solver: PlannerKind,
    #[serde(default = "default_time_limit")]
    pub time_limit_sec: u64,
}

fn default_time_limit() -> u64 {
    10
}

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            solver: PlannerKind::Heuristic,
            time_limit_sec: default_time_limit(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SolveQuality {
    /// Proven optimal within the time budget.
    Optimal,
    /// Feasible incumbent reported under a time cutoff, not proven optimal.
    Feasible,
    /// Produced by a constraint-incomplete heuristic; no guarantees.
    Heuristic,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct MixPlan {
    pub mix_plan: Vec<MixPlanEntry>,
    pub kpi: MixKpi,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ShiftSchedule {
    pub schedule: Vec<ScheduleAssignment>,
    pub kpi: ScheduleKpi,
}

/// Tagged result of one engine invocation. Engines never raise past their
/// boundary; every failure mode maps onto one of these variants.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome<T> {
    Success {
        #[serde(flatten)]
        result: T,
        quality: SolveQuality,
    },
    Infeasible {
        message: String,
        suggestion: String,
    },
    SolverUnavailable {
        message: String,
    },
    Error {
        message: String,
    },
}

impl<T> PlanOutcome<T> {
    pub fn success(result: T, quality: SolveQuality) -> Self {
        PlanOutcome::Success { result, quality }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PlanOutcome::Success { .. })
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            PlanOutcome::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<T> {
        match self {
            PlanOutcome::Success { result, .. } => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_eligible_models() {
        let models = ProductionLine::parse_eligible_models(" ModelA , ModelB,ModelC ");
        assert_eq!(
            models,
            vec![
                ModelName::from("ModelA"),
                ModelName::from("ModelB"),
                ModelName::from("ModelC"),
            ]
        );
        assert!(ProductionLine::parse_eligible_models(" , ").is_empty());
    }

    #[test]
    fn utilization_is_capped_and_rounded() {
        let line = ProductionLine {
            id: LineId::from("L1"),
            eligible_models: vec![ModelName::from("X")],
            base_daily_capacity: 200,
        };
        assert_eq!(line.weekly_capacity(), 1400);
        assert_eq!(line.utilization(700), 0.5);
        assert_eq!(line.utilization(2000), 1.0);
        assert_eq!(line.utilization(0), 0.0);
    }

    #[test]
    fn zero_capacity_line_reports_zero_utilization() {
        let line = ProductionLine {
            id: LineId::from("L0"),
            eligible_models: vec![],
            base_daily_capacity: 0,
        };
        assert_eq!(line.utilization(100), 0.0);
    }

    #[test]
    fn max_shifts_derives_from_weekly_hours() {
        let w = Worker {
            id: WorkerId::from("W1"),
            name: "Kim".into(),
            years: 5,
            wage_per_hour: 15.0,
            max_hours_week: 40,
        };
        assert_eq!(w.max_shifts_per_week(), 5);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = PlanOutcome::success(
            MixPlan {
                mix_plan: vec![],
                kpi: MixKpi {
                    total_demand: 0,
                    total_planned: 0,
                    fulfillment_rate: 100.0,
                    total_changeovers: 0,
                    estimated_cost: 0,
                },
            },
            SolveQuality::Heuristic,
        );
        let v = serde_json::to_value(&outcome).unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["quality"], "heuristic");
        assert!(v["mix_plan"].is_array());
        assert_eq!(v["kpi"]["fulfillment_rate"], 100.0);

        let infeasible: PlanOutcome<MixPlan> = PlanOutcome::Infeasible {
            message: "demand exceeds capacity".into(),
            suggestion: "add eligible lines".into(),
        };
        let v = serde_json::to_value(&infeasible).unwrap();
        assert_eq!(v["status"], "infeasible");
        assert!(v["suggestion"].is_string());
    }

    #[test]
    fn shift_labels_match_wire_values() {
        assert_eq!(serde_json::to_value(Shift::Day).unwrap(), "Day");
        assert_eq!(Shift::Night.to_string(), "Night");
    }
}
