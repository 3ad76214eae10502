use crate::types::Hours;
use serde::{Deserialize, Serialize};

// ── Business policy defaults ───────────────────────────────────────

pub const PERFORMANCE_WEIGHT: f64 = 0.4;
pub const EXPERIENCE_WEIGHT: f64 = 0.2;
pub const COST_WEIGHT: f64 = 0.2;
/// Preference bonuses are added unscaled; the weight is informational.
pub const PREFERENCE_WEIGHT: f64 = 0.2;

pub const JUNIOR_POINTS: f64 = 20.0;
pub const MID_POINTS: f64 = 50.0;
pub const SENIOR_POINTS: f64 = 80.0;
pub const NEUTRAL_POINTS: f64 = 50.0;

pub const PREFERRED_SLOT_BONUS: f64 = 20.0;
pub const PREFERRED_POSITION_BONUS: f64 = 20.0;
pub const MAX_SCORE: f64 = 100.0;

pub const CONFIDENCE_RELIABILITY_WEIGHT: f64 = 0.7;
pub const CONFIDENCE_EXPERIENCE_WEIGHT: f64 = 0.3;
/// Confidence points lost per unit of complexity above 1.0.
pub const CONFIDENCE_COMPLEXITY_PENALTY: f64 = 10.0;

/// Daily overtime line used for measurement only.
pub const DAILY_OVERTIME_HOURS: Hours = 8.0;
pub const MARKET_HOURLY_RATE: f64 = 25.0;
/// Efficiency points lost per unit of hourly-rate coefficient of variation.
pub const RATE_SPREAD_PENALTY: f64 = 50.0;
pub const CONFLICT_PENALTY: f64 = 10.0;

pub const MIN_COVERAGE_RATE: f64 = 90.0;
pub const MAX_OVERTIME_HOURS: Hours = 20.0;
pub const MIN_SATISFACTION_SCORE: f64 = 70.0;
pub const MIN_COST_EFFICIENCY_SCORE: f64 = 60.0;

pub const BUDGET_INFO_RATIO: f64 = 0.9;

// ── Per-run constraints ────────────────────────────────────────────

/// Global knobs supplied once per planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConstraints {
    pub max_hours_per_employee:   Hours,
    pub min_hours_between_shifts: Hours,
    pub max_consecutive_days:     u32,
    pub max_weekly_labor_budget:  f64,
    /// Weekly hours after which an employee is considered in overtime.
    pub overtime_threshold:       Hours,
    pub prefer_experienced_staff: bool,
    pub balance_workload:         bool,
    pub minimize_labor_cost:      bool,
}

impl Default for SchedulingConstraints {
    fn default() -> Self {
        Self {
            max_hours_per_employee:   40.0,
            min_hours_between_shifts: 8.0,
            max_consecutive_days:     6,
            max_weekly_labor_budget:  10_000.0,
            overtime_threshold:       40.0,
            prefer_experienced_staff: true,
            balance_workload:         true,
            minimize_labor_cost:      false,
        }
    }
}

// ── Tunable policy ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub performance:              f64,
    pub experience:               f64,
    pub cost:                     f64,
    /// Nominal share only; the slot and position bonuses are added unscaled.
    pub preference:               f64,
    pub junior_points:            f64,
    pub mid_points:               f64,
    pub senior_points:            f64,
    pub neutral_points:           f64,
    pub preferred_slot_bonus:     f64,
    pub preferred_position_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            performance:              PERFORMANCE_WEIGHT,
            experience:               EXPERIENCE_WEIGHT,
            cost:                     COST_WEIGHT,
            preference:               PREFERENCE_WEIGHT,
            junior_points:            JUNIOR_POINTS,
            mid_points:               MID_POINTS,
            senior_points:            SENIOR_POINTS,
            neutral_points:           NEUTRAL_POINTS,
            preferred_slot_bonus:     PREFERRED_SLOT_BONUS,
            preferred_position_bonus: PREFERRED_POSITION_BONUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    pub reliability_weight: f64,
    pub experience_weight:  f64,
    pub complexity_penalty: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            reliability_weight: CONFIDENCE_RELIABILITY_WEIGHT,
            experience_weight:  CONFIDENCE_EXPERIENCE_WEIGHT,
            complexity_penalty: CONFIDENCE_COMPLEXITY_PENALTY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsPolicy {
    pub daily_overtime_hours: Hours,
    pub market_hourly_rate:   f64,
    pub rate_spread_penalty:  f64,
    pub conflict_penalty:     f64,
}

impl Default for MetricsPolicy {
    fn default() -> Self {
        Self {
            daily_overtime_hours: DAILY_OVERTIME_HOURS,
            market_hourly_rate:   MARKET_HOURLY_RATE,
            rate_spread_penalty:  RATE_SPREAD_PENALTY,
            conflict_penalty:     CONFLICT_PENALTY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub min_coverage_rate:         f64,
    pub max_overtime_hours:        Hours,
    pub min_satisfaction_score:    f64,
    pub min_cost_efficiency_score: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            min_coverage_rate:         MIN_COVERAGE_RATE,
            max_overtime_hours:        MAX_OVERTIME_HOURS,
            min_satisfaction_score:    MIN_SATISFACTION_SCORE,
            min_cost_efficiency_score: MIN_COST_EFFICIENCY_SCORE,
        }
    }
}

/// Business policy for the planner. Defaults mirror the named constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningPolicy {
    pub scoring:              ScoringWeights,
    pub confidence:           ConfidencePolicy,
    pub metrics:              MetricsPolicy,
    pub recommendations:      RecommendationThresholds,
    pub warn_on_partial_fill: bool,
    /// Fraction of the weekly budget at which an info conflict is recorded.
    pub budget_info_ratio:    f64,
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            scoring:              ScoringWeights::default(),
            confidence:           ConfidencePolicy::default(),
            metrics:              MetricsPolicy::default(),
            recommendations:      RecommendationThresholds::default(),
            warn_on_partial_fill: true,
            budget_info_ratio:    BUDGET_INFO_RATIO,
        }
    }
}

impl PlanningPolicy {
    /// Load from the data/ directory.
    /// In tests, use PlanningPolicy::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/policy/planning_policy.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let policy: PlanningPolicy = serde_json::from_str(&content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reject weights that would push scores outside [0, 100].
    pub fn validate(&self) -> anyhow::Result<()> {
        let s = &self.scoring;
        let weights = [s.performance, s.experience, s.cost, s.preference];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            anyhow::bail!("scoring weights must be finite and non-negative");
        }
        if self.metrics.market_hourly_rate <= 0.0 {
            anyhow::bail!("market_hourly_rate must be positive");
        }
        if !(0.0..=1.0).contains(&self.budget_info_ratio) {
            anyhow::bail!("budget_info_ratio must lie in [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let policy: PlanningPolicy =
            serde_json::from_str(r#"{ "metrics": { "market_hourly_rate": 30.0 } }"#).unwrap();
        assert_eq!(policy.metrics.market_hourly_rate, 30.0);
        assert_eq!(policy.metrics.daily_overtime_hours, DAILY_OVERTIME_HOURS);
        assert_eq!(policy.scoring, ScoringWeights::default());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut policy = PlanningPolicy::default();
        policy.scoring.cost = -0.1;
        assert!(policy.validate().is_err());
    }
}
