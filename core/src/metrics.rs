//! Schedule metrics, computed once from the finished schedule.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | total_hours / total_cost | Sums over shifts |
//! | overtime_hours | Σ max(0, hours - daily overtime line) per shift |
//! | coverage_rate | min(100, 100 · shifts / Σ required_staff); 100 when nothing is required |
//! | position_coverage | Per position, Σ over requirement rows of 100 · filled / required |
//! | employee_satisfaction_score | 100 · (1 - CV of per-employee hours) |
//! | cost_efficiency_score | 100 - % deviation of the average rate from market - spread penalty |
//! | optimization_score | max(0, 100 - penalty · critical conflicts) |
//!
//! The overtime line is a measurement policy, independent
//! of `SchedulingConstraints::overtime_threshold`, which governs planning.

use crate::{
    config::MetricsPolicy,
    model::{GeneratedShift, SchedulingConflict, Severity, ShiftRequirement},
    types::{EmployeeId, Hours},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingMetrics {
    pub total_hours:                 Hours,
    pub total_cost:                  f64,
    pub overtime_hours:              Hours,
    pub coverage_rate:               f64,
    pub position_coverage:           BTreeMap<String, f64>,
    pub employee_satisfaction_score: f64,
    pub cost_efficiency_score:       f64,
    pub optimization_score:          f64,
    pub shift_count:                 usize,
    pub employees_scheduled:         usize,
    pub total_required_staff:        u64,
    pub unfilled_slots:              u64,
    pub critical_conflicts:          usize,
}

impl SchedulingMetrics {
    /// Computes metrics from the schedule, its requirements and the conflict log.
    pub fn calculate(
        schedule:     &[GeneratedShift],
        requirements: &[ShiftRequirement],
        conflicts:    &[SchedulingConflict],
        policy:       &MetricsPolicy,
    ) -> Self {
        let total_hours: Hours = schedule.iter().map(|s| s.hours).sum();
        let total_cost: f64 = schedule.iter().map(|s| s.estimated_cost).sum();
        let overtime_hours: Hours = schedule
            .iter()
            .map(|s| (s.hours - policy.daily_overtime_hours).max(0.0))
            .sum();

        let total_required_staff: u64 = requirements.iter().map(|r| u64::from(r.required_staff)).sum();
        let coverage_rate = coverage_rate(schedule.len(), total_required_staff);
        let unfilled_slots = total_required_staff.saturating_sub(schedule.len() as u64);

        let per_employee = per_employee_hours(schedule);
        let critical_conflicts = conflicts
            .iter()
            .filter(|c| c.severity == Severity::Critical)
            .count();
        let optimization_score =
            (100.0 - policy.conflict_penalty * critical_conflicts as f64).max(0.0);

        Self {
            total_hours,
            total_cost,
            overtime_hours,
            coverage_rate,
            position_coverage: position_coverage(schedule, requirements),
            employee_satisfaction_score: satisfaction_score(&per_employee),
            cost_efficiency_score: cost_efficiency_score(schedule, total_hours, total_cost, policy),
            optimization_score,
            shift_count: schedule.len(),
            employees_scheduled: per_employee.len(),
            total_required_staff,
            unfilled_slots,
            critical_conflicts,
        }
    }
}

fn coverage_rate(filled: usize, required: u64) -> f64 {
    if required == 0 {
        return 100.0;
    }
    (100.0 * filled as f64 / required as f64).min(100.0)
}

/// Each requirement row contributes its own fill percentage, counted over
/// every shift of that position and date. Rows sharing a position add up.
fn position_coverage(
    schedule:     &[GeneratedShift],
    requirements: &[ShiftRequirement],
) -> BTreeMap<String, f64> {
    let mut coverage: BTreeMap<String, f64> = BTreeMap::new();
    for requirement in requirements {
        if requirement.required_staff == 0 {
            continue;
        }
        let filled = schedule
            .iter()
            .filter(|s| s.position == requirement.position && s.date == requirement.date)
            .count();
        let pct = 100.0 * filled as f64 / f64::from(requirement.required_staff);
        *coverage.entry(requirement.position.clone()).or_insert(0.0) += pct;
    }
    coverage
}

fn per_employee_hours(schedule: &[GeneratedShift]) -> BTreeMap<EmployeeId, Hours> {
    let mut totals: BTreeMap<EmployeeId, Hours> = BTreeMap::new();
    for shift in schedule {
        *totals.entry(shift.employee_id.clone()).or_insert(0.0) += shift.hours;
    }
    totals
}

/// Coefficient of variation; 0 for fewer than two values or a zero mean.
fn coefficient_of_variation(values: &[f64], weights: &[f64]) -> f64 {
    let total_weight: f64 = weights.iter().sum();
    if values.len() < 2 || total_weight <= 0.0 {
        return 0.0;
    }
    let mean = values.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / total_weight;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = values
        .iter()
        .zip(weights)
        .map(|(v, w)| w * (v - mean).powi(2))
        .sum::<f64>()
        / total_weight;
    variance.sqrt() / mean
}

/// More even hours across scheduled staff scores higher.
fn satisfaction_score(per_employee: &BTreeMap<EmployeeId, Hours>) -> f64 {
    let hours: Vec<f64> = per_employee.values().copied().collect();
    let ones = vec![1.0; hours.len()];
    let cv = coefficient_of_variation(&hours, &ones);
    (100.0 * (1.0 - cv)).clamp(0.0, 100.0)
}

/// Rewards an average rate close to market and a narrow spread of rates.
fn cost_efficiency_score(
    schedule:    &[GeneratedShift],
    total_hours: Hours,
    total_cost:  f64,
    policy:      &MetricsPolicy,
) -> f64 {
    if total_hours <= 0.0 {
        return 100.0;
    }
    let average_rate = total_cost / total_hours;
    let deviation_pct =
        (average_rate - policy.market_hourly_rate).abs() / policy.market_hourly_rate * 100.0;

    let rates: Vec<f64> = schedule.iter().map(|s| s.hourly_rate).collect();
    let hours: Vec<f64> = schedule.iter().map(|s| s.hours).collect();
    let spread = coefficient_of_variation(&rates, &hours);

    (100.0 - deviation_pct - policy.rate_spread_penalty * spread).clamp(0.0, 100.0)
}
