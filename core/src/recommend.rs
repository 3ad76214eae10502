//! Recommendation generator: advisory strings derived post-hoc from the
//! metrics and the conflict log. Thresholds come from `RecommendationThresholds`.

use crate::{
    config::RecommendationThresholds,
    metrics::SchedulingMetrics,
    model::SchedulingConflict,
};

pub fn recommendations(
    metrics:    &SchedulingMetrics,
    conflicts:  &[SchedulingConflict],
    thresholds: &RecommendationThresholds,
) -> Vec<String> {
    let mut out = Vec::new();

    if metrics.coverage_rate < thresholds.min_coverage_rate {
        out.push(format!(
            "Coverage is {:.1}% ({} unfilled slots); consider hiring additional staff or expanding availability",
            metrics.coverage_rate, metrics.unfilled_slots
        ));
    }

    if metrics.overtime_hours > thresholds.max_overtime_hours {
        out.push(format!(
            "{:.1} overtime hours scheduled; redistribute long shifts across more employees",
            metrics.overtime_hours
        ));
    }

    if !conflicts.is_empty() {
        out.push(format!(
            "Resolve {} scheduling conflicts before publishing the schedule",
            conflicts.len()
        ));
    }

    if metrics.employee_satisfaction_score < thresholds.min_satisfaction_score {
        out.push(format!(
            "Workload balance score is {:.1}; spread hours more evenly between employees",
            metrics.employee_satisfaction_score
        ));
    }

    if metrics.cost_efficiency_score < thresholds.min_cost_efficiency_score {
        out.push(format!(
            "Cost efficiency score is {:.1}; review hourly rates against the market",
            metrics.cost_efficiency_score
        ));
    }

    out
}
