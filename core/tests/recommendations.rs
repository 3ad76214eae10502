//! Recommendation generator tests.

use shiftplan_core::{
    config::{MetricsPolicy, RecommendationThresholds},
    metrics::SchedulingMetrics,
    model::{ConflictType, SchedulingConflict, Severity},
    recommend::recommendations,
};

fn healthy() -> SchedulingMetrics {
    SchedulingMetrics::calculate(&[], &[], &[], &MetricsPolicy::default())
}

fn warning() -> SchedulingConflict {
    SchedulingConflict {
        conflict_type: ConflictType::Overtime,
        severity: Severity::Warning,
        employee_id: Some("e1".into()),
        message: "overtime".into(),
        suggested_resolution: "rebalance".into(),
    }
}

#[test]
fn healthy_schedule_gets_no_advice() {
    assert!(recommendations(&healthy(), &[], &RecommendationThresholds::default()).is_empty());
}

#[test]
fn low_coverage_is_flagged() {
    let mut m = healthy();
    m.coverage_rate = 85.0;
    m.unfilled_slots = 3;
    let advice = recommendations(&m, &[], &RecommendationThresholds::default());
    assert_eq!(advice.len(), 1);
    assert!(advice[0].contains("85.0%"), "got {}", advice[0]);
}

/// Thresholds are strict: exactly 90% coverage is fine.
#[test]
fn threshold_edges_do_not_trigger() {
    let mut m = healthy();
    m.coverage_rate = 90.0;
    m.overtime_hours = 20.0;
    m.employee_satisfaction_score = 70.0;
    m.cost_efficiency_score = 60.0;
    assert!(recommendations(&m, &[], &RecommendationThresholds::default()).is_empty());
}

#[test]
fn every_check_can_fire_in_order() {
    let mut m = healthy();
    m.coverage_rate = 50.0;
    m.overtime_hours = 25.0;
    m.employee_satisfaction_score = 40.0;
    m.cost_efficiency_score = 30.0;
    let advice = recommendations(&m, &[warning(), warning()], &RecommendationThresholds::default());

    assert_eq!(advice.len(), 5);
    assert!(advice[0].contains("Coverage"));
    assert!(advice[1].contains("overtime"));
    assert!(advice[2].contains("Resolve 2 scheduling conflicts"));
    assert!(advice[3].contains("Workload"));
    assert!(advice[4].contains("Cost efficiency"));
}

#[test]
fn thresholds_are_configurable() {
    let mut m = healthy();
    m.coverage_rate = 95.0;
    let strict = RecommendationThresholds {
        min_coverage_rate: 99.0,
        ..RecommendationThresholds::default()
    };
    assert_eq!(recommendations(&m, &[], &strict).len(), 1);
}
