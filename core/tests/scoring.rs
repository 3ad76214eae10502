//! Employee scorer tests.

use chrono::{NaiveDate, Weekday};
use shiftplan_core::{
    config::{ConfidencePolicy, SchedulingConstraints, ScoringWeights},
    model::{EmployeeAvailability, ExperienceLevel, Priority, ShiftRequirement},
    scoring::{confidence_score, rank, score_candidates, suitability_score},
    time::DayPart,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn morning_cashier() -> ShiftRequirement {
    ShiftRequirement::new(
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        "08:00-16:00".parse().unwrap(),
        "cashier",
        1,
        Priority::Medium,
    )
}

fn employee(id: &str) -> EmployeeAvailability {
    EmployeeAvailability::new(id, id, "cashier", 20.0)
        .with_window(Weekday::Mon, "06:00-22:00".parse().unwrap())
}

/// Mid level, 50/50 scores, no preferences, default toggles:
/// 0.4·50 + 0.2·50 + 0.2·50 = 40.
#[test]
fn neutral_employee_scores_forty() {
    let score = suitability_score(
        &employee("e1"),
        &morning_cashier(),
        &SchedulingConstraints::default(),
        &ScoringWeights::default(),
    );
    assert!(approx(score, 40.0), "got {score}");
}

#[test]
fn preferences_add_unscaled_bonuses() {
    let weights = ScoringWeights::default();
    let constraints = SchedulingConstraints::default();
    let req = morning_cashier();

    let slot_only = employee("e1").with_preferred_slot(DayPart::Morning);
    let both = slot_only.clone().with_preferred_position("cashier");
    let wrong_slot = employee("e1").with_preferred_slot(DayPart::Evening);

    assert!(approx(suitability_score(&slot_only, &req, &constraints, &weights), 60.0));
    assert!(approx(suitability_score(&both, &req, &constraints, &weights), 80.0));
    assert!(approx(suitability_score(&wrong_slot, &req, &constraints, &weights), 40.0));
}

#[test]
fn score_is_clamped_to_one_hundred() {
    let star = employee("e1")
        .with_scores(100.0, 100.0)
        .with_experience(ExperienceLevel::Senior)
        .with_preferred_slot(DayPart::Morning)
        .with_preferred_position("cashier");
    let score = suitability_score(
        &star,
        &morning_cashier(),
        &SchedulingConstraints::default(),
        &ScoringWeights::default(),
    );
    assert_eq!(score, 100.0);
}

#[test]
fn experience_is_neutral_when_not_preferred() {
    let constraints = SchedulingConstraints {
        prefer_experienced_staff: false,
        ..SchedulingConstraints::default()
    };
    let weights = ScoringWeights::default();
    let req = morning_cashier();
    let junior = employee("e1").with_experience(ExperienceLevel::Junior);
    let senior = employee("e2").with_experience(ExperienceLevel::Senior);
    assert!(approx(
        suitability_score(&junior, &req, &constraints, &weights),
        suitability_score(&senior, &req, &constraints, &weights),
    ));

    let preferring = SchedulingConstraints::default();
    assert!(
        suitability_score(&senior, &req, &preferring, &weights)
            > suitability_score(&junior, &req, &preferring, &weights)
    );
}

/// With cost minimisation on, the cost term is (100 - rate) floored at zero.
#[test]
fn cheaper_staff_score_higher_when_minimising_cost() {
    let constraints = SchedulingConstraints {
        minimize_labor_cost: true,
        ..SchedulingConstraints::default()
    };
    let weights = ScoringWeights::default();
    let req = morning_cashier();

    let cheap = EmployeeAvailability::new("e1", "e1", "cashier", 20.0);
    let pricey = EmployeeAvailability::new("e2", "e2", "cashier", 120.0);
    assert!(approx(suitability_score(&cheap, &req, &constraints, &weights), 46.0));
    assert!(approx(suitability_score(&pricey, &req, &constraints, &weights), 30.0));
}

/// Three senior candidates who prefer the slot and position, with
/// performance 60, 35 and 10, score 90, 80 and 70 and rank in that order.
#[test]
fn ranking_orders_by_score() {
    let make = |id: &str, perf: f64| {
        employee(id)
            .with_scores(perf, perf)
            .with_experience(ExperienceLevel::Senior)
            .with_preferred_slot(DayPart::Morning)
            .with_preferred_position("cashier")
    };
    let pool = vec![make("e70", 10.0), make("e90", 60.0), make("e80", 35.0)];
    let refs: Vec<&EmployeeAvailability> = pool.iter().collect();
    let mut scored = score_candidates(
        &refs,
        &morning_cashier(),
        &SchedulingConstraints::default(),
        &ScoringWeights::default(),
    );
    rank(&mut scored);

    let ranked: Vec<(&str, f64)> = scored
        .iter()
        .map(|c| (c.employee.employee_id.as_str(), c.score))
        .collect();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].0, "e90");
    assert_eq!(ranked[1].0, "e80");
    assert_eq!(ranked[2].0, "e70");
    assert!(approx(ranked[0].1, 90.0) && approx(ranked[1].1, 80.0) && approx(ranked[2].1, 70.0));
}

#[test]
fn ties_keep_candidate_order() {
    let pool = vec![employee("first"), employee("second"), employee("third")];
    let refs: Vec<&EmployeeAvailability> = pool.iter().collect();
    let mut scored = score_candidates(
        &refs,
        &morning_cashier(),
        &SchedulingConstraints::default(),
        &ScoringWeights::default(),
    );
    rank(&mut scored);
    let ids: Vec<&str> = scored.iter().map(|c| c.employee.employee_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn confidence_tracks_reliability_and_complexity() {
    let weights = ScoringWeights::default();
    let policy = ConfidencePolicy::default();
    let reliable = employee("e1").with_scores(50.0, 90.0);
    let shaky = employee("e2").with_scores(50.0, 40.0);
    let simple = morning_cashier();
    let complex = morning_cashier().with_complexity(2.0);

    let c_reliable = confidence_score(&reliable, &simple, &weights, &policy);
    let c_shaky = confidence_score(&shaky, &simple, &weights, &policy);
    let c_complex = confidence_score(&reliable, &complex, &weights, &policy);

    // 0.7·90 + 0.3·50 = 78
    assert!(approx(c_reliable, 78.0), "got {c_reliable}");
    assert!(c_reliable > c_shaky);
    assert!(approx(c_complex, 68.0), "complexity 2.0 costs 10 points, got {c_complex}");
    for c in [c_reliable, c_shaky, c_complex] {
        assert!((0.0..=100.0).contains(&c));
    }
}
