//! Assignment planner tests: ordering, hard caps and the conflict log.

use chrono::{NaiveDate, Weekday};
use shiftplan_core::{
    config::{PlanningPolicy, SchedulingConstraints},
    engine::plan_schedule,
    model::{ConflictType, EmployeeAvailability, ExperienceLevel, Priority, Severity, ShiftRequirement},
    planner::{plan_assignments, prioritized},
    time::{DayPart, TimeOfDay},
};

const WEEK: [Weekday; 7] = [
    Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
    Weekday::Fri, Weekday::Sat, Weekday::Sun,
];

/// 2026-03-02 is a Monday.
fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn req(d: u32, slot: &str, position: &str, staff: u32, priority: Priority) -> ShiftRequirement {
    ShiftRequirement::new(day(d), slot.parse().unwrap(), position, staff, priority)
}

fn all_week(id: &str, position: &str) -> EmployeeAvailability {
    WEEK.iter().fold(
        EmployeeAvailability::new(id, format!("Employee {id}"), position, 20.0),
        |e, d| e.with_window(*d, "06:00-22:00".parse().unwrap()),
    )
}

fn conflicts_of(kind: ConflictType, conflicts: &[shiftplan_core::model::SchedulingConflict]) -> usize {
    conflicts.iter().filter(|c| c.conflict_type == kind).count()
}

/// One cashier, one 8h cashier slot: filled at 8h and 160 cost, no conflicts.
#[test]
fn single_requirement_is_filled() {
    let solution = plan_schedule(
        &[req(2, "08:00-16:00", "cashier", 1, Priority::Medium)],
        &[all_week("e1", "cashier")],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );

    assert!(solution.success);
    assert_eq!(solution.schedule.len(), 1);
    let shift = &solution.schedule[0];
    assert_eq!(shift.employee_id, "e1");
    assert_eq!(shift.hours, 8.0);
    assert_eq!(shift.estimated_cost, 160.0);
    assert!(solution.conflicts.is_empty(), "unexpected conflicts: {:?}", solution.conflicts);
    assert_eq!(solution.metrics.coverage_rate, 100.0);
}

#[test]
fn unmet_requirement_is_a_critical_conflict() {
    let solution = plan_schedule(
        &[req(2, "08:00-16:00", "stylist", 1, Priority::High)],
        &[all_week("e1", "cashier")],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );

    assert!(!solution.success, "a critical conflict must fail the run");
    assert!(solution.schedule.is_empty());
    assert_eq!(solution.conflicts.len(), 1);
    let c = &solution.conflicts[0];
    assert_eq!(c.conflict_type, ConflictType::Availability);
    assert_eq!(c.severity, Severity::Critical);
    assert!(c.message.contains("stylist"), "message should name the position: {}", c.message);
    assert_eq!(solution.metrics.optimization_score, 90.0);
}

#[test]
fn prioritized_is_stable_within_a_priority() {
    let reqs = vec![
        req(2, "08:00-12:00", "a", 1, Priority::Low),
        req(2, "08:00-12:00", "b", 1, Priority::Medium),
        req(2, "08:00-12:00", "c", 1, Priority::Critical),
        req(2, "08:00-12:00", "d", 1, Priority::Medium),
        req(2, "08:00-12:00", "e", 1, Priority::High),
    ];
    let order: Vec<&str> = prioritized(&reqs).iter().map(|r| r.position.as_str()).collect();
    assert_eq!(order, vec!["c", "e", "b", "d", "a"]);
}

/// A critical requirement listed after a low one still gets first pick.
#[test]
fn higher_priority_is_planned_first() {
    let solution = plan_schedule(
        &[
            req(2, "08:00-16:00", "cashier", 1, Priority::Low),
            req(2, "10:00-18:00", "cashier", 1, Priority::Critical),
        ],
        &[all_week("e1", "cashier")],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );

    assert_eq!(solution.schedule.len(), 1);
    assert_eq!(solution.schedule[0].start_time, TimeOfDay::at_hour(10));
    assert_eq!(solution.critical_conflicts(), 1);
    assert!(solution.conflicts[0].message.contains("08:00-16:00"));
}

#[test]
fn equal_priority_keeps_input_order() {
    let solution = plan_schedule(
        &[
            req(2, "08:00-16:00", "cashier", 1, Priority::Medium),
            req(2, "10:00-18:00", "cashier", 1, Priority::Medium),
        ],
        &[all_week("e1", "cashier")],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );
    assert_eq!(solution.schedule.len(), 1);
    assert_eq!(solution.schedule[0].start_time, TimeOfDay::at_hour(8));
}

/// Scheduled hours never exceed the personal weekly cap.
#[test]
fn weekly_hour_cap_is_never_exceeded() {
    let employee = all_week("e1", "cashier").with_max_hours(16.0);
    let reqs: Vec<ShiftRequirement> = (2..=4)
        .map(|d| req(d, "08:00-16:00", "cashier", 1, Priority::Medium))
        .collect();
    let solution = plan_schedule(
        &reqs,
        &[employee],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );

    let hours: f64 = solution.shifts_for("e1").map(|s| s.hours).sum();
    assert_eq!(hours, 16.0);
    assert_eq!(solution.schedule.len(), 2);
    assert_eq!(solution.critical_conflicts(), 1, "the third day goes unfilled");
}

#[test]
fn shifts_carry_the_requirement_position() {
    let flexible = all_week("e1", "cashier").with_preferred_position("stylist");
    let solution = plan_schedule(
        &[req(2, "08:00-16:00", "stylist", 1, Priority::Medium)],
        &[flexible],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );
    assert_eq!(solution.schedule.len(), 1);
    assert_eq!(solution.schedule[0].position, "stylist");
}

#[test]
fn partial_fill_is_a_warning() {
    let solution = plan_schedule(
        &[req(2, "08:00-16:00", "cashier", 3, Priority::Medium)],
        &[all_week("e1", "cashier"), all_week("e2", "cashier")],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );

    assert_eq!(solution.schedule.len(), 2);
    assert!(solution.success, "a partial fill is not critical");
    assert_eq!(solution.conflicts.len(), 1);
    assert_eq!(solution.conflicts[0].severity, Severity::Warning);
    assert!(solution.conflicts[0].message.contains("2 of 3"));
}

#[test]
fn partial_fill_warning_can_be_disabled() {
    let policy = PlanningPolicy {
        warn_on_partial_fill: false,
        ..PlanningPolicy::default()
    };
    let solution = plan_schedule(
        &[req(2, "08:00-16:00", "cashier", 3, Priority::Medium)],
        &[all_week("e1", "cashier")],
        &SchedulingConstraints::default(),
        &policy,
    );
    assert_eq!(solution.schedule.len(), 1);
    assert!(solution.conflicts.is_empty());
}

#[test]
fn zero_staff_requirement_is_skipped() {
    let outcome = plan_assignments(
        &[req(2, "08:00-16:00", "cashier", 0, Priority::Critical)],
        &[all_week("e1", "cashier")],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );
    assert!(outcome.schedule.is_empty());
    assert!(outcome.conflicts.is_empty());
}

/// The warning fires once, on the shift that crosses the threshold.
#[test]
fn crossing_the_overtime_threshold_warns_once() {
    let constraints = SchedulingConstraints {
        overtime_threshold: 16.0,
        ..SchedulingConstraints::default()
    };
    let reqs: Vec<ShiftRequirement> = (2..=5)
        .map(|d| req(d, "08:00-16:00", "cashier", 1, Priority::Medium))
        .collect();
    let solution = plan_schedule(&reqs, &[all_week("e1", "cashier")], &constraints, &PlanningPolicy::default());

    assert_eq!(solution.schedule.len(), 4);
    assert_eq!(conflicts_of(ConflictType::Overtime, &solution.conflicts), 1);
    let overtime = solution
        .conflicts
        .iter()
        .find(|c| c.conflict_type == ConflictType::Overtime)
        .unwrap();
    assert_eq!(overtime.employee_id.as_deref(), Some("e1"));
    assert!(solution.success);
}

#[test]
fn short_rest_between_shifts_warns() {
    let solution = plan_schedule(
        &[
            req(2, "06:00-10:00", "cashier", 1, Priority::Medium),
            req(2, "14:00-18:00", "cashier", 1, Priority::Medium),
        ],
        &[all_week("e1", "cashier")],
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );
    assert_eq!(solution.schedule.len(), 2, "rest gaps are soft; both shifts are kept");
    assert_eq!(conflicts_of(ConflictType::MinHours, &solution.conflicts), 1);
}

/// Candidates scoring 90, 80 and 70 for two seats: the top two are booked.
#[test]
fn top_scoring_candidates_fill_the_seats() {
    let senior = |id: &str, perf: f64| {
        all_week(id, "cashier")
            .with_scores(perf, perf)
            .with_experience(ExperienceLevel::Senior)
            .with_preferred_slot(DayPart::Morning)
            .with_preferred_position("cashier")
    };
    let pool = vec![senior("e70", 10.0), senior("e90", 60.0), senior("e80", 35.0)];
    let solution = plan_schedule(
        &[req(2, "08:00-16:00", "cashier", 2, Priority::High)],
        &pool,
        &SchedulingConstraints::default(),
        &PlanningPolicy::default(),
    );

    let booked: Vec<&str> = solution.schedule.iter().map(|s| s.employee_id.as_str()).collect();
    assert_eq!(booked, vec!["e90", "e80"]);
    assert_eq!(solution.shifts_for("e70").count(), 0, "the lowest score stays unbooked");
    assert!(solution.conflicts.is_empty());
}

#[test]
fn long_runs_of_days_warn() {
    let constraints = SchedulingConstraints {
        max_consecutive_days: 2,
        ..SchedulingConstraints::default()
    };
    let reqs: Vec<ShiftRequirement> = (2..=4)
        .map(|d| req(d, "08:00-16:00", "cashier", 1, Priority::Medium))
        .collect();
    let solution = plan_schedule(&reqs, &[all_week("e1", "cashier")], &constraints, &PlanningPolicy::default());

    assert_eq!(solution.schedule.len(), 3);
    assert_eq!(conflicts_of(ConflictType::ConsecutiveDays, &solution.conflicts), 1);
}

/// Approaching the budget records info, exceeding it records one warning.
/// Planning carries on either way.
#[test]
fn budget_is_tracked_but_not_enforced() {
    let constraints = SchedulingConstraints {
        max_weekly_labor_budget: 170.0,
        ..SchedulingConstraints::default()
    };
    let reqs: Vec<ShiftRequirement> = (2..=4)
        .map(|d| req(d, "08:00-16:00", "cashier", 1, Priority::Medium))
        .collect();
    let solution = plan_schedule(&reqs, &[all_week("e1", "cashier")], &constraints, &PlanningPolicy::default());

    assert_eq!(solution.schedule.len(), 3);
    let budget: Vec<Severity> = solution
        .conflicts
        .iter()
        .filter(|c| c.conflict_type == ConflictType::Budget)
        .map(|c| c.severity)
        .collect();
    assert_eq!(budget, vec![Severity::Info, Severity::Warning]);
    assert!(solution.success);
}

#[test]
fn no_employee_is_double_booked() {
    let reqs = vec![
        req(2, "08:00-16:00", "cashier", 2, Priority::High),
        req(2, "12:00-20:00", "cashier", 2, Priority::High),
    ];
    let pool = vec![all_week("e1", "cashier"), all_week("e2", "cashier"), all_week("e3", "cashier")];
    let solution = plan_schedule(&reqs, &pool, &SchedulingConstraints::default(), &PlanningPolicy::default());

    assert_eq!(solution.schedule.len(), 3);
    for employee in &pool {
        let count = solution.shifts_for(&employee.employee_id).count();
        assert!(count <= 1, "{} booked into overlapping slots", employee.employee_id);
    }
}

/// One over-long stretch is reported once, not on every further day.
#[test]
fn long_run_warns_once_per_stretch() {
    let constraints = SchedulingConstraints {
        max_consecutive_days: 2,
        ..SchedulingConstraints::default()
    };
    let reqs: Vec<ShiftRequirement> = (2..=6)
        .map(|d| req(d, "08:00-16:00", "cashier", 1, Priority::Medium))
        .collect();
    let solution = plan_schedule(&reqs, &[all_week("e1", "cashier")], &constraints, &PlanningPolicy::default());

    assert_eq!(solution.schedule.len(), 5);
    assert_eq!(conflicts_of(ConflictType::ConsecutiveDays, &solution.conflicts), 1);
}

/// A new stretch after a day off is reported on its own.
#[test]
fn separate_stretches_each_warn() {
    let constraints = SchedulingConstraints {
        max_consecutive_days: 2,
        max_hours_per_employee: 60.0,
        ..SchedulingConstraints::default()
    };
    let reqs: Vec<ShiftRequirement> = [2, 3, 4, 6, 7, 8]
        .into_iter()
        .map(|d| req(d, "08:00-16:00", "cashier", 1, Priority::Medium))
        .collect();
    let employee = all_week("e1", "cashier").with_max_hours(60.0);
    let solution = plan_schedule(&reqs, &[employee], &constraints, &PlanningPolicy::default());

    assert_eq!(solution.schedule.len(), 6);
    assert_eq!(conflicts_of(ConflictType::ConsecutiveDays, &solution.conflicts), 2);
}
