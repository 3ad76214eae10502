//! Assignment planner: the greedy pass that drives the pipeline.
//!
//! ORDER (fixed, never parallelised across requirements):
//!   1. Requirements sorted by priority weight, descending, stable.
//!   2. For each: filter → score → rank → take the top `required_staff`.
//!   3. Each pick becomes a GeneratedShift and is booked in the ledger
//!      before the next requirement is filtered.
//!
//! No requirement is revisited. Unmet and soft-constraint issues go to the
//! conflict log; nothing here returns an error.

use crate::{
    config::{PlanningPolicy, SchedulingConstraints},
    conflict::ConflictLog,
    filter::eligible_candidates,
    ledger::{AssignmentLedger, Booking},
    model::{EmployeeAvailability, GeneratedShift, Severity, ShiftRequirement},
    scoring::{confidence_score, rank, score_candidates},
    time::{labor_cost, shift_hours},
};
use std::cmp::Reverse;

/// Raw planner output, before metrics and recommendations.
#[derive(Debug, Default)]
pub struct PlanOutcome {
    pub schedule:  Vec<GeneratedShift>,
    pub conflicts: ConflictLog,
}

/// Requirements in planning order: priority weight descending, input order on ties.
pub fn prioritized(requirements: &[ShiftRequirement]) -> Vec<&ShiftRequirement> {
    let mut ordered: Vec<&ShiftRequirement> = requirements.iter().collect();
    ordered.sort_by_key(|r| Reverse(r.priority.weight()));
    ordered
}

pub fn plan_assignments(
    requirements: &[ShiftRequirement],
    pool:         &[EmployeeAvailability],
    constraints:  &SchedulingConstraints,
    policy:       &PlanningPolicy,
) -> PlanOutcome {
    let mut pass = PlanningPass {
        constraints,
        policy,
        ledger: AssignmentLedger::new(),
        outcome: PlanOutcome::default(),
        budget_info_recorded: false,
        budget_breach_recorded: false,
    };

    for requirement in prioritized(requirements) {
        pass.plan_requirement(requirement, pool);
    }

    log::debug!(
        "planning pass done: {} shifts, {} conflicts, labor cost {:.2}",
        pass.outcome.schedule.len(),
        pass.outcome.conflicts.len(),
        pass.ledger.total_cost()
    );
    pass.outcome
}

/// State threaded through one planning run. Dropped when the run ends.
struct PlanningPass<'c> {
    constraints:            &'c SchedulingConstraints,
    policy:                 &'c PlanningPolicy,
    ledger:                 AssignmentLedger,
    outcome:                PlanOutcome,
    budget_info_recorded:   bool,
    budget_breach_recorded: bool,
}

impl PlanningPass<'_> {
    fn plan_requirement(&mut self, requirement: &ShiftRequirement, pool: &[EmployeeAvailability]) {
        if requirement.required_staff == 0 {
            log::debug!("skipping {}: no staff required", requirement.describe());
            return;
        }

        let candidates = eligible_candidates(requirement, pool, &self.ledger, self.constraints);
        if candidates.is_empty() {
            log::warn!("no eligible staff for {}", requirement.describe());
            self.outcome.conflicts.unmet_requirement(requirement);
            return;
        }

        let mut scored = score_candidates(&candidates, requirement, self.constraints, &self.policy.scoring);
        rank(&mut scored);

        let wanted = requirement.required_staff as usize;
        let take = wanted.min(scored.len());
        if take < wanted && self.policy.warn_on_partial_fill {
            self.outcome.conflicts.partial_fill(requirement, take);
        }

        for candidate in &scored[..take] {
            log::debug!(
                "assign {} to {} (score {:.1})",
                candidate.employee.employee_id,
                requirement.describe(),
                candidate.score
            );
            self.assign(candidate.employee, requirement);
        }
    }

    fn assign(&mut self, employee: &EmployeeAvailability, requirement: &ShiftRequirement) {
        let slot = &requirement.time_slot;
        let hours = shift_hours(slot);
        let cost = labor_cost(hours, employee.hourly_rate);
        let id = employee.employee_id.as_str();
        let start = slot.start_on(requirement.date);
        let end = slot.end_on(requirement.date);

        // Soft checks read the ledger as it was before this booking.
        if let Some(gap) = self.ledger.min_gap_hours(id, start, end) {
            if gap < self.constraints.min_hours_between_shifts {
                self.outcome
                    .conflicts
                    .short_rest(id, gap, self.constraints.min_hours_between_shifts);
            }
        }
        let hours_before = self.ledger.hours_for(id);
        let new_date = self.ledger.consecutive_days_through(id, requirement.date) == 0;
        let max_days = self.constraints.max_consecutive_days;
        // A stretch that was already too long has been reported once.
        let neighbour_over = [requirement.date.pred_opt(), requirement.date.succ_opt()]
            .into_iter()
            .flatten()
            .any(|d| self.ledger.consecutive_days_through(id, d) > max_days);

        self.ledger.record(
            id,
            Booking { date: requirement.date, start, end },
            hours,
            cost,
        );

        let threshold = self.constraints.overtime_threshold;
        let hours_after = hours_before + hours;
        if hours_before <= threshold && hours_after > threshold {
            self.outcome.conflicts.overtime(id, hours_after, threshold);
        }

        let run = self.ledger.consecutive_days_through(id, requirement.date);
        if new_date && !neighbour_over && run > max_days {
            self.outcome.conflicts.consecutive_days(id, run, max_days);
        }

        self.check_budget();

        self.outcome.schedule.push(GeneratedShift {
            employee_id: employee.employee_id.clone(),
            name: employee.name.clone(),
            position: requirement.position.clone(),
            date: requirement.date,
            start_time: slot.start,
            end_time: slot.end,
            hours,
            hourly_rate: employee.hourly_rate,
            estimated_cost: cost,
            confidence_score: confidence_score(
                employee,
                requirement,
                &self.policy.scoring,
                &self.policy.confidence,
            ),
        });
    }

    /// A non-positive budget means no budget was configured.
    fn check_budget(&mut self) {
        let budget = self.constraints.max_weekly_labor_budget;
        if budget <= 0.0 {
            return;
        }
        let total = self.ledger.total_cost();
        if total > budget {
            if !self.budget_breach_recorded {
                self.budget_breach_recorded = true;
                self.budget_info_recorded = true;
                log::warn!("labor cost {total:.2} exceeds budget {budget:.2}");
                self.outcome.conflicts.budget(Severity::Warning, total, budget);
            }
        } else if !self.budget_info_recorded && total >= budget * self.policy.budget_info_ratio {
            self.budget_info_recorded = true;
            self.outcome.conflicts.budget(Severity::Info, total, budget);
        }
    }
}
