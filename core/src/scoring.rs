//! Employee scorer: 0..100 suitability of a candidate for one requirement.
//!
//! score = w_perf * (0.5 * efficiency + 0.5 * reliability)
//!       + w_exp  * experience points
//!       + w_cost * (100 - rate, floored at 0) or neutral
//!       + slot bonus + position bonus            (unscaled)
//! clamped to [0, 100].
//!
//! Deterministic and side-effect free. Ranking uses a stable sort, so equal
//! scores keep candidate input order.

use crate::{
    config::{ConfidencePolicy, SchedulingConstraints, ScoringWeights, MAX_SCORE},
    model::{EmployeeAvailability, ExperienceLevel, ShiftRequirement},
};

#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub employee: &'a EmployeeAvailability,
    pub score:    f64,
}

pub fn experience_points(level: ExperienceLevel, weights: &ScoringWeights) -> f64 {
    match level {
        ExperienceLevel::Junior => weights.junior_points,
        ExperienceLevel::Mid    => weights.mid_points,
        ExperienceLevel::Senior => weights.senior_points,
    }
}

pub fn suitability_score(
    employee:    &EmployeeAvailability,
    requirement: &ShiftRequirement,
    constraints: &SchedulingConstraints,
    weights:     &ScoringWeights,
) -> f64 {
    let performance = 0.5 * employee.efficiency_score + 0.5 * employee.reliability_score;

    let experience = if constraints.prefer_experienced_staff {
        experience_points(employee.experience_level, weights)
    } else {
        weights.neutral_points
    };

    let cost = if constraints.minimize_labor_cost {
        (100.0 - employee.hourly_rate).max(0.0)
    } else {
        weights.neutral_points
    };

    let mut preference = 0.0;
    if employee.preferred_time_slots.contains(&requirement.day_part()) {
        preference += weights.preferred_slot_bonus;
    }
    if employee.preferred_positions.contains(&requirement.position) {
        preference += weights.preferred_position_bonus;
    }

    let score = weights.performance * performance
        + weights.experience * experience
        + weights.cost * cost
        + preference;
    score.clamp(0.0, MAX_SCORE)
}

/// Score every candidate, keeping input order.
pub fn score_candidates<'a>(
    candidates:  &[&'a EmployeeAvailability],
    requirement: &ShiftRequirement,
    constraints: &SchedulingConstraints,
    weights:     &ScoringWeights,
) -> Vec<ScoredCandidate<'a>> {
    candidates
        .iter()
        .map(|&employee| ScoredCandidate {
            employee,
            score: suitability_score(employee, requirement, constraints, weights),
        })
        .collect()
}

/// Sort by score, highest first. Stable: ties keep input order.
pub fn rank(scored: &mut [ScoredCandidate<'_>]) {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Per-shift confidence: rises with reliability and experience, falls as
/// the requirement's complexity grows. Clamped to [0, 100].
pub fn confidence_score(
    employee:    &EmployeeAvailability,
    requirement: &ShiftRequirement,
    weights:     &ScoringWeights,
    policy:      &ConfidencePolicy,
) -> f64 {
    let base = policy.reliability_weight * employee.reliability_score
        + policy.experience_weight * experience_points(employee.experience_level, weights);
    let penalty = policy.complexity_penalty * (requirement.complexity_factor - 1.0);
    (base - penalty).clamp(0.0, MAX_SCORE)
}
