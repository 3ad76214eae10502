//! Candidate filter: hard eligibility rules for one requirement.
//!
//! An employee is a candidate only if ALL hold:
//!   1. position matches (own position or a preferred position)
//!   2. the requirement's weekday is an available day
//!   3. one of that weekday's windows contains the whole slot
//!   4. booked hours + slot hours stay within both weekly caps
//!   5. no booking in this run overlaps the slot
//!
//! Pure: reads the ledger, never writes it. An empty result is normal.

use crate::{
    config::SchedulingConstraints,
    ledger::AssignmentLedger,
    model::{EmployeeAvailability, ShiftRequirement},
    types::Hours,
};

/// Absorbs float drift from summing fractional-hour slots.
const HOUR_EPSILON: Hours = 1e-9;

/// Why an employee was rejected for a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    PositionMismatch,
    DayUnavailable,
    OutsideWindows,
    HourCapExceeded,
    AlreadyBooked,
}

pub fn check_eligibility(
    requirement: &ShiftRequirement,
    employee:    &EmployeeAvailability,
    ledger:      &AssignmentLedger,
    constraints: &SchedulingConstraints,
) -> Result<(), Ineligible> {
    let position_ok = employee.position == requirement.position
        || employee.preferred_positions.contains(&requirement.position);
    if !position_ok {
        return Err(Ineligible::PositionMismatch);
    }

    let weekday = requirement.weekday();
    if !employee.available_days.contains(&weekday) {
        return Err(Ineligible::DayUnavailable);
    }

    let slot = &requirement.time_slot;
    let within_window = employee
        .windows_on(weekday)
        .filter_map(|w| w.range())
        .any(|window| window.contains(slot));
    if !within_window {
        return Err(Ineligible::OutsideWindows);
    }

    let projected = ledger.hours_for(&employee.employee_id) + requirement.hours();
    if projected > employee.hour_cap(constraints) + HOUR_EPSILON {
        return Err(Ineligible::HourCapExceeded);
    }

    let start = slot.start_on(requirement.date);
    let end = slot.end_on(requirement.date);
    if ledger.is_booked_during(&employee.employee_id, start, end) {
        return Err(Ineligible::AlreadyBooked);
    }

    Ok(())
}

/// The employees legally eligible for `requirement`, in pool order.
pub fn eligible_candidates<'a>(
    requirement: &ShiftRequirement,
    pool:        &'a [EmployeeAvailability],
    ledger:      &AssignmentLedger,
    constraints: &SchedulingConstraints,
) -> Vec<&'a EmployeeAvailability> {
    pool.iter()
        .filter(|employee| match check_eligibility(requirement, employee, ledger, constraints) {
            Ok(()) => true,
            Err(reason) => {
                log::trace!(
                    "{} rejected for {}: {reason:?}",
                    employee.employee_id,
                    requirement.describe()
                );
                false
            }
        })
        .collect()
}
