//! Conflict recorder.
//!
//! RULE: Planning never aborts on an unmet requirement or a breached soft
//! constraint. Issues are appended here and surfaced on the solution.

use crate::model::{ConflictType, SchedulingConflict, Severity, ShiftRequirement};
use crate::types::Hours;

#[derive(Debug, Default)]
pub struct ConflictLog {
    entries: Vec<SchedulingConflict>,
}

impl ConflictLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, conflict: SchedulingConflict) {
        log::debug!(
            "conflict recorded: {}/{} {}",
            conflict.severity.as_str(),
            conflict.conflict_type.as_str(),
            conflict.message
        );
        self.entries.push(conflict);
    }

    /// Nobody could legally take the shift.
    pub fn unmet_requirement(&mut self, requirement: &ShiftRequirement) {
        self.record(SchedulingConflict {
            conflict_type: ConflictType::Availability,
            severity: Severity::Critical,
            employee_id: None,
            message: format!("No available staff for {}", requirement.describe()),
            suggested_resolution:
                "Hire temporary staff, adjust availability, or reschedule the requirement".into(),
        });
    }

    pub fn partial_fill(&mut self, requirement: &ShiftRequirement, filled: usize) {
        self.record(SchedulingConflict {
            conflict_type: ConflictType::Availability,
            severity: Severity::Warning,
            employee_id: None,
            message: format!(
                "Only {filled} of {} staff assigned for {}",
                requirement.required_staff,
                requirement.describe()
            ),
            suggested_resolution: "Widen availability windows or cross-train staff for this position".into(),
        });
    }

    pub fn overtime(&mut self, employee_id: &str, hours: Hours, threshold: Hours) {
        self.record(SchedulingConflict {
            conflict_type: ConflictType::Overtime,
            severity: Severity::Warning,
            employee_id: Some(employee_id.to_string()),
            message: format!("Employee scheduled {hours:.1}h, above the {threshold:.1}h overtime threshold"),
            suggested_resolution: "Move part of these hours to staff with spare capacity".into(),
        });
    }

    pub fn short_rest(&mut self, employee_id: &str, gap: Hours, minimum: Hours) {
        self.record(SchedulingConflict {
            conflict_type: ConflictType::MinHours,
            severity: Severity::Warning,
            employee_id: Some(employee_id.to_string()),
            message: format!("Only {gap:.1}h between shifts, minimum is {minimum:.1}h"),
            suggested_resolution: "Swap one of the adjacent shifts with another employee".into(),
        });
    }

    pub fn consecutive_days(&mut self, employee_id: &str, run: u32, maximum: u32) {
        self.record(SchedulingConflict {
            conflict_type: ConflictType::ConsecutiveDays,
            severity: Severity::Warning,
            employee_id: Some(employee_id.to_string()),
            message: format!("Scheduled {run} consecutive days, maximum is {maximum}"),
            suggested_resolution: "Give this employee a day off inside the run".into(),
        });
    }

    pub fn budget(&mut self, severity: Severity, total_cost: f64, budget: f64) {
        let message = match severity {
            Severity::Info => format!("Labor cost {total_cost:.2} is approaching the budget of {budget:.2}"),
            _ => format!("Labor cost {total_cost:.2} exceeds the budget of {budget:.2}"),
        };
        self.record(SchedulingConflict {
            conflict_type: ConflictType::Budget,
            severity,
            employee_id: None,
            message,
            suggested_resolution: "Review low-priority requirements or favour lower-rate staff".into(),
        });
    }

    pub fn entries(&self) -> &[SchedulingConflict] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn critical_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|c| c.severity == Severity::Critical)
            .count()
    }

    pub fn has_critical(&self) -> bool {
        self.critical_count() > 0
    }

    pub fn into_vec(self) -> Vec<SchedulingConflict> {
        self.entries
    }
}
