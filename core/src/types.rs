//! Shared primitive types used across the planner.

/// Stable identifier of an employee record.
pub type EmployeeId = String;

/// The canonical planning run identifier.
pub type RunId = String;

/// Working time, in hours.
pub type Hours = f64;
