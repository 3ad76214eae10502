//! Planning inputs and outputs.
//!
//! Inputs (`ShiftRequirement`, `EmployeeAvailability`) are immutable snapshots
//! for one run. Outputs (`GeneratedShift`, `SchedulingConflict`) are created
//! by the planner and never mutated afterward.

use crate::{
    config::SchedulingConstraints,
    metrics::SchedulingMetrics,
    time::{DayPart, TimeOfDay, TimeRange},
    types::{EmployeeId, Hours},
};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

// ── Requirements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort weight; higher is planned first.
    pub fn weight(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High     => 3,
            Self::Medium   => 2,
            Self::Low      => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High     => "high",
            Self::Medium   => "medium",
            Self::Low      => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high"     => Ok(Self::High),
            "medium"   => Ok(Self::Medium),
            "low"      => Ok(Self::Low),
            other      => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// Demand for `required_staff` workers of one position during one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRequirement {
    pub date:              NaiveDate,
    pub time_slot:         TimeRange,
    pub position:          String,
    pub required_staff:    u32,
    pub priority:          Priority,
    pub expected_volume:   f64,
    pub complexity_factor: f64,
}

impl ShiftRequirement {
    pub fn new(
        date: NaiveDate,
        time_slot: TimeRange,
        position: impl Into<String>,
        required_staff: u32,
        priority: Priority,
    ) -> Self {
        Self {
            date,
            time_slot,
            position: position.into(),
            required_staff,
            priority,
            expected_volume: 1.0,
            complexity_factor: 1.0,
        }
    }

    pub fn with_complexity(mut self, complexity_factor: f64) -> Self {
        self.complexity_factor = complexity_factor;
        self
    }

    pub fn weekday(&self) -> Weekday {
        crate::time::weekday_of(self.date)
    }

    pub fn day_part(&self) -> DayPart {
        self.time_slot.day_part()
    }

    pub fn hours(&self) -> Hours {
        crate::time::shift_hours(&self.time_slot)
    }

    /// Human-readable "position on date (slot)" used in conflict messages.
    pub fn describe(&self) -> String {
        format!("{} on {} ({})", self.position, self.date, self.time_slot)
    }

    /// Reject values the scorer cannot work with. `Err` holds the reason.
    pub fn validate(&self) -> Result<(), String> {
        if self.position.trim().is_empty() {
            return Err("empty position".into());
        }
        if !self.expected_volume.is_finite() || self.expected_volume < 0.0 {
            return Err(format!("expected_volume {}", self.expected_volume));
        }
        if !self.complexity_factor.is_finite() || self.complexity_factor <= 0.0 {
            return Err(format!("complexity_factor {}", self.complexity_factor));
        }
        Ok(())
    }
}

// ── Employees ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid    => "mid",
            Self::Senior => "senior",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(Self::Junior),
            "mid"    => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            other    => Err(format!("unknown experience level '{other}'")),
        }
    }
}

/// Half-open interval an employee can work on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub day_of_week: Weekday,
    pub start_time:  TimeOfDay,
    pub end_time:    TimeOfDay,
}

impl TimeWindow {
    pub fn new(day_of_week: Weekday, range: TimeRange) -> Self {
        Self {
            day_of_week,
            start_time: range.start,
            end_time: range.end,
        }
    }

    /// `None` for a zero-length window, which can contain nothing.
    pub fn range(&self) -> Option<TimeRange> {
        TimeRange::new(self.start_time, self.end_time).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAvailability {
    pub employee_id:            EmployeeId,
    pub name:                   String,
    pub position:               String,
    pub hourly_rate:            f64,
    #[serde(default)]
    pub skills:                 BTreeSet<String>,
    #[serde(default)]
    pub certifications:         BTreeSet<String>,
    #[serde(default)]
    pub available_days:         HashSet<Weekday>,
    #[serde(default)]
    pub available_time_windows: Vec<TimeWindow>,
    #[serde(default)]
    pub preferred_positions:    BTreeSet<String>,
    pub max_hours_per_week:     Hours,
    #[serde(default)]
    pub preferred_time_slots:   BTreeSet<DayPart>,
    pub efficiency_score:       f64,
    pub reliability_score:      f64,
    pub experience_level:       ExperienceLevel,
}

impl EmployeeAvailability {
    /// A mid-level employee with neutral scores and no availability yet.
    pub fn new(
        employee_id: impl Into<EmployeeId>,
        name: impl Into<String>,
        position: impl Into<String>,
        hourly_rate: f64,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            position: position.into(),
            hourly_rate,
            skills: BTreeSet::new(),
            certifications: BTreeSet::new(),
            available_days: HashSet::new(),
            available_time_windows: Vec::new(),
            preferred_positions: BTreeSet::new(),
            max_hours_per_week: 40.0,
            preferred_time_slots: BTreeSet::new(),
            efficiency_score: 50.0,
            reliability_score: 50.0,
            experience_level: ExperienceLevel::Mid,
        }
    }

    /// Add a working window; the weekday becomes available too.
    pub fn with_window(mut self, day: Weekday, range: TimeRange) -> Self {
        self.available_days.insert(day);
        self.available_time_windows.push(TimeWindow::new(day, range));
        self
    }

    pub fn with_scores(mut self, efficiency: f64, reliability: f64) -> Self {
        self.efficiency_score = efficiency;
        self.reliability_score = reliability;
        self
    }

    pub fn with_experience(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = level;
        self
    }

    pub fn with_max_hours(mut self, hours: Hours) -> Self {
        self.max_hours_per_week = hours;
        self
    }

    pub fn with_preferred_position(mut self, position: impl Into<String>) -> Self {
        self.preferred_positions.insert(position.into());
        self
    }

    pub fn with_preferred_slot(mut self, part: DayPart) -> Self {
        self.preferred_time_slots.insert(part);
        self
    }

    pub fn windows_on(&self, day: Weekday) -> impl Iterator<Item = &TimeWindow> {
        self.available_time_windows
            .iter()
            .filter(move |w| w.day_of_week == day)
    }

    /// Reject rates, caps and scores that would leak NaN or out-of-range
    /// values into scoring. `Err` holds the reason.
    pub fn validate(&self) -> Result<(), String> {
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(format!("hourly_rate {}", self.hourly_rate));
        }
        if !self.max_hours_per_week.is_finite() || self.max_hours_per_week < 0.0 {
            return Err(format!("max_hours_per_week {}", self.max_hours_per_week));
        }
        for (label, score) in [
            ("efficiency_score", self.efficiency_score),
            ("reliability_score", self.reliability_score),
        ] {
            if !score.is_finite() || !(0.0..=100.0).contains(&score) {
                return Err(format!("{label} {score} outside [0, 100]"));
            }
        }
        Ok(())
    }

    /// The tighter of the personal weekly cap and the run-wide cap.
    pub fn hour_cap(&self, constraints: &SchedulingConstraints) -> Hours {
        self.max_hours_per_week.min(constraints.max_hours_per_employee)
    }
}

// ── Outputs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedShift {
    pub employee_id:      EmployeeId,
    pub name:             String,
    pub position:         String,
    pub date:             NaiveDate,
    pub start_time:       TimeOfDay,
    pub end_time:         TimeOfDay,
    pub hours:            Hours,
    pub hourly_rate:      f64,
    pub estimated_cost:   f64,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    Availability,
    Overtime,
    ConsecutiveDays,
    MinHours,
    Budget,
}

impl ConflictType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Availability    => "availability",
            Self::Overtime        => "overtime",
            Self::ConsecutiveDays => "consecutive_days",
            Self::MinHours        => "min_hours",
            Self::Budget          => "budget",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning  => "warning",
            Self::Info     => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConflict {
    #[serde(rename = "type")]
    pub conflict_type:        ConflictType,
    pub severity:             Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id:          Option<EmployeeId>,
    pub message:              String,
    pub suggested_resolution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingSolution {
    pub success:         bool,
    pub schedule:        Vec<GeneratedShift>,
    pub metrics:         SchedulingMetrics,
    pub conflicts:       Vec<SchedulingConflict>,
    pub recommendations: Vec<String>,
}

impl SchedulingSolution {
    pub fn shifts_for<'a>(&'a self, employee_id: &'a str) -> impl Iterator<Item = &'a GeneratedShift> {
        self.schedule.iter().filter(move |s| s.employee_id == employee_id)
    }

    pub fn critical_conflicts(&self) -> usize {
        self.conflicts
            .iter()
            .filter(|c| c.severity == Severity::Critical)
            .count()
    }
}
