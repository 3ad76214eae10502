//! Per-run assignment ledger.
//!
//! RULE: Only the planner mutates the ledger, one requirement at a time.
//! Later requirements' eligibility depends on what earlier ones booked,
//! so the update order is part of the result.

use crate::types::{EmployeeId, Hours};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, HashMap};

/// One booked interval for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    pub date:  NaiveDate,
    pub start: NaiveDateTime,
    pub end:   NaiveDateTime,
}

impl Booking {
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }
}

#[derive(Debug, Default)]
pub struct AssignmentLedger {
    hours:      HashMap<EmployeeId, Hours>,
    bookings:   HashMap<EmployeeId, Vec<Booking>>,
    total_cost: f64,
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hours booked so far for `employee_id` (0 when untouched).
    pub fn hours_for(&self, employee_id: &str) -> Hours {
        self.hours.get(employee_id).copied().unwrap_or(0.0)
    }

    pub fn bookings_for(&self, employee_id: &str) -> &[Booking] {
        self.bookings
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_booked_during(&self, employee_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.bookings_for(employee_id)
            .iter()
            .any(|b| b.overlaps(start, end))
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn record(&mut self, employee_id: &str, booking: Booking, hours: Hours, cost: f64) {
        *self.hours.entry(employee_id.to_string()).or_insert(0.0) += hours;
        self.bookings
            .entry(employee_id.to_string())
            .or_default()
            .push(booking);
        self.total_cost += cost;
    }

    /// Smallest rest gap, in hours, between `[start, end)` and any existing
    /// non-overlapping booking. `None` when nothing else is booked.
    pub fn min_gap_hours(&self, employee_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Option<Hours> {
        self.bookings_for(employee_id)
            .iter()
            .filter(|b| !b.overlaps(start, end))
            .map(|b| {
                let gap = if b.end <= start { start - b.end } else { b.start - end };
                gap.num_minutes() as f64 / 60.0
            })
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Length of the run of consecutive booked dates that includes `date`.
    pub fn consecutive_days_through(&self, employee_id: &str, date: NaiveDate) -> u32 {
        let dates: BTreeSet<NaiveDate> = self
            .bookings_for(employee_id)
            .iter()
            .map(|b| b.date)
            .collect();
        if !dates.contains(&date) {
            return 0;
        }
        let mut run = 1;
        let mut cursor = date;
        while let Some(prev) = cursor.checked_sub_signed(Duration::days(1)) {
            if !dates.contains(&prev) {
                break;
            }
            run += 1;
            cursor = prev;
        }
        cursor = date;
        while let Some(next) = cursor.checked_add_signed(Duration::days(1)) {
            if !dates.contains(&next) {
                break;
            }
            run += 1;
            cursor = next;
        }
        run
    }
}
