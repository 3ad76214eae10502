//! Store methods for employees and their availability windows.

use crate::{
    error::{PlanError, PlanResult},
    model::{EmployeeAvailability, ExperienceLevel, TimeWindow},
    time::{parse_weekday, DayPart, TimeOfDay, TimeRange},
};
use chrono::Weekday;
use rusqlite::params;
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashSet};

use super::PlanStore;

/// Updates in place on a known id, so rowid (pool order) and `active` survive a re-save.
const UPSERT_EMPLOYEE: &str = "INSERT INTO employee
        (employee_id, name, position, hourly_rate, skills, certifications,
         available_days, preferred_positions, preferred_time_slots,
         max_hours_per_week, efficiency_score, reliability_score, experience_level)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
     ON CONFLICT(employee_id) DO UPDATE SET
        name                 = excluded.name,
        position             = excluded.position,
        hourly_rate          = excluded.hourly_rate,
        skills               = excluded.skills,
        certifications       = excluded.certifications,
        available_days       = excluded.available_days,
        preferred_positions  = excluded.preferred_positions,
        preferred_time_slots = excluded.preferred_time_slots,
        max_hours_per_week   = excluded.max_hours_per_week,
        efficiency_score     = excluded.efficiency_score,
        reliability_score    = excluded.reliability_score,
        experience_level     = excluded.experience_level";

/// An `employee` row exactly as stored. Set columns hold JSON arrays.
#[derive(Debug, Clone)]
pub struct EmployeeRow {
    pub employee_id:          String,
    pub name:                 String,
    pub position:             String,
    pub hourly_rate:          f64,
    pub skills:               String,
    pub certifications:       String,
    pub available_days:       String,
    pub preferred_positions:  String,
    pub preferred_time_slots: String,
    pub max_hours_per_week:   f64,
    pub efficiency_score:     f64,
    pub reliability_score:    f64,
    pub experience_level:     String,
}

/// An `availability_window` row exactly as stored.
#[derive(Debug, Clone)]
pub struct WindowRow {
    pub day_of_week: String,
    pub start_time:  String,
    pub end_time:    String,
}

impl EmployeeRow {
    /// Validate the row and its windows into an employee snapshot.
    pub fn into_employee(self, windows: Vec<WindowRow>) -> PlanResult<EmployeeAvailability> {
        let id = self.employee_id.clone();
        let invalid = |reason: String| PlanError::InvalidEmployee {
            employee_id: id.clone(),
            reason,
        };

        let experience_level: ExperienceLevel = self.experience_level.parse().map_err(invalid)?;

        let day_names: Vec<String> = json_column("available_days", &self.available_days).map_err(invalid)?;
        let available_days = day_names
            .iter()
            .map(|d| parse_weekday(d))
            .collect::<PlanResult<HashSet<Weekday>>>()
            .map_err(|e| invalid(e.to_string()))?;

        let available_time_windows = windows
            .into_iter()
            .map(|w| {
                let day = parse_weekday(&w.day_of_week)?;
                let start: TimeOfDay = w.start_time.parse()?;
                let end: TimeOfDay = w.end_time.parse()?;
                Ok(TimeWindow::new(day, TimeRange::new(start, end)?))
            })
            .collect::<PlanResult<Vec<_>>>()
            .map_err(|e| invalid(e.to_string()))?;

        let employee = EmployeeAvailability {
            skills: json_column("skills", &self.skills).map_err(invalid)?,
            certifications: json_column("certifications", &self.certifications).map_err(invalid)?,
            preferred_positions: json_column("preferred_positions", &self.preferred_positions)
                .map_err(invalid)?,
            preferred_time_slots: json_column::<BTreeSet<DayPart>>(
                "preferred_time_slots",
                &self.preferred_time_slots,
            )
            .map_err(invalid)?,
            available_days,
            available_time_windows,
            employee_id: self.employee_id,
            name: self.name,
            position: self.position,
            hourly_rate: self.hourly_rate,
            max_hours_per_week: self.max_hours_per_week,
            efficiency_score: self.efficiency_score,
            reliability_score: self.reliability_score,
            experience_level,
        };
        employee.validate().map_err(invalid)?;
        Ok(employee)
    }
}

fn json_column<T: DeserializeOwned>(column: &str, raw: &str) -> Result<T, String> {
    serde_json::from_str(raw).map_err(|e| format!("{column}: {e}"))
}

fn sorted_days(days: &HashSet<Weekday>) -> Vec<String> {
    let mut days: Vec<Weekday> = days.iter().copied().collect();
    days.sort_by_key(|d| d.num_days_from_monday());
    days.iter().map(|d| d.to_string()).collect()
}

impl PlanStore {
    /// Insert or update an employee and replace all of its windows.
    pub fn insert_employee(&self, employee: &EmployeeAvailability) -> PlanResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            UPSERT_EMPLOYEE,
            params![
                employee.employee_id,
                employee.name,
                employee.position,
                employee.hourly_rate,
                serde_json::to_string(&employee.skills)?,
                serde_json::to_string(&employee.certifications)?,
                serde_json::to_string(&sorted_days(&employee.available_days))?,
                serde_json::to_string(&employee.preferred_positions)?,
                serde_json::to_string(&employee.preferred_time_slots)?,
                employee.max_hours_per_week,
                employee.efficiency_score,
                employee.reliability_score,
                employee.experience_level.as_str(),
            ],
        )?;
        tx.execute(
            "DELETE FROM availability_window WHERE employee_id = ?1",
            params![employee.employee_id],
        )?;
        for window in &employee.available_time_windows {
            tx.execute(
                "INSERT INTO availability_window (employee_id, day_of_week, start_time, end_time)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    employee.employee_id,
                    window.day_of_week.to_string(),
                    window.start_time.to_string(),
                    window.end_time.to_string(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert a raw employee row without validation (import paths and tests).
    pub fn insert_employee_row(&self, row: &EmployeeRow, windows: &[WindowRow]) -> PlanResult<()> {
        self.conn.execute(
            UPSERT_EMPLOYEE,
            params![
                row.employee_id,
                row.name,
                row.position,
                row.hourly_rate,
                row.skills,
                row.certifications,
                row.available_days,
                row.preferred_positions,
                row.preferred_time_slots,
                row.max_hours_per_week,
                row.efficiency_score,
                row.reliability_score,
                row.experience_level,
            ],
        )?;
        for window in windows {
            self.conn.execute(
                "INSERT INTO availability_window (employee_id, day_of_week, start_time, end_time)
                 VALUES (?1, ?2, ?3, ?4)",
                params![row.employee_id, window.day_of_week, window.start_time, window.end_time],
            )?;
        }
        Ok(())
    }

    pub fn set_employee_active(&self, employee_id: &str, active: bool) -> PlanResult<()> {
        self.conn.execute(
            "UPDATE employee SET active = ?2 WHERE employee_id = ?1",
            params![employee_id, active as i64],
        )?;
        Ok(())
    }

    /// Active employees in insertion order, validated.
    pub fn active_employees(&self) -> PlanResult<Vec<EmployeeAvailability>> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, name, position, hourly_rate, skills, certifications,
                    available_days, preferred_positions, preferred_time_slots,
                    max_hours_per_week, efficiency_score, reliability_score, experience_level
             FROM employee WHERE active = 1
             ORDER BY rowid ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EmployeeRow {
                    employee_id:          row.get(0)?,
                    name:                 row.get(1)?,
                    position:             row.get(2)?,
                    hourly_rate:          row.get(3)?,
                    skills:               row.get(4)?,
                    certifications:       row.get(5)?,
                    available_days:       row.get(6)?,
                    preferred_positions:  row.get(7)?,
                    preferred_time_slots: row.get(8)?,
                    max_hours_per_week:   row.get(9)?,
                    efficiency_score:     row.get(10)?,
                    reliability_score:    row.get(11)?,
                    experience_level:     row.get(12)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| {
                let windows = self.windows_for(&row.employee_id)?;
                row.into_employee(windows)
            })
            .collect()
    }

    fn windows_for(&self, employee_id: &str) -> PlanResult<Vec<WindowRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT day_of_week, start_time, end_time
             FROM availability_window WHERE employee_id = ?1
             ORDER BY id ASC",
        )?;
        let windows = stmt
            .query_map(params![employee_id], |row| {
                Ok(WindowRow {
                    day_of_week: row.get(0)?,
                    start_time:  row.get(1)?,
                    end_time:    row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(windows)
    }

    pub fn employee_count(&self) -> PlanResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employee WHERE active = 1", [], |row| row.get(0))?;
        Ok(count)
    }
}
