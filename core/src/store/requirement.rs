//! Store methods for shift requirements.

use crate::{
    error::{PlanError, PlanResult},
    model::{Priority, ShiftRequirement},
    time::TimeRange,
};
use chrono::NaiveDate;
use rusqlite::params;

use super::PlanStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A `shift_requirement` row exactly as stored.
#[derive(Debug, Clone)]
pub struct RequirementRow {
    pub id:                i64,
    pub date:              String,
    pub time_slot:         String,
    pub position:          String,
    pub required_staff:    i64,
    pub priority:          String,
    pub expected_volume:   f64,
    pub complexity_factor: f64,
}

impl TryFrom<RequirementRow> for ShiftRequirement {
    type Error = PlanError;

    fn try_from(row: RequirementRow) -> PlanResult<Self> {
        let invalid = |reason: String| PlanError::InvalidRequirement {
            id: row.id.to_string(),
            reason,
        };

        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| invalid(format!("date '{}': {e}", row.date)))?;
        let time_slot: TimeRange = row
            .time_slot
            .parse()
            .map_err(|e: PlanError| invalid(e.to_string()))?;
        let required_staff = u32::try_from(row.required_staff)
            .map_err(|_| invalid(format!("required_staff {} is negative or too large", row.required_staff)))?;
        let priority: Priority = row.priority.parse().map_err(invalid)?;

        let requirement = ShiftRequirement {
            date,
            time_slot,
            position: row.position,
            required_staff,
            priority,
            expected_volume: row.expected_volume,
            complexity_factor: row.complexity_factor,
        };
        requirement.validate().map_err(invalid)?;
        Ok(requirement)
    }
}

impl PlanStore {
    pub fn insert_requirement(&self, requirement: &ShiftRequirement) -> PlanResult<i64> {
        self.conn.execute(
            "INSERT INTO shift_requirement
                (date, time_slot, position, required_staff, priority, expected_volume, complexity_factor)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                requirement.date.format(DATE_FORMAT).to_string(),
                requirement.time_slot.to_string(),
                requirement.position,
                i64::from(requirement.required_staff),
                requirement.priority.as_str(),
                requirement.expected_volume,
                requirement.complexity_factor,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a raw row without validation (import paths and tests).
    pub fn insert_requirement_row(&self, row: &RequirementRow) -> PlanResult<i64> {
        self.conn.execute(
            "INSERT INTO shift_requirement
                (date, time_slot, position, required_staff, priority, expected_volume, complexity_factor)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row.date,
                row.time_slot,
                row.position,
                row.required_staff,
                row.priority,
                row.expected_volume,
                row.complexity_factor,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Requirements dated within `[start, end]`, by date then insertion order.
    pub fn requirements_between(&self, start: NaiveDate, end: NaiveDate) -> PlanResult<Vec<ShiftRequirement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, time_slot, position, required_staff, priority,
                    expected_volume, complexity_factor
             FROM shift_requirement
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date ASC, id ASC",
        )?;
        let rows = stmt
            .query_map(
                params![
                    start.format(DATE_FORMAT).to_string(),
                    end.format(DATE_FORMAT).to_string()
                ],
                |row| {
                    Ok(RequirementRow {
                        id:                row.get(0)?,
                        date:              row.get(1)?,
                        time_slot:         row.get(2)?,
                        position:          row.get(3)?,
                        required_staff:    row.get(4)?,
                        priority:          row.get(5)?,
                        expected_volume:   row.get(6)?,
                        complexity_factor: row.get(7)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ShiftRequirement::try_from).collect()
    }

    pub fn requirement_count(&self) -> PlanResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM shift_requirement", [], |row| row.get(0))?;
        Ok(count)
    }
}
