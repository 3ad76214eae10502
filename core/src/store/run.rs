//! Store methods for planning runs and their results.

use crate::{
    error::{PlanError, PlanResult},
    model::{GeneratedShift, SchedulingSolution},
};
use chrono::NaiveDate;
use rusqlite::params;

use super::PlanStore;

impl PlanStore {
    /// Persist a finished run: header, shifts and conflicts, in one transaction.
    pub fn save_solution(
        &self,
        run_id:   &str,
        start:    NaiveDate,
        end:      NaiveDate,
        solution: &SchedulingSolution,
    ) -> PlanResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO planning_run (run_id, start_date, end_date, success, metrics)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                run_id,
                start.to_string(),
                end.to_string(),
                solution.success as i64,
                serde_json::to_string(&solution.metrics)?,
            ],
        )?;

        for (seq, shift) in solution.schedule.iter().enumerate() {
            tx.execute(
                "INSERT INTO generated_shift
                    (run_id, seq, employee_id, name, position, date, start_time, end_time,
                     hours, hourly_rate, estimated_cost, confidence_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    run_id,
                    seq as i64,
                    shift.employee_id,
                    shift.name,
                    shift.position,
                    shift.date.to_string(),
                    shift.start_time.to_string(),
                    shift.end_time.to_string(),
                    shift.hours,
                    shift.hourly_rate,
                    shift.estimated_cost,
                    shift.confidence_score,
                ],
            )?;
        }

        for (seq, conflict) in solution.conflicts.iter().enumerate() {
            tx.execute(
                "INSERT INTO scheduling_conflict
                    (run_id, seq, conflict_type, severity, employee_id, message, suggested_resolution)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    run_id,
                    seq as i64,
                    conflict.conflict_type.as_str(),
                    conflict.severity.as_str(),
                    conflict.employee_id,
                    conflict.message,
                    conflict.suggested_resolution,
                ],
            )?;
        }

        tx.commit()?;
        log::debug!(
            "run={run_id} saved {} shifts, {} conflicts",
            solution.schedule.len(),
            solution.conflicts.len()
        );
        Ok(())
    }

    /// Shifts of a saved run, in planning order.
    pub fn shifts_for_run(&self, run_id: &str) -> PlanResult<Vec<GeneratedShift>> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, name, position, date, start_time, end_time,
                    hours, hourly_rate, estimated_cost, confidence_score
             FROM generated_shift WHERE run_id = ?1
             ORDER BY seq ASC",
        )?;
        let raw = stmt
            .query_map(params![run_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, f64>(6)?,
                    row.get::<_, f64>(7)?,
                    row.get::<_, f64>(8)?,
                    row.get::<_, f64>(9)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(employee_id, name, position, date, start, end, hours, rate, cost, confidence)| {
                let date = date.parse::<NaiveDate>().map_err(|e| PlanError::InvalidTime {
                    value:  date.clone(),
                    reason: e.to_string(),
                })?;
                Ok(GeneratedShift {
                    employee_id,
                    name,
                    position,
                    date,
                    start_time: start.parse()?,
                    end_time: end.parse()?,
                    hours,
                    hourly_rate: rate,
                    estimated_cost: cost,
                    confidence_score: confidence,
                })
            })
            .collect()
    }

    pub fn conflict_count(&self, run_id: &str) -> PlanResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM scheduling_conflict WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn run_succeeded(&self, run_id: &str) -> PlanResult<Option<bool>> {
        use rusqlite::OptionalExtension;
        let success: Option<i64> = self
            .conn
            .query_row(
                "SELECT success FROM planning_run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(success.map(|s| s != 0))
    }
}
