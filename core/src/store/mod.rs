//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Rows are read into raw structs and validated on the way out; a malformed
//! row fails the load instead of reaching the planner.

use crate::{
    engine::ScheduleSource,
    error::PlanResult,
    event::{EventSink, PlanEvent},
    model::{EmployeeAvailability, ShiftRequirement},
};
use chrono::NaiveDate;
use rusqlite::Connection;

mod employee;
mod event_log;
mod requirement;
mod run;

pub use employee::{EmployeeRow, WindowRow};
pub use event_log::EventLogEntry;
pub use requirement::RequirementRow;

pub struct PlanStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl PlanStore {
    pub fn open(path: &str) -> PlanResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PlanResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    pub fn reopen(&self) -> PlanResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PlanResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }
}

impl ScheduleSource for PlanStore {
    fn load_shift_requirements(&self, start: NaiveDate, end: NaiveDate) -> PlanResult<Vec<ShiftRequirement>> {
        self.requirements_between(start, end)
    }

    fn load_employee_availability(&self) -> PlanResult<Vec<EmployeeAvailability>> {
        self.active_employees()
    }
}

impl EventSink for PlanStore {
    fn publish(&mut self, event: &PlanEvent) -> PlanResult<()> {
        self.append_event(event)
    }
}
