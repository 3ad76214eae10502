//! Store methods for the published event log.

use crate::{error::PlanResult, event::PlanEvent};
use chrono::Utc;
use rusqlite::params;

use super::PlanStore;

/// One persisted event, payload as JSON.
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub id:         i64,
    pub run_id:     String,
    pub event_type: String,
    pub payload:    String,
}

impl PlanStore {
    pub fn append_event(&self, event: &PlanEvent) -> PlanResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, event_type, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                event.run_id(),
                event.type_name(),
                serde_json::to_string(event)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn events_for_run(&self, run_id: &str) -> PlanResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, event_type, payload
             FROM event_log WHERE run_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![run_id], |row| {
                Ok(EventLogEntry {
                    id:         row.get(0)?,
                    run_id:     row.get(1)?,
                    event_type: row.get(2)?,
                    payload:    row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
