//! The event bus: completion notifications.
//!
//! RULE: Publishing is a side effect of a finished run. A sink failure is
//! logged by the engine and never changes the solution it returns.

use crate::{
    error::PlanResult,
    model::SchedulingSolution,
    types::RunId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every event the planner publishes.
/// Variants are only appended; never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanEvent {
    ScheduleGenerated {
        run_id:       RunId,
        generated_at: DateTime<Utc>,
        solution:     SchedulingSolution,
    },
}

impl PlanEvent {
    /// Stable name, used for the event_type column in event_log.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlanEvent::ScheduleGenerated { .. } => "schedule_generated",
        }
    }

    pub fn run_id(&self) -> &str {
        match self {
            PlanEvent::ScheduleGenerated { run_id, .. } => run_id,
        }
    }
}

/// Anything that accepts published events.
pub trait EventSink {
    fn publish(&mut self, event: &PlanEvent) -> PlanResult<()>;
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: &PlanEvent) -> PlanResult<()> {
        Ok(())
    }
}

/// Keeps events in memory (tests and tooling).
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<PlanEvent>,
}

impl EventSink for MemorySink {
    fn publish(&mut self, event: &PlanEvent) -> PlanResult<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
