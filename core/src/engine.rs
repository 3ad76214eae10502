//! The scheduling engine: public entry point of the planner.
//!
//! EXECUTION ORDER (fixed):
//!   1. Load requirements and employees from the source, then validate
//!      every record. Unavailable data falls back to an empty list;
//!      malformed data fails fast, whichever source produced it.
//!   2. Planning pass (planner.rs), single-threaded.
//!   3. Metrics, then recommendations, over the finished schedule.
//!   4. Publish `schedule_generated` to the sink (failure is logged only).
//!
//! The engine holds no state between calls; every run starts from a fresh
//! ledger and conflict log.

use crate::{
    config::{PlanningPolicy, SchedulingConstraints},
    error::{PlanError, PlanResult},
    event::{EventSink, PlanEvent},
    metrics::SchedulingMetrics,
    model::{EmployeeAvailability, SchedulingSolution, ShiftRequirement},
    planner::plan_assignments,
    recommend::recommendations,
    types::RunId,
};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Collaborator that supplies planning inputs.
pub trait ScheduleSource {
    fn load_shift_requirements(&self, start: NaiveDate, end: NaiveDate) -> PlanResult<Vec<ShiftRequirement>>;
    fn load_employee_availability(&self) -> PlanResult<Vec<EmployeeAvailability>>;
}

impl<T: ScheduleSource + ?Sized> ScheduleSource for &T {
    fn load_shift_requirements(&self, start: NaiveDate, end: NaiveDate) -> PlanResult<Vec<ShiftRequirement>> {
        (**self).load_shift_requirements(start, end)
    }

    fn load_employee_availability(&self) -> PlanResult<Vec<EmployeeAvailability>> {
        (**self).load_employee_availability()
    }
}

/// Already-materialised inputs held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub requirements: Vec<ShiftRequirement>,
    pub employees:    Vec<EmployeeAvailability>,
}

impl StaticSource {
    pub fn new(requirements: Vec<ShiftRequirement>, employees: Vec<EmployeeAvailability>) -> Self {
        Self { requirements, employees }
    }
}

impl ScheduleSource for StaticSource {
    fn load_shift_requirements(&self, start: NaiveDate, end: NaiveDate) -> PlanResult<Vec<ShiftRequirement>> {
        Ok(self
            .requirements
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }

    fn load_employee_availability(&self) -> PlanResult<Vec<EmployeeAvailability>> {
        Ok(self.employees.clone())
    }
}

/// Plan, measure and advise over inputs already in memory. Infallible.
///
/// Inputs are trusted; run `validate_inputs` first when they did not come
/// through the engine.
pub fn plan_schedule(
    requirements: &[ShiftRequirement],
    employees:    &[EmployeeAvailability],
    constraints:  &SchedulingConstraints,
    policy:       &PlanningPolicy,
) -> SchedulingSolution {
    let outcome = plan_assignments(requirements, employees, constraints, policy);
    let conflicts = outcome.conflicts.into_vec();
    let metrics = SchedulingMetrics::calculate(&outcome.schedule, requirements, &conflicts, &policy.metrics);
    let recommendations = recommendations(&metrics, &conflicts, &policy.recommendations);
    let success = metrics.critical_conflicts == 0;

    SchedulingSolution {
        success,
        schedule: outcome.schedule,
        metrics,
        conflicts,
        recommendations,
    }
}

pub struct ScheduleEngine<S: ScheduleSource> {
    source: S,
    policy: PlanningPolicy,
}

impl<S: ScheduleSource> ScheduleEngine<S> {
    pub fn new(source: S, policy: PlanningPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &PlanningPolicy {
        &self.policy
    }

    /// Generate a schedule for `[start, end]` under a fresh run id.
    pub fn generate_optimal_schedule(
        &self,
        start:       NaiveDate,
        end:         NaiveDate,
        constraints: &SchedulingConstraints,
        sink:        &mut dyn EventSink,
    ) -> PlanResult<SchedulingSolution> {
        let run_id = format!("plan-{}", Uuid::new_v4());
        self.generate_for_run(&run_id, start, end, constraints, sink)
    }

    /// Like `generate_optimal_schedule`, with a caller-chosen run id.
    ///
    /// Errors only on contract violations: `start` after `end`, or a
    /// malformed requirement or employee record reported by the source.
    pub fn generate_for_run(
        &self,
        run_id:      &str,
        start:       NaiveDate,
        end:         NaiveDate,
        constraints: &SchedulingConstraints,
        sink:        &mut dyn EventSink,
    ) -> PlanResult<SchedulingSolution> {
        if start > end {
            return Err(PlanError::InvalidDateRange {
                start: start.to_string(),
                end:   end.to_string(),
            });
        }

        let requirements: Vec<ShiftRequirement> = load_or_fallback(
            "shift requirements",
            self.source.load_shift_requirements(start, end),
        )?
        .into_iter()
        .filter(|r| r.date >= start && r.date <= end)
        .collect();
        let employees = load_or_fallback(
            "employee availability",
            self.source.load_employee_availability(),
        )?;
        validate_inputs(&requirements, &employees)?;

        log::info!(
            "run={run_id} planning {start}..{end}: {} requirements, {} employees",
            requirements.len(),
            employees.len()
        );

        let solution = plan_schedule(&requirements, &employees, constraints, &self.policy);

        log::info!(
            "run={run_id} success={} shifts={} coverage={:.1}% cost={:.2} conflicts={}",
            solution.success,
            solution.schedule.len(),
            solution.metrics.coverage_rate,
            solution.metrics.total_cost,
            solution.conflicts.len()
        );

        let event = PlanEvent::ScheduleGenerated {
            run_id:       RunId::from(run_id),
            generated_at: Utc::now(),
            solution:     solution.clone(),
        };
        if let Err(e) = sink.publish(&event) {
            log::warn!("run={run_id} could not publish {}: {e}", event.type_name());
        }

        Ok(solution)
    }
}

/// Fail on the first requirement or employee with NaN or out-of-range values.
pub fn validate_inputs(
    requirements: &[ShiftRequirement],
    employees:    &[EmployeeAvailability],
) -> PlanResult<()> {
    for requirement in requirements {
        requirement
            .validate()
            .map_err(|reason| PlanError::InvalidRequirement {
                id: requirement.describe(),
                reason,
            })?;
    }
    for employee in employees {
        employee
            .validate()
            .map_err(|reason| PlanError::InvalidEmployee {
                employee_id: employee.employee_id.clone(),
                reason,
            })?;
    }
    Ok(())
}

fn load_or_fallback<T>(what: &str, loaded: PlanResult<Vec<T>>) -> PlanResult<Vec<T>> {
    match loaded {
        Ok(items) => Ok(items),
        Err(e) if e.is_contract_violation() => Err(e),
        Err(e) => {
            log::warn!("{what} unavailable, planning without them: {e}");
            Ok(Vec::new())
        }
    }
}
