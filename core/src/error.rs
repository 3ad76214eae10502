use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid time '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("Invalid shift requirement {id}: {reason}")]
    InvalidRequirement { id: String, reason: String },

    #[error("Invalid employee record '{employee_id}': {reason}")]
    InvalidEmployee { employee_id: String, reason: String },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanError {
    /// Malformed input that must fail fast instead of being coerced.
    /// Anything else is treated as data being unavailable.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            PlanError::InvalidTime { .. }
                | PlanError::InvalidRequirement { .. }
                | PlanError::InvalidEmployee { .. }
                | PlanError::InvalidDateRange { .. }
        )
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
