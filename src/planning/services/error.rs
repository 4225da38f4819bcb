//! Service-level errors for planning runs.

use crate::planning::{
    domain::ConstraintViolation,
    ports::{OracleError, StoreError},
};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A project.
    Project,
    /// A feature.
    Feature,
    /// An epic.
    Epic,
    /// A task.
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Project => "project",
            Self::Feature => "feature",
            Self::Epic => "epic",
            Self::Task => "task",
        };
        formatter.write_str(label)
    }
}

/// Coarse classification of a [`PlanningError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningErrorKind {
    /// A referenced record is absent.
    NotFound,
    /// The oracle returned output that cannot be read.
    MalformedOracleResponse,
    /// Planning data violates an invariant.
    ConstraintViolation,
    /// A collaborator failed or timed out.
    Unavailable,
}

/// Errors that abort a planning run.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// A referenced record is absent from the store.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of the missing record.
        entity: EntityKind,
        /// Identifier that was looked up.
        id: String,
    },

    /// The oracle output is missing fields or cannot be parsed.
    #[error("malformed oracle response: {reason}")]
    MalformedOracleResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// Planning data violates an invariant.
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    /// A collaborator call exceeded its time bound.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// The bounded operation.
        operation: &'static str,
        /// The bound that elapsed.
        after: Duration,
    },

    /// The oracle could not be reached.
    #[error(transparent)]
    OracleUnavailable(OracleError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PlanningError {
    /// Builds a not-found error.
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Builds a malformed-response error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedOracleResponse {
            reason: reason.into(),
        }
    }

    /// Returns the taxonomy kind of this error.
    #[must_use]
    pub const fn kind(&self) -> PlanningErrorKind {
        match self {
            Self::NotFound { .. } => PlanningErrorKind::NotFound,
            Self::MalformedOracleResponse { .. } => PlanningErrorKind::MalformedOracleResponse,
            Self::Constraint(_) => PlanningErrorKind::ConstraintViolation,
            Self::Timeout { .. } | Self::OracleUnavailable(_) | Self::Store(_) => {
                PlanningErrorKind::Unavailable
            }
        }
    }
}

impl From<OracleError> for PlanningError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::Malformed(reason) => Self::MalformedOracleResponse { reason },
            unavailable @ OracleError::Unavailable(_) => Self::OracleUnavailable(unavailable),
        }
    }
}

/// Result type for planning services.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Awaits `future` for at most `after`, mapping elapse to
/// [`PlanningError::Timeout`].
pub(crate) async fn bounded<T, E>(
    operation: &'static str,
    after: Duration,
    future: impl Future<Output = Result<T, E>>,
) -> PlanningResult<T>
where
    PlanningError: From<E>,
{
    tokio::time::timeout(after, future)
        .await
        .map_err(|_elapsed| PlanningError::Timeout { operation, after })?
        .map_err(PlanningError::from)
}
