//! Error types for trip mutation and lookup.

use crate::store::StoreError;

/// Caller-visible classification of a failed trip operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was missing, contradictory, or failed validation.
    InvalidRequest,
    /// A read path did not find the requested entity.
    NotFound,
}

/// Error from trip mutation or lookup.
///
/// Every variant except [`NotFound`](Self::NotFound) rejects the request as
/// invalid, and any transaction opened for the request has been rolled back
/// by the time the error is returned: no partial write survives.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TripError {
    /// Neither the request nor the session supplied an agency.
    #[error("no agency in request or session")]
    MissingAgency,

    /// The session is scoped to a different agency than the payload.
    #[error("session agency {session} does not match payload agency {payload}")]
    AgencyMismatch { session: String, payload: String },

    /// The payload references an agency the store does not know.
    #[error("unknown agency: {0}")]
    UnknownAgency(String),

    /// A trip with this id already exists (create only).
    #[error("trip {0} already exists")]
    DuplicateTrip(String),

    /// No trip with this id exists (update only).
    #[error("trip {0} does not exist")]
    UnknownTrip(String),

    /// The request carried no trip id.
    #[error("no trip id supplied")]
    MissingTripId,

    /// The trip's pattern reference does not resolve.
    #[error("pattern {0} does not exist")]
    MissingPattern(String),

    /// The trip's stop-time count differs from its pattern's stop count.
    #[error("trip has {supplied} stop times but its pattern has {pattern} stops")]
    StopCountMismatch { supplied: usize, pattern: usize },

    /// A present stop-time slot names a different stop than the pattern at
    /// the same position.
    #[error(
        "stop sequence diverges from pattern at position {position}: \
         pattern stop {pattern_stop}, trip stop {trip_stop}"
    )]
    StopSequenceMismatch {
        position: usize,
        pattern_stop: String,
        trip_stop: String,
    },

    /// Update requires both a start and an end time.
    #[error("trip has no start or end time")]
    MissingDuration,

    /// Update rejects trips whose start and end times are equal.
    #[error("trip start and end times are equal")]
    ZeroDuration,

    /// A cross-reference needed to backfill trip fields was missing.
    #[error("failed to populate trip data: {0}")]
    DataPopulation(String),

    /// Read-path lookup miss.
    #[error("not found")]
    NotFound,

    /// Fault from the backing store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TripError {
    /// Collapse to the two classes a caller can act on. Data-population
    /// and store faults report as invalid requests, not crashes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TripError::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::InvalidRequest,
        }
    }
}
