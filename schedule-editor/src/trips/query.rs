//! Read-only trip lookups.

use crate::domain::Trip;
use crate::store::AgencyTransaction;

use super::error::TripError;

/// Filters for a trip lookup.
///
/// Agency scope comes from the explicit field or, when unset, the caller's
/// session. The remaining filters narrow the result: a trip id wins over
/// pattern filters, and a calendar filter only applies together with a
/// pattern.
#[derive(Debug, Clone, Default)]
pub struct TripQuery {
    pub agency_id: Option<String>,
    pub trip_id: Option<String>,
    pub pattern_id: Option<String>,
    pub calendar_id: Option<String>,
}

/// Result of a trip lookup: a single record or a filtered set.
#[derive(Debug, Clone)]
pub enum TripSelection {
    One(Trip),
    Many(Vec<Trip>),
}

/// Dispatch a lookup against an open transaction. Reads only.
///
/// - trip id set: that single trip, or [`TripError::NotFound`].
/// - pattern and calendar set: both must resolve (else not-found), then
///   every trip for that pattern restricted to that calendar.
/// - pattern set alone: every trip for that pattern.
/// - nothing set: every trip for the agency.
pub(crate) fn resolve(
    tx: &impl AgencyTransaction,
    query: &TripQuery,
) -> Result<TripSelection, TripError> {
    if let Some(trip_id) = &query.trip_id {
        return match tx.trip(trip_id) {
            Some(trip) => Ok(TripSelection::One(trip)),
            None => Err(TripError::NotFound),
        };
    }

    match (&query.pattern_id, &query.calendar_id) {
        (Some(pattern_id), Some(calendar_id)) => {
            if !tx.contains_pattern(pattern_id) || !tx.contains_calendar(calendar_id) {
                return Err(TripError::NotFound);
            }
            Ok(TripSelection::Many(
                tx.trips_by_pattern_and_calendar(pattern_id, calendar_id),
            ))
        }
        (Some(pattern_id), None) => Ok(TripSelection::Many(tx.trips_by_pattern(pattern_id))),
        _ => Ok(TripSelection::Many(tx.trips())),
    }
}
