//! Trip normalization: derives the fields a caller may omit.

use tracing::error;

use crate::domain::{Trip, TripDirection, WheelchairBoarding};
use crate::store::AgencyTransaction;

use super::error::TripError;

/// Overwrite a frequency-based trip's stop times with the sequence cast
/// from its pattern.
///
/// Caller-supplied stop times are discarded: frequency-based trips are not
/// authored stop by stop, they restate the pattern. Timetabled trips keep
/// whatever the caller supplied. Fails if the trip claims a frequency but
/// its pattern does not resolve.
pub(crate) fn expand_frequency_stop_times(
    tx: &impl AgencyTransaction,
    trip: &mut Trip,
) -> Result<(), TripError> {
    if !trip.use_frequency {
        return Ok(());
    }

    let pattern = tx
        .pattern(&trip.pattern_id)
        .ok_or_else(|| TripError::MissingPattern(trip.pattern_id.clone()))?;
    trip.stop_times = pattern.stop_times();
    Ok(())
}

/// Fill the fields a caller may omit, in a fixed order: frequency
/// expansion, GTFS id, pattern-derived backfill, then plain defaults.
///
/// The backfill step is skipped entirely when the pattern reference does
/// not resolve; create-path validation rejects such trips afterwards. A
/// pattern that resolves but references a missing route is a
/// data-population failure and aborts the whole creation.
pub(crate) fn normalize(tx: &impl AgencyTransaction, trip: &mut Trip) -> Result<(), TripError> {
    expand_frequency_stop_times(tx, trip)?;

    if trip.gtfs_trip_id.is_none() {
        trip.gtfs_trip_id = Some(format!("TRIP_{}", trip.id));
    }

    if let Some(pattern) = tx.pattern(&trip.pattern_id) {
        let route = tx.route(&pattern.route_id).ok_or_else(|| {
            error!(
                pattern = %pattern.id,
                route = %pattern.route_id,
                "failed to populate trip data: pattern references a missing route"
            );
            TripError::DataPopulation(format!(
                "pattern {} references missing route {}",
                pattern.id, pattern.route_id
            ))
        })?;
        trip.route_id = Some(route.id.clone());
        trip.trip_short_name = route.route_short_name.clone();
        trip.trip_headsign = pattern.headsign.clone();
    }

    if trip.trip_direction.is_none() {
        trip.trip_direction = Some(TripDirection::A);
    }
    if trip.block_id.is_none() {
        trip.block_id = Some(String::new());
    }
    if trip.wheelchair_boarding.is_none() {
        trip.wheelchair_boarding = Some(WheelchairBoarding::Unknown);
    }
    if trip.invalid.is_none() {
        trip.invalid = Some(false);
    }

    Ok(())
}
