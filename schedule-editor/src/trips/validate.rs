//! Structural validation of a trip against its parent pattern.

use tracing::error;

use crate::domain::Trip;
use crate::store::AgencyTransaction;

use super::error::TripError;

/// Create-path validation: the pattern must exist and the trip must carry
/// exactly one stop-time slot per pattern stop.
pub(crate) fn validate_for_create(
    tx: &impl AgencyTransaction,
    trip: &Trip,
) -> Result<(), TripError> {
    let pattern = tx
        .pattern(&trip.pattern_id)
        .ok_or_else(|| TripError::MissingPattern(trip.pattern_id.clone()))?;

    if trip.stop_times.len() != pattern.pattern_stops.len() {
        return Err(TripError::StopCountMismatch {
            supplied: trip.stop_times.len(),
            pattern: pattern.pattern_stops.len(),
        });
    }

    Ok(())
}

/// Update-path validation: the create checks, plus a non-zero duration and
/// positional stop matching.
///
/// Each present stop-time slot must name the pattern stop at the same
/// position; `None` slots are intentionally skipped stops and are not
/// compared. The first divergence aborts validation.
pub(crate) fn validate_for_update(
    tx: &impl AgencyTransaction,
    trip: &Trip,
) -> Result<(), TripError> {
    let pattern = tx
        .pattern(&trip.pattern_id)
        .ok_or_else(|| TripError::MissingPattern(trip.pattern_id.clone()))?;

    if trip.stop_times.len() != pattern.pattern_stops.len() {
        return Err(TripError::StopCountMismatch {
            supplied: trip.stop_times.len(),
            pattern: pattern.pattern_stops.len(),
        });
    }

    let (Some(start), Some(end)) = (trip.start_time, trip.end_time) else {
        return Err(TripError::MissingDuration);
    };
    if start == end {
        return Err(TripError::ZeroDuration);
    }

    for (position, (slot, pattern_stop)) in trip
        .stop_times
        .iter()
        .zip(&pattern.pattern_stops)
        .enumerate()
    {
        let Some(stop_time) = slot else {
            // Skipped stop.
            continue;
        };
        if stop_time.stop_id != pattern_stop.stop_id {
            error!(
                position,
                pattern_stop = %pattern_stop.stop_id,
                trip_stop = %stop_time.stop_id,
                "stop sequence in trip does not match pattern"
            );
            return Err(TripError::StopSequenceMismatch {
                position,
                pattern_stop: pattern_stop.stop_id.clone(),
                trip_stop: stop_time.stop_id.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleTime, StopTime, TripPattern, TripPatternStop};
    use crate::store::{AgencyStore, InMemoryStore};

    fn store_with_pattern(stop_ids: &[&str]) -> InMemoryStore {
        let store = InMemoryStore::new();
        store.add_agency("a1");
        store.insert_pattern(
            "a1",
            TripPattern {
                id: "p1".into(),
                route_id: "r1".into(),
                headsign: None,
                pattern_stops: stop_ids
                    .iter()
                    .map(|stop_id| TripPatternStop {
                        stop_id: stop_id.to_string(),
                        default_travel_time: 60,
                        default_dwell_time: 0,
                    })
                    .collect(),
            },
        );
        store
    }

    fn slot(stop_id: &str) -> Option<StopTime> {
        Some(StopTime {
            stop_id: stop_id.to_string(),
            arrival_time: None,
            departure_time: None,
        })
    }

    fn updatable_trip(slots: Vec<Option<StopTime>>) -> Trip {
        let mut trip = Trip::new("t1", "a1", "p1");
        trip.start_time = Some(ScheduleTime::from_seconds(6 * 3600));
        trip.end_time = Some(ScheduleTime::from_seconds(7 * 3600));
        trip.stop_times = slots;
        trip
    }

    #[test]
    fn create_accepts_matching_stop_count() {
        let store = store_with_pattern(&["s1", "s2", "s3"]);
        let tx = store.open("a1").unwrap();

        let mut trip = Trip::new("t1", "a1", "p1");
        trip.stop_times = vec![slot("s1"), slot("s2"), slot("s3")];
        assert!(validate_for_create(&tx, &trip).is_ok());
        tx.rollback();
    }

    #[test]
    fn create_rejects_count_mismatch() {
        let store = store_with_pattern(&["s1", "s2", "s3"]);
        let tx = store.open("a1").unwrap();

        let mut trip = Trip::new("t1", "a1", "p1");
        trip.stop_times = vec![slot("s1"), slot("s2")];
        let err = validate_for_create(&tx, &trip).unwrap_err();
        tx.rollback();
        assert!(matches!(
            err,
            TripError::StopCountMismatch {
                supplied: 2,
                pattern: 3
            }
        ));
    }

    #[test]
    fn create_rejects_missing_pattern() {
        let store = store_with_pattern(&["s1"]);
        let tx = store.open("a1").unwrap();

        let trip = Trip::new("t1", "a1", "ghost");
        let err = validate_for_create(&tx, &trip).unwrap_err();
        tx.rollback();
        assert!(matches!(err, TripError::MissingPattern(_)));
    }

    #[test]
    fn update_requires_both_times() {
        let store = store_with_pattern(&["s1"]);
        let tx = store.open("a1").unwrap();

        let mut trip = updatable_trip(vec![slot("s1")]);
        trip.end_time = None;
        let err = validate_for_update(&tx, &trip).unwrap_err();
        tx.rollback();
        assert!(matches!(err, TripError::MissingDuration));
    }

    #[test]
    fn update_rejects_zero_duration() {
        let store = store_with_pattern(&["s1"]);
        let tx = store.open("a1").unwrap();

        let mut trip = updatable_trip(vec![slot("s1")]);
        trip.end_time = trip.start_time;
        let err = validate_for_update(&tx, &trip).unwrap_err();
        tx.rollback();
        assert!(matches!(err, TripError::ZeroDuration));
    }

    #[test]
    fn update_accepts_positional_match_with_skips() {
        let store = store_with_pattern(&["s1", "s2", "s3"]);
        let tx = store.open("a1").unwrap();

        let trip = updatable_trip(vec![slot("s1"), None, slot("s3")]);
        assert!(validate_for_update(&tx, &trip).is_ok());
        tx.rollback();
    }

    #[test]
    fn update_reports_first_diverging_position() {
        let store = store_with_pattern(&["s1", "s2", "s3"]);
        let tx = store.open("a1").unwrap();

        let trip = updatable_trip(vec![slot("s1"), slot("s9"), slot("s8")]);
        let err = validate_for_update(&tx, &trip).unwrap_err();
        tx.rollback();
        match err {
            TripError::StopSequenceMismatch {
                position,
                pattern_stop,
                trip_stop,
            } => {
                assert_eq!(position, 1);
                assert_eq!(pattern_stop, "s2");
                assert_eq!(trip_stop, "s9");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn update_rejects_count_mismatch_before_times() {
        let store = store_with_pattern(&["s1", "s2"]);
        let tx = store.open("a1").unwrap();

        let mut trip = updatable_trip(vec![slot("s1")]);
        trip.start_time = None;
        trip.end_time = None;
        let err = validate_for_update(&tx, &trip).unwrap_err();
        tx.rollback();
        assert!(matches!(err, TripError::StopCountMismatch { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ScheduleTime, StopTime, TripPattern, TripPatternStop};
    use crate::store::{AgencyStore, InMemoryStore};
    use proptest::prelude::*;

    fn stop_id(i: usize) -> String {
        format!("stop-{i}")
    }

    fn store_with_n_stops(n: usize) -> InMemoryStore {
        let store = InMemoryStore::new();
        store.add_agency("a1");
        store.insert_pattern(
            "a1",
            TripPattern {
                id: "p1".into(),
                route_id: "r1".into(),
                headsign: None,
                pattern_stops: (0..n)
                    .map(|i| TripPatternStop {
                        stop_id: stop_id(i),
                        default_travel_time: 60,
                        default_dwell_time: 0,
                    })
                    .collect(),
            },
        );
        store
    }

    fn trip_with_slots(slots: Vec<Option<StopTime>>) -> Trip {
        let mut trip = Trip::new("t1", "a1", "p1");
        trip.start_time = Some(ScheduleTime::from_seconds(0));
        trip.end_time = Some(ScheduleTime::from_seconds(3600));
        trip.stop_times = slots;
        trip
    }

    proptest! {
        /// Any skip mask over pattern-aligned slots validates: skips are
        /// never treated as mismatches.
        #[test]
        fn aligned_slots_validate(n in 1usize..8, mask in proptest::collection::vec(any::<bool>(), 1..8)) {
            let store = store_with_n_stops(n);
            let tx = store.open("a1").unwrap();

            let slots: Vec<Option<StopTime>> = (0..n)
                .map(|i| {
                    if mask.get(i).copied().unwrap_or(false) {
                        None
                    } else {
                        Some(StopTime {
                            stop_id: stop_id(i),
                            arrival_time: None,
                            departure_time: None,
                        })
                    }
                })
                .collect();

            let trip = trip_with_slots(slots);
            prop_assert!(validate_for_update(&tx, &trip).is_ok());
            tx.rollback();
        }

        /// Corrupting a single present slot fails validation at exactly
        /// that position.
        #[test]
        fn corrupted_position_is_reported(n in 1usize..8, corrupt in 0usize..8) {
            prop_assume!(corrupt < n);
            let store = store_with_n_stops(n);
            let tx = store.open("a1").unwrap();

            let slots: Vec<Option<StopTime>> = (0..n)
                .map(|i| {
                    let id = if i == corrupt { "intruder".to_string() } else { stop_id(i) };
                    Some(StopTime { stop_id: id, arrival_time: None, departure_time: None })
                })
                .collect();

            let trip = trip_with_slots(slots);
            let err = validate_for_update(&tx, &trip).unwrap_err();
            tx.rollback();
            if let TripError::StopSequenceMismatch { position, .. } = err {
                prop_assert_eq!(position, corrupt);
            } else {
                prop_assert!(false, "unexpected error: {:?}", err);
            }
        }
    }
}
