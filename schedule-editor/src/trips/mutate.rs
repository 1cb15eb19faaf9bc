//! Trip mutation orchestration.
//!
//! Each operation opens one transaction for the target agency, runs a
//! short-circuiting pipeline of checks and derivations inside it, and ends
//! with exactly one commit or rollback. A rejected request never leaves a
//! partial write behind.

use tracing::info;

use crate::domain::Trip;
use crate::store::{AgencyStore, AgencyTransaction};

use super::Session;
use super::error::TripError;
use super::normalize::{expand_frequency_stop_times, normalize};
use super::provision::provision_default_calendar;
use super::query::{self, TripQuery, TripSelection};
use super::validate::{validate_for_create, validate_for_update};

/// The trip mutation engine for one backing store.
///
/// All agency scoping, validation, and transactional bookkeeping lives
/// here; callers hand in payloads and an explicit [`Session`] and get back
/// the persisted trip or a typed rejection.
pub struct TripEditor<S> {
    store: S,
}

impl<S: AgencyStore> TripEditor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Look up trips per the [`TripQuery`] filters.
    ///
    /// Read-only: the transaction is released by rollback on every path,
    /// found or not, so no lookup can mutate store state or leak an open
    /// transaction.
    pub fn get_trip(
        &self,
        session: &Session,
        query: &TripQuery,
    ) -> Result<TripSelection, TripError> {
        let agency_id = session
            .resolve_agency(query.agency_id.as_deref())
            .ok_or(TripError::MissingAgency)?;

        let tx = self.store.open(&agency_id)?;
        let selection = query::resolve(&tx, query);
        tx.rollback();
        selection
    }

    /// Create a trip from a caller payload.
    ///
    /// Runs the normalizer, the default-calendar provisioner, and the
    /// create-path validator in order; the trip and any synthesized
    /// calendar are written together and committed atomically.
    pub fn create_trip(&self, session: &Session, payload: Trip) -> Result<Trip, TripError> {
        info!(
            trip = %payload.id,
            agency = %payload.agency_id,
            session_agency = session.agency_id.as_deref().unwrap_or("-"),
            "creating trip"
        );

        let mut tx = self.store.open(&payload.agency_id)?;
        match self.create_in_tx(&mut tx, session, payload) {
            Ok(trip) => {
                tx.commit()?;
                info!(trip = %trip.id, agency = %trip.agency_id, "trip created");
                Ok(trip)
            }
            Err(err) => {
                tx.rollback();
                Err(err)
            }
        }
    }

    fn create_in_tx(
        &self,
        tx: &mut S::Tx,
        session: &Session,
        mut trip: Trip,
    ) -> Result<Trip, TripError> {
        if let Some(session_agency) = &session.agency_id {
            if *session_agency != trip.agency_id {
                return Err(TripError::AgencyMismatch {
                    session: session_agency.clone(),
                    payload: trip.agency_id.clone(),
                });
            }
        }
        if !self.store.agency_exists(&trip.agency_id) {
            return Err(TripError::UnknownAgency(trip.agency_id.clone()));
        }
        if tx.contains_trip(&trip.id) {
            return Err(TripError::DuplicateTrip(trip.id.clone()));
        }

        normalize(tx, &mut trip)?;
        let default_calendar = provision_default_calendar(&mut trip);
        validate_for_create(tx, &trip)?;

        tx.put_trip(trip.clone());
        if let Some(calendar) = default_calendar {
            tx.put_calendar(calendar);
        }
        Ok(trip)
    }

    /// Overwrite an existing trip with a caller payload.
    ///
    /// Frequency-based trips have their stop times regenerated from the
    /// pattern first; the update-path validator then enforces a non-zero
    /// duration and positional stop matching.
    pub fn update_trip(&self, session: &Session, payload: Trip) -> Result<Trip, TripError> {
        let mut tx = self.store.open(&payload.agency_id)?;
        match self.update_in_tx(&mut tx, session, payload) {
            Ok(trip) => {
                tx.commit()?;
                info!(trip = %trip.id, agency = %trip.agency_id, "trip updated");
                Ok(trip)
            }
            Err(err) => {
                tx.rollback();
                Err(err)
            }
        }
    }

    fn update_in_tx(
        &self,
        tx: &mut S::Tx,
        session: &Session,
        mut trip: Trip,
    ) -> Result<Trip, TripError> {
        // A session scoped to a different agency hard-fails, matching the
        // create path.
        if let Some(session_agency) = &session.agency_id {
            if *session_agency != trip.agency_id {
                return Err(TripError::AgencyMismatch {
                    session: session_agency.clone(),
                    payload: trip.agency_id.clone(),
                });
            }
        }
        if !self.store.agency_exists(&trip.agency_id) {
            return Err(TripError::UnknownAgency(trip.agency_id.clone()));
        }

        expand_frequency_stop_times(tx, &mut trip)?;

        if !tx.contains_trip(&trip.id) {
            return Err(if trip.id.is_empty() {
                TripError::MissingTripId
            } else {
                TripError::UnknownTrip(trip.id.clone())
            });
        }

        validate_for_update(tx, &trip)?;

        tx.put_trip(trip.clone());
        Ok(trip)
    }

    /// Remove a trip.
    ///
    /// Absence of the trip is tolerated: the transaction still commits and
    /// the result is `None` (there is nothing to undo, and delete is
    /// idempotent from the caller's side).
    pub fn delete_trip(
        &self,
        session: &Session,
        agency_id: Option<&str>,
        trip_id: Option<&str>,
    ) -> Result<Option<Trip>, TripError> {
        let agency_id = session
            .resolve_agency(agency_id)
            .ok_or(TripError::MissingAgency)?;

        let mut tx = self.store.open(&agency_id)?;
        let Some(trip_id) = trip_id else {
            tx.rollback();
            return Err(TripError::MissingTripId);
        };

        let removed = tx.remove_trip(trip_id);
        tx.commit()?;
        if let Some(trip) = &removed {
            info!(trip = %trip.id, agency = %agency_id, "trip deleted");
        }
        Ok(removed)
    }
}
