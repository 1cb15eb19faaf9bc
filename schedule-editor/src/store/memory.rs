//! In-memory backing store.
//!
//! Clones an agency's entity maps when a transaction opens and swaps the
//! working copy back in on commit, giving the same all-or-nothing
//! visibility as a real versioned store. Useful for development, embedding,
//! and tests without a storage engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{Route, ServiceCalendar, Trip, TripPattern};

use super::{AgencyStore, AgencyTransaction, StoreError};

/// Entity collections for one agency.
#[derive(Debug, Clone, Default)]
struct AgencyData {
    trips: HashMap<String, Trip>,
    patterns: HashMap<String, TripPattern>,
    calendars: HashMap<String, ServiceCalendar>,
    routes: HashMap<String, Route>,
}

/// In-memory store, cheap to seed and safe to share.
///
/// Clones share the underlying data, so a clone handed to the engine and
/// one kept by a test observe the same committed state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    agencies: Arc<Mutex<HashMap<String, AgencyData>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agency with no entities.
    pub fn add_agency(&self, agency_id: &str) {
        self.lock().entry(agency_id.to_string()).or_default();
    }

    /// Seed a pattern. Patterns are owned by pattern management, outside
    /// the editor, so they enter the store directly rather than through a
    /// trip transaction.
    pub fn insert_pattern(&self, agency_id: &str, pattern: TripPattern) {
        self.lock()
            .entry(agency_id.to_string())
            .or_default()
            .patterns
            .insert(pattern.id.clone(), pattern);
    }

    /// Seed a route.
    pub fn insert_route(&self, agency_id: &str, route: Route) {
        self.lock()
            .entry(agency_id.to_string())
            .or_default()
            .routes
            .insert(route.id.clone(), route);
    }

    /// Seed a calendar.
    pub fn insert_calendar(&self, agency_id: &str, calendar: ServiceCalendar) {
        self.lock()
            .entry(agency_id.to_string())
            .or_default()
            .calendars
            .insert(calendar.id.clone(), calendar);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, AgencyData>> {
        self.agencies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AgencyStore for InMemoryStore {
    type Tx = InMemoryTransaction;

    fn agency_exists(&self, agency_id: &str) -> bool {
        self.lock().contains_key(agency_id)
    }

    /// Open succeeds even for an unknown agency: the working set starts
    /// empty and the caller's agency checks decide whether anything may be
    /// written back.
    fn open(&self, agency_id: &str) -> Result<Self::Tx, StoreError> {
        let working = self.lock().get(agency_id).cloned().unwrap_or_default();
        Ok(InMemoryTransaction {
            agencies: Arc::clone(&self.agencies),
            agency_id: agency_id.to_string(),
            working,
        })
    }
}

/// Unit of work handed out by [`InMemoryStore`].
#[derive(Debug)]
pub struct InMemoryTransaction {
    agencies: Arc<Mutex<HashMap<String, AgencyData>>>,
    agency_id: String,
    working: AgencyData,
}

impl AgencyTransaction for InMemoryTransaction {
    fn trip(&self, id: &str) -> Option<Trip> {
        self.working.trips.get(id).cloned()
    }

    fn contains_trip(&self, id: &str) -> bool {
        self.working.trips.contains_key(id)
    }

    fn put_trip(&mut self, trip: Trip) {
        self.working.trips.insert(trip.id.clone(), trip);
    }

    fn remove_trip(&mut self, id: &str) -> Option<Trip> {
        self.working.trips.remove(id)
    }

    fn trips(&self) -> Vec<Trip> {
        self.working.trips.values().cloned().collect()
    }

    fn pattern(&self, id: &str) -> Option<TripPattern> {
        self.working.patterns.get(id).cloned()
    }

    fn contains_pattern(&self, id: &str) -> bool {
        self.working.patterns.contains_key(id)
    }

    fn calendar(&self, id: &str) -> Option<ServiceCalendar> {
        self.working.calendars.get(id).cloned()
    }

    fn contains_calendar(&self, id: &str) -> bool {
        self.working.calendars.contains_key(id)
    }

    fn put_calendar(&mut self, calendar: ServiceCalendar) {
        self.working.calendars.insert(calendar.id.clone(), calendar);
    }

    fn calendars(&self) -> Vec<ServiceCalendar> {
        self.working.calendars.values().cloned().collect()
    }

    fn route(&self, id: &str) -> Option<Route> {
        self.working.routes.get(id).cloned()
    }

    fn commit(self) -> Result<(), StoreError> {
        self.agencies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(self.agency_id, self.working);
        Ok(())
    }

    fn rollback(self) {
        // Dropping the working copy discards every write.
    }
}
