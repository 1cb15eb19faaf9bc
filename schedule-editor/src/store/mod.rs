//! Per-agency transactional storage contract.
//!
//! The engine consumes a versioned, copy-on-write unit of work per agency:
//! keyed access to the entity collections plus atomic commit and rollback.
//! The contract is a trait pair so any backing implementation (in-memory
//! map, log-structured store, embedded database) can satisfy it; the
//! engine depends on nothing beyond these methods.
//!
//! Committing or rolling back consumes the transaction. A closed handle is
//! therefore unrepresentable: no request path can touch a transaction
//! twice or leak one past the end of the request.

mod memory;

pub use memory::{InMemoryStore, InMemoryTransaction};

use crate::domain::{Route, ServiceCalendar, Trip, TripPattern};

/// Error from the backing store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The agency is not known to the store.
    #[error("unknown agency: {0}")]
    UnknownAgency(String),

    /// Commit could not be applied. The store is unchanged.
    #[error("commit failed: {0}")]
    Commit(String),
}

/// Versioned per-agency store that hands out transactions.
pub trait AgencyStore {
    /// Transaction type produced by [`open`](Self::open).
    type Tx: AgencyTransaction;

    /// Whether the agency exists in the store.
    fn agency_exists(&self, agency_id: &str) -> bool;

    /// Open a unit of work scoped to one agency.
    fn open(&self, agency_id: &str) -> Result<Self::Tx, StoreError>;
}

/// A per-agency unit of work over the entity collections.
///
/// Reads see the transaction's own writes. Nothing is visible outside the
/// transaction until [`commit`](Self::commit); [`rollback`](Self::rollback)
/// discards every write.
pub trait AgencyTransaction {
    fn trip(&self, id: &str) -> Option<Trip>;
    fn contains_trip(&self, id: &str) -> bool;
    fn put_trip(&mut self, trip: Trip);
    fn remove_trip(&mut self, id: &str) -> Option<Trip>;
    fn trips(&self) -> Vec<Trip>;

    fn pattern(&self, id: &str) -> Option<TripPattern>;
    fn contains_pattern(&self, id: &str) -> bool;

    fn calendar(&self, id: &str) -> Option<ServiceCalendar>;
    fn contains_calendar(&self, id: &str) -> bool;
    fn put_calendar(&mut self, calendar: ServiceCalendar);
    fn calendars(&self) -> Vec<ServiceCalendar>;

    fn route(&self, id: &str) -> Option<Route>;

    /// All trips running over the given pattern.
    fn trips_by_pattern(&self, pattern_id: &str) -> Vec<Trip> {
        self.trips()
            .into_iter()
            .filter(|trip| trip.pattern_id == pattern_id)
            .collect()
    }

    /// All trips for the given pattern restricted to one calendar.
    fn trips_by_pattern_and_calendar(&self, pattern_id: &str, calendar_id: &str) -> Vec<Trip> {
        self.trips()
            .into_iter()
            .filter(|trip| {
                trip.pattern_id == pattern_id && trip.calendar_id.as_deref() == Some(calendar_id)
            })
            .collect()
    }

    /// Atomically apply every write in this unit of work.
    ///
    /// On failure the store must be left unchanged.
    fn commit(self) -> Result<(), StoreError>;

    /// Discard every write in this unit of work.
    fn rollback(self);
}
