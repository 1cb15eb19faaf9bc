//! Trip lifecycle engine.
//!
//! Create, update, and delete of trips against the per-agency store:
//! derivation of omitted fields, default-calendar synthesis, structural
//! validation of stop-time sequences against the parent pattern, and
//! read-only lookups. Every mutation is all-or-nothing; every rejection
//! rolls the transaction back.

mod error;
mod mutate;
mod normalize;
mod provision;
mod query;
mod validate;

pub use error::{ErrorKind, TripError};
pub use mutate::TripEditor;
pub use query::{TripQuery, TripSelection};

/// Caller context for agency scoping.
///
/// The transport layer resolves the caller's current agency before invoking
/// the engine; the engine itself keeps no ambient session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Agency the caller is operating as, if any.
    pub agency_id: Option<String>,
}

impl Session {
    /// Session scoped to one agency.
    pub fn for_agency(agency_id: impl Into<String>) -> Self {
        Self {
            agency_id: Some(agency_id.into()),
        }
    }

    /// Agency scope for a call: an explicit parameter wins, otherwise the
    /// session's current agency.
    pub fn resolve_agency(&self, explicit: Option<&str>) -> Option<String> {
        explicit.map(str::to_owned).or_else(|| self.agency_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_agency_wins_over_session() {
        let session = Session::for_agency("session-agency");
        assert_eq!(
            session.resolve_agency(Some("explicit")),
            Some("explicit".to_string())
        );
    }

    #[test]
    fn session_agency_fills_in_when_absent() {
        let session = Session::for_agency("session-agency");
        assert_eq!(
            session.resolve_agency(None),
            Some("session-agency".to_string())
        );
    }

    #[test]
    fn no_agency_anywhere_resolves_to_none() {
        assert_eq!(Session::default().resolve_agency(None), None);
    }
}
