//! Service calendars.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A service calendar scoped to one agency.
///
/// The editor only ever creates the synthesized placeholder variant (see
/// [`default_for_agency`](Self::default_for_agency)); real calendars are
/// authored elsewhere. The date range is carried but never validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCalendar {
    pub id: String,
    pub agency_id: String,
    /// Exported GTFS service id; empty for synthesized calendars until a
    /// user fills it in.
    pub gtfs_service_id: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ServiceCalendar {
    /// Placeholder calendar for a trip that arrived without one.
    ///
    /// The caller is expected to overwrite it later with real service
    /// information; until then it exists only so the trip has a resolvable
    /// calendar reference.
    pub fn default_for_agency(agency_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            agency_id: agency_id.to_string(),
            gtfs_service_id: String::new(),
            description: "Default calendar".to_string(),
            start_date: None,
            end_date: None,
        }
    }
}
