//! Default calendar provisioning.

use tracing::warn;

use crate::domain::{ServiceCalendar, Trip};

/// Synthesize a placeholder calendar for a trip that arrived without one.
///
/// A trip whose `calendar_id` is unset or empty gets a fresh calendar
/// scoped to its agency, and the trip is pointed at it. The calendar is
/// returned rather than written: it must only be persisted together with
/// the trip, in the same transaction, once the trip is known to be valid.
pub(crate) fn provision_default_calendar(trip: &mut Trip) -> Option<ServiceCalendar> {
    if matches!(trip.calendar_id.as_deref(), Some(id) if !id.is_empty()) {
        return None;
    }

    warn!(trip = %trip.id, "no usable calendar id supplied, synthesizing a default");
    let calendar = ServiceCalendar::default_for_agency(&trip.agency_id);
    trip.calendar_id = Some(calendar.id.clone());
    Some(calendar)
}
