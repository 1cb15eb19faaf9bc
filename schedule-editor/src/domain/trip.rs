//! Trip records and their stop-time slots.

use serde::{Deserialize, Serialize};

use super::ScheduleTime;

/// Travel direction of a trip along its pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripDirection {
    /// The pattern's forward direction. Trips that arrive without a
    /// direction are normalized to this.
    #[default]
    A,
    /// The reverse direction.
    B,
}

/// Wheelchair accessibility of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WheelchairBoarding {
    /// No accessibility information. Trips that arrive without a value are
    /// normalized to this.
    #[default]
    Unknown,
    /// The vehicle can take at least one wheelchair.
    Available,
    /// The vehicle cannot take wheelchairs.
    Unavailable,
}

/// Timing at a single pattern position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTime {
    /// Stop served at this position; must match the pattern stop at the
    /// same position when the trip is persisted.
    pub stop_id: String,
    pub arrival_time: Option<ScheduleTime>,
    pub departure_time: Option<ScheduleTime>,
}

/// A concrete, dated run of a vehicle along a stop pattern.
///
/// Optional fields are `None` when the caller did not supply them; the
/// normalizer fills them before the trip is persisted, so a committed trip
/// always carries a direction, block id, GTFS id, accessibility flag, and
/// validity flag.
///
/// `stop_times` holds one slot per pattern stop position. A `None` slot is
/// an intentionally skipped stop: the trip passes that pattern position
/// without serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique within the owning agency.
    #[serde(default)]
    pub id: String,
    /// Owning agency; the tenancy boundary for every entity here.
    #[serde(default)]
    pub agency_id: String,
    /// Pattern this trip runs over. Required for validation; a trip whose
    /// pattern does not resolve cannot be persisted.
    #[serde(default)]
    pub pattern_id: String,
    pub route_id: Option<String>,
    pub calendar_id: Option<String>,
    pub trip_short_name: Option<String>,
    pub trip_headsign: Option<String>,
    pub trip_direction: Option<TripDirection>,
    pub block_id: Option<String>,
    pub gtfs_trip_id: Option<String>,
    pub wheelchair_boarding: Option<WheelchairBoarding>,
    /// Marks a trip retained in the data set but excluded from exports.
    pub invalid: Option<bool>,
    /// Frequency-based trips have their stop times regenerated from the
    /// pattern; caller-supplied stop times are discarded.
    #[serde(default)]
    pub use_frequency: bool,
    pub start_time: Option<ScheduleTime>,
    pub end_time: Option<ScheduleTime>,
    /// One slot per pattern stop position; `None` is a skipped stop.
    #[serde(default)]
    pub stop_times: Vec<Option<StopTime>>,
}

impl Trip {
    /// A bare trip with every optional field unset, as a caller payload
    /// arrives before normalization.
    pub fn new(
        id: impl Into<String>,
        agency_id: impl Into<String>,
        pattern_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            agency_id: agency_id.into(),
            pattern_id: pattern_id.into(),
            route_id: None,
            calendar_id: None,
            trip_short_name: None,
            trip_headsign: None,
            trip_direction: None,
            block_id: None,
            gtfs_trip_id: None,
            wheelchair_boarding: None,
            invalid: None,
            use_frequency: false,
            start_time: None,
            end_time: None,
            stop_times: Vec::new(),
        }
    }
}
