//! Trip patterns: the schedule-independent shape of a route.
//!
//! A pattern is an ordered stop sequence shared by many trips. The editor
//! never mutates patterns; it reads them to validate trips and to derive
//! stop times for frequency-based trips.

use serde::{Deserialize, Serialize};

use super::{ScheduleTime, StopTime};

/// One position in a pattern's stop sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatternStop {
    pub stop_id: String,
    /// Default seconds of travel from the previous stop's departure.
    pub default_travel_time: u32,
    /// Default seconds spent stationary at this stop.
    pub default_dwell_time: u32,
}

/// An ordered sequence of stops shared by many trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPattern {
    pub id: String,
    pub route_id: String,
    pub headsign: Option<String>,
    pub pattern_stops: Vec<TripPatternStop>,
}

impl TripPattern {
    /// Cast the pattern stops into a stop-time sequence.
    ///
    /// Arrival and departure offsets accumulate each stop's default travel
    /// and dwell times along the sequence, starting from zero. Used to
    /// regenerate the stop times of frequency-based trips, which are
    /// relative to each departure rather than authored explicitly.
    pub fn stop_times(&self) -> Vec<Option<StopTime>> {
        let mut offset = 0u32;
        self.pattern_stops
            .iter()
            .map(|pattern_stop| {
                offset += pattern_stop.default_travel_time;
                let arrival = ScheduleTime::from_seconds(offset);
                offset += pattern_stop.default_dwell_time;
                let departure = ScheduleTime::from_seconds(offset);
                Some(StopTime {
                    stop_id: pattern_stop.stop_id.clone(),
                    arrival_time: Some(arrival),
                    departure_time: Some(departure),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_stop(stop_id: &str, travel: u32, dwell: u32) -> TripPatternStop {
        TripPatternStop {
            stop_id: stop_id.to_string(),
            default_travel_time: travel,
            default_dwell_time: dwell,
        }
    }

    #[test]
    fn cast_accumulates_travel_and_dwell() {
        let pattern = TripPattern {
            id: "p1".into(),
            route_id: "r1".into(),
            headsign: Some("Downtown".into()),
            pattern_stops: vec![
                pattern_stop("s1", 0, 30),
                pattern_stop("s2", 300, 30),
                pattern_stop("s3", 240, 0),
            ],
        };

        let stop_times = pattern.stop_times();
        assert_eq!(stop_times.len(), 3);

        let first = stop_times[0].as_ref().unwrap();
        assert_eq!(first.stop_id, "s1");
        assert_eq!(first.arrival_time, Some(ScheduleTime::from_seconds(0)));
        assert_eq!(first.departure_time, Some(ScheduleTime::from_seconds(30)));

        let second = stop_times[1].as_ref().unwrap();
        assert_eq!(second.arrival_time, Some(ScheduleTime::from_seconds(330)));
        assert_eq!(second.departure_time, Some(ScheduleTime::from_seconds(360)));

        let third = stop_times[2].as_ref().unwrap();
        assert_eq!(third.arrival_time, Some(ScheduleTime::from_seconds(600)));
        assert_eq!(third.departure_time, Some(ScheduleTime::from_seconds(600)));
    }

    #[test]
    fn cast_of_empty_pattern_is_empty() {
        let pattern = TripPattern {
            id: "p1".into(),
            route_id: "r1".into(),
            headsign: None,
            pattern_stops: vec![],
        };
        assert!(pattern.stop_times().is_empty());
    }

    #[test]
    fn cast_never_skips_stops() {
        let pattern = TripPattern {
            id: "p1".into(),
            route_id: "r1".into(),
            headsign: None,
            pattern_stops: vec![pattern_stop("s1", 0, 0), pattern_stop("s2", 60, 0)],
        };
        assert!(pattern.stop_times().iter().all(Option::is_some));
    }
}
