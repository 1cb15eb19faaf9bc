//! Domain types for the schedule editor.
//!
//! This module contains the entities the trip engine reads and writes:
//! trips with their stop-time slots, the patterns they run over, service
//! calendars, and routes. Trips are the only entities the engine mutates;
//! patterns, routes, and pre-existing calendars are owned by collaborating
//! subsystems and are read-only here.

mod calendar;
mod pattern;
mod route;
mod time;
mod trip;

pub use calendar::ServiceCalendar;
pub use pattern::{TripPattern, TripPatternStop};
pub use route::Route;
pub use time::{ScheduleTime, TimeParseError};
pub use trip::{StopTime, Trip, TripDirection, WheelchairBoarding};
