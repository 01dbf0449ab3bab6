pub mod calendar;
pub mod flight;
pub mod generator;

pub use calendar::{CalendarDay, CalendarError, Leg, ResultsCalendar};
pub use flight::Flight;
pub use generator::{FareRules, FlightGenerator, FlightQuery};
