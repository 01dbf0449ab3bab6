use chrono::{NaiveDate, NaiveTime};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flight::Flight;
use skyfare_core::airports;

/// Constants behind the placeholder fares and schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareRules {
    /// Lowest per-passenger base fare (inclusive)
    pub base_min: u32,
    /// Highest per-passenger base fare (inclusive)
    pub base_max: u32,
    /// Subtracted from the base fare before the return spread is added
    pub return_offset: i64,
    /// Width of the random band added to the return fare
    pub return_spread: u32,
    pub outbound_departure_hour: i64,
    pub outbound_arrival_hour: i64,
    pub inbound_departure_hour: i64,
    pub inbound_arrival_hour: i64,
    pub carrier: String,
}

impl Default for FareRules {
    fn default() -> Self {
        Self {
            base_min: 150,
            base_max: 549,
            return_offset: 30,
            return_spread: 60,
            outbound_departure_hour: 8,
            outbound_arrival_hour: 12,
            inbound_departure_hour: 14,
            inbound_arrival_hour: 18,
            carrier: "TU".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
}

impl FlightQuery {
    /// Passenger multiplier from a raw query value. Anything absent,
    /// non-numeric or zero counts as a single passenger.
    pub fn passengers_from_raw(raw: Option<&str>) -> u32 {
        raw.and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|&p| p > 0)
            .unwrap_or(1)
    }
}

/// Fabricates outbound/inbound legs for a search.
pub struct FlightGenerator {
    rules: FareRules,
}

impl FlightGenerator {
    pub fn new(rules: FareRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &FareRules {
        &self.rules
    }

    /// One leg for a one-way search, two for a round trip, none when either
    /// airport is unknown. Prices differ on every call.
    pub fn generate<R: Rng + ?Sized>(&self, query: &FlightQuery, rng: &mut R) -> Vec<Flight> {
        let (origin, destination) = match (airports::find(&query.origin), airports::find(&query.destination)) {
            (Some(o), Some(d)) => (o, d),
            _ => return Vec::new(),
        };

        let passengers = query.passengers.max(1);
        let base = rng.gen_range(self.rules.base_min..=self.rules.base_max);

        let outbound = self.leg(
            origin.city,
            destination.city,
            query.departure,
            self.rules.outbound_departure_hour,
            self.rules.outbound_arrival_hour,
            base.saturating_mul(passengers),
        );

        let Some(return_date) = query.return_date else {
            return vec![outbound];
        };

        let spread = rng.gen_range(0..self.rules.return_spread.max(1)) as i64;
        let return_fare = (base as i64 - self.rules.return_offset + spread).max(1) as u32;

        let inbound = self.leg(
            destination.city,
            origin.city,
            return_date,
            self.rules.inbound_departure_hour,
            self.rules.inbound_arrival_hour,
            return_fare.saturating_mul(passengers),
        );

        vec![outbound, inbound]
    }

    fn leg(
        &self,
        city_from: &str,
        city_to: &str,
        day: NaiveDate,
        departure_hour: i64,
        arrival_hour: i64,
        price: u32,
    ) -> Flight {
        let midnight = day.and_time(NaiveTime::MIN).and_utc().timestamp();
        Flight {
            id: Uuid::new_v4(),
            city_from: city_from.to_string(),
            city_to: city_to.to_string(),
            price,
            d_time: midnight + departure_hour * 3600,
            a_time: midnight + arrival_hour * 3600,
            airlines: vec![self.rules.carrier.clone()],
            duration: (arrival_hour - departure_hour) * 3600,
        }
    }
}

impl Default for FlightGenerator {
    fn default() -> Self {
        Self::new(FareRules::default())
    }
}
