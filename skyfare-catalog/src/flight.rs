use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated leg, shaped like the flights API payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: Uuid,
    pub city_from: String,
    pub city_to: String,
    pub price: u32,
    /// Departure, epoch seconds
    pub d_time: i64,
    /// Arrival, epoch seconds
    pub a_time: i64,
    pub airlines: Vec<String>,
    /// Seconds
    pub duration: i64,
}

impl Flight {
    pub fn departure(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.d_time, 0)
    }

    pub fn arrival(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.a_time, 0)
    }

    /// e.g. `4h 0m`
    pub fn duration_label(&self) -> String {
        format!("{}h {}m", self.duration / 3600, (self.duration % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_wire_shape() {
        let flight = Flight {
            id: Uuid::nil(),
            city_from: "Tunis".to_string(),
            city_to: "Paris".to_string(),
            price: 320,
            d_time: 1_766_620_800 + 8 * 3600,
            a_time: 1_766_620_800 + 12 * 3600,
            airlines: vec!["TU".to_string()],
            duration: 14_400,
        };

        let json = serde_json::to_value(&flight).unwrap();
        assert_eq!(json["cityFrom"], "Tunis");
        assert_eq!(json["dTime"], 1_766_649_600);
        assert_eq!(flight.duration_label(), "4h 0m");
        assert_eq!(flight.departure().unwrap().to_rfc3339(), "2025-12-25T08:00:00+00:00");
    }
}
