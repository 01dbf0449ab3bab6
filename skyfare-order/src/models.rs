use serde::{Deserialize, Serialize};
use skyfare_catalog::Flight;
use skyfare_offer::DealLink;
use skyfare_shared::Masked;
use std::fmt;

/// Booking page step. Only ever moves forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    List,
    Seat,
    Details,
    Done,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::List => "list",
            Step::Seat => "seat",
            Step::Details => "details",
            Step::Done => "done",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the traveller is booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    Flight(Flight),
    Deal(DealLink),
}

impl Selection {
    pub fn title(&self) -> String {
        match self {
            Selection::Flight(f) => format!("{} → {}", f.city_from, f.city_to),
            Selection::Deal(d) => d.title.clone(),
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            Selection::Flight(f) => f.price,
            Selection::Deal(d) => d.price,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRecord {
    pub first_name: String,
    pub last_name: String,
    pub dob: Masked<String>,
}

impl PassengerRecord {
    /// Every field filled in.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty() && !self.dob.expose().trim().is_empty()
    }

    pub fn apply(&mut self, patch: PassengerPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(dob) = patch.dob {
            self.dob = Masked(dob);
        }
    }
}

/// Partial edit of one passenger row; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassengerPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
}
