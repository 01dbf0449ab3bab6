use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::airports::{self, Airport};
use crate::{CoreError, CoreResult};

/// Wire format of dates in search query strings.
pub const TRAVEL_DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Years a travel date may fall in.
const TRAVEL_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;
/// Largest count kept per passenger kind when reading a token.
pub const MAX_PER_KIND: u32 = 9;

/// Parse a travel date, accepting `dd/mm/yyyy` and ISO `yyyy-mm-dd`.
/// Only four-digit years are accepted.
pub fn parse_travel_date(raw: &str) -> CoreResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, TRAVEL_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT))
        .ok()
        .filter(|date| TRAVEL_YEARS.contains(&date.year()))
        .ok_or_else(|| CoreError::InvalidDate(raw.to_string()))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CabinClass {
    #[default]
    Economy,
    Business,
    First,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PassengerKind {
    Adult,
    Youth,
    Child,
    Infant,
}

impl PassengerKind {
    pub fn letter(self) -> char {
        match self {
            PassengerKind::Adult => 'A',
            PassengerKind::Youth => 'Y',
            PassengerKind::Child => 'C',
            PassengerKind::Infant => 'I',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(PassengerKind::Adult),
            'Y' => Some(PassengerKind::Youth),
            'C' => Some(PassengerKind::Child),
            'I' => Some(PassengerKind::Infant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PassengerCounts {
    pub adults: u32,
    pub youths: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for PassengerCounts {
    fn default() -> Self {
        Self {
            adults: 1,
            youths: 0,
            children: 0,
            infants: 0,
        }
    }
}

impl PassengerCounts {
    /// Total travellers, never below one.
    pub fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.youths)
            .saturating_add(self.children)
            .saturating_add(self.infants)
            .max(1)
    }

    pub fn breakdown(&self) -> [(u32, PassengerKind); 4] {
        [
            (self.adults, PassengerKind::Adult),
            (self.youths, PassengerKind::Youth),
            (self.children, PassengerKind::Child),
            (self.infants, PassengerKind::Infant),
        ]
    }

    /// Compact token used in navigation, e.g. `2A0Y1C0I`.
    pub fn to_token(&self) -> String {
        self.breakdown()
            .iter()
            .map(|(count, kind)| format!("{}{}", count, kind.letter()))
            .collect()
    }

    /// Parse `<digits><LETTER>` pairs. Unknown letters are skipped, counts
    /// are capped at [`MAX_PER_KIND`] and a token without any recognised
    /// pair falls back to one adult.
    pub fn parse_token(token: &str) -> Self {
        let mut counts = PassengerCounts {
            adults: 0,
            ..Default::default()
        };
        let mut found = false;
        let mut digits = String::new();

        for c in token.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            if c.is_ascii_uppercase() && !digits.is_empty() {
                if let Some(kind) = PassengerKind::from_letter(c) {
                    // all-digit runs only fail to parse when they overflow
                    let n = digits.parse::<u32>().map_or(MAX_PER_KIND, |n| n.min(MAX_PER_KIND));
                    match kind {
                        PassengerKind::Adult => counts.adults = n,
                        PassengerKind::Youth => counts.youths = n,
                        PassengerKind::Child => counts.children = n,
                        PassengerKind::Infant => counts.infants = n,
                    }
                    found = true;
                }
            }
            digits.clear();
        }

        if found {
            counts
        } else {
            PassengerCounts::default()
        }
    }
}

/// Inline messages shown under the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter a valid origin code.")]
    InvalidOrigin,
    #[error("Please enter a valid destination code.")]
    InvalidDestination,
    #[error("Please select a departing date.")]
    MissingDepartingDate,
    #[error("Return date must be after departure.")]
    InvalidReturnDate,
}

/// The search form as the user is filling it in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingFormState {
    pub origin: String,
    pub destination: String,
    pub departing_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: PassengerCounts,
    pub cabin_class: CabinClass,
    pub is_return: bool,
}

impl Default for BookingFormState {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            departing_date: None,
            return_date: None,
            passengers: PassengerCounts::default(),
            cabin_class: CabinClass::Economy,
            is_return: true,
        }
    }
}

impl BookingFormState {
    /// Switching to one way drops any return date already picked.
    pub fn set_round_trip(&mut self, is_return: bool) {
        self.is_return = is_return;
        if !is_return {
            self.return_date = None;
        }
    }

    /// Check the form, reporting the first problem in field order.
    pub fn validate(&self) -> Result<ValidatedSearch, FormError> {
        let origin = airports::find(&self.origin).ok_or(FormError::InvalidOrigin)?;
        let destination = airports::find(&self.destination).ok_or(FormError::InvalidDestination)?;
        let departing = self.departing_date.ok_or(FormError::MissingDepartingDate)?;

        let returning = if self.is_return {
            match self.return_date {
                Some(ret) if ret >= departing => Some(ret),
                _ => return Err(FormError::InvalidReturnDate),
            }
        } else {
            None
        };

        Ok(ValidatedSearch {
            origin,
            destination,
            departing,
            returning,
            passengers: self.passengers,
            cabin_class: self.cabin_class,
        })
    }
}

/// A search that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSearch {
    pub origin: &'static Airport,
    pub destination: &'static Airport,
    pub departing: NaiveDate,
    pub returning: Option<NaiveDate>,
    pub passengers: PassengerCounts,
    pub cabin_class: CabinClass,
}

impl ValidatedSearch {
    /// Query string consumed by the results calendar.
    pub fn navigation_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("from", self.origin.code)
            .append_pair("to", self.destination.code)
            .append_pair("depart", &self.departing.format(ISO_DATE_FORMAT).to_string());
        if let Some(ret) = self.returning {
            query.append_pair("ret", &ret.format(ISO_DATE_FORMAT).to_string());
        }
        query.append_pair("pax", &self.passengers.to_token());
        query.finish()
    }
}
