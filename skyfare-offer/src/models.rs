use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DealError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TripType {
    #[serde(rename = "Round-Trip")]
    RoundTrip,
    #[serde(rename = "One-Way")]
    OneWay,
}

impl TripType {
    pub const ALL: [TripType; 2] = [TripType::RoundTrip, TripType::OneWay];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::RoundTrip => "Round-Trip",
            TripType::OneWay => "One-Way",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Month {
    June,
    July,
    August,
}

impl Month {
    pub const ALL: [Month; 3] = [Month::June, Month::July, Month::August];

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Region {
    Africa,
    #[serde(rename = "Moyen-Orient")]
    MoyenOrient,
    Europe,
    Canada,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Africa, Region::MoyenOrient, Region::Europe, Region::Canada];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::MoyenOrient => "Moyen-Orient",
            Region::Europe => "Europe",
            Region::Canada => "Canada",
        }
    }
}

macro_rules! option_enum_impls {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = DealError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| DealError::UnknownOption {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

option_enum_impls!(TripType, "type");
option_enum_impls!(Month, "month");
option_enum_impls!(Region, "region");

/// A promotional fare shown in the deals grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub image: String,
    pub price: u32,
    /// Book-before date, `dd/mm/yyyy`
    pub last_date: String,
    #[serde(rename = "type")]
    pub trip_type: TripType,
    pub month: Month,
    pub region: Region,
}

impl Deal {
    pub fn link(&self) -> DealLink {
        DealLink {
            title: self.title.clone(),
            image: self.image.clone(),
            price: self.price,
            last: self.last_date.clone(),
        }
    }
}

/// Landing-page deal; carries no filter tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedDeal {
    pub id: String,
    pub title: String,
    pub image: String,
    pub price: u32,
    pub last_date: String,
}

impl FeaturedDeal {
    pub fn link(&self) -> DealLink {
        DealLink {
            title: self.title.clone(),
            image: self.image.clone(),
            price: self.price,
            last: self.last_date.clone(),
        }
    }
}

/// What a deal card hands to the booking page through the query string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealLink {
    pub title: String,
    pub image: String,
    pub price: u32,
    pub last: String,
}

impl Default for DealLink {
    fn default() -> Self {
        Self {
            title: "Deal".to_string(),
            image: String::new(),
            price: 0,
            last: String::new(),
        }
    }
}

impl DealLink {
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("title", &self.title)
            .append_pair("image", &self.image)
            .append_pair("price", &self.price.to_string())
            .append_pair("last", &self.last)
            .finish()
    }

    /// Missing or malformed parameters fall back to the defaults.
    pub fn from_query(query: &str) -> Self {
        let mut link = DealLink::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "title" if !value.is_empty() => link.title = value.into_owned(),
                "image" => link.image = value.into_owned(),
                "price" => link.price = value.trim().parse().unwrap_or(0),
                "last" => link.last = value.into_owned(),
                _ => {}
            }
        }
        link
    }
}

/// Group digits by thousands: `450000` → `450,000`.
pub fn format_price(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
