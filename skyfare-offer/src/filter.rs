use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::{Deal, Month, Region, TripType};
use crate::DealError;

/// Filter bar labels that mean "no constraint".
const WILDCARDS: [&str; 2] = ["All", "Tous"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    Any,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::Any => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr<Err = DealError>> FromStr for Choice<T> {
    type Err = DealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if WILDCARDS.iter().any(|w| w.eq_ignore_ascii_case(s.trim())) {
            Ok(Choice::Any)
        } else {
            s.parse().map(Choice::Only)
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Any => f.write_str("All"),
            Choice::Only(v) => v.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Generation order
    #[default]
    #[serde(rename = "Top Deal")]
    TopDeal,
    Price,
    Alphabet,
}

impl FromStr for SortMode {
    type Err = DealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top deal" | "top-deal" | "top_deal" => Ok(SortMode::TopDeal),
            "price" => Ok(SortMode::Price),
            "alphabet" => Ok(SortMode::Alphabet),
            _ => Err(DealError::UnknownOption {
                field: "sort",
                value: s.to_string(),
            }),
        }
    }
}

/// Current selection in the deals filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealFilter {
    pub trip_type: Choice<TripType>,
    pub month: Choice<Month>,
    pub region: Choice<Region>,
    pub sort: SortMode,
}

impl Default for DealFilter {
    fn default() -> Self {
        Self {
            trip_type: Choice::Only(TripType::RoundTrip),
            month: Choice::Only(Month::August),
            region: Choice::Any,
            sort: SortMode::TopDeal,
        }
    }
}

impl DealFilter {
    /// Build from raw filter-bar values; absent fields keep their default.
    pub fn from_params(
        trip_type: Option<&str>,
        month: Option<&str>,
        region: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, DealError> {
        let mut filter = DealFilter::default();
        if let Some(v) = trip_type {
            filter.trip_type = v.parse()?;
        }
        if let Some(v) = month {
            filter.month = v.parse()?;
        }
        if let Some(v) = region {
            filter.region = v.parse()?;
        }
        if let Some(v) = sort {
            filter.sort = v.parse()?;
        }
        Ok(filter)
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        self.trip_type.admits(&deal.trip_type) && self.month.admits(&deal.month) && self.region.admits(&deal.region)
    }

    /// Matching deals in encounter order, then sorted. Both sorts are stable.
    pub fn apply(&self, deals: &[Deal]) -> Vec<Deal> {
        let mut out: Vec<Deal> = deals.iter().filter(|d| self.matches(d)).cloned().collect();

        match self.sort {
            SortMode::TopDeal => {}
            SortMode::Price => out.sort_by_key(|d| d.price),
            SortMode::Alphabet => out.sort_by(|a, b| collate(&a.title, &b.title)),
        }
        out
    }
}

/// Case-folded comparison with a raw tiebreak, close to a locale collation for these titles.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a))
}
