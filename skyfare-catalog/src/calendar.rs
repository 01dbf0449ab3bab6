use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days shown per leg.
pub const WINDOW_DAYS: i64 = 10;
/// Days shown before the requested date.
pub const LEAD_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Outbound,
    Inbound,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub selected: bool,
    pub unavailable: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("{0} is in the past")]
    Unavailable(NaiveDate),
    #[error("{0} is outside the displayed window")]
    OutOfWindow(NaiveDate),
    #[error("This search has no return leg")]
    NoReturnLeg,
}

/// Day pickers around the requested outbound and return dates.
#[derive(Debug, Clone)]
pub struct ResultsCalendar {
    depart: NaiveDate,
    ret: Option<NaiveDate>,
    today: NaiveDate,
    selected_depart: Option<NaiveDate>,
    selected_return: Option<NaiveDate>,
}

impl ResultsCalendar {
    pub fn new(depart: NaiveDate, ret: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            depart,
            ret,
            today,
            selected_depart: Some(depart),
            selected_return: ret,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.ret.is_some()
    }

    pub fn selected(&self, leg: Leg) -> Option<NaiveDate> {
        match leg {
            Leg::Outbound => self.selected_depart,
            Leg::Inbound => self.selected_return,
        }
    }

    pub fn outbound_days(&self) -> Vec<CalendarDay> {
        self.days(self.depart, self.selected_depart)
    }

    /// Empty for one-way searches.
    pub fn inbound_days(&self) -> Vec<CalendarDay> {
        match self.ret {
            Some(ret) => self.days(ret, self.selected_return),
            None => Vec::new(),
        }
    }

    pub fn select(&mut self, leg: Leg, date: NaiveDate) -> Result<(), CalendarError> {
        let center = match leg {
            Leg::Outbound => self.depart,
            Leg::Inbound => self.ret.ok_or(CalendarError::NoReturnLeg)?,
        };
        if !window(center).contains(&date) {
            return Err(CalendarError::OutOfWindow(date));
        }
        if date < self.today {
            return Err(CalendarError::Unavailable(date));
        }

        match leg {
            Leg::Outbound => self.selected_depart = Some(date),
            Leg::Inbound => self.selected_return = Some(date),
        }
        Ok(())
    }

    /// Outbound picked, and inbound too on a round trip.
    pub fn can_continue(&self) -> bool {
        self.selected_depart.is_some() && (self.ret.is_none() || self.selected_return.is_some())
    }

    fn days(&self, center: NaiveDate, selected: Option<NaiveDate>) -> Vec<CalendarDay> {
        window(center)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                selected: selected == Some(date),
                unavailable: date < self.today,
            })
            .collect()
    }
}

/// Days past the representable calendar are left out.
fn window(center: NaiveDate) -> Vec<NaiveDate> {
    (0..WINDOW_DAYS)
        .filter_map(|i| center.checked_add_signed(Duration::days(i - LEAD_DAYS)))
        .collect()
}
