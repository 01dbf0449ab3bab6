use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::flow::FlowError;

pub const SEAT_COUNT: u8 = 30;
const ROW: char = 'A';

/// A seat on the single-row cabin map, `A1` to `A30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatCode(u8);

impl SeatCode {
    pub fn number(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for SeatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ROW, self.0)
    }
}

impl FromStr for SeatCode {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FlowError::UnknownSeat(s.to_string());
        let rest = s.trim().strip_prefix(ROW).ok_or_else(unknown)?;
        let n: u8 = rest.parse().map_err(|_| unknown())?;
        if (1..=SEAT_COUNT).contains(&n) && !rest.starts_with('0') {
            Ok(SeatCode(n))
        } else {
            Err(unknown())
        }
    }
}

impl TryFrom<String> for SeatCode {
    type Error = FlowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatCode> for String {
    fn from(seat: SeatCode) -> Self {
        seat.to_string()
    }
}

pub fn seat_map() -> Vec<SeatCode> {
    (1..=SEAT_COUNT).map(SeatCode).collect()
}
