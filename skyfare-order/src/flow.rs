use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use skyfare_catalog::Flight;
use skyfare_offer::DealLink;
use uuid::Uuid;

use crate::confirmation::ConfirmationCode;
use crate::models::{PassengerPatch, PassengerRecord, Selection, Step};
use crate::seats::SeatCode;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("Invalid step transition from {from} to {to}")]
    InvalidTransition { from: Step, to: Step },

    #[error("Only allowed on the {expected} step, booking is on {actual}")]
    NotInStep { expected: Step, actual: Step },

    #[error("Flight not offered: {0}")]
    FlightNotOffered(Uuid),

    #[error("Unknown seat: {0}")]
    UnknownSeat(String),

    #[error("Choose a seat before continuing")]
    SeatRequired,

    #[error("Passenger not found: {0}")]
    PassengerNotFound(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Confirmed(ConfirmationCode),
    /// Some passenger field is blank; nothing changed.
    Incomplete,
}

/// Requests the booking page can make, as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FlowAction {
    SelectFlight { flight_id: Uuid },
    SelectSeat { seat: String },
    Next,
    AddPassenger,
    UpdatePassenger { index: usize, patch: PassengerPatch },
    Submit,
}

/// One traveller's pass through the booking page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFlow {
    pub id: Uuid,
    pub step: Step,
    pub flights: Vec<Flight>,
    pub selection: Option<Selection>,
    pub seat: Option<SeatCode>,
    pub passengers: Vec<PassengerRecord>,
    pub confirmation: Option<ConfirmationCode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingFlow {
    fn new(step: Step, flights: Vec<Flight>, selection: Option<Selection>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            step,
            flights,
            selection,
            seat: None,
            passengers: Vec::new(),
            confirmation: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Entered from search results: the traveller still has to pick a flight.
    pub fn from_flights(flights: Vec<Flight>) -> Self {
        Self::new(Step::List, flights, None)
    }

    /// Entered from a deal card, which already fixes the selection.
    pub fn from_deal(deal: DealLink) -> Self {
        Self::new(Step::Seat, Vec::new(), Some(Selection::Deal(deal)))
    }

    /// Transition: List → Seat
    pub fn select_flight(&mut self, flight_id: Uuid) -> Result<(), FlowError> {
        self.expect_step(Step::List)?;

        let flight = self
            .flights
            .iter()
            .find(|f| f.id == flight_id)
            .cloned()
            .ok_or(FlowError::FlightNotOffered(flight_id))?;

        self.selection = Some(Selection::Flight(flight));
        self.advance_to(Step::Seat);
        Ok(())
    }

    /// Picking again replaces the earlier seat.
    pub fn select_seat(&mut self, seat: SeatCode) -> Result<(), FlowError> {
        self.expect_step(Step::Seat)?;
        self.seat = Some(seat);
        self.touch();
        Ok(())
    }

    pub fn can_advance(&self) -> bool {
        self.step == Step::Seat && self.seat.is_some()
    }

    /// Transition: Seat → Details, with one blank passenger row.
    pub fn next(&mut self) -> Result<(), FlowError> {
        self.expect_transition(Step::Seat, Step::Details)?;
        if self.seat.is_none() {
            return Err(FlowError::SeatRequired);
        }

        if self.passengers.is_empty() {
            self.passengers.push(PassengerRecord::default());
        }
        self.advance_to(Step::Details);
        Ok(())
    }

    pub fn add_passenger(&mut self) -> Result<usize, FlowError> {
        self.expect_step(Step::Details)?;
        self.passengers.push(PassengerRecord::default());
        self.touch();
        Ok(self.passengers.len() - 1)
    }

    pub fn update_passenger(&mut self, index: usize, patch: PassengerPatch) -> Result<(), FlowError> {
        self.expect_step(Step::Details)?;
        let passenger = self
            .passengers
            .get_mut(index)
            .ok_or(FlowError::PassengerNotFound(index))?;
        passenger.apply(patch);
        self.touch();
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.step == Step::Details && !self.passengers.is_empty() && self.passengers.iter().all(PassengerRecord::is_complete)
    }

    /// Transition: Details → Done. A form with blank fields is not an error,
    /// it just stays on Details.
    pub fn submit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SubmitOutcome, FlowError> {
        self.expect_transition(Step::Details, Step::Done)?;
        if !self.can_submit() {
            return Ok(SubmitOutcome::Incomplete);
        }

        let code = ConfirmationCode::generate(rng);
        self.confirmation = Some(code.clone());
        self.advance_to(Step::Done);
        Ok(SubmitOutcome::Confirmed(code))
    }

    /// Apply a client action. Only `Submit` produces an outcome.
    pub fn reduce<R: Rng + ?Sized>(&mut self, action: FlowAction, rng: &mut R) -> Result<Option<SubmitOutcome>, FlowError> {
        match action {
            FlowAction::SelectFlight { flight_id } => self.select_flight(flight_id)?,
            FlowAction::SelectSeat { seat } => self.select_seat(seat.parse()?)?,
            FlowAction::Next => self.next()?,
            FlowAction::AddPassenger => {
                self.add_passenger()?;
            }
            FlowAction::UpdatePassenger { index, patch } => self.update_passenger(index, patch)?,
            FlowAction::Submit => return self.submit(rng).map(Some),
        }
        Ok(None)
    }

    fn expect_transition(&self, from: Step, to: Step) -> Result<(), FlowError> {
        if self.step != from {
            return Err(FlowError::InvalidTransition { from: self.step, to });
        }
        Ok(())
    }

    fn expect_step(&self, expected: Step) -> Result<(), FlowError> {
        if self.step != expected {
            return Err(FlowError::NotInStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    fn advance_to(&mut self, step: Step) {
        self.step = step;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
