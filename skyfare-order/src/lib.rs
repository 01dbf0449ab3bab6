pub mod confirmation;
pub mod flow;
pub mod models;
pub mod seats;

pub use confirmation::ConfirmationCode;
pub use flow::{BookingFlow, FlowAction, FlowError, SubmitOutcome};
pub use models::{PassengerPatch, PassengerRecord, Selection, Step};
pub use seats::{seat_map, SeatCode};
