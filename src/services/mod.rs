pub mod booking;
pub mod catalog;
pub mod credentials;
pub mod ledger;

pub use booking::{attempt_booking, BookingError, BookingOutcome, RejectionReason};
