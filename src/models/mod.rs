pub mod event;
pub mod ticket;
pub mod user;

pub use event::{Event, EventOverview, NewEvent};
pub use ticket::{Ticket, TicketSummary};
pub use user::User;
