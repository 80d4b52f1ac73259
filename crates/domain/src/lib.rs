mod alert;
pub mod date;
mod error;
mod event;
mod shared;

pub use alert::Alert;
pub use error::{CalendarError, CalendarResult};
pub use event::CalendarEvent;
pub use shared::entity::{InvalidIDError, ID};
