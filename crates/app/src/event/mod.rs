mod create_event;
mod delete_event;
mod get_agenda;
mod get_event;
mod update_event;

pub use create_event::CreateEventUseCase;
pub use delete_event::DeleteEventUseCase;
pub use get_agenda::{AgendaPeriod, GetAgendaUseCase};
pub use get_event::GetEventUseCase;
pub use update_event::UpdateEventUseCase;
