pub mod event;
pub mod queue;
pub mod scheduler;
pub mod shared;

pub use event::{
    AgendaPeriod, CreateEventUseCase, DeleteEventUseCase, GetAgendaUseCase, GetEventUseCase,
    UpdateEventUseCase,
};
pub use queue::{AlertConsumer, AlertProducer};
pub use scheduler::AlertScheduler;
pub use shared::start_stop::StartStop;
pub use shared::usecase::{execute, UseCase};
