use crate::shared::usecase::UseCase;
use calendar_domain::{CalendarError, CalendarEvent, ID};
use calendar_infra::Context;

#[derive(Debug)]
pub struct GetEventUseCase {
    pub event_id: ID,
}

#[async_trait::async_trait]
impl UseCase for GetEventUseCase {
    type Response = CalendarEvent;
    type Error = CalendarError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        ctx.repos.events.get(&self.event_id).await
    }
}
