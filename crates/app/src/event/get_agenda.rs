use crate::shared::usecase::UseCase;
use calendar_domain::{CalendarError, CalendarEvent};
use calendar_infra::Context;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaPeriod {
    Daily,
    Weekly,
    Monthly,
}

/// Lists the events of the day, week or month containing `start`,
/// ordered by start instant.
#[derive(Debug)]
pub struct GetAgendaUseCase {
    pub period: AgendaPeriod,
    pub start: DateTime<Utc>,
}

#[async_trait::async_trait]
impl UseCase for GetAgendaUseCase {
    type Response = Vec<CalendarEvent>;
    type Error = CalendarError;

    const NAME: &'static str = "GetAgenda";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        match self.period {
            AgendaPeriod::Daily => ctx.repos.events.get_day_list(self.start).await,
            AgendaPeriod::Weekly => ctx.repos.events.get_week_list(self.start).await,
            AgendaPeriod::Monthly => ctx.repos.events.get_month_list(self.start).await,
        }
    }
}
