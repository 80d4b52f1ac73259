use crate::shared::usecase::UseCase;
use calendar_domain::{CalendarError, CalendarEvent, ID};
use calendar_infra::Context;

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
}

#[async_trait::async_trait]
impl UseCase for DeleteEventUseCase {
    type Response = CalendarEvent;
    type Error = CalendarError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let e = ctx.repos.events.get(&self.event_id).await?;
        ctx.repos.events.delete(&e).await?;
        Ok(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CreateEventUseCase;
    use crate::shared::usecase::execute;
    use calendar_infra::Config;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn removes_the_event_and_returns_it() {
        let ctx = Context::create_inmemory(Config::default());
        let created = execute(
            CreateEventUseCase {
                title: "standup".into(),
                starts_at: Utc.with_ymd_and_hms(2021, 1, 1, 9, 30, 0).unwrap(),
                ends_at: Utc.with_ymd_and_hms(2021, 1, 1, 9, 45, 0).unwrap(),
                notes: String::new(),
                owner_id: "alice".into(),
                alert_before_secs: 0,
            },
            &ctx,
        )
        .await
        .unwrap();

        let deleted = execute(DeleteEventUseCase { event_id: created.id }, &ctx)
            .await
            .unwrap();
        assert_eq!(deleted, created);

        let res = ctx.repos.events.get(&created.id).await;
        assert!(matches!(res, Err(CalendarError::NotFound)));
    }

    #[tokio::test]
    async fn deleting_an_unknown_event_is_not_found() {
        let ctx = Context::create_inmemory(Config::default());
        let res = execute(DeleteEventUseCase { event_id: ID::new() }, &ctx).await;
        assert!(matches!(res, Err(CalendarError::NotFound)));
    }
}
