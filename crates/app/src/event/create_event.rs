use crate::shared::usecase::UseCase;
use calendar_domain::{CalendarError, CalendarEvent};
use calendar_infra::Context;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub notes: String,
    pub owner_id: String,
    pub alert_before_secs: i64,
}

#[async_trait::async_trait]
impl UseCase for CreateEventUseCase {
    type Response = CalendarEvent;
    type Error = CalendarError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        // A create always mints a fresh id.
        let mut e = CalendarEvent::new(None, &self.title, self.starts_at, self.ends_at, &self.owner_id)?;
        e.notes = self.notes.clone();
        e.alert_before_secs = self.alert_before_secs;

        ctx.repos.events.put(&e).await?;
        Ok(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use calendar_infra::Config;
    use chrono::TimeZone;

    fn test_context() -> Context {
        Context::create_inmemory(Config::default())
    }

    #[tokio::test]
    async fn creates_and_stores_an_event() {
        let ctx = test_context();
        let usecase = CreateEventUseCase {
            title: "standup".into(),
            starts_at: Utc.with_ymd_and_hms(2021, 1, 1, 9, 30, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2021, 1, 1, 9, 45, 0).unwrap(),
            notes: "daily sync".into(),
            owner_id: "alice".into(),
            alert_before_secs: 300,
        };

        let created = execute(usecase, &ctx).await.unwrap();
        assert_eq!(created.notes, "daily sync");
        assert_eq!(created.alert_before_secs, 300);

        let stored = ctx.repos.events.get(&created.id).await.unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn rejects_an_event_spanning_two_days() {
        let ctx = test_context();
        let usecase = CreateEventUseCase {
            title: "late party".into(),
            starts_at: Utc.with_ymd_and_hms(2021, 1, 1, 23, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2021, 1, 2, 1, 0, 0).unwrap(),
            notes: String::new(),
            owner_id: "alice".into(),
            alert_before_secs: 0,
        };

        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(CalendarError::ValueError(_))));
    }
}
