use crate::shared::usecase::UseCase;
use calendar_domain::{CalendarError, CalendarEvent, ID};
use calendar_infra::Context;
use chrono::{DateTime, Utc};

/// Replaces the stored event under `event_id` wholesale. Saving under an
/// unknown id inserts rather than fails, mirroring the storage upsert.
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub notes: String,
    pub owner_id: String,
    pub alert_before_secs: i64,
}

#[async_trait::async_trait]
impl UseCase for UpdateEventUseCase {
    type Response = CalendarEvent;
    type Error = CalendarError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let mut e = CalendarEvent::new(
            Some(self.event_id),
            &self.title,
            self.starts_at,
            self.ends_at,
            &self.owner_id,
        )?;
        e.notes = self.notes.clone();
        e.alert_before_secs = self.alert_before_secs;

        ctx.repos.events.put(&e).await?;
        Ok(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CreateEventUseCase;
    use crate::shared::usecase::execute;
    use calendar_infra::Config;
    use chrono::TimeZone;

    #[tokio::test]
    async fn overwrites_an_existing_event_in_place() {
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

        let updated = execute(
            UpdateEventUseCase {
                event_id: created.id,
                title: "standup (moved)".into(),
                starts_at: Utc.with_ymd_and_hms(2021, 1, 1, 10, 0, 0).unwrap(),
                ends_at: Utc.with_ymd_and_hms(2021, 1, 1, 10, 15, 0).unwrap(),
                notes: String::new(),
                owner_id: "alice".into(),
                alert_before_secs: 60,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(updated.id, created.id);

        let stored = ctx.repos.events.get(&created.id).await.unwrap();
        assert_eq!(stored.title, "standup (moved)");
        assert_eq!(stored.alert_before_secs, 60);
    }
}
