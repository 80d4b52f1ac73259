use crate::event::{AgendaPeriod, GetAgendaUseCase};
use crate::shared::start_stop::StartStop;
use crate::shared::usecase::execute;
use anyhow::Context as _;
use calendar_domain::Alert;
use calendar_infra::Context;
use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodic alert generator.
///
/// Every tick queries the daily agenda of the day `notice_days` back from
/// now and turns each returned event into an [`Alert`] on the outbound
/// channel. Nothing records which alerts were already sent: an event still
/// inside the notice window is re-emitted on every tick.
pub struct AlertScheduler {
    ctx: Context,
    alerts: Option<mpsc::Sender<String>>,
    period: Duration,
    notice_days: i64,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl AlertScheduler {
    pub fn new(ctx: Context, alerts: mpsc::Sender<String>) -> Self {
        let period = Duration::from_secs(ctx.config.schedule_period_mins * 60);
        let notice_days = ctx.config.notice_days;
        Self {
            ctx,
            alerts: Some(alerts),
            period,
            notice_days,
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// Overrides the tick period taken from the configuration.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    async fn run(
        ctx: Context,
        alerts: mpsc::Sender<String>,
        period: Duration,
        notice_days: i64,
        cancel: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(period);
        // The first tick of an interval completes immediately; the first
        // batch should only go out after one full period.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    // Dropping `alerts` here closes the channel, which is
                    // how the publisher learns no more messages are coming.
                    info!("alert scheduler stopping");
                    return;
                }
                _ = interval.tick() => {
                    info!("attempting to make alerts...");
                    Self::make_alerts(&ctx, &alerts, notice_days).await;
                }
            }
        }
    }

    async fn make_alerts(ctx: &Context, alerts: &mpsc::Sender<String>, notice_days: i64) {
        let start = Utc::now() - ChronoDuration::days(notice_days);
        let usecase = GetAgendaUseCase {
            period: AgendaPeriod::Daily,
            start,
        };
        let events = match execute(usecase, ctx).await {
            Ok(events) => events,
            Err(e) => {
                error!("make alerts: {:?}", e);
                return;
            }
        };
        info!("queried {} event(s) to alert of...", events.len());

        for e in &events {
            match serde_json::to_string(&Alert::new(e)) {
                Ok(payload) => {
                    if alerts.send(payload).await.is_err() {
                        // Receiver is gone, nothing left to publish to.
                        return;
                    }
                }
                // A bad event must not sink the rest of the batch.
                Err(e) => error!("make alerts: {}", e),
            }
        }
    }
}

#[async_trait::async_trait]
impl StartStop for AlertScheduler {
    async fn start(&mut self) -> anyhow::Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }
        let alerts = self
            .alerts
            .take()
            .context("alert scheduler was already stopped")?;
        self.handle = Some(tokio::spawn(Self::run(
            self.ctx.clone(),
            alerts,
            self.period,
            self.notice_days,
            self.cancel.clone(),
        )));
        Ok(())
    }

    async fn stop(&mut self, deadline: Duration) -> anyhow::Result<()> {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            tokio::time::timeout(deadline, handle)
                .await
                .context("alert scheduler did not stop within the deadline")??;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_domain::CalendarEvent;
    use calendar_infra::Config;
    use serde_json::Value;

    fn scheduler_context() -> Context {
        let mut config = Config::default();
        config.notice_days = 0;
        Context::create_inmemory(config)
    }

    async fn seed_event_today(ctx: &Context) -> CalendarEvent {
        let now = Utc::now();
        let e = CalendarEvent::new(None, "dentist", now, now, "alice").unwrap();
        ctx.repos.events.put(&e).await.unwrap();
        e
    }

    #[tokio::test]
    async fn emits_an_alert_for_each_event_in_the_window() {
        let ctx = scheduler_context();
        let event = seed_event_today(&ctx).await;

        let (tx, mut rx) = mpsc::channel(4);
        let mut scheduler =
            AlertScheduler::new(ctx, tx).with_period(Duration::from_millis(20));
        scheduler.start().await.unwrap();

        let payload = rx.recv().await.unwrap();
        let alert: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(alert["eventId"], event.id.to_string().as_str());
        assert_eq!(alert["title"], "dentist");
        assert_eq!(alert["addressee"], "alice");

        scheduler.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn re_emits_alerts_on_every_tick() {
        let ctx = scheduler_context();
        let event = seed_event_today(&ctx).await;

        let (tx, mut rx) = mpsc::channel(4);
        let mut scheduler =
            AlertScheduler::new(ctx, tx).with_period(Duration::from_millis(20));
        scheduler.start().await.unwrap();

        let first: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        let second: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(first["eventId"], event.id.to_string().as_str());
        assert_eq!(second["eventId"], event.id.to_string().as_str());
        // Each emission is a distinct alert.
        assert_ne!(first["id"], second["id"]);

        scheduler.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn closes_the_channel_on_stop() {
        let ctx = scheduler_context();
        seed_event_today(&ctx).await;

        let (tx, mut rx) = mpsc::channel(4);
        let mut scheduler =
            AlertScheduler::new(ctx, tx).with_period(Duration::from_millis(20));
        scheduler.start().await.unwrap();
        scheduler.stop(Duration::from_secs(1)).await.unwrap();

        // Drain whatever was buffered; the channel must then report closed.
        while rx.recv().await.is_some() {}
    }
}
