use super::IEventRepo;
use calendar_domain::{date, CalendarError, CalendarEvent, CalendarResult, ID};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn window_list(
        &self,
        lo: DateTime<Utc>,
        hi: DateTime<Utc>,
    ) -> CalendarResult<Vec<CalendarEvent>> {
        let rows = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT id, owner, title, notes, start_at, end_at, alert_before
            FROM events
            WHERE start_at >= $1 AND start_at < $2
            ORDER BY start_at ASC, id ASC
            "#,
        )
        .bind(lo)
        .bind(hi)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    id: Uuid,
    owner: String,
    title: String,
    notes: String,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    alert_before: i64,
}

impl From<EventRaw> for CalendarEvent {
    fn from(raw: EventRaw) -> Self {
        CalendarEvent {
            id: raw.id.into(),
            title: raw.title,
            // Normalize on the way out as well, so rows written by other
            // tooling still compare equal after a round trip.
            starts_at: date::truncate_to_seconds(raw.start_at),
            ends_at: date::truncate_to_seconds(raw.end_at),
            notes: raw.notes,
            owner_id: raw.owner,
            alert_before_secs: raw.alert_before,
        }
    }
}

fn map_sqlx_err(e: sqlx::Error) -> CalendarError {
    match e {
        sqlx::Error::RowNotFound => CalendarError::NotFound,
        e => CalendarError::DataError(e.into()),
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn get(&self, event_id: &ID) -> CalendarResult<CalendarEvent> {
        let raw = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT id, owner, title, notes, start_at, end_at, alert_before
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(raw.into())
    }

    async fn put(&self, e: &CalendarEvent) -> CalendarResult<()> {
        sqlx::query(
            r#"
            INSERT INTO events (id, owner, title, notes, start_at, end_at, alert_before)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET owner = EXCLUDED.owner,
                title = EXCLUDED.title,
                notes = EXCLUDED.notes,
                start_at = EXCLUDED.start_at,
                end_at = EXCLUDED.end_at,
                alert_before = EXCLUDED.alert_before
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.owner_id)
        .bind(&e.title)
        .bind(&e.notes)
        .bind(e.starts_at)
        .bind(e.ends_at)
        .bind(e.alert_before_secs)
        .execute(&self.pool)
        .await
        .map_err(|e| CalendarError::DataError(e.into()))?;

        Ok(())
    }

    async fn delete(&self, e: &CalendarEvent) -> CalendarResult<()> {
        let res = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(e.id.inner_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| CalendarError::DataError(e.into()))?;

        if res.rows_affected() == 0 {
            return Err(CalendarError::NotFound);
        }
        Ok(())
    }

    async fn get_day_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>> {
        let (lo, hi) = date::day_window(d);
        self.window_list(lo, hi).await
    }

    async fn get_week_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>> {
        let (lo, hi) = date::week_window(d);
        self.window_list(lo, hi).await
    }

    async fn get_month_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>> {
        let (lo, hi) = date::month_window(d);
        self.window_list(lo, hi).await
    }

    async fn is_busy(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarResult<bool> {
        if !date::fits_one_day(start, end) {
            return Err(CalendarError::ValueError(
                "start and end must be of the same date".into(),
            ));
        }

        // Overlap is computed inside the database instead of loading rows.
        // Spelled out rather than OVERLAPS: a zero-length window must give
        // the same answer as the in-memory predicate.
        let overlaps = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM events WHERE start_at < $2 AND end_at > $1",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CalendarError::DataError(e.into()))?;

        Ok(overlaps > 0)
    }
}
