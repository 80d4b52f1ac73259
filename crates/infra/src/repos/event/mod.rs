mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

use calendar_domain::{CalendarEvent, CalendarResult, ID};
use chrono::{DateTime, Utc};

/// Storage contract for calendar events.
///
/// Backends are behaviorally interchangeable: callers depend on this trait
/// only and never on backend-specific types. Range listings are ordered by
/// `starts_at` ascending (ties broken by id) and cover half-open windows
/// computed by `calendar_domain::date`.
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn get(&self, event_id: &ID) -> CalendarResult<CalendarEvent>;
    /// Upsert: insert if absent, full overwrite if present.
    async fn put(&self, e: &CalendarEvent) -> CalendarResult<()>;
    async fn delete(&self, e: &CalendarEvent) -> CalendarResult<()>;
    async fn get_day_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>>;
    async fn get_week_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>>;
    async fn get_month_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>>;
    /// True iff any stored event on `start`'s day overlaps `(start, end)`.
    /// Fails with a value error when `start` and `end` span two days.
    async fn is_busy(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarResult<bool>;
}
