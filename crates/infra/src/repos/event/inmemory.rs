use super::IEventRepo;
use calendar_domain::{date, CalendarError, CalendarEvent, CalendarResult, ID};
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// The two co-located indexes guarded by one lock: a primary index by id and
/// a secondary index keyed by the calendar day of `starts_at`.
#[derive(Default)]
struct Indexes {
    by_id: HashMap<ID, CalendarEvent>,
    by_day: HashMap<NaiveDate, HashMap<ID, CalendarEvent>>,
}

pub struct InMemoryEventRepo {
    indexes: RwLock<Indexes>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            indexes: RwLock::new(Indexes::default()),
        }
    }

    /// Union the per-day buckets of a half-open window and sort the result,
    /// all under the shared lock so the whole window is one snapshot.
    fn window_list(&self, lo: DateTime<Utc>, hi: DateTime<Utc>) -> Vec<CalendarEvent> {
        let indexes = self.indexes.read().unwrap();
        let mut events = Vec::new();
        let mut day = lo.date_naive();
        let end = hi.date_naive();
        while day < end {
            if let Some(bucket) = indexes.by_day.get(&day) {
                events.extend(bucket.values().cloned());
            }
            day = day + Days::new(1);
        }
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
        events
    }
}

impl Default for InMemoryEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn get(&self, event_id: &ID) -> CalendarResult<CalendarEvent> {
        let indexes = self.indexes.read().unwrap();
        indexes
            .by_id
            .get(event_id)
            .cloned()
            .ok_or(CalendarError::NotFound)
    }

    async fn put(&self, e: &CalendarEvent) -> CalendarResult<()> {
        let mut indexes = self.indexes.write().unwrap();
        let day = date::iso_date(e.starts_at);

        if let Some(prev) = indexes.by_id.insert(e.id, e.clone()) {
            // An overwrite that moves the event to another day must also
            // move it between day buckets, or range listings go stale.
            let prev_day = date::iso_date(prev.starts_at);
            if prev_day != day {
                let emptied = match indexes.by_day.get_mut(&prev_day) {
                    Some(bucket) => {
                        bucket.remove(&e.id);
                        bucket.is_empty()
                    }
                    None => false,
                };
                if emptied {
                    indexes.by_day.remove(&prev_day);
                }
            }
        }

        indexes.by_day.entry(day).or_default().insert(e.id, e.clone());
        Ok(())
    }

    async fn delete(&self, e: &CalendarEvent) -> CalendarResult<()> {
        let mut indexes = self.indexes.write().unwrap();
        // Clean the day bucket of the *stored* event, not the caller's copy,
        // which may carry a stale date.
        let stored = indexes.by_id.remove(&e.id).ok_or(CalendarError::NotFound)?;
        let day = date::iso_date(stored.starts_at);
        let emptied = match indexes.by_day.get_mut(&day) {
            Some(bucket) => {
                bucket.remove(&e.id);
                bucket.is_empty()
            }
            None => false,
        };
        if emptied {
            indexes.by_day.remove(&day);
        }
        Ok(())
    }

    async fn get_day_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>> {
        let (lo, hi) = date::day_window(d);
        Ok(self.window_list(lo, hi))
    }

    async fn get_week_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>> {
        let (lo, hi) = date::week_window(d);
        Ok(self.window_list(lo, hi))
    }

    async fn get_month_list(&self, d: DateTime<Utc>) -> CalendarResult<Vec<CalendarEvent>> {
        let (lo, hi) = date::month_window(d);
        Ok(self.window_list(lo, hi))
    }

    async fn is_busy(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarResult<bool> {
        if !date::fits_one_day(start, end) {
            return Err(CalendarError::ValueError(
                "start and end must be of the same date".into(),
            ));
        }
        let (lo, hi) = date::day_window(start);
        let busy = self
            .window_list(lo, hi)
            .iter()
            .any(|e| e.starts_at < end && e.ends_at > start);
        Ok(busy)
    }
}
