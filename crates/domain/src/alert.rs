use crate::event::CalendarEvent;
use crate::shared::entity::ID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transient notification record derived from a due event.
///
/// Alerts are never persisted; they exist only to be serialized and handed
/// to the broker once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: ID,
    pub event_id: ID,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub addressee: String,
}

impl Alert {
    pub fn new(e: &CalendarEvent) -> Self {
        Self {
            id: ID::new(),
            event_id: e.id,
            title: e.title.clone(),
            start_at: e.starts_at,
            addressee: e.owner_id.clone(),
        }
    }
}
