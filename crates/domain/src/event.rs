use crate::date::{fits_one_day, truncate_to_seconds};
use crate::error::CalendarError;
use crate::shared::entity::ID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The central calendar entity.
///
/// Construction goes through [`CalendarEvent::new`], which enforces the one
/// non-trivial business rule of the system: start and end must fall on the
/// same calendar day. Timestamps are truncated to whole seconds so that a
/// stored event compares equal to a re-read one on every backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: ID,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub notes: String,
    pub owner_id: String,
    /// How long before `starts_at` an alert is considered due, in seconds.
    /// Stored and round-tripped, but the scheduler's due-check uses a global
    /// notice window instead of this per-event offset.
    pub alert_before_secs: i64,
}

impl CalendarEvent {
    /// Create a validated event. A fresh id is minted when `id` is `None`.
    pub fn new(
        id: Option<ID>,
        title: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        owner_id: &str,
    ) -> Result<Self, CalendarError> {
        if !fits_one_day(starts_at, ends_at) {
            return Err(CalendarError::ValueError(
                "start and end must be of the same date".into(),
            ));
        }

        Ok(Self {
            id: id.unwrap_or_default(),
            title: title.into(),
            starts_at: truncate_to_seconds(starts_at),
            ends_at: truncate_to_seconds(ends_at),
            notes: String::new(),
            owner_id: owner_id.into(),
            alert_before_secs: 0,
        })
    }
}
