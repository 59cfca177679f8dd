//! Records owned by the ledger: bookings, barber unavailability and the waitlist.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::window::{hhmm, TimeWindow};

/// A confirmed appointment. `end` is always `start + service duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub barber_id: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The booking as an absolute `[start, end)` interval.
    pub fn span(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.date.and_time(self.start), self.date.and_time(self.end))
    }
}

/// An ad-hoc block on a barber's day. No window means the whole day is blocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unavailability {
    pub id: Uuid,
    pub barber_id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    #[serde(default)]
    pub reason: String,
}

impl Unavailability {
    pub fn is_full_day(&self) -> bool {
        self.window.is_none()
    }
}

/// A customer waiting for a slot to open up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
