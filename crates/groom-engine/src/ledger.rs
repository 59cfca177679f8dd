//! Storage port for bookings, unavailability and the waitlist.
//!
//! The availability calculator only needs two of these reads ("bookings for
//! (barber, date)" and "unavailability for (barber, date)"); the rest serve the
//! scheduler's write paths and the admin day sheet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::{Booking, Unavailability, WaitlistEntry};
use crate::error::{GroomError, Result};

pub trait Ledger {
    /// Bookings for one barber on one date, ordered by start time.
    fn bookings_for(&self, barber_id: &str, date: NaiveDate) -> Vec<Booking>;
    /// Bookings for every barber on one date, ordered by start time.
    fn bookings_on(&self, date: NaiveDate) -> Vec<Booking>;
    fn booking(&self, id: Uuid) -> Option<Booking>;
    fn unavailability_for(&self, barber_id: &str, date: NaiveDate) -> Vec<Unavailability>;
    /// Waitlist entries asking for `date`, in the order they joined.
    fn waitlist_on(&self, date: NaiveDate) -> Vec<WaitlistEntry>;

    fn insert_booking(&mut self, booking: Booking) -> Result<()>;
    /// Replace the stored booking that has the same id.
    fn update_booking(&mut self, booking: Booking) -> Result<()>;
    fn remove_booking(&mut self, id: Uuid) -> Result<Booking>;
    fn insert_unavailability(&mut self, record: Unavailability) -> Result<()>;
    fn remove_unavailability(&mut self, id: Uuid) -> Result<Unavailability>;
    fn insert_waitlist(&mut self, entry: WaitlistEntry) -> Result<()>;
}

/// In-process ledger. Serializes to the JSON data file used by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryLedger {
    bookings: Vec<Booking>,
    unavailability: Vec<Unavailability>,
    waitlist: Vec<WaitlistEntry>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn unavailability(&self) -> &[Unavailability] {
        &self.unavailability
    }

    pub fn waitlist(&self) -> &[WaitlistEntry] {
        &self.waitlist
    }
}

fn by_start(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.sort_by_key(|b| (b.start, b.barber_id.clone()));
    bookings
}

impl Ledger for MemoryLedger {
    fn bookings_for(&self, barber_id: &str, date: NaiveDate) -> Vec<Booking> {
        by_start(
            self.bookings
                .iter()
                .filter(|b| b.barber_id == barber_id && b.date == date)
                .cloned()
                .collect(),
        )
    }

    fn bookings_on(&self, date: NaiveDate) -> Vec<Booking> {
        by_start(
            self.bookings
                .iter()
                .filter(|b| b.date == date)
                .cloned()
                .collect(),
        )
    }

    fn booking(&self, id: Uuid) -> Option<Booking> {
        self.bookings.iter().find(|b| b.id == id).cloned()
    }

    fn unavailability_for(&self, barber_id: &str, date: NaiveDate) -> Vec<Unavailability> {
        self.unavailability
            .iter()
            .filter(|u| u.barber_id == barber_id && u.date == date)
            .cloned()
            .collect()
    }

    fn waitlist_on(&self, date: NaiveDate) -> Vec<WaitlistEntry> {
        let mut entries: Vec<WaitlistEntry> = self
            .waitlist
            .iter()
            .filter(|e| e.requested_date == Some(date))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.created_at);
        entries
    }

    fn insert_booking(&mut self, booking: Booking) -> Result<()> {
        self.bookings.push(booking);
        Ok(())
    }

    fn update_booking(&mut self, booking: Booking) -> Result<()> {
        let slot = self
            .bookings
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or(GroomError::BookingNotFound(booking.id))?;
        *slot = booking;
        Ok(())
    }

    fn remove_booking(&mut self, id: Uuid) -> Result<Booking> {
        let index = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(GroomError::BookingNotFound(id))?;
        Ok(self.bookings.remove(index))
    }

    fn insert_unavailability(&mut self, record: Unavailability) -> Result<()> {
        self.unavailability.push(record);
        Ok(())
    }

    fn remove_unavailability(&mut self, id: Uuid) -> Result<Unavailability> {
        let index = self
            .unavailability
            .iter()
            .position(|u| u.id == id)
            .ok_or(GroomError::UnavailabilityNotFound(id))?;
        Ok(self.unavailability.remove(index))
    }

    fn insert_waitlist(&mut self, entry: WaitlistEntry) -> Result<()> {
        self.waitlist.push(entry);
        Ok(())
    }
}
