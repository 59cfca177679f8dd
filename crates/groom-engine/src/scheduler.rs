//! Booking operations on top of the availability calculator.
//!
//! The scheduler owns the ledger behind a single mutex. Every write that
//! depends on availability (booking, rescheduling) recomputes the free start
//! times and performs the write while holding that lock, so two requests for
//! the same slot cannot both pass the check.

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::availability::available_start_times;
use crate::booking::{Booking, Unavailability, WaitlistEntry};
use crate::catalog::{Barber, BarberRoster, ServiceCatalog};
use crate::config::ShopConfig;
use crate::conflict::{find_double_bookings, DoubleBooking};
use crate::error::{GroomError, Result};
use crate::freebusy::{free_windows, FreeWindow};
use crate::ledger::Ledger;
use crate::schedule::ShopCalendar;
use crate::window::TimeWindow;

/// A customer's request for a specific slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub barber_id: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaitlistRequest {
    pub name: String,
    pub phone: String,
    pub notes: String,
    pub requested_date: Option<NaiveDate>,
}

/// One barber's free time on the day sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarberDay {
    pub barber: Barber,
    pub free: Vec<FreeWindow>,
}

/// Everything the front desk needs for one date.
#[derive(Debug, Clone)]
pub struct DaySheet {
    pub date: NaiveDate,
    /// All barbers' bookings, ordered by start time.
    pub bookings: Vec<Booking>,
    pub waitlist: Vec<WaitlistEntry>,
    pub barbers: Vec<BarberDay>,
    /// Overlapping bookings already in the ledger. Empty for a healthy ledger.
    pub double_bookings: Vec<DoubleBooking>,
}

pub struct Scheduler<L> {
    calendar: ShopCalendar,
    catalog: ServiceCatalog,
    roster: BarberRoster,
    ledger: Mutex<L>,
}

fn required(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GroomError::MissingContact(field));
    }
    Ok(trimmed.to_string())
}

fn reject_past(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date < today {
        return Err(GroomError::PastDate(date));
    }
    Ok(())
}

impl<L: Ledger> Scheduler<L> {
    pub fn new(
        calendar: ShopCalendar,
        catalog: ServiceCatalog,
        roster: BarberRoster,
        ledger: L,
    ) -> Self {
        Self {
            calendar,
            catalog,
            roster,
            ledger: Mutex::new(ledger),
        }
    }

    pub fn from_config(config: &ShopConfig, ledger: L) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.calendar(),
            config.catalog()?,
            config.roster()?,
            ledger,
        ))
    }

    pub fn calendar(&self) -> &ShopCalendar {
        &self.calendar
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn roster(&self) -> &BarberRoster {
        &self.roster
    }

    /// Give the ledger back, e.g. to persist it.
    pub fn into_ledger(self) -> L {
        self.ledger.into_inner()
    }

    /// Free start times for a barber, service and date.
    ///
    /// # Errors
    /// `UnknownBarber` / `UnknownService` for ids missing from the roster or
    /// catalog. Never substitutes another service.
    pub fn available_start_times(
        &self,
        barber_id: &str,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>> {
        self.roster.get(barber_id)?;
        let duration = self.catalog.duration_of(service_id)?;
        let ledger = self.ledger.lock();
        Ok(self.free_starts(&*ledger, barber_id, date, duration, None))
    }

    /// Days of a month that are not in the past and still have a free start.
    pub fn bookable_days(
        &self,
        barber_id: &str,
        service_id: &str,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        self.roster.get(barber_id)?;
        let duration = self.catalog.duration_of(service_id)?;
        let first =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(GroomError::InvalidMonth { year, month })?;

        let ledger = self.ledger.lock();
        Ok(first
            .iter_days()
            .take_while(|d| d.month() == month)
            .filter(|d| *d >= today)
            .filter(|d| {
                !self
                    .free_starts(&*ledger, barber_id, *d, duration, None)
                    .is_empty()
            })
            .collect())
    }

    /// Book a slot. The availability check and the insert happen under one lock.
    ///
    /// # Errors
    /// `UnknownBarber`, `UnknownService`, `MissingContact`, `PastDate`, or
    /// `SlotUnavailable` when `request.start` is not a free start time.
    pub fn book(&self, request: BookingRequest, today: NaiveDate) -> Result<Booking> {
        self.roster.get(&request.barber_id)?;
        let duration = self.catalog.duration_of(&request.service_id)?;
        let customer_name = required(&request.customer_name, "name")?;
        let customer_phone = required(&request.customer_phone, "phone")?;
        reject_past(request.date, today)?;

        let mut ledger = self.ledger.lock();
        let free = self.free_starts(&*ledger, &request.barber_id, request.date, duration, None);
        if !free.contains(&request.start) {
            warn!(
                barber = %request.barber_id,
                date = %request.date,
                start = %request.start,
                "requested slot is not available"
            );
            return Err(GroomError::SlotUnavailable {
                date: request.date,
                start: request.start,
            });
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            end: end_time(request.start, duration),
            barber_id: request.barber_id,
            service_id: request.service_id,
            customer_name,
            customer_phone,
            date: request.date,
            start: request.start,
            notes: request.notes.trim().to_string(),
            created_at: Utc::now(),
        };
        ledger.insert_booking(booking.clone())?;

        info!(
            booking = %booking.id,
            barber = %booking.barber_id,
            date = %booking.date,
            start = %booking.start,
            "booking confirmed"
        );
        Ok(booking)
    }

    pub fn cancel(&self, booking_id: Uuid) -> Result<Booking> {
        let removed = self.ledger.lock().remove_booking(booking_id)?;
        info!(booking = %booking_id, date = %removed.date, "booking cancelled");
        Ok(removed)
    }

    /// Move a booking to a new date and start time.
    ///
    /// Availability is computed as if the booking being moved were not there,
    /// so a booking can shift within its own current slot.
    pub fn reschedule(
        &self,
        booking_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        today: NaiveDate,
    ) -> Result<Booking> {
        reject_past(date, today)?;

        let mut ledger = self.ledger.lock();
        let current = ledger
            .booking(booking_id)
            .ok_or(GroomError::BookingNotFound(booking_id))?;
        let duration = self.catalog.duration_of(&current.service_id)?;

        let free = self.free_starts(&*ledger, &current.barber_id, date, duration, Some(booking_id));
        if !free.contains(&start) {
            return Err(GroomError::SlotUnavailable { date, start });
        }

        let moved = Booking {
            date,
            start,
            end: end_time(start, duration),
            ..current
        };
        ledger.update_booking(moved.clone())?;

        info!(booking = %booking_id, date = %date, start = %start, "booking rescheduled");
        Ok(moved)
    }

    pub fn join_waitlist(&self, request: WaitlistRequest) -> Result<WaitlistEntry> {
        let entry = WaitlistEntry {
            id: Uuid::new_v4(),
            name: required(&request.name, "name")?,
            phone: required(&request.phone, "phone")?,
            notes: request.notes.trim().to_string(),
            requested_date: request.requested_date,
            created_at: Utc::now(),
        };
        self.ledger.lock().insert_waitlist(entry.clone())?;
        debug!(entry = %entry.id, "joined waitlist");
        Ok(entry)
    }

    /// Waitlist entries asking for `date`, oldest first.
    pub fn waitlist_on(&self, date: NaiveDate) -> Vec<WaitlistEntry> {
        self.ledger.lock().waitlist_on(date)
    }

    /// Block part of (or, with `window = None`, all of) a barber's day.
    ///
    /// Existing bookings inside the block are left alone; they still show on
    /// the day sheet for the front desk to deal with.
    pub fn block(
        &self,
        barber_id: &str,
        date: NaiveDate,
        window: Option<TimeWindow>,
        reason: &str,
    ) -> Result<Unavailability> {
        self.roster.get(barber_id)?;
        let record = Unavailability {
            id: Uuid::new_v4(),
            barber_id: barber_id.to_string(),
            date,
            window,
            reason: reason.trim().to_string(),
        };
        self.ledger.lock().insert_unavailability(record.clone())?;
        info!(barber = %barber_id, date = %date, "barber marked unavailable");
        Ok(record)
    }

    pub fn unblock(&self, id: Uuid) -> Result<Unavailability> {
        self.ledger.lock().remove_unavailability(id)
    }

    pub fn day_sheet(&self, date: NaiveDate) -> DaySheet {
        let ledger = self.ledger.lock();
        let bookings = ledger.bookings_on(date);

        let barbers = self
            .roster
            .by_name()
            .into_iter()
            .map(|barber| BarberDay {
                free: free_windows(
                    &self.calendar,
                    date,
                    &ledger.bookings_for(&barber.id, date),
                    &ledger.unavailability_for(&barber.id, date),
                ),
                barber: barber.clone(),
            })
            .collect();

        DaySheet {
            date,
            double_bookings: find_double_bookings(&bookings),
            waitlist: ledger.waitlist_on(date),
            bookings,
            barbers,
        }
    }

    fn free_starts(
        &self,
        ledger: &L,
        barber_id: &str,
        date: NaiveDate,
        duration: u32,
        ignoring: Option<Uuid>,
    ) -> Vec<NaiveTime> {
        let mut bookings = ledger.bookings_for(barber_id, date);
        if let Some(id) = ignoring {
            bookings.retain(|b| b.id != id);
        }
        let blocks = ledger.unavailability_for(barber_id, date);
        available_start_times(&self.calendar, date, duration, &bookings, &blocks)
    }
}

fn end_time(start: NaiveTime, duration_minutes: u32) -> NaiveTime {
    start + chrono::Duration::minutes(i64::from(duration_minutes))
}
