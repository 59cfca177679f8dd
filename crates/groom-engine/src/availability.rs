//! Bookable start times for one barber on one day.
//!
//! The calculator is a pure function over snapshots: the shop calendar, the
//! barber's bookings for the day and the barber's unavailability for the day.
//! It keeps no state between calls and never fails; anything it cannot place
//! simply does not appear in the result.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::booking::{Booking, Unavailability};
use crate::schedule::ShopCalendar;
use crate::window::overlaps;

/// List the start times at which a service of `duration_minutes` can be booked.
///
/// Candidate starts sit on a fixed grid: from opening time in steps of the
/// calendar's slot interval, keeping only boundaries where a whole interval
/// still fits before closing. The grid does not depend on the service
/// duration, so a long service can still only start on a grid boundary.
///
/// A candidate `s` survives when:
/// - `s` is not inside a break window,
/// - `s + duration` does not run past closing time,
/// - `[s, s + duration)` overlaps no break, no unavailability window and no
///   booking (all half-open).
///
/// A full-day unavailability record empties the day. Bookings and
/// unavailability records dated on another day are ignored. Past dates are not
/// rejected here; that is the caller's job.
///
/// # Arguments
///
/// * `calendar` -- Opening hours, breaks and slot interval.
/// * `date` -- The day being booked.
/// * `duration_minutes` -- Length of the requested service.
/// * `bookings` -- The barber's existing bookings for `date`.
/// * `unavailability` -- The barber's unavailability records for `date`.
pub fn available_start_times(
    calendar: &ShopCalendar,
    date: NaiveDate,
    duration_minutes: u32,
    bookings: &[Booking],
    unavailability: &[Unavailability],
) -> Vec<NaiveTime> {
    let Some(hours) = calendar.hours.hours_on(date) else {
        return Vec::new();
    };

    let blocks: Vec<&Unavailability> = unavailability.iter().filter(|u| u.date == date).collect();
    if blocks.iter().any(|u| u.is_full_day()) {
        return Vec::new();
    }

    // Everything the requested interval must stay clear of, anchored to `date`.
    let mut busy: Vec<(NaiveDateTime, NaiveDateTime)> = calendar
        .breaks
        .iter()
        .map(|b| b.on(date))
        .collect();
    busy.extend(blocks.iter().filter_map(|u| u.window.map(|w| w.on(date))));
    busy.extend(bookings.iter().filter(|b| b.date == date).map(Booking::span));

    let (open, close) = hours.on(date);
    let step = Duration::minutes(i64::from(calendar.slot_interval_minutes));
    let length = Duration::minutes(i64::from(duration_minutes));

    if step <= Duration::zero() {
        return Vec::new();
    }

    let mut starts = Vec::new();
    let mut boundary = open;

    while boundary + step <= close {
        let start = boundary;
        boundary += step;

        if calendar.breaks.iter().any(|b| b.contains(start.time())) {
            continue;
        }

        let end = start + length;
        if end > close {
            continue;
        }

        if busy
            .iter()
            .any(|&(busy_start, busy_end)| overlaps(start, end, busy_start, busy_end))
        {
            continue;
        }

        starts.push(start.time());
    }

    starts
}

