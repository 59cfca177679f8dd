//! Detect overlapping bookings for the same barber.
//!
//! Only bookings for the same barber on the same date can clash. Back-to-back
//! bookings (one ends exactly when the next starts) are NOT conflicts.

use chrono::{NaiveDate, NaiveTime};

use crate::booking::Booking;
use crate::window::overlaps;

/// An existing booking that a candidate interval runs into.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub existing: Booking,
    pub overlap_minutes: i64,
}

/// Two stored bookings that overlap each other.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleBooking {
    pub first: Booking,
    pub second: Booking,
    pub overlap_minutes: i64,
}

fn overlap_minutes(a: &Booking, b_start: NaiveTime, b_end: NaiveTime) -> i64 {
    let start = a.start.max(b_start);
    let end = a.end.min(b_end);
    (end - start).num_minutes()
}

/// Find every booking for `barber_id` on `date` that overlaps `[start, end)`.
pub fn find_conflicts(
    bookings: &[Booking],
    barber_id: &str,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Vec<Conflict> {
    bookings
        .iter()
        .filter(|b| b.barber_id == barber_id && b.date == date)
        .filter(|b| overlaps(b.start, b.end, start, end))
        .map(|b| Conflict {
            existing: b.clone(),
            overlap_minutes: overlap_minutes(b, start, end),
        })
        .collect()
}

/// Find all pairs of stored bookings that double-book a barber.
///
/// A healthy ledger returns an empty list; the admin day sheet uses this to
/// flag records written before the booking lock existed.
pub fn find_double_bookings(bookings: &[Booking]) -> Vec<DoubleBooking> {
    let mut clashes = Vec::new();

    for (i, a) in bookings.iter().enumerate() {
        for b in &bookings[i + 1..] {
            if a.barber_id != b.barber_id || a.date != b.date {
                continue;
            }
            if overlaps(a.start, a.end, b.start, b.end) {
                clashes.push(DoubleBooking {
                    first: a.clone(),
                    second: b.clone(),
                    overlap_minutes: overlap_minutes(a, b.start, b.end),
                });
            }
        }
    }

    clashes
}
