//! Free and busy periods within one barber's working day.
//!
//! Sorts busy periods (breaks, unavailability, bookings) by start time, merges
//! overlapping ones, then computes the gaps between them inside opening hours.
//! Used by the admin day sheet; booking decisions go through
//! [`crate::availability`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::booking::{Booking, Unavailability};
use crate::schedule::ShopCalendar;

/// A stretch of the working day with nothing scheduled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeWindow {
    #[serde(with = "crate::window::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "crate::window::hhmm")]
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

type Interval = (NaiveDateTime, NaiveDateTime);

/// Merge overlapping or adjacent busy periods, clipped to the given window.
///
/// Returns a sorted, non-overlapping list of (start, end) intervals.
fn merge_busy_periods(mut intervals: Vec<Interval>, window: Interval) -> Vec<Interval> {
    let (window_start, window_end) = window;
    intervals.retain(|&(start, end)| start < window_end && end > window_start);
    for interval in &mut intervals {
        interval.0 = interval.0.max(window_start);
        interval.1 = interval.1.min(window_end);
    }

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<Interval> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Free windows in a barber's day, sorted by start time.
///
/// Returns an empty list on closed days and on days with a full-day block.
pub fn free_windows(
    calendar: &ShopCalendar,
    date: NaiveDate,
    bookings: &[Booking],
    unavailability: &[Unavailability],
) -> Vec<FreeWindow> {
    let Some(hours) = calendar.hours.hours_on(date) else {
        return Vec::new();
    };
    let day_blocks: Vec<&Unavailability> =
        unavailability.iter().filter(|u| u.date == date).collect();
    if day_blocks.iter().any(|u| u.is_full_day()) {
        return Vec::new();
    }

    let mut busy: Vec<Interval> = calendar.breaks.iter().map(|b| b.on(date)).collect();
    busy.extend(day_blocks.iter().filter_map(|u| u.window.map(|w| w.on(date))));
    busy.extend(bookings.iter().filter(|b| b.date == date).map(Booking::span));

    let (open, close) = hours.on(date);
    let merged = merge_busy_periods(busy, (open, close));

    let mut free = Vec::new();
    let mut cursor = open;

    for (busy_start, busy_end) in merged {
        if cursor < busy_start {
            free.push(FreeWindow {
                start: cursor.time(),
                end: busy_start.time(),
                duration_minutes: (busy_start - cursor).num_minutes(),
            });
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < close {
        free.push(FreeWindow {
            start: cursor.time(),
            end: close.time(),
            duration_minutes: (close - cursor).num_minutes(),
        });
    }

    free
}
