//! Tests for booking, cancellation, rescheduling, waitlist and unavailability.

use chrono::{NaiveDate, NaiveTime};
use groom_engine::ledger::Ledger;
use groom_engine::window::TimeWindow;
use groom_engine::{
    BookingRequest, GroomError, MemoryLedger, Scheduler, ShopConfig, WaitlistRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn scheduler() -> Scheduler<MemoryLedger> {
    Scheduler::from_config(&ShopConfig::builtin().unwrap(), MemoryLedger::new()).unwrap()
}

fn request(barber: &str, service: &str, date: &str, start: &str) -> BookingRequest {
    BookingRequest {
        barber_id: barber.to_string(),
        service_id: service.to_string(),
        customer_name: "  Kevin  ".to_string(),
        customer_phone: "+2305123456".to_string(),
        date: d(date),
        start: t(start),
        notes: String::new(),
    }
}

const MONDAY: &str = "2026-03-16";
const TODAY: &str = "2026-03-10";

fn today() -> NaiveDate {
    d(TODAY)
}

// ── Booking ─────────────────────────────────────────────────────────────────

#[test]
fn booking_sets_end_from_service_duration() {
    let s = scheduler();

    let booking = s
        .book(request("alex", "haircut-beard", MONDAY, "09:30"), today())
        .unwrap();

    assert_eq!(booking.start, t("09:30"));
    assert_eq!(booking.end, t("10:15"));
    assert_eq!(booking.customer_name, "Kevin");
    assert_eq!(booking.date, d(MONDAY));
}

#[test]
fn booked_slot_disappears_for_that_barber_only() {
    let s = scheduler();
    s.book(request("alex", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap();

    let alex = s
        .available_start_times("alex", "mens-haircut", d(MONDAY))
        .unwrap();
    let sam = s
        .available_start_times("sam", "mens-haircut", d(MONDAY))
        .unwrap();

    assert!(!alex.contains(&t("09:30")));
    assert!(sam.contains(&t("09:30")));
    assert_eq!(sam.len(), alex.len() + 1);
}

#[test]
fn double_booking_same_slot_rejected() {
    let s = scheduler();
    s.book(request("alex", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap();

    let err = s
        .book(request("alex", "beard-trim", MONDAY, "09:30"), today())
        .unwrap_err();

    assert!(matches!(err, GroomError::SlotUnavailable { .. }), "got {err:?}");
}

#[test]
fn off_grid_start_rejected() {
    let s = scheduler();

    let err = s
        .book(request("alex", "mens-haircut", MONDAY, "09:00"), today())
        .unwrap_err();

    assert!(matches!(err, GroomError::SlotUnavailable { .. }));
}

#[test]
fn closed_day_rejected() {
    let s = scheduler();

    let err = s
        .book(request("alex", "mens-haircut", "2026-03-17", "09:30"), today())
        .unwrap_err();

    assert!(matches!(err, GroomError::SlotUnavailable { .. }));
}

#[test]
fn past_date_rejected() {
    let s = scheduler();

    let err = s
        .book(request("alex", "mens-haircut", "2026-03-09", "09:30"), today())
        .unwrap_err();

    assert!(matches!(err, GroomError::PastDate(_)));
}

#[test]
fn booking_today_is_allowed() {
    let s = scheduler();
    // 2026-03-16 is a Monday.
    let booking = s
        .book(request("alex", "mens-haircut", MONDAY, "19:30"), d(MONDAY))
        .unwrap();
    assert_eq!(booking.date, d(MONDAY));
}

#[test]
fn unknown_service_rejected_without_fallback() {
    let s = scheduler();

    let err = s
        .book(request("alex", "mystery", MONDAY, "09:30"), today())
        .unwrap_err();
    assert!(matches!(err, GroomError::UnknownService(_)));

    let err = s
        .available_start_times("alex", "mystery", d(MONDAY))
        .unwrap_err();
    assert!(matches!(err, GroomError::UnknownService(_)));
}

#[test]
fn unknown_barber_rejected() {
    let s = scheduler();

    let err = s
        .book(request("casey", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap_err();

    assert!(matches!(err, GroomError::UnknownBarber(_)));
}

#[test]
fn missing_contact_rejected() {
    let s = scheduler();
    let mut req = request("alex", "mens-haircut", MONDAY, "09:30");
    req.customer_phone = "   ".to_string();

    let err = s.book(req, today()).unwrap_err();

    assert!(matches!(err, GroomError::MissingContact("phone")));
}

#[test]
fn concurrent_requests_for_one_slot_yield_one_booking() {
    let s = scheduler();
    let shared = &s;

    let successes = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    shared
                        .book(request("alex", "mens-haircut", MONDAY, "10:30"), today())
                        .is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count()
    });

    assert_eq!(successes, 1, "exactly one request may win the slot");
    let ledger = s.into_ledger();
    assert_eq!(ledger.bookings_for("alex", d(MONDAY)).len(), 1);
}

// ── Cancel and reschedule ───────────────────────────────────────────────────

#[test]
fn cancel_frees_the_slot() {
    let s = scheduler();
    let booking = s
        .book(request("alex", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap();

    let removed = s.cancel(booking.id).unwrap();
    assert_eq!(removed.id, booking.id);

    let slots = s
        .available_start_times("alex", "mens-haircut", d(MONDAY))
        .unwrap();
    assert!(slots.contains(&t("09:30")));

    assert!(matches!(
        s.cancel(booking.id),
        Err(GroomError::BookingNotFound(_))
    ));
}

#[test]
fn reschedule_moves_booking_and_keeps_duration() {
    let s = scheduler();
    let booking = s
        .book(request("alex", "haircut-beard", MONDAY, "09:30"), today())
        .unwrap();

    let moved = s
        .reschedule(booking.id, d(MONDAY), t("14:30"), today())
        .unwrap();

    assert_eq!(moved.id, booking.id);
    assert_eq!((moved.start, moved.end), (t("14:30"), t("15:15")));

    let slots = s
        .available_start_times("alex", "haircut-beard", d(MONDAY))
        .unwrap();
    assert!(slots.contains(&t("09:30")));
    assert!(!slots.contains(&t("14:30")));
}

#[test]
fn reschedule_into_own_slot_is_allowed() {
    let s = scheduler();
    let booking = s
        .book(request("alex", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap();

    let same = s
        .reschedule(booking.id, d(MONDAY), t("09:30"), today())
        .unwrap();

    assert_eq!(same.start, t("09:30"));
}

#[test]
fn reschedule_onto_taken_slot_rejected() {
    let s = scheduler();
    let first = s
        .book(request("alex", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap();
    s.book(request("alex", "mens-haircut", MONDAY, "10:30"), today())
        .unwrap();

    let err = s
        .reschedule(first.id, d(MONDAY), t("10:30"), today())
        .unwrap_err();

    assert!(matches!(err, GroomError::SlotUnavailable { .. }));
}

// ── Unavailability ──────────────────────────────────────────────────────────

#[test]
fn full_day_block_and_unblock() {
    let s = scheduler();

    let record = s.block("alex", d(MONDAY), None, "holiday").unwrap();
    assert!(s
        .available_start_times("alex", "mens-haircut", d(MONDAY))
        .unwrap()
        .is_empty());

    let err = s
        .book(request("alex", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap_err();
    assert!(matches!(err, GroomError::SlotUnavailable { .. }));

    s.unblock(record.id).unwrap();
    assert_eq!(
        s.available_start_times("alex", "mens-haircut", d(MONDAY))
            .unwrap()
            .len(),
        10
    );
    assert!(matches!(
        s.unblock(record.id),
        Err(GroomError::UnavailabilityNotFound(_))
    ));
}

#[test]
fn partial_block_hides_overlapping_slots() {
    let s = scheduler();
    let window = TimeWindow::parse("14:00", "16:00").unwrap();
    s.block("alex", d(MONDAY), Some(window), "training").unwrap();

    let slots = s
        .available_start_times("alex", "mens-haircut", d(MONDAY))
        .unwrap();

    assert!(!slots.contains(&t("14:30")));
    assert!(!slots.contains(&t("15:30")));
    assert!(slots.contains(&t("16:30")));
}

#[test]
fn blocking_unknown_barber_rejected() {
    let s = scheduler();
    assert!(matches!(
        s.block("casey", d(MONDAY), None, ""),
        Err(GroomError::UnknownBarber(_))
    ));
}

// ── Month view ──────────────────────────────────────────────────────────────

#[test]
fn bookable_days_skip_past_closed_and_blocked_days() {
    let s = scheduler();
    s.block("alex", d("2026-03-18"), None, "off").unwrap();

    let days = s
        .bookable_days("alex", "mens-haircut", 2026, 3, d("2026-03-16"))
        .unwrap();

    assert_eq!(days.first(), Some(&d("2026-03-16")));
    assert!(!days.contains(&d("2026-03-15")), "past day");
    assert!(!days.contains(&d("2026-03-17")), "Tuesday is closed");
    assert!(!days.contains(&d("2026-03-18")), "barber blocked");
    assert!(days.contains(&d("2026-03-19")));
    assert_eq!(days.last(), Some(&d("2026-03-30")), "the 31st is a Tuesday");
}

#[test]
fn bookable_days_rejects_bad_month() {
    let s = scheduler();
    assert!(matches!(
        s.bookable_days("alex", "mens-haircut", 2026, 13, today()),
        Err(GroomError::InvalidMonth { .. })
    ));
}

// ── Waitlist and day sheet ──────────────────────────────────────────────────

#[test]
fn waitlist_requires_contact_details() {
    let s = scheduler();
    let err = s
        .join_waitlist(WaitlistRequest {
            name: String::new(),
            phone: "+2305000000".to_string(),
            notes: String::new(),
            requested_date: Some(d(MONDAY)),
        })
        .unwrap_err();

    assert!(matches!(err, GroomError::MissingContact("name")));
}

#[test]
fn day_sheet_lists_bookings_waitlist_and_free_time() {
    let s = scheduler();
    s.book(request("sam", "mens-haircut", MONDAY, "14:30"), today())
        .unwrap();
    s.book(request("alex", "mens-haircut", MONDAY, "09:30"), today())
        .unwrap();
    for name in ["First", "Second"] {
        s.join_waitlist(WaitlistRequest {
            name: name.to_string(),
            phone: "+2305000000".to_string(),
            notes: "any afternoon".to_string(),
            requested_date: Some(d(MONDAY)),
        })
        .unwrap();
    }
    s.join_waitlist(WaitlistRequest {
        name: "Elsewhere".to_string(),
        phone: "+2305000000".to_string(),
        notes: String::new(),
        requested_date: Some(d("2026-03-19")),
    })
    .unwrap();

    let sheet = s.day_sheet(d(MONDAY));

    assert_eq!(sheet.bookings.len(), 2);
    assert_eq!(sheet.bookings[0].start, t("09:30"));
    assert_eq!(sheet.bookings[1].start, t("14:30"));

    let names: Vec<&str> = sheet.waitlist.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);

    assert_eq!(sheet.barbers.len(), 3);
    assert_eq!(sheet.barbers[0].barber.id, "alex");
    assert_eq!(sheet.barbers[0].free[0].end, t("09:30"));
    assert!(sheet.double_bookings.is_empty());
}

#[test]
fn waitlist_on_filters_by_requested_date() {
    let s = scheduler();
    for (name, date) in [("Ravi", Some(d(MONDAY))), ("Nadia", None), ("Kevin", Some(d(MONDAY)))] {
        s.join_waitlist(WaitlistRequest {
            name: name.to_string(),
            phone: " +2305000000 ".to_string(),
            notes: String::new(),
            requested_date: date,
        })
        .unwrap();
    }

    let waiting = s.waitlist_on(d(MONDAY));
    let names: Vec<&str> = waiting.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ravi", "Kevin"]);
    assert_eq!(waiting[0].phone, "+2305000000");
    assert!(s.waitlist_on(d("2026-03-18")).is_empty());
}
