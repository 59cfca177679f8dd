//! WASM bindings for groom-engine.
//!
//! Exposes the availability calculator and the free-window view to the booking
//! page via `wasm-bindgen`, so the month grid and time picker can be filled in
//! client side. All complex types are passed as JSON strings: the calendar in
//! the same shape as [`groom_engine::ShopCalendar`], bookings and unavailability
//! in the same shape as the CLI's data file.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p groom-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg \
//!   target/wasm32-unknown-unknown/release/groom_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveTime};
use groom_engine::booking::{Booking, Unavailability};
use groom_engine::freebusy;
use groom_engine::window::TIME_FORMAT;
use groom_engine::{ShopCalendar, ShopConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers: parse JSON inputs
// ---------------------------------------------------------------------------

fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn parse_calendar(json: &str) -> Result<ShopCalendar, JsValue> {
    let calendar: ShopCalendar =
        serde_json::from_str(json).map_err(|e| js_err("Invalid calendar JSON", e))?;
    calendar
        .validate()
        .map_err(|e| js_err("Invalid calendar", e))?;
    Ok(calendar)
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| js_err(&format!("Invalid date '{}'", s), e))
}

fn parse_bookings(json: &str) -> Result<Vec<Booking>, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err("Invalid bookings JSON", e))
}

fn parse_unavailability(json: &str) -> Result<Vec<Unavailability>, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err("Invalid unavailability JSON", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err("Serialization error", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Bookable start times for one barber on one date.
///
/// Returns a JSON array of `{start, end}` objects with `HH:MM` strings, where
/// `end` is `start + duration_minutes`.
///
/// # Arguments
/// - `calendar_json` -- the shop calendar (`hours`, `breaks`, `slot_interval_minutes`)
/// - `date` -- `YYYY-MM-DD`
/// - `duration_minutes` -- length of the chosen service
/// - `bookings_json` -- the barber's bookings for the date
/// - `unavailability_json` -- the barber's unavailability records for the date
#[wasm_bindgen(js_name = "availableStartTimes")]
pub fn available_start_times(
    calendar_json: &str,
    date: &str,
    duration_minutes: u32,
    bookings_json: &str,
    unavailability_json: &str,
) -> Result<String, JsValue> {
    let calendar = parse_calendar(calendar_json)?;
    let date = parse_date(date)?;
    let bookings = parse_bookings(bookings_json)?;
    let blocks = parse_unavailability(unavailability_json)?;

    let length = chrono::Duration::minutes(i64::from(duration_minutes));
    let slots: Vec<SlotDto> =
        groom_engine::available_start_times(&calendar, date, duration_minutes, &bookings, &blocks)
            .into_iter()
            .map(|start: NaiveTime| SlotDto {
                start: start.format(TIME_FORMAT).to_string(),
                end: (start + length).format(TIME_FORMAT).to_string(),
            })
            .collect();

    to_json(&slots)
}

/// Free stretches of a barber's working day.
///
/// Returns a JSON array of `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "freeWindows")]
pub fn free_windows(
    calendar_json: &str,
    date: &str,
    bookings_json: &str,
    unavailability_json: &str,
) -> Result<String, JsValue> {
    let calendar = parse_calendar(calendar_json)?;
    let date = parse_date(date)?;
    let bookings = parse_bookings(bookings_json)?;
    let blocks = parse_unavailability(unavailability_json)?;

    to_json(&freebusy::free_windows(&calendar, date, &bookings, &blocks))
}

/// The built-in shop calendar as JSON, for pages that ship without a config.
#[wasm_bindgen(js_name = "defaultCalendar")]
pub fn default_calendar() -> Result<String, JsValue> {
    let config = ShopConfig::builtin().map_err(|e| js_err("Invalid built-in config", e))?;
    to_json(&config.calendar())
}
