//! # groom-engine
//!
//! Slot availability and booking rules for a barber shop appointment book.
//!
//! The core is a pure calculator that turns the shop's weekly hours, its
//! recurring breaks, a barber's bookings and a barber's unavailability into the
//! list of start times a customer may pick. Everything else in the crate feeds
//! it snapshots or acts on its answer.
//!
//! ## Modules
//!
//! - [`availability`] -- Free start times for one barber, service and date
//! - [`schedule`] -- Weekly opening hours, break windows, slot interval
//! - [`window`] -- Half-open time windows and the `HH:MM` format
//! - [`booking`] -- Booking, unavailability and waitlist records
//! - [`catalog`] -- Service menu and barber roster
//! - [`conflict`] -- Detect overlapping bookings
//! - [`freebusy`] -- Free windows in a barber's day for the admin view
//! - [`ledger`] -- Storage port and the in-memory ledger
//! - [`scheduler`] -- Book, cancel, reschedule, waitlist, unavailability
//! - [`config`] -- TOML shop configuration
//! - [`error`] -- Error types

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod ledger;
pub mod schedule;
pub mod scheduler;
pub mod window;

pub use availability::available_start_times;
pub use booking::{Booking, Unavailability, WaitlistEntry};
pub use catalog::{Barber, BarberRoster, Service, ServiceCatalog};
pub use config::ShopConfig;
pub use error::GroomError;
pub use ledger::{Ledger, MemoryLedger};
pub use schedule::{ShopCalendar, WeeklySchedule};
pub use scheduler::{BookingRequest, DaySheet, Scheduler, WaitlistRequest};
pub use window::TimeWindow;
