//! Error types for groom-engine operations.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GroomError {
    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Unknown barber: {0}")]
    UnknownBarber(String),

    #[error("Invalid time window: {start} must be before {end}")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },

    #[error("Invalid shop configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Cannot book appointments for past dates ({0})")]
    PastDate(NaiveDate),

    #[error("The {start} slot on {date} is no longer available")]
    SlotUnavailable { date: NaiveDate, start: NaiveTime },

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Unavailability record not found: {0}")]
    UnavailabilityNotFound(Uuid),

    /// Name and phone are both required to book or join the waitlist.
    #[error("Missing contact detail: {0}")]
    MissingContact(&'static str),

    #[error("Configuration parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Data file error: {0}")]
    Data(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GroomError>;
