//! The shop's operating calendar: weekly opening hours, recurring breaks and
//! the slot grid.
//!
//! Breaks are a flat list of exclusion windows applied to every open day. A
//! break that falls outside a given day's hours simply has no effect that day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{GroomError, Result};
use crate::window::TimeWindow;

/// Default slot granularity in minutes.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 60;

/// Largest accepted slot interval: one grid step per day.
pub const MAX_SLOT_INTERVAL_MINUTES: u32 = 24 * 60;

/// Opening hours per weekday. `None` means the shop is closed that day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeeklySchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mon: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tue: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wed: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thu: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fri: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun: Option<TimeWindow>,
}

impl WeeklySchedule {
    pub fn hours(&self, weekday: Weekday) -> Option<TimeWindow> {
        match weekday {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }

    /// Set (or clear, with `None`) the hours for one weekday.
    pub fn set_hours(&mut self, weekday: Weekday, hours: Option<TimeWindow>) {
        let slot = match weekday {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        };
        *slot = hours;
    }

    pub fn hours_on(&self, date: NaiveDate) -> Option<TimeWindow> {
        self.hours(date.weekday())
    }

    pub fn is_closed(&self, weekday: Weekday) -> bool {
        self.hours(weekday).is_none()
    }

    fn open_days(&self) -> impl Iterator<Item = TimeWindow> + '_ {
        [
            self.mon, self.tue, self.wed, self.thu, self.fri, self.sat, self.sun,
        ]
        .into_iter()
        .flatten()
    }
}

/// Everything the availability calculator needs to know about the shop itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopCalendar {
    pub hours: WeeklySchedule,
    #[serde(default)]
    pub breaks: Vec<TimeWindow>,
    #[serde(default = "default_slot_interval")]
    pub slot_interval_minutes: u32,
}

fn default_slot_interval() -> u32 {
    DEFAULT_SLOT_INTERVAL_MINUTES
}

impl ShopCalendar {
    pub fn new(hours: WeeklySchedule, breaks: Vec<TimeWindow>) -> Self {
        Self {
            hours,
            breaks,
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
        }
    }

    pub fn with_slot_interval(mut self, minutes: u32) -> Self {
        self.slot_interval_minutes = minutes;
        self
    }

    /// Check the invariants serde cannot express on its own.
    ///
    /// # Errors
    /// `GroomError::InvalidConfig` if the slot interval is zero or longer than a
    /// day, or a break does not fit inside the hours of at least one open day.
    pub fn validate(&self) -> Result<()> {
        if self.slot_interval_minutes == 0
            || self.slot_interval_minutes > MAX_SLOT_INTERVAL_MINUTES
        {
            return Err(GroomError::InvalidConfig(format!(
                "slot_interval_minutes must be between 1 and {}, got {}",
                MAX_SLOT_INTERVAL_MINUTES, self.slot_interval_minutes
            )));
        }
        for brk in &self.breaks {
            if !self.hours.open_days().any(|day| day.covers(brk)) {
                return Err(GroomError::InvalidConfig(format!(
                    "break {} lies outside every day's opening hours",
                    brk
                )));
            }
        }
        Ok(())
    }
}
