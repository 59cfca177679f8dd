//! Shop configuration loaded from TOML.
//!
//! ```toml
//! name = "The Groom Room"
//! timezone = "Indian/Mauritius"
//! slot_interval_minutes = 60
//!
//! [hours]
//! mon = { open = "08:30", close = "20:30" }
//!
//! [[breaks]]
//! start = "12:30"
//! end = "13:30"
//!
//! [[barbers]]
//! id = "alex"
//! name = "Alex"
//!
//! [[services]]
//! id = "mens-haircut"
//! name = "Men's Haircut"
//! duration_minutes = 30
//! price = 100.0
//! ```

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::catalog::{Barber, BarberRoster, Service, ServiceCatalog};
use crate::error::{GroomError, Result};
use crate::schedule::{ShopCalendar, WeeklySchedule, DEFAULT_SLOT_INTERVAL_MINUTES};
use crate::window::TimeWindow;

/// The configuration the shop ships with when no file is supplied.
pub const DEFAULT_SHOP_TOML: &str = r#"name = "The Groom Room"
timezone = "Indian/Mauritius"
slot_interval_minutes = 60

[hours]
mon = { open = "08:30", close = "20:30" }
wed = { open = "08:30", close = "20:30" }
thu = { open = "08:30", close = "20:30" }
fri = { open = "08:30", close = "20:30" }
sat = { open = "08:30", close = "18:00" }
sun = { open = "08:30", close = "15:00" }

# Lunch
[[breaks]]
start = "12:30"
end = "13:30"

# Evening break
[[breaks]]
start = "17:30"
end = "18:00"

[[barbers]]
id = "alex"
name = "Alex"

[[barbers]]
id = "sam"
name = "Sam"

[[barbers]]
id = "jordan"
name = "Jordan"

[[services]]
id = "mens-haircut"
name = "Men's Haircut"
duration_minutes = 30
price = 100.0

[[services]]
id = "kids-haircut"
name = "Kids' Haircut (under 15)"
duration_minutes = 25
price = 75.0

[[services]]
id = "seniors-cut"
name = "Seniors' Cut"
duration_minutes = 25
price = 75.0

[[services]]
id = "beard-trim"
name = "Beard Trim"
duration_minutes = 20
price = 50.0

[[services]]
id = "shave"
name = "Shave Normal"
duration_minutes = 15
price = 25.0

[[services]]
id = "color-dry"
name = "Hair color / Dry"
duration_minutes = 30
price = 25.0

[[services]]
id = "haircut-color"
name = "Haircut + hair color/Dry"
duration_minutes = 45
price = 125.0

[[services]]
id = "haircut-beard"
name = "Haircut + Beard Trim"
duration_minutes = 45
price = 150.0

[[services]]
id = "haircut-shave-color"
name = "Haircut + Shave + hair color/Dry"
duration_minutes = 60
price = 175.0
"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopConfig {
    pub name: String,
    /// IANA timezone the shop's wall clock runs in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_slot_interval")]
    pub slot_interval_minutes: u32,
    #[serde(default)]
    pub hours: WeeklySchedule,
    #[serde(default)]
    pub breaks: Vec<TimeWindow>,
    #[serde(default)]
    pub barbers: Vec<Barber>,
    #[serde(default)]
    pub services: Vec<Service>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_slot_interval() -> u32 {
    DEFAULT_SLOT_INTERVAL_MINUTES
}

impl ShopConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// `GroomError::Config` if the TOML is malformed (including a window whose
    /// start is not before its end), `GroomError::InvalidConfig` if it parses
    /// but breaks an invariant.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: ShopConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in configuration, [`DEFAULT_SHOP_TOML`].
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_SHOP_TOML)
    }

    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        self.calendar().validate()?;
        self.catalog()?;
        self.roster()?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| GroomError::InvalidConfig(format!("invalid timezone: {}", self.timezone)))
    }

    /// Today's date on the shop's wall clock.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }

    pub fn calendar(&self) -> ShopCalendar {
        ShopCalendar::new(self.hours.clone(), self.breaks.clone())
            .with_slot_interval(self.slot_interval_minutes)
    }

    pub fn catalog(&self) -> Result<ServiceCatalog> {
        ServiceCatalog::new(self.services.clone())
    }

    pub fn roster(&self) -> Result<BarberRoster> {
        BarberRoster::new(self.barbers.clone())
    }
}
