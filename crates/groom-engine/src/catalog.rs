//! Reference data: the service menu and the barbers taking appointments.

use serde::{Deserialize, Serialize};

use crate::error::{GroomError, Result};

/// One entry on the service menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
}

/// Immutable service menu, looked up by id.
///
/// Lookups never fall back to another entry: an unknown id is always an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    /// # Errors
    /// `GroomError::InvalidConfig` on duplicate ids or a zero duration.
    pub fn new(services: Vec<Service>) -> Result<Self> {
        for (i, service) in services.iter().enumerate() {
            if service.duration_minutes == 0 {
                return Err(GroomError::InvalidConfig(format!(
                    "service '{}' has zero duration",
                    service.id
                )));
            }
            if services[..i].iter().any(|s| s.id == service.id) {
                return Err(GroomError::InvalidConfig(format!(
                    "duplicate service id '{}'",
                    service.id
                )));
            }
        }
        Ok(Self { services })
    }

    pub fn get(&self, id: &str) -> Result<&Service> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| GroomError::UnknownService(id.to_string()))
    }

    pub fn duration_of(&self, id: &str) -> Result<u32> {
        self.get(id).map(|s| s.duration_minutes)
    }

    /// Services ordered by name, the way the booking form lists them.
    pub fn by_name(&self) -> Vec<&Service> {
        let mut sorted: Vec<&Service> = self.services.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// The roster of barbers, looked up by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarberRoster {
    barbers: Vec<Barber>,
}

impl BarberRoster {
    /// # Errors
    /// `GroomError::InvalidConfig` on duplicate ids.
    pub fn new(barbers: Vec<Barber>) -> Result<Self> {
        for (i, barber) in barbers.iter().enumerate() {
            if barbers[..i].iter().any(|b| b.id == barber.id) {
                return Err(GroomError::InvalidConfig(format!(
                    "duplicate barber id '{}'",
                    barber.id
                )));
            }
        }
        Ok(Self { barbers })
    }

    pub fn get(&self, id: &str) -> Result<&Barber> {
        self.barbers
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| GroomError::UnknownBarber(id.to_string()))
    }

    pub fn by_name(&self) -> Vec<&Barber> {
        let mut sorted: Vec<&Barber> = self.barbers.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }
}
