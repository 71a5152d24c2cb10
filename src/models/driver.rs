//! Driver model

use serde::{Deserialize, Serialize};

/// Driver profile
///
/// The PIN is a plaintext comparison secret, visible to the admin on the
/// management screen. Reports reference drivers by id; deleting a driver
/// leaves its reports in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Vehicle descriptor, e.g. plate number or model
    #[serde(default)]
    pub vehicle: String,
    pub pin: String,
}

impl Driver {
    /// PIN check for driver login
    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin == pin
    }
}

/// Driver profile without the PIN, returned from login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverInfo {
    pub id: String,
    pub name: String,
    pub vehicle: String,
}

impl From<Driver> for DriverInfo {
    fn from(d: Driver) -> Self {
        Self {
            id: d.id,
            name: d.name,
            vehicle: d.vehicle,
        }
    }
}
