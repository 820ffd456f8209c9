use core::fmt;
use serde::{Deserialize, Serialize};

/// Bus-assigned device identity token (e.g. `28-0000123456ab`).
///
/// The token is the family-code prefix followed by the device serial, as
/// named by the bus master. It is opaque to everything above the transport:
/// compared by exact string match, never parsed.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the bus master reports a device to be capable of.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeviceKind {
    TemperatureSensor,
    Other,
}

/// One enumerated bus device.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeviceEntry {
    pub id: DeviceId,
    pub kind: DeviceKind,
}

impl DeviceEntry {
    pub fn new(id: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            id: DeviceId::new(id),
            kind,
        }
    }
}
