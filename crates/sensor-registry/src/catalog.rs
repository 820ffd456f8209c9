use tracing::warn;
use w1_transport::{DeviceEntry, DeviceId, DeviceKind, W1Bus};

/// Identity prefix carried by DS18B20-family devices.
pub const TEMP_FAMILY_PREFIX: &str = "28-";

/// The discovery filter: a device is cataloged when the bus reports it as
/// a temperature sensor and its identity carries the DS18B20 family
/// prefix. The identity stays an opaque token; the prefix is a substring
/// check, not a parse.
pub fn is_temperature_sensor(entry: &DeviceEntry) -> bool {
    entry.kind == DeviceKind::TemperatureSensor
        && entry.id.as_str().contains(TEMP_FAMILY_PREFIX)
}

/// The current set of temperature sensors visible on the bus.
///
/// Rebuilt from scratch on every [`refresh`](SensorCatalog::refresh):
/// devices that left the bus drop out, devices that joined show up.
/// Starts empty and stays empty until the first refresh.
pub struct SensorCatalog<'bus, B> {
    bus: &'bus B,
    devices: Vec<DeviceId>,
}

impl<'bus, B: W1Bus> SensorCatalog<'bus, B> {
    pub fn new(bus: &'bus B) -> Self {
        Self {
            bus,
            devices: Vec::new(),
        }
    }

    /// Re-enumerate the bus, replacing the catalog contents.
    ///
    /// Enumeration order is kept and duplicate identities keep their first
    /// occurrence. A failed enumeration leaves the catalog empty instead
    /// of failing the caller.
    pub fn refresh(&mut self) {
        self.devices.clear();
        let entries = match self.bus.list_devices() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("bus enumeration failed: {e}");
                return;
            }
        };
        for entry in entries {
            if !is_temperature_sensor(&entry) {
                continue;
            }
            if self.devices.contains(&entry.id) {
                continue;
            }
            self.devices.push(entry.id);
        }
    }

    /// Snapshot of the catalog as of the last refresh.
    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }
}
