use crate::{DeviceEntry, DeviceId, Result};

/// A minimal blocking 1-Wire bus master interface.
///
/// The bus master owns reset, addressing and CRC-checked transfer; this
/// trait only exposes device enumeration and calibrated reads.
pub trait W1Bus {
    /// Open a bus by path (e.g., "/sys/bus/w1/devices").
    fn open(path: &str) -> Result<Self>
    where
        Self: Sized;

    /// Enumerate all devices currently visible on the bus.
    ///
    /// An empty bus yields an empty list, not an error. Order is
    /// backend-defined.
    fn list_devices(&self) -> Result<Vec<DeviceEntry>>;

    /// Current Celsius value for the named device, or `None` when the
    /// device cannot be read right now (unplugged, failed CRC).
    fn read_celsius(&self, id: &DeviceId) -> Result<Option<f64>>;
}
